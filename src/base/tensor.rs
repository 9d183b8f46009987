use super::Grid;
use crate::StrError;
use russell_lab::vec_inner;
use russell_tensor::{t2_dyad_t2_update, Mandel, Tensor2, Tensor4, IDENTITY2, P_SYMDEV, SQRT_3};

/// Defines the Mandel representation of the stress, strain and tangent tensors
///
/// Stresses and strains are symmetric; the tangent has the minor symmetries.
pub const MANDEL: Mandel = Mandel::Symmetric;

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Defines an alias to P_SYMDEV
const PSD: &[[f64; 9]; 9] = &P_SYMDEV;

/// Holds the components of a second-order tensor as a 3 × 3 array (e.g., for JSON files)
pub type Array2 = [[f64; 3]; 3];

/// Allocates a symmetric second-order tensor from its components
pub fn t2_from_array(a: &Array2) -> Result<Tensor2, StrError> {
    Tensor2::from_matrix(a, MANDEL)
}

/// Returns the components of a second-order tensor
pub fn t2_to_array(a: &Tensor2) -> Array2 {
    let mut res = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            res[i][j] = a.get(i, j);
        }
    }
    res
}

/// Returns the second-order identity tensor I
pub fn i2(mandel: Mandel) -> Tensor2 {
    let mut res = Tensor2::new(mandel);
    let nd = res.dim();
    let vec = res.vector_mut();
    for i in 0..nd {
        vec[i] = I[i];
    }
    res
}

/// Returns the dyadic product of identity tensors II = I ⊗ I
///
/// ```text
/// IIᵢⱼₖₗ = δᵢⱼ δₖₗ
/// ```
pub fn ii(mandel: Mandel) -> Tensor4 {
    let mut res = Tensor4::new(mandel);
    let nd = res.matrix().nrow();
    let mat = res.matrix_mut();
    for i in 0..nd {
        for j in 0..nd {
            mat.set(i, j, I[i] * I[j]);
        }
    }
    res
}

/// Returns the fourth-order identity tensor such that I4 : A = A
///
/// ```text
/// I4ᵢⱼₖₗ = δᵢₖ δⱼₗ
/// ```
///
/// I4 does not have the minor symmetries; thus the general Mandel representation is used.
pub fn i4() -> Tensor4 {
    let mut res = Tensor4::new(Mandel::General);
    let mat = res.matrix_mut();
    for i in 0..9 {
        mat.set(i, i, 1.0);
    }
    res
}

/// Returns the right-transposition tensor such that I4rt : A = Aᵀ
///
/// ```text
/// I4rtᵢⱼₖₗ = δᵢₗ δⱼₖ
/// ```
///
/// Uses the general Mandel representation, where the transposition flips the skew components.
pub fn i4rt() -> Tensor4 {
    let mut res = Tensor4::new(Mandel::General);
    let mat = res.matrix_mut();
    for i in 0..9 {
        mat.set(i, i, if i < 6 { 1.0 } else { -1.0 });
    }
    res
}

/// Returns the symmetric fourth-order identity tensor
///
/// ```text
/// I4s = (I4 + I4rt) / 2
/// ```
///
/// With `Mandel::General`, I4s maps a displacement gradient to the (small) strain tensor: ε = I4s : ∇u
pub fn i4s(mandel: Mandel) -> Tensor4 {
    let mut res = Tensor4::new(mandel);
    let nd = res.matrix().nrow();
    let mat = res.matrix_mut();
    for i in 0..nd {
        mat.set(i, i, if i < 6 { 1.0 } else { 0.0 });
    }
    res
}

/// Returns the symmetric deviatoric projector
///
/// ```text
/// I4d = I4s - II / 3
/// ```
pub fn i4d(mandel: Mandel) -> Tensor4 {
    let mut res = Tensor4::new(mandel);
    let nd = res.matrix().nrow();
    let mat = res.matrix_mut();
    for i in 0..nd {
        for j in 0..nd {
            mat.set(i, j, PSD[i][j]);
        }
    }
    res
}

/// Returns the trace of a tensor: tr(A) = Aᵢᵢ
#[inline]
pub fn trace(a: &Tensor2) -> f64 {
    a.invariant_eps_v()
}

/// Returns the hydrostatic (mean) part of a tensor: tr(A) / 3
#[inline]
pub fn hydrostatic(a: &Tensor2) -> f64 {
    a.invariant_sigma_m()
}

/// Returns the deviatoric part of a tensor: A - tr(A)/3 I
pub fn deviatoric(a: &Tensor2) -> Tensor2 {
    let mut dev = Tensor2::new(a.mandel());
    a.deviator(&mut dev);
    dev
}

/// Returns the double-dot product A : B = Aᵢⱼ Bᵢⱼ
///
/// Both tensors must use the same Mandel representation.
#[inline]
pub fn ddot(a: &Tensor2, b: &Tensor2) -> f64 {
    vec_inner(a.vector(), b.vector())
}

/// Returns the equivalent deviatoric strain
///
/// ```text
/// εd = √(½ εᵈ : εᵈ)    with    εᵈ = dev(ε)
/// ```
///
/// For simple shear (ε₀₁ = ε₁₀ = γ), εd = γ. This invariant is √3/2 times the von Mises
/// equivalent strain `Tensor2::invariant_eps_d`.
pub fn epsd(eps: &Tensor2) -> f64 {
    eps.invariant_eps_d() * SQRT_3 / 2.0
}

/// Returns the equivalent deviatoric stress
///
/// ```text
/// σd = √(2 σᵈ : σᵈ)    with    σᵈ = dev(σ)
/// ```
///
/// This invariant is 2/√3 times the von Mises stress `Tensor2::invariant_sigma_d`.
pub fn sigd(sig: &Tensor2) -> f64 {
    sig.invariant_sigma_d() * 2.0 / SQRT_3
}

/// Returns the dyadic product (A ⊗ B)ᵢⱼₖₗ = Aᵢⱼ Bₖₗ
pub fn dyad(a: &Tensor2, b: &Tensor2) -> Tensor4 {
    let mut res = Tensor4::new(a.mandel());
    t2_dyad_t2_update(&mut res, 1.0, a, b);
    res
}

/// Returns the hydrostatic part of each tensor in a grid
pub fn hydrostatic_grid(aa: &Grid<Tensor2>) -> Grid<f64> {
    aa.map(hydrostatic)
}

/// Returns the deviatoric part of each tensor in a grid
pub fn deviatoric_grid(aa: &Grid<Tensor2>) -> Grid<Tensor2> {
    aa.map(deviatoric)
}

/// Returns the equivalent deviatoric strain of each tensor in a grid
pub fn epsd_grid(eps: &Grid<Tensor2>) -> Grid<f64> {
    eps.map(epsd)
}

/// Returns the equivalent deviatoric stress of each tensor in a grid
pub fn sigd_grid(sig: &Grid<Tensor2>) -> Grid<f64> {
    sig.map(sigd)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use russell_lab::{approx_eq, mat_approx_eq, vec_approx_eq};
    use russell_tensor::t4_ddot_t2;

    fn sample_general() -> Tensor2 {
        Tensor2::from_matrix(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]], Mandel::General).unwrap()
    }

    fn sample_symmetric() -> Tensor2 {
        t2_from_array(&[[0.12, 0.02, -0.01], [0.02, 0.08, 0.03], [-0.01, 0.03, -0.05]]).unwrap()
    }

    // B = D : A
    fn contract(dd: &Tensor4, a: &Tensor2) -> Tensor2 {
        let mut b = Tensor2::new(a.mandel());
        t4_ddot_t2(&mut b, 1.0, dd, a);
        b
    }

    #[test]
    fn array_conversion_works() {
        let a = [[0.12, 0.02, -0.01], [0.02, 0.08, 0.03], [-0.01, 0.03, -0.05]];
        let tt = t2_from_array(&a).unwrap();
        assert_eq!(tt.dim(), 6);
        let back = t2_to_array(&tt);
        for i in 0..3 {
            for j in 0..3 {
                approx_eq(back[i][j], a[i][j], 1e-15);
            }
        }
    }

    #[test]
    fn trace_and_hydrostatic_work() {
        let a = sample_general();
        approx_eq(trace(&a), 15.0, 1e-15);
        approx_eq(hydrostatic(&a), 5.0, 1e-15);
    }

    #[test]
    fn deviatoric_works() {
        let a = sample_general();
        let d = deviatoric(&a);
        approx_eq(trace(&d), 0.0, 1e-14);
        approx_eq(d.get(0, 0), -4.0, 1e-14);
        approx_eq(d.get(1, 1), 0.0, 1e-14);
        approx_eq(d.get(2, 2), 4.0, 1e-14);
        approx_eq(d.get(0, 1), 2.0, 1e-14);
        approx_eq(d.get(2, 1), 8.0, 1e-14);
    }

    #[test]
    fn epsd_and_sigd_work() {
        let gamma = 0.02;
        let epsm = 0.12;
        let eps = t2_from_array(&[[epsm, gamma, 0.0], [gamma, epsm, 0.0], [0.0, 0.0, epsm]]).unwrap();
        approx_eq(epsd(&eps), gamma, 1e-15);
        approx_eq(sigd(&eps), 2.0 * gamma, 1e-15);

        // εd = √(½ εᵈ:εᵈ) and σd = √(2 σᵈ:σᵈ)
        let a = sample_symmetric();
        let d = deviatoric(&a);
        approx_eq(epsd(&a), f64::sqrt(0.5 * ddot(&d, &d)), 1e-15);
        approx_eq(sigd(&a), f64::sqrt(2.0 * ddot(&d, &d)), 1e-15);

        // hydrostatic tensors have no deviatoric part
        let p = i2(MANDEL);
        approx_eq(epsd(&p), 0.0, 1e-15);
        approx_eq(sigd(&p), 0.0, 1e-15);
    }

    #[test]
    fn unit_tensors_work() {
        let a = sample_general();

        // I : A = tr(A)
        approx_eq(ddot(&i2(Mandel::General), &a), 15.0, 1e-14);

        // I4 : A = A
        let res = contract(&i4(), &a);
        vec_approx_eq(res.vector(), a.vector(), 1e-15);

        // I4rt : A = Aᵀ
        let res = contract(&i4rt(), &a);
        for i in 0..3 {
            for j in 0..3 {
                approx_eq(res.get(i, j), a.get(j, i), 1e-14);
            }
        }

        // I4s : A = sym(A)
        let res = contract(&i4s(Mandel::General), &a);
        for i in 0..3 {
            for j in 0..3 {
                approx_eq(res.get(i, j), 0.5 * (a.get(i, j) + a.get(j, i)), 1e-14);
            }
        }

        // I4d : A = dev(sym(A))
        let res = contract(&i4d(Mandel::General), &a);
        let dev = deviatoric(&contract(&i4s(Mandel::General), &a));
        vec_approx_eq(res.vector(), dev.vector(), 1e-14);

        // II : A = tr(A) I
        let res = contract(&ii(Mandel::General), &a);
        for i in 0..3 {
            for j in 0..3 {
                let correct = if i == j { 15.0 } else { 0.0 };
                approx_eq(res.get(i, j), correct, 1e-14);
            }
        }
    }

    #[test]
    fn symmetric_unit_tensors_work() {
        let a = sample_symmetric();
        let res = contract(&i4s(MANDEL), &a);
        vec_approx_eq(res.vector(), a.vector(), 1e-15);
        let res = contract(&i4d(MANDEL), &a);
        vec_approx_eq(res.vector(), deviatoric(&a).vector(), 1e-15);
        let dd = i4d(MANDEL);
        approx_eq(dd.get(0, 0, 0, 0), 2.0 / 3.0, 1e-15);
        approx_eq(dd.get(0, 1, 0, 1), 0.5, 1e-15);
        approx_eq(dd.get(0, 1, 1, 0), 0.5, 1e-15);
        approx_eq(dd.get(0, 0, 1, 1), -1.0 / 3.0, 1e-15);
        let m = ii(MANDEL);
        approx_eq(m.get(0, 0, 1, 1), 1.0, 1e-15);
        approx_eq(m.get(0, 1, 0, 1), 0.0, 1e-15);
    }

    #[test]
    fn ddot_and_dyad_work() {
        let a = sample_symmetric();
        let b = t2_from_array(&[[1.0, 2.0, 3.0], [2.0, 5.0, 6.0], [3.0, 6.0, 9.0]]).unwrap();
        let mut correct = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                correct += a.get(i, j) * b.get(i, j);
            }
        }
        approx_eq(ddot(&a, &b), correct, 1e-15);

        // (A ⊗ B) : A = (B : A) A
        let res = contract(&dyad(&a, &b), &a);
        let s = ddot(&b, &a);
        for i in 0..3 {
            for j in 0..3 {
                approx_eq(res.get(i, j), s * a.get(i, j), 1e-14);
            }
        }

        // I ⊗ I = II
        let id = i2(MANDEL);
        mat_approx_eq(dyad(&id, &id).matrix(), ii(MANDEL).matrix(), 1e-15);
    }

    #[test]
    fn grid_versions_work() {
        let a = sample_symmetric();
        let grid = Grid::new(2, 3, a.clone());
        let m = hydrostatic_grid(&grid);
        let d = deviatoric_grid(&grid);
        let e = epsd_grid(&grid);
        let s = sigd_grid(&grid);
        assert_eq!(m.dims(), (2, 3));
        for e_ in 0..2 {
            for q in 0..3 {
                assert_eq!(m.get(e_, q), &hydrostatic(&a));
                vec_approx_eq(d.get(e_, q).vector(), deviatoric(&a).vector(), 1e-15);
                assert_eq!(e.get(e_, q), &epsd(&a));
                assert_eq!(s.get(e_, q), &sigd(&a));
            }
        }
    }
}
