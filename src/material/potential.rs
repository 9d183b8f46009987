use crate::base::{deviatoric, epsd, hydrostatic, Kind, MANDEL};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4, IDENTITY2, P_SYMDEV};

/// Defines the equivalent deviatoric strain below which the loading direction is undefined
///
/// Below this value the deviatoric stress is exactly zero.
pub const EPSD_ZERO: f64 = 1e-15;

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Defines an alias to P_SYMDEV
const PSD: &[[f64; 9]; 9] = &P_SYMDEV;

/// Number of components of a symmetric tensor in Mandel representation
const NCP: usize = 6;

/// Specifies the essential functions of a potential-energy based material point
///
/// All functions are pure: the response depends on the current strain only. All tensors
/// use the symmetric Mandel representation ([MANDEL]).
pub trait Potential: Send + Sync {
    /// Returns the kind of potential
    fn kind(&self) -> Kind;

    /// Returns the bulk modulus K
    fn bulk(&self) -> f64;

    /// Returns the shear modulus G
    fn shear(&self) -> f64;

    /// Computes the stress tensor σ = ∂ψ/∂ε
    fn stress(&self, sig: &mut Tensor2, eps: &Tensor2) -> Result<(), StrError>;

    /// Computes the stress tensor σ and the tangent modulus C = ∂²ψ/∂ε∂ε together
    fn tangent(&self, sig: &mut Tensor2, dd: &mut Tensor4, eps: &Tensor2) -> Result<(), StrError>;

    /// Computes the potential energy ψ(ε)
    fn energy(&self, eps: &Tensor2) -> Result<f64, StrError>;

    /// Returns the index of the current yield interval
    fn find(&self, eps: &Tensor2) -> Result<usize, StrError>;

    /// Returns the current plastic strain (anchor of the current interval)
    fn epsp(&self, eps: &Tensor2) -> Result<f64, StrError>;

    /// Returns the yield strain at index i
    fn epsy(&self, i: usize) -> Result<f64, StrError>;

    /// Returns the yield strain bounding the current interval from below: εy[find(ε)]
    fn epsy_neg(&self, eps: &Tensor2) -> Result<f64, StrError> {
        let i = self.find(eps)?;
        self.epsy(i)
    }

    /// Returns the yield strain bounding the current interval from above: εy[find(ε) + 1]
    fn epsy_pos(&self, eps: &Tensor2) -> Result<f64, StrError> {
        let i = self.find(eps)?;
        self.epsy(i + 1)
    }

    /// Returns a new stress tensor
    fn calc_stress(&self, eps: &Tensor2) -> Result<Tensor2, StrError> {
        let mut sig = Tensor2::new(MANDEL);
        self.stress(&mut sig, eps)?;
        Ok(sig)
    }

    /// Returns a new stress tensor and a new tangent modulus
    fn calc_tangent(&self, eps: &Tensor2) -> Result<(Tensor2, Tensor4), StrError> {
        let mut sig = Tensor2::new(MANDEL);
        let mut dd = Tensor4::new(MANDEL);
        self.tangent(&mut sig, &mut dd, eps)?;
        Ok((sig, dd))
    }
}

/// Holds a deviatoric potential V(εd) and its first two derivatives
#[derive(Clone, Copy, Debug)]
pub(crate) struct DeviatoricPotential {
    /// V
    pub v: f64,

    /// dV/dεd
    pub dv: f64,

    /// d²V/dεd²
    pub d2v: f64,
}

/// Holds the volumetric/deviatoric split of the strain tensor
pub(crate) struct StrainSplit {
    /// Mean strain εm = tr(ε)/3
    pub epsm: f64,

    /// Deviatoric strain εᵈ = ε - εm I
    pub dev: Tensor2,

    /// Equivalent deviatoric strain εd = √(½ εᵈ:εᵈ)
    pub epsd: f64,
}

impl StrainSplit {
    pub fn new(eps: &Tensor2) -> Result<Self, StrError> {
        if eps.dim() != NCP {
            return Err("strain tensor must use the symmetric Mandel representation");
        }
        Ok(StrainSplit {
            epsm: hydrostatic(eps),
            dev: deviatoric(eps),
            epsd: epsd(eps),
        })
    }
}

/// Returns the volumetric energy U = 9/2 K εm²
#[inline]
pub(crate) fn volumetric_energy(kk: f64, epsm: f64) -> f64 {
    4.5 * kk * epsm * epsm
}

/// Computes the stress given the derivative of the deviatoric potential
///
/// ```text
/// σ = 3 K εm I + V'/(2 εd) εᵈ
/// ```
///
/// The deviatoric part vanishes if εd ≤ EPSD_ZERO.
pub(crate) fn deviatoric_stress(
    sig: &mut Tensor2,
    kk: f64,
    split: &StrainSplit,
    pot: &DeviatoricPotential,
) -> Result<(), StrError> {
    let a = if split.epsd <= EPSD_ZERO {
        0.0
    } else {
        pot.dv / (2.0 * split.epsd)
    };
    set_stress(sig, 3.0 * kk * split.epsm, a, &split.dev)
}

/// Sets σ = p I + a εᵈ
pub(crate) fn set_stress(sig: &mut Tensor2, p: f64, a: f64, dev: &Tensor2) -> Result<(), StrError> {
    if sig.dim() != NCP {
        return Err("stress tensor must use the symmetric Mandel representation");
    }
    let s = dev.vector();
    let vec = sig.vector_mut();
    for i in 0..NCP {
        vec[i] = p * I[i] + a * s[i];
    }
    Ok(())
}

/// Computes the tangent modulus given the deviatoric potential
///
/// ```text
/// C = K I⊗I + V'/(2 εd) I4d + (εd V'' - V')/(4 εd³) εᵈ⊗εᵈ
/// ```
///
/// If εd ≤ EPSD_ZERO, the limit C = K I⊗I + V''/2 I4d is used.
pub(crate) fn deviatoric_tangent(
    dd: &mut Tensor4,
    kk: f64,
    split: &StrainSplit,
    pot: &DeviatoricPotential,
) -> Result<(), StrError> {
    if dd.matrix().nrow() != NCP {
        return Err("tangent tensor must use the symmetric Mandel representation");
    }
    let e = split.epsd;
    let (a, b) = if e <= EPSD_ZERO {
        (0.5 * pot.d2v, 0.0)
    } else {
        (pot.dv / (2.0 * e), (e * pot.d2v - pot.dv) / (4.0 * e * e * e))
    };
    let s = split.dev.vector();
    let mat = dd.matrix_mut();
    for i in 0..NCP {
        for j in 0..NCP {
            mat.set(i, j, kk * I[i] * I[j] + a * PSD[i][j] + b * s[i] * s[j]);
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
