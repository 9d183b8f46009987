use qpot3d::base::{epsd, SampleParams};
use qpot3d::material::{Cusp, Potential, Smooth};
use qpot3d::StrError;
use russell_lab::math::PI;
use russell_lab::{approx_eq, mat_approx_eq, vec_approx_eq};

const KK: f64 = 12.3;
const GG: f64 = 45.6;
const EPSY: [f64; 3] = [0.01, 0.03, 0.10];

#[test]
fn test_cusp_and_smooth_agree_at_anchors() -> Result<(), StrError> {
    let cusp = Cusp::new(KK, GG, &EPSY)?;
    let smooth = Smooth::new(KK, GG, &EPSY)?;
    for (anchor, width) in [(0.02, 0.01), (0.065, 0.035)] {
        let eps = SampleParams::strain_general(0.005, anchor);
        assert_eq!(cusp.find(&eps)?, smooth.find(&eps)?);
        approx_eq(cusp.epsp(&eps)?, anchor, 1e-15);
        approx_eq(smooth.epsp(&eps)?, anchor, 1e-15);
        let (sig_c, dd_c) = cusp.calc_tangent(&eps)?;
        let (sig_s, dd_s) = smooth.calc_tangent(&eps)?;
        vec_approx_eq(sig_c.vector(), sig_s.vector(), 1e-10);
        mat_approx_eq(dd_c.matrix(), dd_s.matrix(), 1e-6);

        // the minima differ: -2 G Δ² (cusp) and -8 G Δ²/π² (smooth)
        let diff = smooth.energy(&eps)? - cusp.energy(&eps)?;
        approx_eq(diff, 2.0 * GG * width * width * (1.0 - 4.0 / (PI * PI)), 1e-12);
    }
    Ok(())
}

#[test]
fn test_cusp_and_smooth_agree_at_yield_strains() -> Result<(), StrError> {
    let cusp = Cusp::new(KK, GG, &EPSY)?;
    let smooth = Smooth::new(KK, GG, &EPSY)?;
    let epsm = -0.002;
    let volumetric = 4.5 * KK * epsm * epsm;
    for epsy in [0.01, 0.03] {
        for delta in [-1e-10, 0.0, 1e-10] {
            let eps = SampleParams::strain_shear(epsm, epsy + delta);
            approx_eq(cusp.energy(&eps)?, volumetric, 1e-10);
            approx_eq(smooth.energy(&eps)?, volumetric, 1e-10);
        }
    }
    Ok(())
}

#[test]
fn test_smooth_is_continuous_across_yield_strains() -> Result<(), StrError> {
    let smooth = Smooth::new(KK, GG, &EPSY)?;
    for epsy in [0.01, 0.03] {
        let left = SampleParams::strain_shear(0.0, epsy - 1e-12);
        let right = SampleParams::strain_shear(0.0, epsy + 1e-12);
        assert_eq!(smooth.find(&right)?, smooth.find(&left)? + 1);
        let (sig_l, dd_l) = smooth.calc_tangent(&left)?;
        let (sig_r, dd_r) = smooth.calc_tangent(&right)?;
        vec_approx_eq(sig_l.vector(), sig_r.vector(), 1e-10);
        mat_approx_eq(dd_l.matrix(), dd_r.matrix(), 1e-4);
    }
    Ok(())
}

#[test]
fn test_smooth_stays_bounded_beyond_the_yield_strains() -> Result<(), StrError> {
    let smooth = Smooth::new(KK, GG, &EPSY)?;
    let cusp = Cusp::new(KK, GG, &EPSY)?;

    // continuous at the last yield strain
    let left = SampleParams::strain_shear(0.0, 0.10 - 1e-12);
    let right = SampleParams::strain_shear(0.0, 0.10 + 1e-12);
    let sig_l = smooth.calc_stress(&left)?;
    let sig_r = smooth.calc_stress(&right)?;
    vec_approx_eq(sig_l.vector(), sig_r.vector(), 1e-10);
    approx_eq(smooth.energy(&left)?, smooth.energy(&right)?, 1e-15);

    // grows like the elastic response, never faster than the cusp response
    let mut previous = 0.0;
    for k in 1..50 {
        let gamma = 0.10 + 0.02 * (k as f64);
        let eps = SampleParams::strain_shear(0.0, gamma);
        let tau = smooth.calc_stress(&eps)?.get(0, 1);
        approx_eq(tau, 2.0 * GG * (gamma - 0.10), 1e-10);
        assert!(tau > previous);
        assert!(tau < cusp.calc_stress(&eps)?.get(0, 1));
        previous = tau;
    }
    Ok(())
}

#[test]
fn test_cusp_jumps_across_yield_strains() -> Result<(), StrError> {
    let cusp = Cusp::new(KK, GG, &EPSY)?;
    let left = SampleParams::strain_shear(0.0, 0.01 - 1e-12);
    let right = SampleParams::strain_shear(0.0, 0.01 + 1e-12);

    // σ₀₁ = 2 G (γ - εp) with εp = 0 on the left and εp = 0.02 on the right
    let (sig_l, dd_l) = cusp.calc_tangent(&left)?;
    let (sig_r, dd_r) = cusp.calc_tangent(&right)?;
    approx_eq(sig_l.get(0, 1), 2.0 * GG * 0.01, 1e-9);
    approx_eq(sig_r.get(0, 1), -2.0 * GG * 0.01, 1e-9);

    // the stiffness C₀₂₀₂ orthogonal to the loading direction changes from G to -G
    approx_eq(dd_l.get(0, 2, 0, 2), GG, 1e-8);
    approx_eq(dd_r.get(0, 2, 0, 2), -GG, 1e-6);
    Ok(())
}

#[test]
fn test_find_brackets_the_equivalent_strain() -> Result<(), StrError> {
    let cusp = Cusp::new(KK, GG, &EPSY)?;
    let n = 97;
    for k in 0..n {
        // covers [-0.01, 0.10) without reaching the upper clamp boundary
        let target = 0.0999 * (k as f64) / ((n - 1) as f64);
        let eps = SampleParams::strain_general(0.01, target);
        let value = epsd(&eps);
        let i = cusp.find(&eps)?;
        assert!(cusp.epsy(i)? <= value);
        assert!(value < cusp.epsy(i + 1)?);
        assert_eq!(cusp.epsy_neg(&eps)?, cusp.epsy(i)?);
        assert_eq!(cusp.epsy_pos(&eps)?, cusp.epsy(i + 1)?);
    }

    // clamped above the last yield strain
    let eps = SampleParams::strain_shear(0.0, 0.5);
    assert_eq!(cusp.find(&eps)?, 2);
    approx_eq(cusp.epsp(&eps)?, 0.065, 1e-15);
    Ok(())
}
