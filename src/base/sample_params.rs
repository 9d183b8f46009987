use super::{ParamPotential, MANDEL};
use russell_tensor::Tensor2;

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns the bulk modulus used in the samples
    pub const KK: f64 = 12.3;

    /// Returns the shear modulus used in the samples
    pub const GG: f64 = 45.6;

    /// Returns sample yield strains
    pub fn epsy() -> Vec<f64> {
        vec![0.01, 0.03, 0.10]
    }

    /// Returns sample parameters for the Elastic potential
    pub fn param_elastic() -> ParamPotential {
        ParamPotential::Elastic {
            kk: SampleParams::KK,
            gg: SampleParams::GG,
        }
    }

    /// Returns sample parameters for the Cusp potential
    pub fn param_cusp() -> ParamPotential {
        ParamPotential::Cusp {
            kk: SampleParams::KK,
            gg: SampleParams::GG,
            epsy: SampleParams::epsy(),
        }
    }

    /// Returns sample parameters for the Smooth potential
    pub fn param_smooth() -> ParamPotential {
        ParamPotential::Smooth {
            kk: SampleParams::KK,
            gg: SampleParams::GG,
            epsy: SampleParams::epsy(),
        }
    }

    /// Returns a strain tensor with volumetric and simple shear components
    ///
    /// ```text
    ///     ┌              ┐
    ///     │ εm  γ   0    │
    /// ε = │ γ   εm  0    │
    ///     │ 0   0   εm   │
    ///     └              ┘
    /// ```
    pub fn strain_shear(epsm: f64, gamma: f64) -> Tensor2 {
        let mut eps = Tensor2::new(MANDEL);
        eps.sym_set(0, 0, epsm);
        eps.sym_set(1, 1, epsm);
        eps.sym_set(2, 2, epsm);
        eps.sym_set(0, 1, gamma);
        eps
    }

    /// Returns a strain tensor with a prescribed mean strain and equivalent deviatoric strain
    ///
    /// The deviatoric part is a (non-trivial) combination of pure shear and extension
    /// scaled such that εd equals the given value.
    pub fn strain_general(epsm: f64, epsd: f64) -> Tensor2 {
        // traceless direction
        let raw = [[0.6, 0.5, -0.2], [0.5, -0.1, 0.3], [-0.2, 0.3, -0.5]];
        let mut dir = Tensor2::new(MANDEL);
        for i in 0..3 {
            for j in i..3 {
                dir.sym_set(i, j, raw[i][j]);
            }
        }
        let scale = epsd / crate::base::epsd(&dir);
        let mut eps = Tensor2::new(MANDEL);
        for i in 0..3 {
            for j in i..3 {
                let vol = if i == j { epsm } else { 0.0 };
                eps.sym_set(i, j, vol + scale * raw[i][j]);
            }
        }
        eps
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
