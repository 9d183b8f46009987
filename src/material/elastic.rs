use super::potential::{deviatoric_tangent, set_stress, volumetric_energy, DeviatoricPotential, StrainSplit};
use super::Potential;
use crate::base::{check_moduli, Kind};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};

/// Implements a linear elastic material point
///
/// ```text
/// ψ = 9/2 K εm² + 2 G εd²
/// σ = 3 K εm I + 2 G εᵈ
/// C = K I⊗I + 2 G I4d
/// ```
///
/// The Elastic potential never yields: the plastic strain is zero, the yield index is zero
/// and all yield strains are +∞.
#[derive(Clone, Debug, PartialEq)]
pub struct Elastic {
    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,
}

impl Elastic {
    /// Allocates a new instance
    pub fn new(kk: f64, gg: f64) -> Result<Self, StrError> {
        check_moduli(kk, gg)?;
        Ok(Elastic { kk, gg })
    }

    /// Returns the deviatoric potential V = 2 G εd²
    fn potential(&self, epsd: f64) -> DeviatoricPotential {
        DeviatoricPotential {
            v: 2.0 * self.gg * epsd * epsd,
            dv: 4.0 * self.gg * epsd,
            d2v: 4.0 * self.gg,
        }
    }
}

impl Potential for Elastic {
    fn kind(&self) -> Kind {
        Kind::Elastic
    }

    fn bulk(&self) -> f64 {
        self.kk
    }

    fn shear(&self) -> f64 {
        self.gg
    }

    /// Computes the stress tensor σ = 3 K εm I + 2 G εᵈ
    fn stress(&self, sig: &mut Tensor2, eps: &Tensor2) -> Result<(), StrError> {
        let split = StrainSplit::new(eps)?;
        set_stress(sig, 3.0 * self.kk * split.epsm, 2.0 * self.gg, &split.dev)
    }

    /// Computes the stress tensor and the constant tangent modulus
    fn tangent(&self, sig: &mut Tensor2, dd: &mut Tensor4, eps: &Tensor2) -> Result<(), StrError> {
        let split = StrainSplit::new(eps)?;
        set_stress(sig, 3.0 * self.kk * split.epsm, 2.0 * self.gg, &split.dev)?;
        deviatoric_tangent(dd, self.kk, &split, &self.potential(split.epsd))
    }

    fn energy(&self, eps: &Tensor2) -> Result<f64, StrError> {
        let split = StrainSplit::new(eps)?;
        Ok(volumetric_energy(self.kk, split.epsm) + self.potential(split.epsd).v)
    }

    fn find(&self, _eps: &Tensor2) -> Result<usize, StrError> {
        Ok(0)
    }

    fn epsp(&self, _eps: &Tensor2) -> Result<f64, StrError> {
        Ok(0.0)
    }

    fn epsy(&self, _i: usize) -> Result<f64, StrError> {
        Ok(f64::INFINITY)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
