use super::potential::{deviatoric_stress, deviatoric_tangent, volumetric_energy, DeviatoricPotential, StrainSplit};
use super::{Potential, YieldSequence};
use crate::base::{check_moduli, epsd, Kind, Settings};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};

/// Implements a material point with piecewise quadratic (cusp) potentials
///
/// In the interval `i` containing the equivalent strain εd:
///
/// ```text
/// ψ = 9/2 K εm² + 2 G (εd - εpᵢ)² - 2 G Δεyᵢ²
/// σ = 3 K εm I + 2 G (1 - εpᵢ/εd) εᵈ
/// ```
///
/// where `εpᵢ` is the anchor (midpoint) and `Δεyᵢ` the width (half-length) of the interval.
/// The energy is continuous and vanishes at every yield strain; the stress and the tangent
/// jump at the yield strains.
#[derive(Clone, Debug, PartialEq)]
pub struct Cusp {
    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Yield strains
    seq: YieldSequence,
}

impl Cusp {
    /// Allocates a new instance with default settings (prepended elastic interval, clamping)
    pub fn new(kk: f64, gg: f64, epsy: &[f64]) -> Result<Self, StrError> {
        Cusp::new_with(kk, gg, epsy, &Settings::new())
    }

    /// Allocates a new instance with the given settings
    pub fn new_with(kk: f64, gg: f64, epsy: &[f64], settings: &Settings) -> Result<Self, StrError> {
        check_moduli(kk, gg)?;
        let seq = YieldSequence::new(epsy, settings)?;
        Ok(Cusp { kk, gg, seq })
    }

    /// Returns the sequence of yield strains
    pub fn sequence(&self) -> &YieldSequence {
        &self.seq
    }

    /// Returns the current interval index and the deviatoric potential
    fn potential(&self, epsd: f64) -> Result<(usize, DeviatoricPotential), StrError> {
        let i = self.seq.locate(epsd)?;
        let (a, d) = (self.seq.anchor(i), self.seq.width(i));
        let pot = DeviatoricPotential {
            v: 2.0 * self.gg * (epsd - a) * (epsd - a) - 2.0 * self.gg * d * d,
            dv: 4.0 * self.gg * (epsd - a),
            d2v: 4.0 * self.gg,
        };
        Ok((i, pot))
    }
}

impl Potential for Cusp {
    fn kind(&self) -> Kind {
        Kind::Cusp
    }

    fn bulk(&self) -> f64 {
        self.kk
    }

    fn shear(&self) -> f64 {
        self.gg
    }

    fn stress(&self, sig: &mut Tensor2, eps: &Tensor2) -> Result<(), StrError> {
        let split = StrainSplit::new(eps)?;
        let (_, pot) = self.potential(split.epsd)?;
        deviatoric_stress(sig, self.kk, &split, &pot)
    }

    fn tangent(&self, sig: &mut Tensor2, dd: &mut Tensor4, eps: &Tensor2) -> Result<(), StrError> {
        let split = StrainSplit::new(eps)?;
        let (_, pot) = self.potential(split.epsd)?;
        deviatoric_stress(sig, self.kk, &split, &pot)?;
        deviatoric_tangent(dd, self.kk, &split, &pot)
    }

    fn energy(&self, eps: &Tensor2) -> Result<f64, StrError> {
        let split = StrainSplit::new(eps)?;
        let (_, pot) = self.potential(split.epsd)?;
        Ok(volumetric_energy(self.kk, split.epsm) + pot.v)
    }

    fn find(&self, eps: &Tensor2) -> Result<usize, StrError> {
        self.seq.locate(epsd(eps))
    }

    fn epsp(&self, eps: &Tensor2) -> Result<f64, StrError> {
        let i = self.find(eps)?;
        Ok(self.seq.anchor(i))
    }

    fn epsy(&self, i: usize) -> Result<f64, StrError> {
        self.seq.get(i)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
