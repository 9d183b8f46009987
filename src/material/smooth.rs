use super::potential::{deviatoric_stress, deviatoric_tangent, volumetric_energy, DeviatoricPotential, StrainSplit};
use super::{Potential, YieldSequence};
use crate::base::{check_moduli, epsd, Kind, Settings};
use crate::StrError;
use russell_lab::math::PI;
use russell_tensor::{Tensor2, Tensor4};

/// Implements a material point with smooth piecewise potentials
///
/// In the interval `i` containing the equivalent strain εd:
///
/// ```text
/// ψ = 9/2 K εm² - 4 G (Δεyᵢ/π)² (1 + cos(π x))      with    x = (εd - εpᵢ) / Δεyᵢ
/// ```
///
/// where `εpᵢ` is the anchor (midpoint) and `Δεyᵢ` the width (half-length) of the interval.
///
/// * the energy vanishes at every yield strain (as for the [super::Cusp] potential)
/// * the stress and the tangent 4 G I4d coincide with the Cusp potential at every anchor
/// * the stress and the tangent are continuous across every yield strain
///
/// Beyond the range of yield strains (clamping policy), the deviatoric potential continues as
/// `2 G (εd - εyₑ)²`, where `εyₑ` is the nearest (first or last) yield strain. Thus, the energy
/// and the stress remain continuous and bounded by the elastic response.
#[derive(Clone, Debug, PartialEq)]
pub struct Smooth {
    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Yield strains
    seq: YieldSequence,
}

impl Smooth {
    /// Allocates a new instance with default settings (prepended elastic interval, clamping)
    pub fn new(kk: f64, gg: f64, epsy: &[f64]) -> Result<Self, StrError> {
        Smooth::new_with(kk, gg, epsy, &Settings::new())
    }

    /// Allocates a new instance with the given settings
    pub fn new_with(kk: f64, gg: f64, epsy: &[f64], settings: &Settings) -> Result<Self, StrError> {
        check_moduli(kk, gg)?;
        let seq = YieldSequence::new(epsy, settings)?;
        Ok(Smooth { kk, gg, seq })
    }

    /// Returns the sequence of yield strains
    pub fn sequence(&self) -> &YieldSequence {
        &self.seq
    }

    /// Returns the current interval index and the deviatoric potential
    fn potential(&self, epsd: f64) -> Result<(usize, DeviatoricPotential), StrError> {
        let i = self.seq.locate(epsd)?;
        let (first, last) = self.seq.bounds();
        let pot = if epsd < first {
            self.outer(epsd - first)
        } else if epsd > last {
            self.outer(epsd - last)
        } else {
            let (a, d) = (self.seq.anchor(i), self.seq.width(i));
            let c = d / PI;
            let (sin, cos) = f64::sin_cos(PI * (epsd - a) / d);
            DeviatoricPotential {
                v: -4.0 * self.gg * c * c * (1.0 + cos),
                dv: 4.0 * self.gg * c * sin,
                d2v: 4.0 * self.gg * cos,
            }
        };
        Ok((i, pot))
    }

    /// Returns the deviatoric potential at a distance δ outside the range of yield strains
    fn outer(&self, delta: f64) -> DeviatoricPotential {
        DeviatoricPotential {
            v: 2.0 * self.gg * delta * delta,
            dv: 4.0 * self.gg * delta,
            d2v: 4.0 * self.gg,
        }
    }
}

impl Potential for Smooth {
    fn kind(&self) -> Kind {
        Kind::Smooth
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
