use super::{Cusp, Elastic, Potential, Smooth};
use crate::base::{Kind, ParamPotential, Settings};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};

/// Holds the actual potential of a material point
///
/// The set of potentials is closed; thus an enum is used instead of a boxed trait object
/// such that the grid evaluation resolves the variant once per point.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialPoint {
    Elastic(Elastic),
    Cusp(Cusp),
    Smooth(Smooth),
}

impl MaterialPoint {
    /// Allocates a new instance
    pub fn new(param: &ParamPotential, settings: &Settings) -> Result<Self, StrError> {
        let point = match param {
            // Single quadratic potential
            ParamPotential::Elastic { kk, gg } => MaterialPoint::Elastic(Elastic::new(*kk, *gg)?),

            // Piecewise quadratic potentials
            ParamPotential::Cusp { kk, gg, epsy } => MaterialPoint::Cusp(Cusp::new_with(*kk, *gg, epsy, settings)?),

            // Smooth piecewise potentials
            ParamPotential::Smooth { kk, gg, epsy } => {
                MaterialPoint::Smooth(Smooth::new_with(*kk, *gg, epsy, settings)?)
            }
        };
        Ok(point)
    }

    /// Returns an access to the actual potential
    pub fn actual(&self) -> &dyn Potential {
        match self {
            MaterialPoint::Elastic(m) => m,
            MaterialPoint::Cusp(m) => m,
            MaterialPoint::Smooth(m) => m,
        }
    }

    /// Returns the stored yield strains (empty for the Elastic potential)
    pub fn yield_strains(&self) -> &[f64] {
        match self {
            MaterialPoint::Elastic(_) => &[],
            MaterialPoint::Cusp(m) => m.sequence().values(),
            MaterialPoint::Smooth(m) => m.sequence().values(),
        }
    }
}

impl Potential for MaterialPoint {
    fn kind(&self) -> Kind {
        self.actual().kind()
    }

    fn bulk(&self) -> f64 {
        self.actual().bulk()
    }

    fn shear(&self) -> f64 {
        self.actual().shear()
    }

    fn stress(&self, sig: &mut Tensor2, eps: &Tensor2) -> Result<(), StrError> {
        match self {
            MaterialPoint::Elastic(m) => m.stress(sig, eps),
            MaterialPoint::Cusp(m) => m.stress(sig, eps),
            MaterialPoint::Smooth(m) => m.stress(sig, eps),
        }
    }

    fn tangent(&self, sig: &mut Tensor2, dd: &mut Tensor4, eps: &Tensor2) -> Result<(), StrError> {
        match self {
            MaterialPoint::Elastic(m) => m.tangent(sig, dd, eps),
            MaterialPoint::Cusp(m) => m.tangent(sig, dd, eps),
            MaterialPoint::Smooth(m) => m.tangent(sig, dd, eps),
        }
    }

    fn energy(&self, eps: &Tensor2) -> Result<f64, StrError> {
        match self {
            MaterialPoint::Elastic(m) => m.energy(eps),
            MaterialPoint::Cusp(m) => m.energy(eps),
            MaterialPoint::Smooth(m) => m.energy(eps),
        }
    }

    fn find(&self, eps: &Tensor2) -> Result<usize, StrError> {
        match self {
            MaterialPoint::Elastic(m) => m.find(eps),
            MaterialPoint::Cusp(m) => m.find(eps),
            MaterialPoint::Smooth(m) => m.find(eps),
        }
    }

    fn epsp(&self, eps: &Tensor2) -> Result<f64, StrError> {
        match self {
            MaterialPoint::Elastic(m) => m.epsp(eps),
            MaterialPoint::Cusp(m) => m.epsp(eps),
            MaterialPoint::Smooth(m) => m.epsp(eps),
        }
    }

    fn epsy(&self, i: usize) -> Result<f64, StrError> {
        match self {
            MaterialPoint::Elastic(m) => m.epsy(i),
            MaterialPoint::Cusp(m) => m.epsy(i),
            MaterialPoint::Smooth(m) => m.epsy(i),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
