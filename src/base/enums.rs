use serde::{Deserialize, Serialize};

/// Defines the kind of potential assigned to a material point
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Kind {
    /// No potential has been assigned yet
    Unset = 0,

    /// Single quadratic potential (no yielding)
    Elastic = 1,

    /// Piecewise quadratic potentials with kinks at the yield strains
    Cusp = 2,

    /// Piecewise potentials with continuous stress and tangent at the yield strains
    Smooth = 3,
}

impl Kind {
    /// Indicates whether this kind has a sequence of yield strains or not
    pub fn is_plastic(&self) -> bool {
        match self {
            Kind::Unset => false,
            Kind::Elastic => false,
            Kind::Cusp => true,
            Kind::Smooth => true,
        }
    }
}

/// Defines how to handle equivalent strains outside the range of yield strains
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum RangePolicy {
    /// Uses the first interval below the range and the last interval above it
    Clamp,

    /// Returns an error if the equivalent strain is outside [εy₀, εyₙ₋₁)
    Fail,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
