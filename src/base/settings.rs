use super::RangePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds options shared by the Cusp and Smooth potentials
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Prepends -εy₀ to the yield strains
    ///
    /// The first interval becomes [-εy₀, εy₀), centred at zero strain, such that the
    /// material responds elastically until the first yield strain is reached.
    pub init_elastic: bool,

    /// Handles equivalent strains outside the range of yield strains
    pub range_policy: RangePolicy,
}

impl Settings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Settings {
            init_elastic: true,
            range_policy: RangePolicy::Clamp,
        }
    }

    /// Sets the option to prepend an elastic interval
    pub fn set_init_elastic(&mut self, flag: bool) -> &mut Self {
        self.init_elastic = flag;
        self
    }

    /// Sets the policy for equivalent strains outside the range of yield strains
    pub fn set_range_policy(&mut self, policy: RangePolicy) -> &mut Self {
        self.range_policy = policy;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "init_elastic = {:?}\n", self.init_elastic)?;
        write!(f, "range_policy = {:?}\n", self.range_policy)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
