//! Qpot3d -- elasto-plastic material model based on a manifold of quadratic potentials
//!
//! The stress is a pure function of the current strain: the equivalent deviatoric strain selects
//! one interval of an ordered sequence of yield strains, and each interval carries its own
//! (locally quadratic) potential energy. Three potentials are available:
//!
//! * [Elastic](material::Elastic) -- a single quadratic potential (no yielding)
//! * [Cusp](material::Cusp) -- piecewise quadratic potentials with kinks at the yield strains
//! * [Smooth](material::Smooth) -- piecewise potentials with continuous stress and tangent at the yield strains
//!
//! A [Matrix](material::Matrix) holds one potential per (element, integration point) and evaluates the whole
//! grid at once.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
pub mod util;
