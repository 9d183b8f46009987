//! Implements the potentials of a material point and the grid of material points

mod cusp;
mod elastic;
mod material_point;
mod matrix;
mod potential;
mod smooth;
mod yield_sequence;
pub use crate::material::cusp::*;
pub use crate::material::elastic::*;
pub use crate::material::material_point::*;
pub use crate::material::matrix::*;
pub use crate::material::potential::{Potential, EPSD_ZERO};
pub use crate::material::smooth::*;
pub use crate::material::yield_sequence::*;
