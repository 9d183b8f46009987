//! Makes available common structures needed to evaluate the material model
//!
//! You may write `use qpot3d::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Grid, Kind, ParamPotential, RangePolicy, SampleParams, Settings, MANDEL};
pub use crate::material::{Cusp, Elastic, MaterialPoint, Matrix, Potential, Smooth, YieldSequence};
pub use crate::StrError;
pub use russell_tensor::{Mandel, Tensor2, Tensor4};
