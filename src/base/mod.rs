//! Implements the base structures: tensors, grids, parameters and settings

mod enums;
mod grid;
mod parameters;
mod sample_params;
mod settings;
mod tensor;
pub use crate::base::enums::*;
pub use crate::base::grid::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::settings::*;
pub use crate::base::tensor::*;
