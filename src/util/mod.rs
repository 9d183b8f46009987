//! Contains some utility functions and structures

mod compare_results;
mod reference_data;

pub use compare_results::*;
pub use reference_data::*;
