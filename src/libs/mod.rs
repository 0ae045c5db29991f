pub mod error;
pub mod grid;
pub mod io;
pub mod nw;
pub mod report;
pub mod sequence;
pub mod sub_matrix;

pub use error::{AlignError, Result};
