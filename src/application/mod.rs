pub mod error;
pub mod ops;

pub use error::*;
