pub mod coord;
pub mod error;

pub use coord::{Axis, Coordinate};
pub use error::{DeciPinError, Result};
