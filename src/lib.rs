pub mod arrangement;
pub mod contour;
pub mod error;
pub mod field;
pub mod interaction;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{PlanisError, Result};
