pub mod calculator;
pub mod error;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

pub use error::RoiCalcError;
pub use types::*;

/// Standard result type for every fallible roi-calculator operation
pub type RoiCalcResult<T> = Result<T, RoiCalcError>;
