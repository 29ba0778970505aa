pub mod enums;
pub mod error;
pub mod frame;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use enums::ChangeConvention;
pub use error::CoreError;
pub use frame::AlignedFrame;
pub use series::{BalanceSheetPoint, Series, TimePoint};
