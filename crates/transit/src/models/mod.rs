//! Transit data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::{Located, TransitProvider};
pub use types::{Result, SearchOutcome, Stop, TransitError, Trip};
