//! Pipeline entry points.
//!
//! - `Acquirer::acquire`: fetch every source concurrently and merge the jokes

pub mod acquire;

pub use acquire::{AcquisitionOutcome, Acquirer, Source};
