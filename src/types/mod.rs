//! Shared data structures for the soil fertility prediction pipeline
//!
//! - `feature`: measurement identifiers, plausible-range specs, feature vectors
//! - `measurements`: raw untrusted input from the web layer
//! - `fertility`: fertility classes and remediation plan records
//! - `prediction`: the assembled prediction result

mod feature;
mod measurements;
mod fertility;
mod prediction;

pub use feature::*;
pub use measurements::*;
pub use fertility::*;
pub use prediction::*;
