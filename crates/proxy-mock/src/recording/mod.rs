//! Capture of inbound request parameters for test assertions.
//!
//! Every request that reaches the catch-all handler or the unknown-path
//! fallback is recorded, whether or not a mock matched it.
//!
//! # Module Structure
//!
//! - `types` - The captured record
//! - `recorder` - The shared append-only buffer

mod recorder;
mod types;

pub use recorder::RequestRecorder;
pub use types::RequestRecord;
