//! visloc core - model, error and logging facilities for the locate convention
//!
//! This crate provides:
//! - The wire model (`Command`, `Location`, `QueueKeys`)
//! - The `CommandStore` seam over the external store, plus `MemoryStore`
//! - The structured error facility (`ExError`, `ExErrorKind`, `VisionError`)
//! - The logging facility (`init`, `log_op_*` macros, test capture)

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, VisionError};
pub use model::{Command, Location, QueueKeys};
pub use ops::{CommandStore, MemoryStore};
