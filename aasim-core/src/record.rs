//! Diagnostic records emitted by environments and evaluators.
//!
//! ```rust
//! use aasim_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("reward", -0.5);
//! record.insert("dist", RecordValue::Scalar(0.1));
//! record.insert("obs", RecordValue::Array1(vec![0.1, 0.0, 0.2, -0.3]));
//! assert_eq!(record.get_scalar("dist").unwrap(), 0.1);
//! ```
mod base;
pub use base::{Record, RecordValue};
