//! Structured logging facility for yangdiff
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   owned by the diff entry points
//! - Test capture mode for deterministic assertions
//!
//! ```rust
//! use yangdiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! The extractor, comparator and atomic grouper only emit `tracing::debug!`
//! and `tracing::trace!` events; lifecycle events belong to
//! [`crate::diff::engine`].

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
