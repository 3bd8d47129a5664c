//! Common error handling utilities for the clinic dashboard
//!
//! Every crate in the workspace keeps its own `thiserror` enum close to the
//! code that raises it. This crate holds what they share:
//!
//! - **`ClinicError`**: the workspace-wide error used at binary edges
//! - **Error codes**: stable strings returned to the admin UI so it can
//!   branch on a failure without parsing messages
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ClinicError};
//!
//! fn require_window(start: Option<&str>) -> error_common::Result<&str> {
//!     start.ok_or_else(|| ClinicError::ValidationError("start is required".to_string()))
//! }
//!
//! let err = require_window(None).unwrap_err();
//! assert_eq!(err.code(), codes::validation::INVALID_INPUT);
//! ```

pub mod types;
pub mod codes;

pub use types::*;
