//! Revenue engine for the clinic dashboard
//!
//! Decides which billable amounts belong to a reporting period and builds
//! the financial aggregations shown on the admin dashboard:
//! - Period attribution of billing records, including the pre-paid/serviced
//!   correction
//! - Revenue totals, average ticket and record counts
//! - Revenue grouped by doctor, insurer or time bucket
//! - Revenue against expenses
//!
//! The attribution and reporting functions are pure. [`RevenueService`]
//! wires them to a [`RecordSource`] and an injected [`Clock`].

pub mod attribution;
pub mod clock;
pub mod dates;
pub mod error;
pub mod models;
pub mod reporting;
pub mod service;
pub mod source;

pub use attribution::*;
pub use clock::*;
pub use dates::*;
pub use error::*;
pub use models::*;
pub use reporting::*;
pub use service::*;
pub use source::*;
