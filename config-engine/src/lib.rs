//! Configuration for the clinic dashboard
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`DashboardConfig::default`])
//! 2. An optional YAML file
//! 3. Environment variables prefixed with `CLINIC_`, using `__` to reach
//!    nested keys (`CLINIC_SERVER__PORT=9090`)
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigEngine;
//!
//! let config = ConfigEngine::new()
//!     .with_file("dashboard.yaml")
//!     .load()
//!     .expect("valid configuration");
//!
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod engine;
pub mod settings;
pub mod validation;
pub mod error;

pub use engine::*;
pub use settings::*;
pub use validation::*;
pub use error::*;
