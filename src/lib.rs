//! Read-only statistics API for mock-exam enrollment and payments.
//!
//! This service is a thin reporting facade over the academy's MySQL
//! database: each endpoint runs a fixed read-only query and returns a
//! JSON summary. Nothing is written and nothing is cached; every
//! response carries headers that disable caching so dashboards always
//! see fresh numbers.
//!
//! # Endpoints
//!
//! ```text
//! GET /api/stats                enrollment and qualifying-payment totals
//! GET /api/inscritos-por-area   distinct enrolled students per area
//! GET /health                   liveness probe (no database access)
//! GET /metrics                  Prometheus exposition text
//! GET /*                        static files from STATIC_DIR
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`db`]: MySQL connection pool and bounded query execution
//! - [`reports`]: The fixed reporting queries
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod reports;
pub mod utils;

pub use config::Config;
pub use error::DbError;
