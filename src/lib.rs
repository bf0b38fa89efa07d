//! DevOps info service.
//!
//! A small HTTP service that reports what it is running on: service
//! metadata, host facts, uptime and the facts of the incoming request.
//! The crate also ships `yc-inventory`, an Ansible dynamic inventory
//! built from the Yandex Cloud CLI.
//!
//! # Routes
//!
//! ```text
//! GET /         service, system, runtime, request, endpoints
//! GET /health   {"status": "healthy", "timestamp": ..., "uptime_seconds": ...}
//! *   other     404 {"error": "Not Found", "message": ..., "path": ...}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`info`]: Service, host and uptime snapshots
//! - [`api`]: HTTP routes and handlers
//! - [`inventory`]: Dynamic inventory adapter
//! - [`utils`]: Logging and shutdown helpers

pub mod api;
pub mod config;
pub mod error;
pub mod info;
pub mod inventory;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, InventoryError, Result, ServiceError};
