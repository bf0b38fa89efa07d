//! Snapshots reported by the info and health routes.
//!
//! - [`service`]: static service metadata
//! - [`system`]: host and platform facts, gathered per request
//! - [`uptime`]: process start time and uptime formatting

pub mod service;
pub mod system;
pub mod uptime;

pub use service::{ServiceInfo, SERVICE};
pub use system::SystemInfo;
pub use uptime::{current_timestamp, StartTime, Uptime};
