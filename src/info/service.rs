//! Static service metadata.

use serde::Serialize;

/// Service identity reported under `service`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub name: &'static str,
    /// Semver version, taken from the crate manifest.
    pub version: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Web framework serving the routes.
    pub framework: &'static str,
}

/// The process-wide service identity.
pub const SERVICE: ServiceInfo = ServiceInfo {
    name: "devops-info-service",
    version: env!("CARGO_PKG_VERSION"),
    description: "DevOps course info service",
    framework: "axum",
};
