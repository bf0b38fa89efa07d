//! Host and platform facts.

use std::num::NonZeroUsize;

use serde::Serialize;
use sysinfo::System;

/// Host facts reported under `system`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    /// Hostname as reported by the OS at collection time.
    pub hostname: String,
    /// OS family, e.g. "Linux".
    pub platform: String,
    /// OS family plus kernel release, e.g. "Linux-6.8.0-48-generic".
    pub platform_version: String,
    /// CPU architecture tag, e.g. "x86_64".
    pub architecture: String,
    /// Logical CPUs available to the process, at least 1.
    pub cpu_count: usize,
    /// Compiler version the binary was built with.
    pub runtime_version: String,
}

impl SystemInfo {
    /// Gather host facts. The hostname is looked up on every call so that
    /// a hostname injected after boot is picked up.
    pub fn collect() -> std::io::Result<Self> {
        let hostname = hostname::get()?.to_string_lossy().into_owned();
        let platform = platform_name(std::env::consts::OS);

        Ok(Self {
            hostname,
            platform_version: platform_version(&platform),
            platform,
            architecture: std::env::consts::ARCH.to_string(),
            cpu_count: cpu_count(),
            runtime_version: format!("rustc {}", env!("DEVOPS_INFO_RUSTC_VERSION")),
        })
    }
}

/// Map a Rust target OS name to the conventional family name.
fn platform_name(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        other => other.to_string(),
    }
}

fn platform_version(platform: &str) -> String {
    match System::kernel_version() {
        Some(kernel) => format!("{}-{}", platform, kernel),
        None => System::long_os_version().unwrap_or_else(|| platform.to_string()),
    }
}

fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
