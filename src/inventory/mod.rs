//! Ansible dynamic inventory built from the Yandex Cloud CLI.
//!
//! The orchestrator invokes the adapter with `--list`, `--host <name>` or
//! nothing. Only `--list` talks to the cloud: it lists instances in the
//! configured folder, keeps the running ones with a public address, and
//! groups them by their `project` label.
//!
//! ```text
//! yc compute instance list --folder-id <FOLDER> --format json
//!   -> [instance, ...]
//!   -> {"_meta": {"hostvars": {...}}, "all": {...}, "webservers": {...}, "ungrouped": {...}}
//! ```

pub mod runner;
pub mod types;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::InventoryError;

pub use runner::{CommandOutput, CommandRunner, SystemCommand};
pub use types::{EmptyHostVars, EmptyInventory, Group, HostVars, Instance, Inventory};

/// SSH user for every host.
pub const ANSIBLE_USER: &str = "ubuntu";

/// SSH private key for every host.
pub const SSH_PRIVATE_KEY_FILE: &str = "~/.ssh/devops-lab04";

/// `project` label value that places a host in [`Group::Webservers`].
pub const WEBSERVER_PROJECT: &str = "devops-course";

/// Adapter configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Folder whose instances are listed.
    #[serde(default = "default_folder_id")]
    pub yc_folder_id: String,

    /// Cloud CLI binary.
    #[serde(default = "default_yc_bin")]
    pub yc_bin: String,
}

fn default_folder_id() -> String {
    "<YOUR_FOLDER_ID>".to_string()
}

fn default_yc_bin() -> String {
    "yc".to_string()
}

impl InventoryConfig {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            yc_folder_id: default_folder_id(),
            yc_bin: default_yc_bin(),
        }
    }
}

/// What the orchestrator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Full inventory.
    List,
    /// Variables for one host.
    Host(String),
    /// No recognised argument.
    Empty,
}

/// Client for the cloud CLI.
#[derive(Debug, Clone)]
pub struct YcCli<R> {
    runner: R,
    program: String,
    folder_id: String,
}

impl<R: CommandRunner> YcCli<R> {
    /// Create a client that runs the configured binary through `runner`.
    pub fn new(runner: R, config: &InventoryConfig) -> Self {
        Self {
            runner,
            program: config.yc_bin.clone(),
            folder_id: config.yc_folder_id.clone(),
        }
    }

    /// Arguments for listing instances as JSON.
    pub fn list_args(&self) -> Vec<String> {
        [
            "compute",
            "instance",
            "list",
            "--folder-id",
            self.folder_id.as_str(),
            "--format",
            "json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// List compute instances in the folder.
    pub fn list_instances(&self) -> Result<Vec<Instance>, InventoryError> {
        let output = self.runner.run(&self.program, &self.list_args())?;

        if !output.success() {
            return Err(InventoryError::ToolFailed {
                program: self.program.clone(),
                stderr: output.stderr.trim_end().to_string(),
            });
        }

        let instances: Vec<Instance> = serde_json::from_str(&output.stdout)?;
        debug!("{} returned {} instances", self.program, instances.len());
        Ok(instances)
    }
}

/// Build the inventory from listed instances.
///
/// Instances that are not running or have no public address are left out.
pub fn build_inventory(instances: &[Instance]) -> Inventory {
    let mut inventory = Inventory::default();

    for instance in instances {
        if !instance.is_running() {
            debug!("Skipping {}: not running", instance.host_name());
            continue;
        }

        let Some(ip) = instance.public_ip() else {
            debug!("Skipping {}: no public address", instance.host_name());
            continue;
        };

        let group = if instance.label("project") == Some(WEBSERVER_PROJECT) {
            Group::Webservers
        } else {
            Group::Ungrouped
        };

        inventory.add_host(
            instance.host_name(),
            group,
            HostVars {
                ansible_host: ip.to_string(),
                ansible_user: ANSIBLE_USER.to_string(),
                ansible_ssh_private_key_file: SSH_PRIVATE_KEY_FILE.to_string(),
            },
        );
    }

    info!(
        "Inventory built: {} webservers, {} ungrouped",
        inventory.webservers.hosts.len(),
        inventory.ungrouped.hosts.len()
    );
    inventory
}

/// Produce the JSON document for `mode`.
pub fn render<R: CommandRunner>(mode: &Mode, cli: &YcCli<R>) -> Result<String, InventoryError> {
    match mode {
        Mode::List => {
            let instances = cli.list_instances()?;
            Ok(serde_json::to_string_pretty(&build_inventory(&instances))?)
        }
        Mode::Host(name) => {
            debug!("No host variables for {}", name);
            Ok(serde_json::to_string(&EmptyHostVars::default())?)
        }
        Mode::Empty => Ok(serde_json::to_string(&EmptyInventory::default())?),
    }
}
