//! Cloud CLI instance records and the inventory document.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

// === CLI output ===

/// Compute instance as printed by `yc compute instance list --format json`.
///
/// Only the fields the inventory needs are modelled; the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    /// Instance ID.
    pub id: String,
    /// Instance name.
    #[serde(default)]
    pub name: Option<String>,
    /// Lifecycle status, e.g. "RUNNING" or "STOPPED".
    #[serde(default)]
    pub status: Option<String>,
    /// User labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Attached network interfaces.
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterface>,
}

/// Network interface of an instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkInterface {
    /// Primary IPv4 address block.
    #[serde(default)]
    pub primary_v4_address: Option<PrimaryV4Address>,
}

/// Primary IPv4 address block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrimaryV4Address {
    /// Private address.
    #[serde(default)]
    pub address: Option<String>,
    /// Public NAT mapping, if any.
    #[serde(default)]
    pub one_to_one_nat: Option<OneToOneNat>,
}

/// Public NAT mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneToOneNat {
    /// Public IPv4 address.
    #[serde(default)]
    pub address: Option<String>,
}

impl Instance {
    /// Status that makes an instance eligible.
    pub const RUNNING: &'static str = "RUNNING";

    /// Inventory host name: the instance name, or its ID when unnamed.
    pub fn host_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the instance is running.
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some(Self::RUNNING)
    }

    /// First public NAT address across interfaces.
    pub fn public_ip(&self) -> Option<&str> {
        self.network_interfaces.iter().find_map(|iface| {
            iface
                .primary_v4_address
                .as_ref()?
                .one_to_one_nat
                .as_ref()?
                .address
                .as_deref()
                .filter(|addr| !addr.is_empty())
        })
    }

    /// Value of a label, if set.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

// === Inventory document ===

/// Inventory group a host can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Group {
    /// Hosts without the course project label.
    Ungrouped,
    /// Hosts labelled with the course project.
    Webservers,
}

/// Connection variables for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostVars {
    /// Address Ansible connects to.
    pub ansible_host: String,
    /// SSH login user.
    pub ansible_user: String,
    /// SSH private key path.
    pub ansible_ssh_private_key_file: String,
}

/// `_meta` section carrying per-host variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    /// Variables keyed by host name.
    pub hostvars: BTreeMap<String, HostVars>,
}

/// The `all` group, listing child groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllGroup {
    /// Child group names.
    pub children: Vec<String>,
}

impl Default for AllGroup {
    fn default() -> Self {
        Self {
            children: Group::iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// A group with its member hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostGroup {
    /// Host names in discovery order.
    pub hosts: Vec<String>,
}

/// Ansible dynamic inventory document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    /// Per-host variables.
    #[serde(rename = "_meta")]
    pub meta: Meta,
    /// Top-level group.
    pub all: AllGroup,
    /// Course project hosts.
    pub webservers: HostGroup,
    /// Everything else.
    pub ungrouped: HostGroup,
}

impl Inventory {
    /// Add a host to a group and record its variables.
    pub fn add_host(&mut self, name: &str, group: Group, vars: HostVars) {
        self.meta.hostvars.insert(name.to_string(), vars);
        self.group_mut(group).hosts.push(name.to_string());
    }

    /// Members of a group.
    pub fn group(&self, group: Group) -> &HostGroup {
        match group {
            Group::Ungrouped => &self.ungrouped,
            Group::Webservers => &self.webservers,
        }
    }

    fn group_mut(&mut self, group: Group) -> &mut HostGroup {
        match group {
            Group::Ungrouped => &mut self.ungrouped,
            Group::Webservers => &mut self.webservers,
        }
    }
}

/// Document printed for `--host <name>`: no per-host variables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyHostVars {}

/// Document printed when no mode is given.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyInventory {
    /// Empty `_meta` section.
    #[serde(rename = "_meta")]
    pub meta: Meta,
}
