use crate::shared::ids::ResourceId;
use serde::{Deserialize, Serialize};

/// Parameter-defined launchable kinds. Flows are file-defined and carry
/// their own descriptor (`FlowParams`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Pod,
    Pea,
}

impl UnitKind {
    pub fn keyword(self) -> &'static str {
        match self {
            UnitKind::Pod => "pod",
            UnitKind::Pea => "pea",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.keyword().fmt(f)
    }
}

/// Topological role of a unit. Parallel peers talk to each other over
/// private data channels; every other role is a coordination point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleType {
    Singleton,
    Head,
    Tail,
    Parallel,
}

impl RoleType {
    pub fn from_keyword(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SINGLETON" => Some(RoleType::Singleton),
            "HEAD" => Some(RoleType::Head),
            "TAIL" => Some(RoleType::Tail),
            "PARALLEL" => Some(RoleType::Parallel),
            _ => None,
        }
    }

    pub fn is_parallel(self) -> bool {
        matches!(self, RoleType::Parallel)
    }
}

/// Whether a directional port listens or dials out. Wire keywords keep the
/// pair-typed forms produced by existing tooling (`PAIR_BIND`,
/// `PUSH_CONNECT`, ...), classified by suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    Bind,
    Connect,
}

impl SocketType {
    pub fn from_keyword(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        if upper == "BIND" || upper.ends_with("_BIND") {
            Some(SocketType::Bind)
        } else if upper == "CONNECT" || upper.ends_with("_CONNECT") {
            Some(SocketType::Connect)
        } else {
            None
        }
    }

    pub fn is_bind(self) -> bool {
        matches!(self, SocketType::Bind)
    }
}

/// The closed set of directional channels a unit exposes. Each channel
/// pairs one port field with one socket-type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortChannel {
    In,
    Out,
    Ctrl,
}

pub const PORT_CHANNELS: [PortChannel; 3] = [PortChannel::In, PortChannel::Out, PortChannel::Ctrl];

/// Shared pod/pea descriptor. Owned by the request that creates it;
/// treated as immutable once normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnitParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub identity: Option<ResourceId>,
    #[serde(default)]
    pub workspace_id: Option<ResourceId>,
    pub role: String,
    #[serde(default)]
    pub host_in: Option<String>,
    #[serde(default)]
    pub host_out: Option<String>,
    #[serde(default)]
    pub port_in: Option<u16>,
    #[serde(default)]
    pub port_out: Option<u16>,
    #[serde(default)]
    pub port_ctrl: Option<u16>,
    #[serde(default)]
    pub port_expose: Option<u16>,
    #[serde(default)]
    pub socket_in: Option<String>,
    #[serde(default)]
    pub socket_out: Option<String>,
    #[serde(default)]
    pub socket_ctrl: Option<String>,
    #[serde(default)]
    pub uses: Option<String>,
    #[serde(default)]
    pub log_config: Option<String>,
}

impl Default for UnitParams {
    fn default() -> Self {
        Self {
            name: None,
            identity: None,
            workspace_id: None,
            role: "SINGLETON".to_string(),
            host_in: None,
            host_out: None,
            port_in: None,
            port_out: None,
            port_ctrl: None,
            port_expose: None,
            socket_in: None,
            socket_out: None,
            socket_ctrl: None,
            uses: None,
            log_config: None,
        }
    }
}

impl UnitParams {
    /// Port for a channel; zero counts as unset.
    pub fn port(&self, channel: PortChannel) -> Option<u16> {
        let value = match channel {
            PortChannel::In => self.port_in,
            PortChannel::Out => self.port_out,
            PortChannel::Ctrl => self.port_ctrl,
        };
        value.filter(|port| *port != 0)
    }

    pub fn socket_keyword(&self, channel: PortChannel) -> Option<&str> {
        match channel {
            PortChannel::In => self.socket_in.as_deref(),
            PortChannel::Out => self.socket_out.as_deref(),
            PortChannel::Ctrl => self.socket_ctrl.as_deref(),
        }
    }
}

/// File-defined flow descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlowParams {
    pub uses: String,
    pub workspace_id: ResourceId,
    pub identity: ResourceId,
}
