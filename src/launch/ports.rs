use crate::launch::LaunchError;
use crate::resource::model::{PortChannel, RoleType, SocketType, UnitParams, PORT_CHANNELS};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Externally published ports for a pod/pea descriptor, keyed
/// `"<port>/tcp"`.
///
/// Non-parallel roles publish every channel whose socket side binds (an
/// absent socket type counts as bind). Parallel peers publish only the
/// ctrl channel: their data channels are peer-to-peer inside the unit's
/// network, while lifecycle management must stay reachable.
pub fn resolve_port_bindings(
    params: &UnitParams,
) -> Result<BTreeMap<String, u16>, LaunchError> {
    let role = RoleType::from_keyword(&params.role).ok_or_else(|| LaunchError::UnknownRole {
        keyword: params.role.clone(),
    })?;

    let mut bindings = BTreeMap::new();
    if role.is_parallel() {
        if let Some(port) = params.port(PortChannel::Ctrl) {
            bindings.insert(published_key(port), port);
        }
        return Ok(bindings);
    }

    for channel in PORT_CHANNELS {
        let socket = match params.socket_keyword(channel) {
            Some(keyword) => {
                SocketType::from_keyword(keyword).ok_or_else(|| LaunchError::UnknownSocket {
                    keyword: keyword.to_string(),
                })?
            }
            None => SocketType::Bind,
        };
        if !socket.is_bind() {
            continue;
        }
        if let Some(port) = params.port(channel) {
            bindings.insert(published_key(port), port);
        }
    }
    Ok(bindings)
}

/// Published ports for a file-defined flow: the definition's
/// `port_expose`, read from the top level or the `with:` section. Flows
/// without one publish nothing.
pub fn flow_port_bindings(flow_file: &Path) -> Result<BTreeMap<String, u16>, LaunchError> {
    let raw = fs::read_to_string(flow_file).map_err(|source| LaunchError::FlowRead {
        path: flow_file.display().to_string(),
        source,
    })?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&raw).map_err(|source| LaunchError::FlowParse {
            path: flow_file.display().to_string(),
            source,
        })?;
    let doc = match doc {
        serde_yaml::Value::Tagged(tagged) => tagged.value,
        other => other,
    };

    let port = doc
        .get("with")
        .and_then(|with| with.get("port_expose"))
        .or_else(|| doc.get("port_expose"))
        .and_then(serde_yaml::Value::as_u64)
        .and_then(|value| u16::try_from(value).ok())
        .filter(|port| *port != 0);

    Ok(match port {
        Some(port) => BTreeMap::from([(published_key(port), port)]),
        None => BTreeMap::new(),
    })
}

fn published_key(port: u16) -> String {
    format!("{port}/tcp")
}
