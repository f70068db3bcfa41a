use crate::resource::model::{FlowParams, UnitKind, UnitParams};

pub const LAUNCH_PROGRAM: &str = "flowd";

/// Mount point of the workspace inside a flow container.
pub const WORKSPACE_MOUNT: &str = "/workspace";

/// Container entrypoint for a pod/pea: program, kind keyword, then every
/// set descriptor field as `--flag value` in declaration order.
/// `log_config` stays process-internal and is never rendered.
pub fn render_unit_command(kind: UnitKind, params: &UnitParams) -> String {
    let mut tokens = vec![LAUNCH_PROGRAM.to_string(), kind.keyword().to_string()];
    push_flag(&mut tokens, "name", params.name.as_deref());
    push_flag(
        &mut tokens,
        "identity",
        params.identity.as_ref().map(|id| id.as_str()),
    );
    push_flag(
        &mut tokens,
        "workspace-id",
        params.workspace_id.as_ref().map(|id| id.as_str()),
    );
    push_flag(&mut tokens, "role", Some(&params.role));
    push_flag(&mut tokens, "host-in", params.host_in.as_deref());
    push_flag(&mut tokens, "host-out", params.host_out.as_deref());
    push_port_flag(&mut tokens, "port-in", params.port_in);
    push_port_flag(&mut tokens, "port-out", params.port_out);
    push_port_flag(&mut tokens, "port-ctrl", params.port_ctrl);
    push_port_flag(&mut tokens, "port-expose", params.port_expose);
    push_flag(&mut tokens, "socket-in", params.socket_in.as_deref());
    push_flag(&mut tokens, "socket-out", params.socket_out.as_deref());
    push_flag(&mut tokens, "socket-ctrl", params.socket_ctrl.as_deref());
    push_flag(&mut tokens, "uses", params.uses.as_deref());
    tokens.join(" ")
}

/// Container entrypoint for a flow; `uses` resolves against the workspace
/// mount.
pub fn render_flow_command(params: &FlowParams) -> String {
    format!(
        "{LAUNCH_PROGRAM} flow --uses {WORKSPACE_MOUNT}/{} --identity {} --workspace-id {}",
        params.uses, params.identity, params.workspace_id
    )
}

fn push_flag(tokens: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        tokens.push(format!("--{flag}"));
        tokens.push(value.to_string());
    }
}

fn push_port_flag(tokens: &mut Vec<String>, flag: &str, value: Option<u16>) {
    if let Some(value) = value {
        tokens.push(format!("--{flag}"));
        tokens.push(value.to_string());
    }
}
