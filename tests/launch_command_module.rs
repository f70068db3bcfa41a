use flowd::launch::command::{render_flow_command, render_unit_command, LAUNCH_PROGRAM};
use flowd::resource::{FlowParams, UnitKind, UnitParams};
use flowd::shared::ids::{ResourceId, ResourceKind};

#[test]
fn launch_command_module_renders_full_descriptor_in_declaration_order() {
    let identity = ResourceId::issue(ResourceKind::Pod);
    let workspace_id = ResourceId::issue(ResourceKind::Workspace);
    let params = UnitParams {
        name: Some("segmenter".to_string()),
        identity: Some(identity.clone()),
        workspace_id: Some(workspace_id.clone()),
        role: "HEAD".to_string(),
        host_in: Some("host.docker.internal".to_string()),
        host_out: Some("host.docker.internal".to_string()),
        port_in: Some(5000),
        port_out: Some(5001),
        port_ctrl: Some(5002),
        port_expose: Some(8080),
        socket_in: Some("PULL_BIND".to_string()),
        socket_out: Some("PUSH_CONNECT".to_string()),
        socket_ctrl: Some("PAIR_BIND".to_string()),
        uses: Some("encoder.yml".to_string()),
        log_config: Some("/etc/flowd/log.yml".to_string()),
    };

    let command = render_unit_command(UnitKind::Pod, &params);
    assert_eq!(
        command,
        format!(
            "{LAUNCH_PROGRAM} pod --name segmenter --identity {identity} \
             --workspace-id {workspace_id} --role HEAD \
             --host-in host.docker.internal --host-out host.docker.internal \
             --port-in 5000 --port-out 5001 --port-ctrl 5002 --port-expose 8080 \
             --socket-in PULL_BIND --socket-out PUSH_CONNECT --socket-ctrl PAIR_BIND \
             --uses encoder.yml"
        )
    );
}

#[test]
fn launch_command_module_skips_unset_fields_and_log_config() {
    let params = UnitParams {
        role: "PARALLEL".to_string(),
        port_ctrl: Some(6002),
        log_config: Some("/tmp/log.yml".to_string()),
        ..UnitParams::default()
    };
    assert_eq!(
        render_unit_command(UnitKind::Pea, &params),
        format!("{LAUNCH_PROGRAM} pea --role PARALLEL --port-ctrl 6002")
    );
}

#[test]
fn launch_command_module_is_deterministic() {
    let params = UnitParams {
        name: Some("ranker".to_string()),
        role: "TAIL".to_string(),
        port_in: Some(7000),
        ..UnitParams::default()
    };
    let first = render_unit_command(UnitKind::Pod, &params);
    let second = render_unit_command(UnitKind::Pod, &params.clone());
    assert_eq!(first, second);
}

#[test]
fn launch_command_module_flow_command_shape() {
    let identity = ResourceId::issue(ResourceKind::Flow);
    let workspace_id = ResourceId::issue(ResourceKind::Workspace);
    let params = FlowParams {
        uses: "pipeline.yml".to_string(),
        workspace_id: workspace_id.clone(),
        identity: identity.clone(),
    };
    assert_eq!(
        render_flow_command(&params),
        format!(
            "{LAUNCH_PROGRAM} flow --uses /workspace/pipeline.yml \
             --identity {identity} --workspace-id {workspace_id}"
        )
    );
}
