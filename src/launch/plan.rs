use crate::launch::command::{render_flow_command, render_unit_command};
use crate::launch::ports::{flow_port_bindings, resolve_port_bindings};
use crate::launch::LaunchError;
use crate::resource::model::{FlowParams, UnitKind, UnitParams};
use crate::resource::validate::{normalize_unit, validate_flow_file, ValidateError};
use crate::shared::ids::{ResourceId, ResourceKind};
use crate::workspace::paths::WorkspacePaths;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Everything the container runtime needs to start one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub id: ResourceId,
    pub command: String,
    pub port_bindings: BTreeMap<String, u16>,
    /// Host-side file mounted into the container, for file-defined units.
    pub localpath: Option<PathBuf>,
}

/// Validates the referenced file, issues a flow identity and derives the
/// launch artifacts from the flow definition.
pub fn prepare_flow(
    paths: &WorkspacePaths,
    workspace_id: &ResourceId,
    filename: &str,
) -> Result<LaunchPlan, PrepareError> {
    let localpath = validate_flow_file(paths, workspace_id, filename)?;
    let id = ResourceId::issue(ResourceKind::Flow);
    let params = FlowParams {
        uses: filename.to_string(),
        workspace_id: workspace_id.clone(),
        identity: id.clone(),
    };
    let command = render_flow_command(&params);
    let port_bindings = flow_port_bindings(&localpath)?;
    Ok(LaunchPlan {
        id,
        command,
        port_bindings,
        localpath: Some(localpath),
    })
}

/// Issues an identity, normalizes the descriptor and derives the launch
/// artifacts for a pod or pea.
pub fn prepare_unit(
    kind: UnitKind,
    workspace_id: &ResourceId,
    params: UnitParams,
) -> Result<LaunchPlan, PrepareError> {
    let id = ResourceId::issue(match kind {
        UnitKind::Pod => ResourceKind::Pod,
        UnitKind::Pea => ResourceKind::Pea,
    });
    let normalized = normalize_unit(params, workspace_id, &id);
    let port_bindings = resolve_port_bindings(&normalized)?;
    let command = render_unit_command(kind, &normalized);
    Ok(LaunchPlan {
        id,
        command,
        port_bindings,
        localpath: None,
    })
}
