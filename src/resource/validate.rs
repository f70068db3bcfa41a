use crate::resource::model::UnitParams;
use crate::shared::ids::ResourceId;
use crate::workspace::paths::WorkspacePaths;
use std::path::PathBuf;

/// Hostname a containerized unit uses to reach services on the host side.
pub const CONTAINER_HOST_GATEWAY: &str = "host.docker.internal";

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("file `{filename}` not found in workspace `{workspace_id}`")]
    NotFound {
        filename: String,
        workspace_id: ResourceId,
    },
}

/// Resolves `filename` against the workspace root. The returned path is
/// the mount source for the container; it must be an existing regular
/// file.
pub fn validate_flow_file(
    paths: &WorkspacePaths,
    workspace_id: &ResourceId,
    filename: &str,
) -> Result<PathBuf, ValidateError> {
    let candidate = paths.workspace_root(workspace_id).join(filename);
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(ValidateError::NotFound {
            filename: filename.to_string(),
            workspace_id: workspace_id.clone(),
        })
    }
}

/// Stamps identity and workspace onto a pod/pea descriptor and points its
/// host fields at the container-to-host gateway, so callbacks to the
/// submitting process resolve from inside the container.
pub fn normalize_unit(
    mut params: UnitParams,
    workspace_id: &ResourceId,
    identity: &ResourceId,
) -> UnitParams {
    params.host_in = Some(CONTAINER_HOST_GATEWAY.to_string());
    params.host_out = Some(CONTAINER_HOST_GATEWAY.to_string());
    params.identity = Some(identity.clone());
    params.workspace_id = Some(workspace_id.clone());
    params
}
