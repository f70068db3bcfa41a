use crate::shared::ids::ResourceId;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub workspaces: PathBuf,
}

impl WorkspacePaths {
    pub fn from_state_root(state_root: &Path) -> Self {
        Self {
            workspaces: state_root.join("workspaces"),
        }
    }

    pub fn workspace_root(&self, id: &ResourceId) -> PathBuf {
        self.workspaces.join(id.as_str())
    }
}
