use crate::shared::ids::{ResourceId, ResourceKind};
use crate::workspace::store::{WorkspaceRecord, WorkspaceState, WorkspaceStore};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// One unit of build work, consumed exactly once by a build worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuildTask {
    pub workspace_id: ResourceId,
    #[serde(default)]
    pub files: Vec<String>,
}

pub fn build_channel() -> (Sender<BuildTask>, Receiver<BuildTask>) {
    mpsc::channel()
}

/// Serializes build requests per workspace identity: the first request for
/// an identity and any request against a settled record enqueue one task;
/// a request while a build is already queued or running coalesces into it.
#[derive(Debug, Clone)]
pub struct BuildCoordinator {
    store: Arc<WorkspaceStore>,
    queue: Sender<BuildTask>,
}

impl BuildCoordinator {
    pub fn new(store: Arc<WorkspaceStore>, queue: Sender<BuildTask>) -> Self {
        Self { store, queue }
    }

    /// State transition plus optional enqueue; never performs the build.
    /// The whole read-decide-write-enqueue sequence runs under the store
    /// lock so concurrent requests for one identity see each other's
    /// decision.
    pub fn request_build(
        &self,
        id: Option<ResourceId>,
        files: Vec<String>,
        now: i64,
    ) -> WorkspaceRecord {
        let id = id.unwrap_or_else(|| ResourceId::issue(ResourceKind::Workspace));
        let mut records = self.store.lock_records();
        match records.get_mut(&id) {
            None => {
                let record = WorkspaceRecord {
                    id: id.clone(),
                    state: WorkspaceState::Pending,
                    created_at: now,
                    updated_at: now,
                };
                records.insert(id.clone(), record.clone());
                self.enqueue(id, files);
                record
            }
            Some(record) if record.state == WorkspaceState::Pending => {
                // a build is already queued or running; coalesce
                record.clone()
            }
            Some(record) => {
                record.state = WorkspaceState::Pending;
                record.updated_at = now;
                let record = record.clone();
                self.enqueue(id, files);
                record
            }
        }
    }

    fn enqueue(&self, workspace_id: ResourceId, files: Vec<String>) {
        // fire and forget; a send only fails once every worker is gone
        let _ = self.queue.send(BuildTask {
            workspace_id,
            files,
        });
    }
}
