use crate::shared::ids::ResourceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceState {
    Pending,
    Active,
    Failed,
}

impl WorkspaceState {
    /// Pending -> Active/Failed is written by the build worker; any
    /// settled state returns to Pending when a rebuild is requested.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (WorkspaceState::Pending, WorkspaceState::Active)
                | (WorkspaceState::Pending, WorkspaceState::Failed)
                | (WorkspaceState::Active, WorkspaceState::Pending)
                | (WorkspaceState::Failed, WorkspaceState::Pending)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkspaceState::Failed)
    }
}

impl std::fmt::Display for WorkspaceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceState::Pending => write!(f, "pending"),
            WorkspaceState::Active => write!(f, "active"),
            WorkspaceState::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub id: ResourceId,
    pub state: WorkspaceState,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("workspace `{id}` not found")]
    UnknownWorkspace { id: ResourceId },
    #[error("workspace `{id}` state transition `{from}` -> `{to}` is invalid")]
    InvalidTransition {
        id: ResourceId,
        from: WorkspaceState,
        to: WorkspaceState,
    },
}

/// Shared workspace record store. One record per identity; the build
/// coordinator holds the lock across its read-decide-write-enqueue
/// sequence, the build worker writes settled states through
/// `mark_active`/`mark_failed`.
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    records: Mutex<BTreeMap<ResourceId, WorkspaceRecord>>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ResourceId) -> Option<WorkspaceRecord> {
        self.lock_records().get(id).cloned()
    }

    pub fn list(&self) -> Vec<WorkspaceRecord> {
        self.lock_records().values().cloned().collect()
    }

    pub fn mark_active(
        &self,
        id: &ResourceId,
        now: i64,
    ) -> Result<WorkspaceRecord, WorkspaceError> {
        self.transition(id, WorkspaceState::Active, now)
    }

    pub fn mark_failed(
        &self,
        id: &ResourceId,
        now: i64,
    ) -> Result<WorkspaceRecord, WorkspaceError> {
        self.transition(id, WorkspaceState::Failed, now)
    }

    fn transition(
        &self,
        id: &ResourceId,
        next: WorkspaceState,
        now: i64,
    ) -> Result<WorkspaceRecord, WorkspaceError> {
        let mut records = self.lock_records();
        let record = records
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::UnknownWorkspace { id: id.clone() })?;
        if !record.state.can_transition_to(next) {
            return Err(WorkspaceError::InvalidTransition {
                id: id.clone(),
                from: record.state,
                to: next,
            });
        }
        record.state = next;
        record.updated_at = now;
        Ok(record.clone())
    }

    pub(crate) fn lock_records(&self) -> MutexGuard<'_, BTreeMap<ResourceId, WorkspaceRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ids::ResourceKind;

    fn pending_record(store: &WorkspaceStore, now: i64) -> ResourceId {
        let id = ResourceId::issue(ResourceKind::Workspace);
        store.lock_records().insert(
            id.clone(),
            WorkspaceRecord {
                id: id.clone(),
                state: WorkspaceState::Pending,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    #[test]
    fn worker_settles_pending_records() {
        let store = WorkspaceStore::new();
        let id = pending_record(&store, 10);

        let active = store.mark_active(&id, 20).expect("activate");
        assert_eq!(active.state, WorkspaceState::Active);
        assert_eq!(active.updated_at, 20);
        assert_eq!(active.created_at, 10);
    }

    #[test]
    fn settled_records_reject_worker_writes() {
        let store = WorkspaceStore::new();
        let id = pending_record(&store, 10);
        store.mark_failed(&id, 20).expect("fail");

        let err = store.mark_active(&id, 30).expect_err("failed -> active");
        assert!(matches!(
            err,
            WorkspaceError::InvalidTransition {
                from: WorkspaceState::Failed,
                to: WorkspaceState::Active,
                ..
            }
        ));
    }

    #[test]
    fn unknown_workspace_is_reported() {
        let store = WorkspaceStore::new();
        let id = ResourceId::issue(ResourceKind::Workspace);
        assert!(matches!(
            store.mark_active(&id, 1),
            Err(WorkspaceError::UnknownWorkspace { .. })
        ));
    }

    #[test]
    fn transition_table_matches_ownership_split() {
        use WorkspaceState::*;
        assert!(Pending.can_transition_to(Active));
        assert!(Pending.can_transition_to(Failed));
        assert!(Active.can_transition_to(Pending));
        assert!(Failed.can_transition_to(Pending));
        assert!(!Active.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(Failed.is_terminal());
        assert!(!Active.is_terminal());
    }
}
