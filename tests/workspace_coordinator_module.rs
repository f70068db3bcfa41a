use flowd::shared::ids::{ResourceId, ResourceKind};
use flowd::workspace::{build_channel, BuildCoordinator, BuildTask, WorkspaceState, WorkspaceStore};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;

fn coordinator() -> (BuildCoordinator, Arc<WorkspaceStore>, Receiver<BuildTask>) {
    let store = Arc::new(WorkspaceStore::new());
    let (tx, rx) = build_channel();
    (BuildCoordinator::new(store.clone(), tx), store, rx)
}

fn queued_tasks(rx: &Receiver<BuildTask>) -> Vec<BuildTask> {
    let mut tasks = Vec::new();
    while let Ok(task) = rx.try_recv() {
        tasks.push(task);
    }
    tasks
}

#[test]
fn workspace_coordinator_module_first_request_enqueues_one_task() {
    let (coordinator, store, rx) = coordinator();

    let record = coordinator.request_build(None, vec!["model.bin".to_string()], 10);
    assert_eq!(record.state, WorkspaceState::Pending);
    assert_eq!(store.list().len(), 1);

    let tasks = queued_tasks(&rx);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].workspace_id, record.id);
    assert_eq!(tasks[0].files, vec!["model.bin".to_string()]);
}

#[test]
fn workspace_coordinator_module_caller_supplied_identity_is_kept() {
    let (coordinator, store, rx) = coordinator();
    let id = ResourceId::issue(ResourceKind::Workspace);

    let record = coordinator.request_build(Some(id.clone()), vec![], 10);
    assert_eq!(record.id, id);
    assert_eq!(store.get(&id).map(|r| r.state), Some(WorkspaceState::Pending));
    assert_eq!(queued_tasks(&rx).len(), 1);
}

#[test]
fn workspace_coordinator_module_concurrent_pending_requests_coalesce() {
    let (coordinator, store, rx) = coordinator();
    let record = coordinator.request_build(None, vec![], 10);
    assert_eq!(queued_tasks(&rx).len(), 1);

    let mut handles = Vec::new();
    for worker in 0..8 {
        let coordinator = coordinator.clone();
        let id = record.id.clone();
        handles.push(thread::spawn(move || {
            coordinator.request_build(Some(id), vec![format!("late-{worker}.yml")], 20)
        }));
    }
    for handle in handles {
        let repeat = handle.join().expect("request thread");
        assert_eq!(repeat.state, WorkspaceState::Pending);
    }

    assert!(queued_tasks(&rx).is_empty(), "pending requests must coalesce");
    assert_eq!(store.get(&record.id).map(|r| r.updated_at), Some(10));
}

#[test]
fn workspace_coordinator_module_rebuild_after_activation() {
    let (coordinator, store, rx) = coordinator();
    let record = coordinator.request_build(None, vec![], 10);
    assert_eq!(queued_tasks(&rx).len(), 1);
    store.mark_active(&record.id, 15).expect("activate");

    let rebuilt = coordinator.request_build(Some(record.id.clone()), vec![], 20);
    assert_eq!(rebuilt.state, WorkspaceState::Pending);
    let tasks = queued_tasks(&rx);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].workspace_id, record.id);
}

#[test]
fn workspace_coordinator_module_interleaved_lifecycle_queues_one_task_per_cycle() {
    let (coordinator, store, rx) = coordinator();
    let record = coordinator.request_build(None, vec![], 10);

    for cycle in 0..3 {
        let now = 20 + cycle * 10;
        assert_eq!(queued_tasks(&rx).len(), 1, "cycle {cycle}");
        coordinator.request_build(Some(record.id.clone()), vec![], now);
        assert!(queued_tasks(&rx).is_empty(), "cycle {cycle} must coalesce");
        store.mark_active(&record.id, now + 5).expect("activate");
        coordinator.request_build(Some(record.id.clone()), vec![], now + 6);
    }
    assert_eq!(queued_tasks(&rx).len(), 1);
}
