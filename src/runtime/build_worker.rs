use super::worker_primitives::{WorkerEvent, BUILD_MAX_POLL_MS, BUILD_MIN_POLL_MS};
use crate::shared::logging::append_daemon_log_line;
use crate::shared::time::now_secs;
use crate::workspace::coordinator::BuildTask;
use crate::workspace::store::WorkspaceStore;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Performs the actual workspace preparation for one task. The daemon
/// injects the real implementation; tests inject stubs.
pub trait BuildRunner: Send + Sync {
    fn build(&self, task: &BuildTask) -> Result<(), String>;
}

impl<F> BuildRunner for F
where
    F: Fn(&BuildTask) -> Result<(), String> + Send + Sync,
{
    fn build(&self, task: &BuildTask) -> Result<(), String> {
        self(task)
    }
}

/// Single pass over whatever is queued right now. Stops at the first
/// store write failure or failed build; settled states are recorded
/// before the error is returned.
pub fn drain_build_queue_once(
    store: &WorkspaceStore,
    tasks: &Receiver<BuildTask>,
    runner: &dyn BuildRunner,
) -> Result<usize, String> {
    let mut processed = 0usize;
    while let Ok(task) = tasks.try_recv() {
        complete_build_task(store, runner, &task)?;
        processed += 1;
    }
    Ok(processed)
}

/// Long-running build worker: drains the task channel, settles each
/// workspace record through the store and reports over the event channel.
/// Exits on the stop flag or when every task sender is gone.
pub fn run_build_worker_loop(
    worker_id: String,
    state_root: PathBuf,
    store: Arc<WorkspaceStore>,
    tasks: Receiver<BuildTask>,
    runner: Arc<dyn BuildRunner>,
    stop: Arc<AtomicBool>,
    events: Sender<WorkerEvent>,
) {
    let mut backoff_ms = BUILD_MIN_POLL_MS;
    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        match tasks.recv_timeout(Duration::from_millis(backoff_ms)) {
            Ok(task) => {
                backoff_ms = BUILD_MIN_POLL_MS;
                match complete_build_task(&store, runner.as_ref(), &task) {
                    Ok(()) => {
                        let _ = append_daemon_log_line(
                            &state_root,
                            &format!("workspace {} build succeeded", task.workspace_id),
                        );
                        let _ = events.send(WorkerEvent::Heartbeat {
                            worker_id: worker_id.clone(),
                            at: now_secs(),
                        });
                    }
                    Err(message) => {
                        let _ = append_daemon_log_line(&state_root, &message);
                        let _ = events.send(WorkerEvent::Error {
                            worker_id: worker_id.clone(),
                            at: now_secs(),
                            message,
                            fatal: false,
                        });
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                backoff_ms = backoff_ms.saturating_mul(2).min(BUILD_MAX_POLL_MS);
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    let _ = events.send(WorkerEvent::Stopped {
        worker_id,
        at: now_secs(),
    });
}

fn complete_build_task(
    store: &WorkspaceStore,
    runner: &dyn BuildRunner,
    task: &BuildTask,
) -> Result<(), String> {
    match runner.build(task) {
        Ok(()) => {
            store
                .mark_active(&task.workspace_id, now_secs())
                .map_err(|err| err.to_string())?;
            Ok(())
        }
        Err(reason) => {
            store
                .mark_failed(&task.workspace_id, now_secs())
                .map_err(|err| err.to_string())?;
            Err(format!(
                "workspace {} build failed: {reason}",
                task.workspace_id
            ))
        }
    }
}
