pub mod build_worker;
pub mod worker_primitives;

pub use build_worker::{drain_build_queue_once, run_build_worker_loop, BuildRunner};
pub use worker_primitives::{WorkerEvent, BUILD_MAX_POLL_MS, BUILD_MIN_POLL_MS};
