pub const BUILD_MIN_POLL_MS: u64 = 100;
pub const BUILD_MAX_POLL_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Heartbeat {
        worker_id: String,
        at: i64,
    },
    Error {
        worker_id: String,
        at: i64,
        message: String,
        fatal: bool,
    },
    Stopped {
        worker_id: String,
        at: i64,
    },
}
