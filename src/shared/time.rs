use chrono::Utc;

pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}
