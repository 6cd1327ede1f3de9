use std::time::UNIX_EPOCH;

/// Milliseconds since the UNIX epoch, used to stamp snapshots.
pub fn current_time_millis() -> u64 {
    UNIX_EPOCH
        .elapsed()
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
