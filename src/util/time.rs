use chrono::{Local, Utc};

/// Current time as an ISO-8601 / RFC 3339 string, used to stamp exported
/// snapshots.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Compact local timestamp for artifact file names
/// (e.g. `design-20260827-143015.json`).
pub fn file_timestamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}
