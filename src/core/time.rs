//! Timestamps and run identifiers.

use chrono::{SecondsFormat, Utc};
use ulid::Ulid;

/// Current UTC time as ISO-8601 with millisecond precision (e.g. `2026-10-18T09:14:03.512Z`).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn new_run_id() -> String {
    Ulid::new().to_string()
}
