use chrono::{DateTime, Utc};

use exam_core::quiz::format_countdown;

/// Wall time between two instants as `MM:SS`; negative spans read as zero.
#[must_use]
pub fn format_elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let secs = (to - from).num_seconds().clamp(0, i64::from(u32::MAX));
    format_countdown(u32::try_from(secs).unwrap_or(u32::MAX))
}
