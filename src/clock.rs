//! Wall-clock helpers.
//!
//! All engine functions take `now` and the local UTC offset explicitly so
//! they stay deterministic under test; only the binaries read the real clock.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};

/// One hour in milliseconds.
pub const HOUR_MS: i64 = 3_600_000;

/// Current time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Hour of day (0-23) of an epoch-millisecond timestamp in the given offset.
///
/// Timestamps outside chrono's representable range map to hour 0.
pub fn hour_of_day(timestamp_ms: i64, offset: FixedOffset) -> u32 {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map_or(0, |utc| utc.with_timezone(&offset).hour())
}

/// Build a fixed offset from minutes east of UTC, falling back to UTC when
/// the value is out of range (more than ±24h).
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(utc_offset)
}

/// The zero offset.
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}
