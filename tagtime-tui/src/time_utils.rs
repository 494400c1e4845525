use time::{OffsetDateTime, UtcOffset};

/// Convert to the local offset in effect at `dt`, or leave as UTC when it
/// cannot be determined.
pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    match UtcOffset::local_offset_at(dt) {
        Ok(local_offset) => dt.to_offset(local_offset),
        Err(_) => dt,
    }
}
