use chrono::{DateTime, FixedOffset};

/// Offset of Indian Standard Time (UTC+05:30) in seconds.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Format used for human readable local timestamps, e.g.
/// `Sep 18, 2024, 05:13:04 AM`.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// Converts unix epoch seconds into a wall clock string at a fixed offset.
///
/// Returns `None` if the timestamp or the offset is out of range.
pub fn format_epoch_at_offset(
    epoch_secs: i64,
    offset_secs: i32,
) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    let utc = DateTime::from_timestamp(epoch_secs, 0)?;
    Some(
        utc.with_timezone(&offset)
            .format(LOCAL_TIMESTAMP_FORMAT)
            .to_string(),
    )
}
