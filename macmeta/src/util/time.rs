// SPDX-License-Identifier: MIT

//! Timestamp display.

use std::time::SystemTime;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Time first, short date after, the way the old tools printed it.
const STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second] [day]/[month]/[year]");

pub fn to_datetime(t: SystemTime) -> OffsetDateTime {
    OffsetDateTime::from(t)
}

/// Renders a timestamp, or `-` when the platform does not provide one.
pub fn format_timestamp(t: Option<SystemTime>) -> String {
    match t {
        Some(t) => to_datetime(t)
            .format(STAMP)
            .unwrap_or_else(|_| "-".to_string()),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_epoch_formats() {
        let stamp = format_timestamp(Some(SystemTime::UNIX_EPOCH));
        assert_eq!(stamp, "00:00:00 01/01/1970");
    }

    #[test]
    fn test_known_instant() {
        // 2003-06-15 12:34:56 UTC.
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_055_680_496);
        assert_eq!(format_timestamp(Some(t)), "12:34:56 15/06/2003");
    }

    #[test]
    fn test_missing_is_dash() {
        assert_eq!(format_timestamp(None), "-");
    }
}
