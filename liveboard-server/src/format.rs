//! Display formatting for board times and delays.

use chrono::{DateTime, Local, TimeZone, Timelike};

/// Shown in place of a time that is unknown or cannot be represented.
pub const UNKNOWN_TIME: &str = "--:--";

/// Format an epoch-seconds timestamp as `HH:MM` in the host's local zone.
pub fn format_time(epoch_seconds: i64) -> String {
    format_time_in(epoch_seconds, &Local)
}

/// Format an epoch-seconds timestamp as `HH:MM` in the given zone.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, Utc};
/// use liveboard_server::format::format_time_in;
///
/// assert_eq!(format_time_in(0, &Utc), "00:00");
/// assert_eq!(format_time_in(5 * 3600 + 3 * 60, &Utc), "05:03");
///
/// let brussels_winter = FixedOffset::east_opt(3600).unwrap();
/// assert_eq!(format_time_in(0, &brussels_winter), "01:00");
/// ```
pub fn format_time_in<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> String {
    match DateTime::from_timestamp(epoch_seconds, 0) {
        Some(utc) => {
            let local = utc.with_timezone(tz);
            format!("{:02}:{:02}", local.hour(), local.minute())
        }
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Format a delay in seconds as `+M'` or, from one hour on, `+HhMM`.
///
/// Hours are `floor(delay / 3600)` and minutes are
/// `floor((delay % 3600) / 60)`, with `%` keeping the dividend's sign.
/// Seconds are dropped.
///
/// # Examples
///
/// ```
/// use liveboard_server::format::format_delay;
///
/// assert_eq!(format_delay(90), "+1'");
/// assert_eq!(format_delay(3600), "+1h00");
/// assert_eq!(format_delay(5400), "+1h30");
/// ```
pub fn format_delay(delay_seconds: i64) -> String {
    let hours = delay_seconds.div_euclid(3600);
    let minutes = (delay_seconds % 3600).div_euclid(60);

    if hours > 0 {
        format!("+{hours}h{minutes:02}")
    } else {
        format!("+{minutes}'")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn time_at_epoch() {
        assert_eq!(format_time_in(0, &Utc), "00:00");
    }

    #[test]
    fn time_is_zero_padded() {
        assert_eq!(format_time_in(5 * 3600 + 3 * 60, &Utc), "05:03");
        assert_eq!(format_time_in(9 * 60, &Utc), "00:09");
    }

    #[test]
    fn time_drops_seconds() {
        assert_eq!(format_time_in(23 * 3600 + 59 * 60 + 59, &Utc), "23:59");
    }

    #[test]
    fn time_uses_zone() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_time_in(1_700_000_000, &Utc), "22:13");
        assert_eq!(format_time_in(1_700_000_000, &cest), "00:13");

        let west = FixedOffset::west_opt(3600).unwrap();
        assert_eq!(format_time_in(0, &west), "23:00");
    }

    #[test]
    fn time_before_epoch() {
        assert_eq!(format_time_in(-60, &Utc), "23:59");
    }

    #[test]
    fn unrepresentable_time() {
        assert_eq!(format_time_in(i64::MAX, &Utc), UNKNOWN_TIME);
    }

    #[test]
    fn local_time_has_clock_shape() {
        let s = format_time(1_700_000_000);
        assert_eq!(s.len(), 5);
        assert_eq!(&s[2..3], ":");
    }

    #[test]
    fn delay_minutes_only() {
        assert_eq!(format_delay(59), "+0'");
        assert_eq!(format_delay(60), "+1'");
        assert_eq!(format_delay(90), "+1'");
        assert_eq!(format_delay(300), "+5'");
        assert_eq!(format_delay(3599), "+59'");
    }

    #[test]
    fn delay_with_hours() {
        assert_eq!(format_delay(3600), "+1h00");
        assert_eq!(format_delay(5400), "+1h30");
        assert_eq!(format_delay(3600 + 5 * 60), "+1h05");
        assert_eq!(format_delay(11 * 3600 + 59 * 60 + 59), "+11h59");
    }

    #[test]
    fn delay_zero() {
        assert_eq!(format_delay(0), "+0'");
    }

    #[test]
    fn delay_negative() {
        // Callers only format positive delays; negative input keeps the
        // floor arithmetic rather than being clamped.
        assert_eq!(format_delay(-30), "+-1'");
        assert_eq!(format_delay(-90), "+-2'");
        assert_eq!(format_delay(-3600), "+0'");
        assert_eq!(format_delay(-5400), "+-30'");
    }
}
