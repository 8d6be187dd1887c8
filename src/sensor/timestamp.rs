//! Telegram timestamp decoding and the plausibility window.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Utc};

/// Stations report local time at UTC+8.
pub const STATION_OFFSET_SECS: i32 = 8 * 3600;

/// Oldest accepted telegram, in minutes behind receipt.
pub const MAX_MINUTES_BEHIND: i64 = 90 * 24 * 60;

/// Furthest accepted telegram, in minutes ahead of receipt.
pub const MAX_MINUTES_AHEAD: i64 = 24 * 60;

/// Parses either `YYYY-MM-DDTHH:MM:SS`, `YYMMDD/HHMMSS` or `YYYYMMDD/HHMMSS`.
pub fn parse_timestamp(token: &str) -> Option<DateTime<Utc>> {
    let token = token.trim();
    let iso = if token.contains('/') {
        let (year, rest) = if token.len() == 13 {
            (format!("20{}", token.get(0..2)?), token.get(2..)?)
        } else {
            (token.get(0..4)?.to_string(), token.get(4..)?)
        };
        format!(
            "{}-{}-{}T{}:{}:{}+08:00",
            year,
            rest.get(0..2)?,
            rest.get(2..4)?,
            rest.get(5..7)?,
            rest.get(7..9)?,
            rest.get(9..11)?,
        )
    } else {
        format!("{token}+08:00")
    };

    DateTime::parse_from_rfc3339(&iso)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Result of checking a telegram timestamp against the receipt time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plausibility {
    pub timestamp: DateTime<Utc>,
    pub minutes_difference: i64,
    pub error_msg: String,
}

/// Accepts `parsed` if it lies no more than 90 days behind and one day ahead
/// of `now`; otherwise falls back to `now` and describes the violation.
pub fn check_plausibility(
    parsed: Option<DateTime<Utc>>,
    raw: &str,
    now: DateTime<Utc>,
) -> Plausibility {
    let Some(ts) = parsed else {
        return Plausibility {
            timestamp: now,
            minutes_difference: 0,
            error_msg: format!("unreadable timestamp '{}', using receipt time", raw.trim()),
        };
    };

    let minutes_difference = (ts - now).num_minutes();
    let error_msg = if minutes_difference < -MAX_MINUTES_BEHIND {
        format!(
            "timestamp is {} minutes behind receipt time (limit {}), using receipt time",
            -minutes_difference, MAX_MINUTES_BEHIND
        )
    } else if minutes_difference > MAX_MINUTES_AHEAD {
        format!(
            "timestamp is {} minutes ahead of receipt time (limit {}), using receipt time",
            minutes_difference, MAX_MINUTES_AHEAD
        )
    } else {
        return Plausibility {
            timestamp: ts,
            minutes_difference,
            error_msg: String::new(),
        };
    };

    Plausibility {
        timestamp: now,
        minutes_difference,
        error_msg,
    }
}

fn station_local(ts: DateTime<Utc>) -> NaiveDateTime {
    let offset = FixedOffset::east_opt(STATION_OFFSET_SECS).expect("UTC+8 is a valid offset");
    ts.with_timezone(&offset).naive_local()
}

/// `YYYY-MM-DDTHH:MM:SS` at station time.
pub fn format_dashed(ts: DateTime<Utc>) -> String {
    station_local(ts).format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// `YYMMDD/HHMMSS` at station time, or `YYYYMMDD/HHMMSS` outside 2000-2099.
pub fn format_slashed(ts: DateTime<Utc>) -> String {
    let local = station_local(ts);
    if (2000..=2099).contains(&local.year()) {
        local.format("%y%m%d/%H%M%S").to_string()
    } else {
        local.format("%Y%m%d/%H%M%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap() - Duration::hours(8)
    }

    fn minutes(n: i64) -> Duration {
        Duration::minutes(n)
    }

    #[test]
    fn parses_all_three_encodings() {
        let expected = at(2023, 6, 15, 14, 30, 0);
        assert_eq!(parse_timestamp("2023-06-15T14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("230615/143000"), Some(expected));
        assert_eq!(parse_timestamp("20230615/143000"), Some(expected));
    }

    #[test]
    fn station_time_is_utc_plus_eight() {
        let ts = parse_timestamp("230615/143000").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 6, 15, 6, 30, 0).unwrap());
    }

    #[test]
    fn malformed_tokens_are_absent() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("23/"), None);
        assert_eq!(parse_timestamp("231315/143000"), None);
        assert_eq!(parse_timestamp("2023-06-15 14:30"), None);
        assert_eq!(parse_timestamp("ééé/ééé"), None);
    }

    #[test]
    fn formats_invert_parse() {
        let ts = at(2024, 1, 2, 3, 4, 5);
        assert_eq!(format_dashed(ts), "2024-01-02T03:04:05");
        assert_eq!(format_slashed(ts), "240102/030405");
        assert_eq!(parse_timestamp(&format_dashed(ts)), Some(ts));
        assert_eq!(parse_timestamp(&format_slashed(ts)), Some(ts));
    }

    #[test]
    fn slashed_format_keeps_century_outside_two_thousands() {
        let ts = at(1999, 12, 31, 23, 59, 58);
        assert_eq!(format_slashed(ts), "19991231/235958");
        assert_eq!(parse_timestamp(&format_slashed(ts)), Some(ts));

        let ts = at(2100, 1, 1, 0, 0, 0);
        assert_eq!(format_slashed(ts), "21000101/000000");
        assert_eq!(parse_timestamp(&format_slashed(ts)), Some(ts));
    }

    #[test]
    fn window_edges_are_inclusive() {
        let now = at(2023, 10, 1, 0, 0, 0);

        let behind = now - minutes(MAX_MINUTES_BEHIND);
        let p = check_plausibility(Some(behind), "", now);
        assert_eq!(p.timestamp, behind);
        assert_eq!(p.minutes_difference, -MAX_MINUTES_BEHIND);
        assert!(p.error_msg.is_empty());

        let ahead = now + minutes(MAX_MINUTES_AHEAD);
        let p = check_plausibility(Some(ahead), "", now);
        assert_eq!(p.timestamp, ahead);
        assert_eq!(p.minutes_difference, MAX_MINUTES_AHEAD);
        assert!(p.error_msg.is_empty());

        let p = check_plausibility(Some(behind - minutes(1)), "", now);
        assert_eq!(p.timestamp, now);
        assert!(!p.error_msg.is_empty());
    }

    #[test]
    fn recent_timestamp_passes_through() {
        let now = at(2023, 6, 15, 15, 0, 0);
        let ts = now - minutes(30);
        let p = check_plausibility(Some(ts), "", now);
        assert_eq!(p.timestamp, ts);
        assert_eq!(p.minutes_difference, -30);
        assert!(p.error_msg.is_empty());
    }

    #[test]
    fn slightly_ahead_passes_through() {
        let now = at(2023, 6, 15, 15, 0, 0);
        let ts = now + minutes(MAX_MINUTES_AHEAD - 1);
        let p = check_plausibility(Some(ts), "", now);
        assert_eq!(p.timestamp, ts);
        assert!(p.error_msg.is_empty());
    }

    #[test]
    fn stale_timestamp_is_replaced_by_now() {
        let now = at(2023, 10, 1, 0, 0, 0);
        let ts = now - minutes(MAX_MINUTES_BEHIND + 60);
        let p = check_plausibility(Some(ts), "", now);
        assert_eq!(p.timestamp, now);
        assert_eq!(p.minutes_difference, -(MAX_MINUTES_BEHIND + 60));
        assert!(p.error_msg.contains("behind"));
    }

    #[test]
    fn future_timestamp_is_replaced_by_now() {
        let now = at(2023, 6, 15, 0, 0, 0);
        let ts = now + minutes(MAX_MINUTES_AHEAD + 1);
        let p = check_plausibility(Some(ts), "", now);
        assert_eq!(p.timestamp, now);
        assert!(p.error_msg.contains("ahead"));
    }

    #[test]
    fn unreadable_timestamp_uses_now() {
        let now = at(2023, 6, 15, 0, 0, 0);
        let p = check_plausibility(None, "garbage", now);
        assert_eq!(p.timestamp, now);
        assert_eq!(p.minutes_difference, 0);
        assert!(p.error_msg.contains("garbage"));
    }
}
