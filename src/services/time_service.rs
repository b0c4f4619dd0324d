use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

// Fallbacks when the estimate text is unparseable. Applied silently, never
// surfaced to the caller; the reference system treats bad time text as a
// cosmetic problem, not a data problem.
const FALLBACK_START_HOUR: u32 = 9;
const FALLBACK_DURATION_MINUTES: i64 = 120;

/// How the event duration is derived from the estimate text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationPolicy {
    /// Compatibility mode, matching the reference system: always 2 hours,
    /// whatever the stated end time says.
    #[default]
    FixedDuration,
    /// Derive the duration from the stated end time when one is present and
    /// later than the start; otherwise fall back to 2 hours.
    FromRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
}

/// Parses a free-text time estimate like "09:00 AM - 11:00 AM" into a start
/// timestamp on `reference_date` plus a duration.
///
/// Only the first `H:MM AM|PM` occurrence determines the start. Unparseable
/// text falls back to 09:00 with the default duration rather than failing.
pub fn parse_time_estimate(
    text: &str,
    reference_date: NaiveDate,
    policy: DurationPolicy,
) -> TimeWindow {
    let pattern = Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(AM|PM)").unwrap();
    let mut matches = pattern.captures_iter(text);

    let start_time = matches
        .next()
        .and_then(|caps| clock_time(&caps))
        .unwrap_or_else(|| NaiveTime::from_hms_opt(FALLBACK_START_HOUR, 0, 0).unwrap());

    let duration_minutes = match policy {
        DurationPolicy::FixedDuration => FALLBACK_DURATION_MINUTES,
        DurationPolicy::FromRange => matches
            .next()
            .and_then(|caps| clock_time(&caps))
            .map(|end| (end - start_time).num_minutes())
            .filter(|&minutes| minutes > 0)
            .unwrap_or(FALLBACK_DURATION_MINUTES),
    };

    TimeWindow {
        start: reference_date.and_time(start_time),
        duration_minutes,
    }
}

/// 12-hour captures to a 24-hour clock time: PM adds 12 below noon, 12 AM is
/// midnight, minutes are taken verbatim.
fn clock_time(caps: &regex::Captures) -> Option<NaiveTime> {
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let suffix = caps[3].to_uppercase();

    if suffix == "PM" && hour < 12 {
        hour += 12;
    }
    if suffix == "AM" && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        date().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_parses_morning_range() {
        let window = parse_time_estimate("09:00 AM - 11:00 AM", date(), DurationPolicy::default());
        assert_eq!(window.start, at(9, 0));
        assert_eq!(window.duration_minutes, 120);
    }

    #[test]
    fn test_pm_conversion_keeps_minutes() {
        let window =
            parse_time_estimate("12:30 PM - 01:00 PM", date(), DurationPolicy::FixedDuration);
        assert_eq!(window.start, at(12, 30));
    }

    #[test]
    fn test_afternoon_start() {
        let window =
            parse_time_estimate("02:15 PM - 04:00 PM", date(), DurationPolicy::FixedDuration);
        assert_eq!(window.start, at(14, 15));
    }

    #[test]
    fn test_midnight_is_hour_zero() {
        let window = parse_time_estimate("12:05 AM", date(), DurationPolicy::FixedDuration);
        assert_eq!(window.start, at(0, 5));
    }

    #[test]
    fn test_garbage_falls_back_to_nine_with_two_hours() {
        let window = parse_time_estimate("garbage", date(), DurationPolicy::FixedDuration);
        assert_eq!(window.start, at(9, 0));
        assert_eq!(window.duration_minutes, 120);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let window = parse_time_estimate(
            "around 10:45 AM, maybe 11:30 AM",
            date(),
            DurationPolicy::FixedDuration,
        );
        assert_eq!(window.start, at(10, 45));
    }

    #[test]
    fn test_fixed_duration_ignores_stated_end() {
        let window =
            parse_time_estimate("09:00 AM - 09:30 AM", date(), DurationPolicy::FixedDuration);
        assert_eq!(window.duration_minutes, 120);
    }

    #[test]
    fn test_from_range_derives_duration() {
        let window = parse_time_estimate("09:00 AM - 11:00 AM", date(), DurationPolicy::FromRange);
        assert_eq!(window.duration_minutes, 120);

        let window = parse_time_estimate("12:30 PM - 01:00 PM", date(), DurationPolicy::FromRange);
        assert_eq!(window.start, at(12, 30));
        assert_eq!(window.duration_minutes, 30);
    }

    #[test]
    fn test_from_range_without_end_falls_back() {
        let window = parse_time_estimate("09:00 AM", date(), DurationPolicy::FromRange);
        assert_eq!(window.duration_minutes, 120);
    }

    #[test]
    fn test_from_range_with_inverted_end_falls_back() {
        // An end before the start (as text) yields no usable range.
        let window = parse_time_estimate("11:00 PM - 01:00 AM", date(), DurationPolicy::FromRange);
        assert_eq!(window.start, at(23, 0));
        assert_eq!(window.duration_minutes, 120);
    }

    #[test]
    fn test_lowercase_suffix_accepted() {
        let window = parse_time_estimate("9:05 am - 10:00 am", date(), DurationPolicy::FromRange);
        assert_eq!(window.start, at(9, 5));
        assert_eq!(window.duration_minutes, 55);
    }
}
