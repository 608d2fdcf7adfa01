//! Human-readable timestamp format shared by request parsing and response rendering.
//!
//! Appointment dates travel as `"Thursday, April 4, 2030 5:00 PM"`. The weekday token
//! has to name a weekday in full but is not cross-checked against the calendar date.

use chrono::{Local, NaiveDateTime};

use crate::CoreError;

/// `strftime` pattern used for every timestamp rendered in a response.
pub const DISPLAY_FORMAT: &str = "%A, %B %d, %Y %I:%M %p";

/// Example shown to clients when parsing fails.
pub const DISPLAY_EXAMPLE: &str = "Thursday, April 1, 2024 5:00 PM";

const DATE_PART_FORMAT: &str = "%B %d, %Y %I:%M %p";

const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Studio wall-clock time. Appointment strings carry no zone, so they are compared and
/// stored as local time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Parse `"<Weekday>, <Month> <Day>, <Year> <Hour>:<Minute> <AM/PM>"`.
pub fn parse(raw: &str) -> Result<NaiveDateTime, CoreError> {
    let raw = raw.trim();
    let (weekday, rest) = raw
        .split_once(',')
        .ok_or_else(|| CoreError::Parse(format!("missing weekday in '{raw}'")))?;
    let weekday = weekday.trim();
    if !WEEKDAYS.iter().any(|w| w.eq_ignore_ascii_case(weekday)) {
        return Err(CoreError::Parse(format!("unknown weekday '{weekday}'")));
    }
    NaiveDateTime::parse_from_str(rest.trim(), DATE_PART_FORMAT)
        .map_err(|e| CoreError::Parse(format!("{e}: '{raw}'")))
}

/// `serde(with = ...)` adapter for required timestamps.
pub mod display {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// `serde(with = ...)` adapter for nullable timestamps.
pub mod display_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_str(&super::format(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        raw.map(|r| super::parse(&r).map_err(serde::de::Error::custom)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn parses_single_digit_day_and_hour() {
        let dt = parse("Thursday, April 4, 2030 5:00 PM").unwrap();
        assert_eq!(dt, at(2030, 4, 4, 17, 0));
    }

    #[test]
    fn parses_padded_fields_and_morning() {
        let dt = parse("Monday, January 01, 2001 09:30 AM").unwrap();
        assert_eq!(dt, at(2001, 1, 1, 9, 30));
    }

    #[test]
    fn weekday_is_not_cross_checked() {
        // 2030-04-04 is a Thursday
        let dt = parse("Sunday, April 4, 2030 5:00 PM").unwrap();
        assert_eq!(dt, at(2030, 4, 4, 17, 0));
    }

    #[test]
    fn rejects_unknown_weekday() {
        assert!(parse("Someday, April 4, 2030 5:00 PM").is_err());
    }

    #[test]
    fn weekday_must_be_spelled_out() {
        assert!(parse("Thu, April 4, 2030 5:00 PM").is_err());
        assert!(parse("Thurs, April 4, 2030 5:00 PM").is_err());
        assert_eq!(parse("thursday, April 4, 2030 5:00 PM").unwrap(), at(2030, 4, 4, 17, 0));
    }

    #[test]
    fn now_is_local_wall_clock() {
        let drift = now() - chrono::Local::now().naive_local();
        assert!(drift.num_seconds().abs() < 5);
    }

    #[test]
    fn rejects_iso_and_garbage() {
        assert!(parse("2030-04-04T17:00:00").is_err());
        assert!(parse("").is_err());
        assert!(parse("Thursday, Apryl 4, 2030 5:00 PM").is_err());
        assert!(parse("Thursday, April 4, 2030 17:00").is_err());
    }

    #[test]
    fn format_matches_display_pattern() {
        assert_eq!(format(&at(2030, 4, 4, 17, 5)), "Thursday, April 04, 2030 05:05 PM");
    }

    #[test]
    fn formatted_value_parses_back() {
        let dt = at(2031, 12, 25, 0, 15);
        assert_eq!(parse(&format(&dt)).unwrap(), dt);
    }
}
