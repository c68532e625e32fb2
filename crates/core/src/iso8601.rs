//! ISO-8601 duration strings for persisted rotation offsets.
//!
//! Only the day and time components (`PnDTnHnMn.nS`) are supported, which is
//! what the roster backend reads and writes. Calendar components (years,
//! months, weeks) have no fixed length and are rejected.

use chrono::TimeDelta;

use crate::error::CoreError;

/// Format a duration the way the backend does: hours, minutes and seconds
/// under a single `T` designator (`PT561H`, `PT8H30M`, `PT0S`).
pub fn format_duration(duration: TimeDelta) -> String {
    let sign = if duration < TimeDelta::zero() { "-" } else { "" };
    let duration = duration.abs();

    let total_seconds = duration.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let nanos = duration.subsec_nanos();

    let mut out = format!("{sign}PT");
    if hours != 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes != 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        out.push_str(&format!("{seconds}.{}S", fraction.trim_end_matches('0')));
    } else if seconds != 0 || (hours == 0 && minutes == 0) {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

/// Parse a day/time ISO-8601 duration such as `P1DT8H` or `PT30M`.
pub fn parse_duration(input: &str) -> Result<TimeDelta, CoreError> {
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let rest = rest
        .strip_prefix('P')
        .ok_or_else(|| invalid(input, "missing 'P' designator"))?;

    let (date_part, time_part) = match rest.split_once('T') {
        Some((_, "")) => return Err(invalid(input, "'T' designator without time components")),
        Some((date, time)) => (date, time),
        None if rest.is_empty() => return Err(invalid(input, "no components")),
        None => (rest, ""),
    };

    let mut total = TimeDelta::zero();
    for (value, unit) in components(input, date_part)? {
        let part = match unit {
            'D' => scaled(input, &value, 86_400)?,
            'Y' | 'M' | 'W' => return Err(invalid(input, "calendar components are not supported")),
            other => return Err(invalid(input, format!("unknown date component '{other}'"))),
        };
        total = add(input, total, part)?;
    }
    for (value, unit) in components(input, time_part)? {
        let part = match unit {
            'H' => scaled(input, &value, 3600)?,
            'M' => scaled(input, &value, 60)?,
            'S' => fractional_seconds(input, &value)?,
            other => return Err(invalid(input, format!("unknown time component '{other}'"))),
        };
        total = add(input, total, part)?;
    }

    Ok(if negative { -total } else { total })
}

/// `value` units of `unit_seconds` each, or an error past `TimeDelta`'s range.
fn scaled(input: &str, value: &str, unit_seconds: i64) -> Result<TimeDelta, CoreError> {
    whole(input, value)?
        .checked_mul(unit_seconds)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| invalid(input, "out of range"))
}

fn add(input: &str, total: TimeDelta, part: TimeDelta) -> Result<TimeDelta, CoreError> {
    total
        .checked_add(&part)
        .ok_or_else(|| invalid(input, "out of range"))
}

fn invalid(input: &str, reason: impl std::fmt::Display) -> CoreError {
    CoreError::InvalidArgument(format!("invalid ISO-8601 duration '{input}': {reason}"))
}

/// Split `"1D"`-style runs into `(number, unit)` pairs.
fn components(input: &str, part: &str) -> Result<Vec<(String, char)>, CoreError> {
    let mut out = Vec::new();
    let mut number = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            number.push(if c == ',' { '.' } else { c });
        } else if number.is_empty() {
            return Err(invalid(input, format!("component '{c}' has no value")));
        } else {
            out.push((std::mem::take(&mut number), c));
        }
    }
    if !number.is_empty() {
        return Err(invalid(input, format!("trailing value '{number}' has no unit")));
    }
    Ok(out)
}

fn whole(input: &str, value: &str) -> Result<i64, CoreError> {
    value
        .parse::<i64>()
        .map_err(|_| invalid(input, format!("'{value}' is not a whole number")))
}

fn fractional_seconds(input: &str, value: &str) -> Result<TimeDelta, CoreError> {
    let (whole_part, fraction) = value.split_once('.').unwrap_or((value, ""));
    let seconds = whole(input, whole_part)?;
    if fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(input, format!("'{value}' is not a valid seconds value")));
    }
    let nanos = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}")
            .parse::<i64>()
            .map_err(|_| invalid(input, format!("'{value}' is not a valid seconds value")))?
    };
    TimeDelta::try_seconds(seconds)
        .and_then(|base| base.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(|| invalid(input, "out of range"))
}

/// `serde(with = "...")` adapter storing a [`TimeDelta`] as an ISO-8601 string.
pub mod serde_duration {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -----------------------------------------------------------------------
    // format_duration
    // -----------------------------------------------------------------------

    #[test]
    fn formats_days_as_hours() {
        let d = TimeDelta::days(23) + TimeDelta::hours(9);
        assert_eq!(format_duration(d), "PT561H");
    }

    #[test]
    fn formats_mixed_components() {
        assert_eq!(format_duration(TimeDelta::hours(8) + TimeDelta::minutes(30)), "PT8H30M");
        assert_eq!(format_duration(TimeDelta::seconds(61)), "PT1M1S");
        assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "PT1.5S");
    }

    #[test]
    fn formats_zero_and_negative() {
        assert_eq!(format_duration(TimeDelta::zero()), "PT0S");
        assert_eq!(format_duration(TimeDelta::hours(-2)), "-PT2H");
    }

    // -----------------------------------------------------------------------
    // parse_duration
    // -----------------------------------------------------------------------

    #[test]
    fn parses_backend_output() {
        assert_eq!(parse_duration("PT561H").unwrap(), TimeDelta::hours(561));
        assert_eq!(parse_duration("PT8H30M").unwrap(), TimeDelta::minutes(510));
        assert_eq!(parse_duration("PT0S").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn parses_day_component() {
        assert_eq!(
            parse_duration("P1DT8H").unwrap(),
            TimeDelta::days(1) + TimeDelta::hours(8)
        );
        assert_eq!(parse_duration("P2D").unwrap(), TimeDelta::days(2));
    }

    #[test]
    fn parses_fractional_seconds_and_sign() {
        assert_eq!(parse_duration("PT0.25S").unwrap(), TimeDelta::milliseconds(250));
        assert_eq!(parse_duration("PT1,5S").unwrap(), TimeDelta::milliseconds(1500));
        assert_eq!(parse_duration("-PT2H").unwrap(), TimeDelta::hours(-2));
    }

    #[test]
    fn rejects_calendar_components() {
        let err = parse_duration("P1M").unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(msg) if msg.contains("calendar"));
        assert!(parse_duration("P1Y").is_err());
        assert!(parse_duration("P1W").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "P", "PT", "8H", "PT8", "PTH", "PT1.5H", "P1DT", "PT1X"] {
            assert!(parse_duration(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn rejects_components_past_duration_range() {
        for input in [
            "PT9999999999999999S",
            "P99999999999999D",
            "PT99999999999999H",
            "PT9999999999999999999M",
            "P106000000000DT99999999999H",
        ] {
            let err = parse_duration(input).unwrap_err();
            assert_matches!(err, CoreError::InvalidArgument(_), "{input}");
        }
    }

    #[test]
    fn formatted_values_parse_back() {
        let d = TimeDelta::days(3) + TimeDelta::minutes(17) + TimeDelta::seconds(4);
        assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
    }
}
