//! Rotation time arithmetic for repeating shift templates.
//!
//! A template is authored in cyclic form: a start and an end point, each a
//! day offset within an N-day rotation plus a time of day. It is stored (and
//! consumed by the solver) in absolute form: the offset of the start from the
//! beginning of the rotation plus the shift length.
//!
//! An end point that does not come strictly after the start point within the
//! same cycle belongs to the next cycle. This lets a shift run past the
//! rotation boundary, e.g. start on the last day and end on day 0. Equal
//! start and end points therefore describe a shift one full rotation long,
//! never a zero-length one.

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

// ---------------------------------------------------------------------------
// Rotation length
// ---------------------------------------------------------------------------

/// Number of days in a rotation cycle. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RotationLength(u32);

impl RotationLength {
    pub fn new(days: u32) -> Result<Self, CoreError> {
        if days == 0 {
            return Err(CoreError::InvalidArgument(
                "rotation length must be at least one day".to_string(),
            ));
        }
        Ok(Self(days))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// The whole cycle as a duration.
    pub fn as_duration(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.0) * SECONDS_PER_DAY)
    }
}

impl TryFrom<u32> for RotationLength {
    type Error = CoreError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<RotationLength> for u32 {
    fn from(length: RotationLength) -> Self {
        length.0
    }
}

impl std::fmt::Display for RotationLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.0)
    }
}

// ---------------------------------------------------------------------------
// Span representations
// ---------------------------------------------------------------------------

/// Start and end points of a shift as day offsets within the rotation plus
/// times of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclicSpan {
    pub start_day_offset: u32,
    pub start_time: NaiveTime,
    pub end_day_offset: u32,
    pub end_time: NaiveTime,
}

impl CyclicSpan {
    /// Whether the end point falls in the next rotation cycle.
    pub fn wraps(&self) -> bool {
        self.end_day_offset < self.start_day_offset
            || (self.end_day_offset == self.start_day_offset && self.end_time <= self.start_time)
    }
}

/// Offset of the shift start from the rotation start, plus shift length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteSpan {
    pub start_offset: TimeDelta,
    pub duration: TimeDelta,
}

impl AbsoluteSpan {
    pub fn end_offset(&self) -> TimeDelta {
        self.start_offset + self.duration
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert cyclic endpoints into an absolute start offset and duration.
///
/// Day offsets must lie in `[0, rotation_length)` and times must have whole
/// second precision.
pub fn to_absolute(span: &CyclicSpan, rotation_length: RotationLength) -> Result<AbsoluteSpan, CoreError> {
    validate_day_offset("start", span.start_day_offset, rotation_length)?;
    validate_day_offset("end", span.end_day_offset, rotation_length)?;
    let start_time = time_of_day("start", span.start_time)?;
    let end_time = time_of_day("end", span.end_time)?;

    let mut end_day = i64::from(span.end_day_offset);
    if span.wraps() {
        end_day += i64::from(rotation_length.days());
    }

    let start_offset = TimeDelta::days(i64::from(span.start_day_offset)) + start_time;
    let end_offset = TimeDelta::days(end_day) + end_time;

    Ok(AbsoluteSpan {
        start_offset,
        duration: end_offset - start_offset,
    })
}

/// Convert an absolute start offset and duration into cyclic endpoints.
///
/// The end day offset is reduced modulo the rotation length, so a shift
/// that crosses the rotation boundary reports an end point at or before its
/// start point.
///
/// The start must fall inside the first cycle and the shift may last at most
/// one full cycle; anything longer has no cyclic representation. A
/// zero-length span converts to equal endpoints, which [`to_absolute`] reads
/// back as a full rotation.
pub fn to_cyclic(span: &AbsoluteSpan, rotation_length: RotationLength) -> Result<CyclicSpan, CoreError> {
    let cycle = rotation_length.as_duration();

    if span.start_offset < TimeDelta::zero() {
        return Err(CoreError::InvalidArgument(format!(
            "start offset must not be negative, got {}s",
            span.start_offset.num_seconds()
        )));
    }
    if span.start_offset >= cycle {
        return Err(CoreError::InvalidArgument(format!(
            "start offset of {}s lies outside a rotation of {rotation_length}",
            span.start_offset.num_seconds()
        )));
    }
    if span.duration < TimeDelta::zero() {
        return Err(CoreError::InvalidArgument(format!(
            "shift duration must not be negative, got {}s",
            span.duration.num_seconds()
        )));
    }
    if span.duration > cycle {
        return Err(CoreError::InvalidArgument(format!(
            "shift duration of {}s is longer than a rotation of {rotation_length}",
            span.duration.num_seconds()
        )));
    }
    if span.start_offset.subsec_nanos() != 0 || span.duration.subsec_nanos() != 0 {
        return Err(CoreError::InvalidArgument(
            "rotation offsets must have whole second precision".to_string(),
        ));
    }

    let (start_day_offset, start_time) = split_days(span.start_offset.num_seconds())?;
    let (end_day, end_time) = split_days(span.end_offset().num_seconds())?;

    Ok(CyclicSpan {
        start_day_offset,
        start_time,
        end_day_offset: end_day % rotation_length.days(),
        end_time,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_day_offset(which: &str, day_offset: u32, rotation_length: RotationLength) -> Result<(), CoreError> {
    if day_offset >= rotation_length.days() {
        return Err(CoreError::InvalidArgument(format!(
            "{which} day offset {day_offset} lies outside a rotation of {rotation_length}"
        )));
    }
    Ok(())
}

fn time_of_day(which: &str, time: NaiveTime) -> Result<TimeDelta, CoreError> {
    if time.nanosecond() != 0 {
        return Err(CoreError::InvalidArgument(format!(
            "{which} time {time} must have whole second precision"
        )));
    }
    Ok(TimeDelta::seconds(i64::from(time.num_seconds_from_midnight())))
}

/// Split non-negative seconds into whole days and the remaining time of day.
fn split_days(seconds: i64) -> Result<(u32, NaiveTime), CoreError> {
    let days = u32::try_from(seconds.div_euclid(SECONDS_PER_DAY))
        .map_err(|_| CoreError::InvalidArgument(format!("{seconds}s is out of range")))?;
    let remainder = seconds.rem_euclid(SECONDS_PER_DAY) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(remainder, 0)
        .ok_or_else(|| CoreError::InvalidArgument(format!("{remainder}s is not a time of day")))?;
    Ok((days, time))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn hm(hours: u32, minutes: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hours, minutes, 0).unwrap()
    }

    fn days(n: u32) -> RotationLength {
        RotationLength::new(n).unwrap()
    }

    fn cyclic(start_day: u32, start: NaiveTime, end_day: u32, end: NaiveTime) -> CyclicSpan {
        CyclicSpan {
            start_day_offset: start_day,
            start_time: start,
            end_day_offset: end_day,
            end_time: end,
        }
    }

    // -----------------------------------------------------------------------
    // to_absolute
    // -----------------------------------------------------------------------

    #[test]
    fn same_day_shift_does_not_wrap() {
        let span = cyclic(1, hm(9, 0), 1, hm(17, 0));
        let absolute = to_absolute(&span, days(24)).unwrap();
        assert_eq!(absolute.start_offset, TimeDelta::days(1) + TimeDelta::hours(9));
        assert_eq!(absolute.duration, TimeDelta::hours(8));
    }

    #[test]
    fn overnight_shift_spans_midnight_without_wrapping() {
        let span = cyclic(2, hm(22, 0), 3, hm(6, 0));
        assert!(!span.wraps());
        let absolute = to_absolute(&span, days(7)).unwrap();
        assert_eq!(absolute.duration, TimeDelta::hours(8));
    }

    #[test]
    fn last_day_to_first_day_wraps_rotation_boundary() {
        let span = cyclic(23, hm(9, 0), 0, hm(9, 0));
        assert!(span.wraps());
        let absolute = to_absolute(&span, days(24)).unwrap();
        assert_eq!(absolute.start_offset, TimeDelta::days(23) + TimeDelta::hours(9));
        assert_eq!(absolute.duration, TimeDelta::hours(24));
    }

    #[test]
    fn end_before_start_on_same_day_wraps() {
        let span = cyclic(0, hm(9, 0), 0, hm(8, 0));
        let absolute = to_absolute(&span, days(7)).unwrap();
        assert_eq!(absolute.duration, TimeDelta::days(7) - TimeDelta::hours(1));
    }

    #[test]
    fn equal_endpoints_are_a_full_rotation() {
        let span = cyclic(3, hm(9, 0), 3, hm(9, 0));
        let absolute = to_absolute(&span, days(7)).unwrap();
        assert_eq!(absolute.duration, TimeDelta::days(7));
    }

    #[test]
    fn day_offset_outside_rotation_is_rejected() {
        let span = cyclic(0, hm(9, 0), 7, hm(9, 0));
        let err = to_absolute(&span, days(7)).unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(msg) if msg.contains("end day offset 7"));
    }

    #[test]
    fn sub_second_times_are_rejected() {
        let start = NaiveTime::from_hms_milli_opt(9, 0, 0, 500).unwrap();
        let span = cyclic(0, start, 0, hm(17, 0));
        assert_matches!(to_absolute(&span, days(7)), Err(CoreError::InvalidArgument(_)));
    }

    // -----------------------------------------------------------------------
    // to_cyclic
    // -----------------------------------------------------------------------

    #[test]
    fn boundary_crossing_shift_reports_smaller_end_day() {
        let absolute = AbsoluteSpan {
            start_offset: TimeDelta::days(23) + TimeDelta::hours(9),
            duration: TimeDelta::hours(24),
        };
        let span = to_cyclic(&absolute, days(24)).unwrap();
        assert_eq!(span, cyclic(23, hm(9, 0), 0, hm(9, 0)));
    }

    #[test]
    fn plain_shift_splits_into_days_and_times() {
        let absolute = AbsoluteSpan {
            start_offset: TimeDelta::days(1) + TimeDelta::hours(9),
            duration: TimeDelta::hours(8),
        };
        let span = to_cyclic(&absolute, days(24)).unwrap();
        assert_eq!(span, cyclic(1, hm(9, 0), 1, hm(17, 0)));
    }

    #[test]
    fn negative_values_are_rejected() {
        let negative_start = AbsoluteSpan {
            start_offset: TimeDelta::hours(-1),
            duration: TimeDelta::hours(8),
        };
        assert_matches!(to_cyclic(&negative_start, days(7)), Err(CoreError::InvalidArgument(_)));

        let negative_duration = AbsoluteSpan {
            start_offset: TimeDelta::hours(1),
            duration: TimeDelta::hours(-8),
        };
        assert_matches!(to_cyclic(&negative_duration, days(7)), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn start_outside_first_cycle_is_rejected() {
        let absolute = AbsoluteSpan {
            start_offset: TimeDelta::days(7),
            duration: TimeDelta::hours(8),
        };
        assert_matches!(to_cyclic(&absolute, days(7)), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn duration_longer_than_rotation_is_rejected() {
        let absolute = AbsoluteSpan {
            start_offset: TimeDelta::zero(),
            duration: TimeDelta::days(7) + TimeDelta::minutes(1),
        };
        assert_matches!(to_cyclic(&absolute, days(7)), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn zero_duration_reads_back_as_full_rotation() {
        let absolute = AbsoluteSpan {
            start_offset: TimeDelta::hours(9),
            duration: TimeDelta::zero(),
        };
        let span = to_cyclic(&absolute, days(7)).unwrap();
        assert_eq!(span, cyclic(0, hm(9, 0), 0, hm(9, 0)));
        assert_eq!(to_absolute(&span, days(7)).unwrap().duration, TimeDelta::days(7));
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    #[test]
    fn absolute_round_trips_through_cyclic() {
        let length = days(5);
        for start_minutes in (0..5 * 24 * 60).step_by(7 * 60 + 13) {
            for duration_minutes in [1, 59, 8 * 60, 24 * 60, 3 * 24 * 60 + 17, 5 * 24 * 60] {
                let absolute = AbsoluteSpan {
                    start_offset: TimeDelta::minutes(start_minutes),
                    duration: TimeDelta::minutes(duration_minutes),
                };
                let span = to_cyclic(&absolute, length).unwrap();
                assert_eq!(to_absolute(&span, length).unwrap(), absolute, "{span:?}");
            }
        }
    }

    #[test]
    fn canonical_cyclic_round_trips_through_absolute() {
        let length = days(24);
        let span = cyclic(23, hm(9, 0), 0, hm(9, 0));
        let absolute = to_absolute(&span, length).unwrap();
        assert_eq!(to_cyclic(&absolute, length).unwrap(), span);
    }

    // -----------------------------------------------------------------------
    // RotationLength
    // -----------------------------------------------------------------------

    #[test]
    fn zero_rotation_length_is_rejected() {
        assert_matches!(RotationLength::new(0), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn rotation_length_deserializes_with_validation() {
        let length: RotationLength = serde_json::from_str("24").unwrap();
        assert_eq!(length.days(), 24);
        assert!(serde_json::from_str::<RotationLength>("0").is_err());
        assert_eq!(serde_json::to_string(&length).unwrap(), "24");
    }
}
