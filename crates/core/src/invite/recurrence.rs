//! Invite timing and recurrence encoding
//!
//! A multi-day training is stored as a start and an end instant plus an
//! occurrence count; the invite shows one daily slot from the start time to
//! the end's time of day.

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use traincast_domain::{RecurrenceDescriptor, Result, TraincastError};

/// Convert both instants into `tz` and move the end onto the start's date.
///
/// The normalized end keeps the original end's time of day. Fails when that
/// time does not exist on the start date or is not after the start.
pub fn normalize_times(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let start_local = start.with_timezone(&tz);
    let end_local = end.with_timezone(&tz);
    let naive_end = start_local.date_naive().and_time(end_local.time());

    let normalized_end = match tz.from_local_datetime(&naive_end) {
        LocalResult::Single(value) => value,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(TraincastError::InvalidInput(format!(
                "end time {naive_end} does not exist in {tz}"
            )))
        }
    };

    if normalized_end <= start_local {
        return Err(TraincastError::InvalidInput(format!(
            "end time {} is not after start time {}",
            normalized_end.time(),
            start_local.time()
        )));
    }

    Ok((start_local, normalized_end))
}

/// Daily recurrence for more than one occurrence, nothing otherwise.
pub fn encode(start_date: NaiveDate, occurrences: u32) -> Option<RecurrenceDescriptor> {
    (occurrences > 1).then(|| RecurrenceDescriptor::daily(start_date, occurrences))
}
