//! Day-first date/time interpretation for transcript headers.
//!
//! The header regex only checks the lexical shape (`[\d/-]+` and
//! `[\d:]+( [AP]M)?`), so this is where impossible dates like `31/31/20`
//! or times like `25:00` are caught.

use chrono::{DateTime, NaiveDateTime, Utc};

/// chrono formats tried in order against `"{date} {time}"`, with `-` in the
/// date already replaced by `/`.
///
/// Day-first wins over month-first, so `02/03/2021` is the 2nd of March.
/// `%y` comes before `%Y` because `%Y` would read `20` as the year 20.
const DATETIME_FORMATS: &[&str] = &[
    // Day-first
    "%d/%m/%y %I:%M:%S %p",
    "%d/%m/%y %I:%M %p",
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    // Month-first
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    // Year-first
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parses the date and time captured from a header.
///
/// - `date`: three numeric fields separated by `/` or `-`, read day-first,
///   then month-first, then year-first. Two-digit years follow chrono's
///   `%y` pivot: `00`-`69` are 20xx, `70`-`99` are 19xx.
/// - `time`: `H:M` or `H:M:S`, optionally followed by ` AM`/` PM`. With a
///   marker the hour is 1-12, and hour `0` is read as `12`.
///
/// Returns a human-readable reason on failure.
///
/// # Example
///
/// ```rust
/// use chatarchive::parsing::parse_header_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = parse_header_timestamp("1/2/20", "1:05 PM").unwrap();
/// assert_eq!(ts, Utc.with_ymd_and_hms(2020, 2, 1, 13, 5, 0).unwrap());
/// ```
pub fn parse_header_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>, String> {
    let datetime_str = format!("{} {}", date.replace('-', "/"), normalize_time(time));

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&datetime_str, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!(
        "date {date:?} with time {time:?} is not a valid calendar date and time"
    ))
}

fn normalize_time(time: &str) -> String {
    let (clock, meridiem) = match time.split_once(' ') {
        Some((clock, marker)) => (clock, Some(marker)),
        None => (time, None),
    };
    // `10:00: Ana: hi` captures the separator's colon as part of the time
    let clock = clock.strip_suffix(':').unwrap_or(clock);

    let Some(marker) = meridiem else {
        return clock.to_string();
    };
    match clock.split_once(':') {
        Some((hour, rest)) if !hour.is_empty() && hour.bytes().all(|b| b == b'0') => {
            format!("12:{rest} {marker}")
        }
        _ => format!("{clock} {marker}"),
    }
}
