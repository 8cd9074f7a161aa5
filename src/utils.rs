use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

/// Convert smallest-unit amounts to whole coins for human-facing output
pub fn mist_to_sui(mist: u64) -> f64 {
    mist as f64 / 1_000_000_000.0
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
        .and_utc()
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    match date.and_hms_milli_opt(23, 59, 59, 999) {
        Some(end) => end.and_utc(),
        None => start_of_day(date),
    }
}

/// Epoch-millis wire timestamps; absent or malformed values collapse to
/// the epoch, matching the upstream fallback of "0".
pub fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
}
