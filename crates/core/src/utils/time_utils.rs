use chrono::{DateTime, Duration, NaiveDate, Utc};

/// The instant a calendar date begins, in UTC.
///
/// Target dates are stored as plain dates; this is the single place that
/// decides which instant a date refers to when compared against a clock.
pub fn date_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Whole days from `now` until `deadline`, rounded up. Zero once the deadline
/// has passed.
///
/// Any remainder counts, down to the nanosecond.
pub fn days_until_ceil(now: DateTime<Utc>, deadline: DateTime<Utc>) -> i64 {
    let remaining = deadline - now;
    if remaining <= Duration::zero() {
        return 0;
    }
    let whole_days = remaining.num_days();
    if remaining > Duration::days(whole_days) {
        whole_days + 1
    } else {
        whole_days
    }
}
