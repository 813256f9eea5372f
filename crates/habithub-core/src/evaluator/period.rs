//! Period boundary arithmetic.
//!
//! All boundaries are computed in UTC at millisecond precision: a
//! daily period ends at 23:59:59.999, a weekly period on Sunday (weeks
//! start Monday), a monthly period on the last day of the month.
//! Compressed timing replaces the calendar entirely with short fixed
//! durations so a full reward cycle can be observed in minutes.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Utc};

use crate::habit::Period;

/// Fixed period lengths used by [`Timing::Compressed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedPeriods {
    pub daily: Duration,
    pub weekly: Duration,
    pub monthly: Duration,
}

impl CompressedPeriods {
    pub fn duration(&self, period: Period) -> Duration {
        match period {
            Period::Daily => self.daily,
            Period::Weekly => self.weekly,
            Period::Monthly => self.monthly,
        }
    }
}

impl Default for CompressedPeriods {
    fn default() -> Self {
        CompressedPeriods {
            daily: Duration::minutes(1),
            weekly: Duration::minutes(2),
            monthly: Duration::minutes(3),
        }
    }
}

/// How period boundaries are derived from instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Real calendar boundaries (end of day, ISO week, month).
    Calendar,
    /// Fixed short durations instead of calendar boundaries.
    Compressed(CompressedPeriods),
}

impl Default for Timing {
    fn default() -> Self {
        Timing::Calendar
    }
}

impl Timing {
    /// End of the period that contains `instant`.
    pub fn period_end(&self, instant: DateTime<Utc>, period: Period) -> DateTime<Utc> {
        match self {
            Timing::Calendar => match period {
                Period::Daily => end_of_day(instant),
                Period::Weekly => end_of_week(instant),
                Period::Monthly => end_of_month(instant),
            },
            Timing::Compressed(periods) => instant + periods.duration(period),
        }
    }

    /// The boundary immediately after `prev_end`.
    ///
    /// Calendar boundaries are re-derived from one millisecond past
    /// the previous end. Compressed boundaries tile exactly from the
    /// previous end so repeated advancement never drifts.
    pub fn next_period_end(&self, prev_end: DateTime<Utc>, period: Period) -> DateTime<Utc> {
        match self {
            Timing::Calendar => self.period_end(prev_end + Duration::milliseconds(1), period),
            Timing::Compressed(periods) => prev_end + periods.duration(period),
        }
    }
}

fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let next_midnight = (instant.date_naive() + Days::new(1))
        .and_time(NaiveTime::MIN)
        .and_utc();
    next_midnight - Duration::milliseconds(1)
}

fn end_of_week(instant: DateTime<Utc>) -> DateTime<Utc> {
    // Weeks run Monday through Sunday.
    let days_left = 6 - instant.date_naive().weekday().num_days_from_monday();
    end_of_day(instant + Duration::days(i64::from(days_left)))
}

fn end_of_month(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    match first_of_next {
        Some(first) => first.and_time(NaiveTime::MIN).and_utc() - Duration::milliseconds(1),
        // Unreachable short of year overflow, but degrade gracefully.
        None => end_of_day(instant),
    }
}
