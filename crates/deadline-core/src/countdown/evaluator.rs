//! Countdown evaluation.
//!
//! [`evaluate`] is a pure function of the window and the current time. It
//! keeps no state between calls, so a caller may invoke it from a timer, a
//! one-shot command or a test with the same result for the same inputs.

use serde::Serialize;

use super::feeling::FeelingTier;
use super::window::{TimeWindow, UnixTimestamp};

pub const SEC_IN_MINUTE: i64 = 60;
pub const SEC_IN_HOUR: i64 = SEC_IN_MINUTE * 60;
pub const SEC_IN_DAY: i64 = SEC_IN_HOUR * 24;

/// Above this percent the value keeps two decimals instead of rounding to
/// an integer.
pub const PRECISE_PERCENT_ABOVE: f64 = 99.0;

/// Granularity of the displayed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Less than an hour left: minutes and seconds.
    Minutes,
    /// Less than a day left: hours and minutes.
    Hours,
    Days,
}

impl Bucket {
    pub fn for_remaining(diff_end: i64) -> Self {
        if diff_end < SEC_IN_HOUR {
            Bucket::Minutes
        } else if diff_end < SEC_IN_DAY {
            Bucket::Hours
        } else {
            Bucket::Days
        }
    }
}

/// Calendar-free breakdown of a number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Breakdown {
    /// Greedy division by day, hour and minute.
    pub fn from_secs(total: i64) -> Self {
        let mut rest = total;
        let days = rest / SEC_IN_DAY;
        rest -= days * SEC_IN_DAY;
        let hours = rest / SEC_IN_HOUR;
        rest -= hours * SEC_IN_HOUR;
        let minutes = rest / SEC_IN_MINUTE;
        rest -= minutes * SEC_IN_MINUTE;
        Self {
            days,
            hours,
            minutes,
            seconds: rest,
        }
    }

    pub fn total_secs(&self) -> i64 {
        self.days * SEC_IN_DAY + self.hours * SEC_IN_HOUR + self.minutes * SEC_IN_MINUTE
            + self.seconds
    }
}

/// Percent of the window elapsed, already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percent {
    pub value: f64,
    /// `true` when two decimals are kept, `false` for whole numbers.
    pub precise: bool,
}

impl Percent {
    /// Apply the rounding policy to a raw percent.
    pub fn from_raw(raw: f64) -> Self {
        if raw > PRECISE_PERCENT_ABOVE {
            Self {
                value: (raw * 100.0).round() / 100.0,
                precise: true,
            }
        } else {
            Self {
                value: raw.round(),
                precise: false,
            }
        }
    }

    pub fn feeling(&self) -> FeelingTier {
        FeelingTier::for_percent(self.value)
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.precise {
            write!(f, "{:.2}", self.value)
        } else {
            write!(f, "{:.0}", self.value)
        }
    }
}

/// What the indicator should show for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    BeforeWindow,
    InProgress {
        days_left: i64,
        hours_left: i64,
        minutes_left: i64,
        seconds_left: i64,
        percent_complete: Percent,
        bucket: Bucket,
    },
    PastDeadline,
    Unconfigured,
}

impl DisplayState {
    pub fn feeling(&self) -> FeelingTier {
        match self {
            DisplayState::BeforeWindow => FeelingTier::Angel,
            DisplayState::InProgress {
                percent_complete, ..
            } => percent_complete.feeling(),
            DisplayState::PastDeadline | DisplayState::Unconfigured => FeelingTier::Sick,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, DisplayState::InProgress { .. })
    }
}

/// Evaluate the countdown for `now`.
///
/// A missing window yields [`DisplayState::Unconfigured`]; instants outside
/// the window yield the before/past variants. Never panics.
pub fn evaluate(window: Option<TimeWindow>, now: UnixTimestamp) -> DisplayState {
    let Some(window) = window else {
        return DisplayState::Unconfigured;
    };

    let diff_begin = now.saturating_sub(window.begin());
    let diff_end = window.end().saturating_sub(now);

    if diff_begin < 0 {
        return DisplayState::BeforeWindow;
    }
    if diff_end < 0 {
        return DisplayState::PastDeadline;
    }

    let left = Breakdown::from_secs(diff_end);
    let raw = 100.0 - (diff_end as f64 / window.period() as f64) * 100.0;

    DisplayState::InProgress {
        days_left: left.days,
        hours_left: left.hours,
        minutes_left: left.minutes,
        seconds_left: left.seconds,
        percent_complete: Percent::from_raw(raw),
        bucket: Bucket::for_remaining(diff_end),
    }
}
