use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Naive local wall-clock time with minute resolution (`HH:MM`, 24h).
///
/// No time zone is attached. A range whose end is earlier than its start is
/// read as crossing midnight by the code that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { minutes: hour * 60 + minute })
        } else {
            None
        }
    }

    pub fn parse(text: &str) -> Result<Self, ScheduleError> {
        let invalid = || ScheduleError::InvalidTime(text.to_string());

        let (hour, minute) = text.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        Self::new(hour, minute).ok_or_else(invalid)
    }

    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes % 60
    }

    /// Minutes elapsed since 00:00
    pub fn minutes_from_midnight(&self) -> u32 {
        self.minutes
    }

    pub fn to_naive_time(&self) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
            .unwrap_or(chrono::NaiveTime::MIN)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// `YYYY-MM-DD` key used for seeds and for status lookups
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the seven days of the Monday-start week containing `date`
///
/// ```text
///  Mo Tu We Th Fr Sa Su
///  11 12 13 14 15 16 17
///            ^
///            date = 14 -> [11, 12, ..., 17]
/// ```
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    core::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// ISO-8601 week number (weeks start on Monday, week 1 holds the first Thursday)
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Inclusive list of days between `from` and `to`; empty when `to < from`
pub fn date_range(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}
