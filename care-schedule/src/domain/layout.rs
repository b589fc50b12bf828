use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::time::ClockTime;
use crate::domain::models::{Person, Task};
use crate::domain::shift_assign::shift_for_person;
use crate::domain::shift_role::{Language, ShiftInfo, ShiftWindow};
use crate::error::ScheduleError;

/// Gap kept between a task block and its neighbours, on each side
pub const BLOCK_INSET: f64 = 2.0;

/// Narrowest task block that is still drawn
pub const MIN_BLOCK_WIDTH: f64 = 24.0;

// =====================
// Visible period
// =====================

/// Visible slice of the day. Night hours past midnight continue as 24..31
/// instead of wrapping to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPeriod {
    /// 07:00 - 22:00
    #[default]
    Day,
    /// 22:00 - 07:00 next morning
    Night,
}

impl ViewPeriod {
    pub fn start_hour(&self) -> u32 {
        match self {
            ViewPeriod::Day => 7,
            ViewPeriod::Night => 22,
        }
    }

    pub fn end_hour(&self) -> u32 {
        match self {
            ViewPeriod::Day => 22,
            ViewPeriod::Night => 31,
        }
    }

    pub fn total_hours(&self) -> u32 {
        self.end_hour() - self.start_hour()
    }

    /// Wall-clock hour of every column, `[22, 23, 0, ..., 6]` at night
    pub fn hour_labels(&self) -> Vec<u32> {
        (self.start_hour()..self.end_hour()).map(|h| h % 24).collect()
    }

    /// Moves early-morning hours behind midnight when the period wraps
    pub fn normalize_hour(&self, hour: u32) -> u32 {
        if self.end_hour() > 24 && hour + 24 < self.end_hour() {
            hour + 24
        } else {
            hour
        }
    }
}

impl fmt::Display for ViewPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewPeriod::Day => f.write_str("day"),
            ViewPeriod::Night => f.write_str("night"),
        }
    }
}

impl FromStr for ViewPeriod {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewPeriod::Day),
            "night" => Ok(ViewPeriod::Night),
            _ => Err(ScheduleError::InvalidPeriod(s.to_string())),
        }
    }
}

// =====================
// Geometry
// =====================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed name column on the leading edge of every row
    pub staff_column_width: f64,
    pub min_hour_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            staff_column_width: 220.0,
            min_hour_width: 120.0,
        }
    }
}

/// Distance from the leading edge. Mirrored layouts measure from the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalOffset {
    Left(f64),
    Right(f64),
}

impl HorizontalOffset {
    pub fn value(&self) -> f64 {
        match self {
            HorizontalOffset::Left(px) | HorizontalOffset::Right(px) => *px,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockGeometry {
    pub offset: HorizontalOffset,
    pub width: f64,
}

/// Pixel geometry of one rendered timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleLayout {
    pub period: ViewPeriod,
    pub hour_width: f64,
    pub staff_column_width: f64,
    pub rtl: bool,
}

impl ScheduleLayout {
    /// Stretches hours over the space left of the name column, never below
    /// `min_hour_width` (narrow containers scroll instead).
    pub fn new(period: ViewPeriod, container_width: f64, config: &LayoutConfig, rtl: bool) -> Self {
        let available = (container_width - config.staff_column_width).max(0.0);
        let hour_width = (available / f64::from(period.total_hours())).max(config.min_hour_width);

        Self {
            period,
            hour_width,
            staff_column_width: config.staff_column_width,
            rtl,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.period.start_hour()
    }

    pub fn end_hour(&self) -> u32 {
        self.period.end_hour()
    }

    pub fn timeline_width(&self) -> f64 {
        f64::from(self.period.total_hours()) * self.hour_width
    }

    /// Full row width, at least the container itself
    pub fn row_width(&self, container_width: f64) -> f64 {
        (self.staff_column_width + self.timeline_width()).max(container_width)
    }

    /// Start/end in minutes on the period's hour scale; the end moves to the
    /// next day when its hour is earlier than the start's.
    fn span_minutes(&self, start: ClockTime, end: ClockTime) -> (i64, i64) {
        let start_hour = self.period.normalize_hour(start.hour());
        let mut end_hour = self.period.normalize_hour(end.hour());
        if end_hour < start_hour {
            end_hour += 24;
        }

        (
            i64::from(start_hour * 60 + start.minute()),
            i64::from(end_hour * 60 + end.minute()),
        )
    }

    fn px(&self, minutes: i64) -> f64 {
        minutes as f64 / 60.0 * self.hour_width
    }

    fn offset(&self, px: f64) -> HorizontalOffset {
        if self.rtl {
            HorizontalOffset::Right(px)
        } else {
            HorizontalOffset::Left(px)
        }
    }

    /// Block for a task running `start..end`, clamped to the window.
    /// `None` when nothing of it is visible.
    ///
    /// ```text
    /// window      07        08        09        10        11
    ///             |---------|---------|---------|---------|
    /// task 08-10            [##################]
    ///                       ^ 1h * hw + 2       ^ 2h * hw - 4
    /// ```
    pub fn task_block(&self, start: ClockTime, end: ClockTime) -> Option<BlockGeometry> {
        let window_start = i64::from(self.start_hour() * 60);
        let window_end = i64::from(self.end_hour() * 60);

        let (start, end) = self.span_minutes(start, end);
        let clamped_start = start.max(window_start);
        let clamped_end = end.min(window_end);

        if clamped_start >= window_end || clamped_end <= window_start || clamped_end <= clamped_start {
            return None;
        }

        let pos = self.px(clamped_start - window_start);
        let width = self.px(clamped_end - clamped_start);

        Some(BlockGeometry {
            offset: self.offset(pos + BLOCK_INSET),
            width: (width - 2.0 * BLOCK_INSET).max(MIN_BLOCK_WIDTH),
        })
    }

    pub fn task_geometry(&self, task: &Task) -> Option<BlockGeometry> {
        let (start, end) = task.time_range()?;
        self.task_block(start, end)
    }

    /// Background bar of a shift, drawn edge to edge without inset or floor
    pub fn shift_bar(&self, window: ShiftWindow) -> Option<BlockGeometry> {
        let view_minutes = i64::from(self.period.total_hours() * 60);
        let window_start = i64::from(self.start_hour() * 60);

        let (start, end) = self.span_minutes(window.start, window.end);
        let mut left = start - window_start;
        let mut width = end - start;

        if left < 0 {
            width += left;
            left = 0;
        }
        if left + width > view_minutes {
            width = view_minutes - left;
        }
        if width <= 0 {
            return None;
        }

        Some(BlockGeometry {
            offset: self.offset(self.px(left)),
            width: self.px(width),
        })
    }

    /// Tasks drawn in one staff row: starting inside the window and owned
    /// by the person holding `shift`.
    pub fn row_tasks<'a>(&self, person_id: &str, shift: &ShiftInfo, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| {
                task.time_start.is_some_and(|start| {
                    let hour = self.period.normalize_hour(start.hour());
                    hour >= self.start_hour() && hour < self.end_hour()
                })
            })
            .filter(|task| task.is_responsibility_of(person_id, shift.id))
            .collect()
    }
}

/// Length of `start..end` in minutes, wrapping past midnight when the end
/// hour is earlier than the start hour
pub fn duration_minutes(start: ClockTime, end: ClockTime) -> i64 {
    let mut end_hour = end.hour();
    if end_hour < start.hour() {
        end_hour += 24;
    }
    i64::from(end_hour * 60 + end.minute()) - i64::from(start.minutes_from_midnight())
}

/// Staff with a non-off shift on `date`, one timeline row each
pub fn working_staff<'a>(date: NaiveDate, roster: &'a [Person], lang: Language) -> Vec<(&'a Person, ShiftInfo)> {
    roster
        .iter()
        .map(|person| (person, shift_for_person(&person.id, date, roster, lang)))
        .filter(|(_, shift)| !shift.is_off())
        .collect()
}
