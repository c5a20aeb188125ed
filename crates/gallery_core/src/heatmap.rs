//! Calendar heat-map grid.
//!
//! Activity sources usually report only the days that had activity. A heat
//! map wants a dense, fixed-size grid instead, so [`GridFiller`] pads the
//! sparse list with zero-count placeholder days on both ends and trims any
//! excess from the front.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gallery_core::heatmap::{DayActivity, GridFiller};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
//! let filled = GridFiller::new(7, 7)
//!     .fill(&[DayActivity::new(day, 5)])
//!     .unwrap();
//!
//! assert_eq!(filled.len(), 49);
//! assert_eq!(filled.iter().filter(|d| d.count > 0).count(), 1);
//! ```

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Number of whole weeks shown before the week containing the anchor date.
pub const LEADING_WEEKS: u64 = 6;

/// Errors produced while filling a heat-map grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// `columns * rows` does not fit in `usize`.
    #[error("grid of {columns}x{rows} cells is too large")]
    TooLarge {
        /// Requested column count.
        columns: usize,
        /// Requested row count.
        rows: usize,
    },

    /// Padding walked past the range of representable dates.
    #[error("date arithmetic out of range near {0}")]
    DateOutOfRange(NaiveDate),
}

/// Activity count for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayActivity {
    /// The day, without a time component.
    pub date: NaiveDate,
    /// Number of recorded events on that day.
    pub count: u32,
}

impl DayActivity {
    /// Creates an activity record.
    #[must_use]
    pub const fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    /// Creates a record from a timestamp, dropping the time of day.
    #[must_use]
    pub fn from_datetime(at: NaiveDateTime, count: u32) -> Self {
        Self::new(at.date(), count)
    }

    /// Creates a zero-count placeholder.
    #[must_use]
    pub const fn placeholder(date: NaiveDate) -> Self {
        Self::new(date, 0)
    }

    /// Returns true for zero-count days.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Intensity bucket used to shade this day.
    #[must_use]
    pub const fn intensity(&self) -> Intensity {
        Intensity::from_count(self.count)
    }
}

/// Shading bucket for a heat-map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    /// No activity.
    Empty,
    /// 1 to 10 events.
    Low,
    /// 11 to 20 events.
    Medium,
    /// 21 to 30 events.
    High,
    /// More than 30 events.
    Max,
}

impl Intensity {
    /// Buckets a raw count.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        match count {
            0 => Self::Empty,
            1..=10 => Self::Low,
            11..=20 => Self::Medium,
            21..=30 => Self::High,
            _ => Self::Max,
        }
    }

    /// Block glyph used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '·',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::High => '▓',
            Self::Max => '█',
        }
    }
}

/// Start and exclusive end of the week containing `day`.
#[must_use]
pub fn week_bounds(day: NaiveDate, week_start: Weekday) -> Option<(NaiveDate, NaiveDate)> {
    let offset = (7 + day.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start = day.checked_sub_days(Days::new(u64::from(offset)))?;
    let end = start.checked_add_days(Days::new(7))?;
    Some((start, end))
}

/// Pads sparse activity into a dense `columns x rows` sequence.
///
/// The anchor date is the last entry of the input, so the result depends only
/// on the arguments and never on the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridFiller {
    columns: usize,
    rows: usize,
    week_start: Weekday,
}

impl GridFiller {
    /// Creates a filler with weeks starting on Sunday.
    #[must_use]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            week_start: Weekday::Sun,
        }
    }

    /// Sets the first day of the week used to find week boundaries.
    #[must_use]
    pub const fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Fills the grid.
    ///
    /// `existing` must be sorted by ascending date; it is not re-sorted.
    /// An empty input yields an empty output.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooLarge`] if the cell count overflows and
    /// [`GridError::DateOutOfRange`] if padding leaves the calendar range.
    pub fn fill(&self, existing: &[DayActivity]) -> Result<Vec<DayActivity>, GridError> {
        let (Some(first), Some(last)) = (existing.first(), existing.last()) else {
            return Ok(Vec::new());
        };
        debug_assert!(
            existing.windows(2).all(|w| w[0].date <= w[1].date),
            "activity must be sorted by date"
        );

        let total = self
            .columns
            .checked_mul(self.rows)
            .ok_or(GridError::TooLarge {
                columns: self.columns,
                rows: self.rows,
            })?;

        let (week_start, week_end) =
            week_bounds(last.date, self.week_start).ok_or(GridError::DateOutOfRange(last.date))?;
        let desired_start = week_start
            .checked_sub_days(Days::new(LEADING_WEEKS * 7))
            .ok_or(GridError::DateOutOfRange(week_start))?;

        let mut result = Vec::with_capacity(existing.len());

        let mut current = desired_start;
        while current < first.date {
            result.push(DayActivity::placeholder(current));
            current = next_day(current)?;
        }
        let leading = result.len();

        result.extend_from_slice(existing);

        current = next_day(last.date)?;
        while result.len() < total && current < week_end {
            result.push(DayActivity::placeholder(current));
            current = next_day(current)?;
        }

        // Sparse input can still undershoot; spill into the following week.
        while result.len() < total {
            result.push(DayActivity::placeholder(current));
            current = next_day(current)?;
        }

        if result.len() > total {
            result.drain(..result.len() - total);
        }

        debug!(
            leading,
            existing = existing.len(),
            total,
            "filled heat-map grid"
        );
        Ok(result)
    }
}

fn next_day(day: NaiveDate) -> Result<NaiveDate, GridError> {
    day.succ_opt().ok_or(GridError::DateOutOfRange(day))
}

/// Column-major heat-map view over filled data.
#[derive(Debug, Clone)]
pub struct HeatMap {
    data: Vec<DayActivity>,
    columns: usize,
    rows: usize,
}

impl HeatMap {
    /// Wraps already-filled data.
    #[must_use]
    pub const fn new(data: Vec<DayActivity>, columns: usize, rows: usize) -> Self {
        Self {
            data,
            columns,
            rows,
        }
    }

    /// The day shown at `(column, row)`, if any.
    ///
    /// Cells beyond the end of the data are blank.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<&DayActivity> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.data.get(column * self.rows + row)
    }

    /// Underlying data.
    #[must_use]
    pub fn data(&self) -> &[DayActivity] {
        &self.data
    }

    /// Renders the grid as text, one line per row.
    #[must_use]
    pub fn render_plain(&self) -> String {
        self.render_with(|_, glyph| glyph.to_string())
    }

    /// Renders the grid, letting `paint` decorate each glyph.
    pub fn render_with<F>(&self, mut paint: F) -> String
    where
        F: FnMut(Intensity, char) -> String,
    {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut line = String::new();
            for column in 0..self.columns {
                if column > 0 {
                    line.push(' ');
                }
                match self.cell(column, row) {
                    Some(day) => {
                        let intensity = day.intensity();
                        line.push_str(&paint(intensity, intensity.glyph()));
                    }
                    None => line.push(' '),
                }
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}
