// Date utility functions
// Month grid layout and calendar-date comparisons

use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Rows in the month grid
pub const GRID_ROWS: usize = 6;
/// Columns in the month grid (Sunday first)
pub const GRID_COLUMNS: usize = 7;
/// Total cells in the month grid
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLUMNS;

/// A 6×7 block of consecutive dates covering one month.
///
/// The first cell is the Sunday on or before the 1st of the month; every cell
/// after it is the following day. The grid always holds exactly
/// [`GRID_CELLS`] dates and always includes the month's last day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month0: u32,
    days: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Build the grid for the month containing `date`.
    ///
    /// Returns `None` only when the grid would leave chrono's supported
    /// date range.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        let first = first_of_month(date);
        let last = last_of_month(first)?;
        let lead = first.weekday().num_days_from_sunday() as u64;
        let grid_start = first.checked_sub_days(Days::new(lead))?;

        let mut days = Vec::with_capacity(GRID_CELLS);
        let mut day = grid_start;
        loop {
            days.push(day);
            if days.len() >= GRID_CELLS && days.contains(&last) {
                break;
            }
            day = day.succ_opt()?;
        }

        // Keep the trailing cells so the last day of the month stays visible
        if days.len() > GRID_CELLS {
            let excess = days.len() - GRID_CELLS;
            days.drain(..excess);
        }

        Some(Self {
            year: first.year(),
            month0: first.month0(),
            days,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-indexed month (0 = January)
    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    /// Grid index of `date`, if it is on the grid
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|day| is_same_day(*day, date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// Date at the given row and column
    pub fn cell(&self, row: usize, col: usize) -> Option<NaiveDate> {
        if row >= GRID_ROWS || col >= GRID_COLUMNS {
            return None;
        }
        self.days.get(row * GRID_COLUMNS + col).copied()
    }

    pub fn row_of(index: usize) -> usize {
        index / GRID_COLUMNS
    }

    pub fn col_of(index: usize) -> usize {
        index % GRID_COLUMNS
    }

    /// Whether `date` belongs to the month this grid was built for
    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }
}

/// Month grid for a zero-indexed month (0 = January).
///
/// Months past 11 roll over into the following years.
pub fn month_grid(year: i32, month0: u32) -> Option<MonthGrid> {
    let year = year.checked_add((month0 / 12) as i32)?;
    let first = NaiveDate::from_ymd_opt(year, month0 % 12 + 1, 1)?;
    MonthGrid::containing(first)
}

/// Calendar-date equality
pub fn is_same_day(date1: NaiveDate, date2: NaiveDate) -> bool {
    date1 == date2
}

pub fn is_today(date: NaiveDate) -> bool {
    is_today_at(date, Local::now().date_naive())
}

pub fn is_today_at(date: NaiveDate, today: NaiveDate) -> bool {
    is_same_day(date, today)
}

/// Inclusive range membership. An inverted range contains nothing.
pub fn date_interval_contains(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    last_of_month(first).map(|last| last.day())
}

/// First day of the month `delta` months away from `date`.
///
/// Falls back to the first of the current month when the result would be
/// out of range.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(date);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

/// Inclusive day count covered by `start..=end`
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
