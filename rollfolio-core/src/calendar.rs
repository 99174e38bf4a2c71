//! Dense day-wise and month-wise date grids anchored at a fixed epoch.
//!
//! A [`CalendarIndex`] turns calendar dates into integer coordinates:
//! `day_index` counts days since [`EPOCH`], `month_index` counts whole
//! calendar months. Both grids cover `[EPOCH, today]` where `today` is pinned
//! when the index is constructed. Grids are built on first use and never
//! change afterwards; day differences are memoized per ordered date pair.

use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use chrono::{Datelike, Local, Months, NaiveDate};
use rollfolio_types::RollfolioError;

/// First date covered by every calendar grid.
pub const EPOCH: NaiveDate = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid epoch");

/// Canonical date format used at every string boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Memoized date grids and day differences.
///
/// Use [`CalendarIndex::global`] for the process-wide instance, or construct
/// one per isolated computation with [`CalendarIndex::with_today`].
pub struct CalendarIndex {
    today: NaiveDate,
    day_grid: OnceLock<Vec<NaiveDate>>,
    month_grid: OnceLock<Vec<NaiveDate>>,
    diffs: RwLock<HashMap<(NaiveDate, NaiveDate), i64>>,
}

impl Default for CalendarIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CalendarIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarIndex")
            .field("epoch", &EPOCH)
            .field("today", &self.today)
            .field("day_grid_built", &self.day_grid.get().is_some())
            .field("month_grid_built", &self.month_grid.get().is_some())
            .finish_non_exhaustive()
    }
}

impl CalendarIndex {
    /// Build an index whose upper bound is the current local date.
    #[must_use]
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Build an index pinned to an explicit "today".
    #[must_use]
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today,
            day_grid: OnceLock::new(),
            month_grid: OnceLock::new(),
            diffs: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide index, constructed on first call.
    ///
    /// "Today" is evaluated once, at that first call, and is not refreshed for
    /// the lifetime of the process.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<CalendarIndex> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// First supported date.
    #[must_use]
    pub const fn epoch(&self) -> NaiveDate {
        EPOCH
    }

    /// Last supported date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether `date` lies in `[epoch, today]`.
    #[must_use]
    pub fn is_date_within_range(&self, date: NaiveDate) -> bool {
        EPOCH <= date && date <= self.today
    }

    fn ensure_in_range(&self, date: NaiveDate) -> Result<(), RollfolioError> {
        if self.is_date_within_range(date) {
            Ok(())
        } else {
            Err(RollfolioError::date_out_of_range(date, EPOCH, self.today))
        }
    }

    /// Every date from the epoch to today, one day apart.
    pub fn day_grid(&self) -> &[NaiveDate] {
        self.day_grid.get_or_init(|| {
            let grid = build_day_grid(EPOCH, self.today);
            #[cfg(feature = "tracing")]
            tracing::debug!(len = grid.len(), today = %self.today, "built day grid");
            grid
        })
    }

    /// Every date from the epoch to today, one calendar month apart.
    pub fn month_grid(&self) -> &[NaiveDate] {
        self.month_grid.get_or_init(|| {
            let grid = build_month_grid(EPOCH, self.today);
            #[cfg(feature = "tracing")]
            tracing::debug!(len = grid.len(), today = %self.today, "built month grid");
            grid
        })
    }

    /// Date at position `index` of the day grid.
    #[must_use]
    pub fn day_at(&self, index: usize) -> Option<NaiveDate> {
        self.day_grid().get(index).copied()
    }

    /// Date at position `index` of the month grid.
    #[must_use]
    pub fn month_at(&self, index: usize) -> Option<NaiveDate> {
        self.month_grid().get(index).copied()
    }

    /// Position of `date` in the day grid (days since the epoch).
    ///
    /// # Errors
    /// Returns `DateOutOfRange` if `date` is before the epoch or after today.
    pub fn day_index(&self, date: NaiveDate) -> Result<usize, RollfolioError> {
        self.ensure_in_range(date)?;
        usize::try_from((date - EPOCH).num_days())
            .map_err(|_| RollfolioError::date_out_of_range(date, EPOCH, self.today))
    }

    /// Number of whole calendar months between the epoch and `date`.
    ///
    /// # Errors
    /// Returns `DateOutOfRange` if `date` is before the epoch or after today.
    pub fn month_index(&self, date: NaiveDate) -> Result<usize, RollfolioError> {
        self.ensure_in_range(date)?;
        // The epoch is the first of a month, so every day-of-month completes it.
        let months = (date.year() - EPOCH.year()) * 12 + date.month0() as i32;
        usize::try_from(months)
            .map_err(|_| RollfolioError::date_out_of_range(date, EPOCH, self.today))
    }

    /// Signed day count `a - b`, memoized by the ordered pair.
    pub fn day_diff(&self, a: NaiveDate, b: NaiveDate) -> i64 {
        let key = (a, b);
        if let Some(&diff) = self
            .diffs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return diff;
        }
        let diff = (a - b).num_days();
        self.diffs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, diff);
        diff
    }

    /// Number of memoized day differences.
    pub fn cached_diffs(&self) -> usize {
        self.diffs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Pure builder for a daily grid over `[from, to]`.
#[must_use]
pub fn build_day_grid(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}

/// Pure builder for a monthly grid over `[from, to]`, keeping `from`'s day of month
/// (clamped to month end where needed).
#[must_use]
pub fn build_month_grid(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    (0u32..)
        .map_while(|k| from.checked_add_months(Months::new(k)))
        .take_while(|d| *d <= to)
        .collect()
}

/// `date` shifted forward by whole years; Feb 29 clamps to Feb 28.
///
/// # Errors
/// Returns `InvalidArg` if the result is not representable.
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate, RollfolioError> {
    years
        .checked_mul(12)
        .and_then(|m| date.checked_add_months(Months::new(m)))
        .ok_or_else(|| RollfolioError::InvalidArg(format!("{date} + {years} years overflows")))
}

/// `date` shifted back by whole years; Feb 29 clamps to Feb 28.
///
/// # Errors
/// Returns `InvalidArg` if the result is not representable.
pub fn sub_years(date: NaiveDate, years: u32) -> Result<NaiveDate, RollfolioError> {
    years
        .checked_mul(12)
        .and_then(|m| date.checked_sub_months(Months::new(m)))
        .ok_or_else(|| RollfolioError::InvalidArg(format!("{date} - {years} years overflows")))
}

/// Parse a canonical `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `InvalidArg` if `s` is not a valid date in that format.
pub fn parse_date(s: &str) -> Result<NaiveDate, RollfolioError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| RollfolioError::InvalidArg(format!("bad date {s:?}: {e}")))
}
