//! Date normalization for German correspondence.
//!
//! Everything that needs "today" goes through a [`Calendar`], which is built
//! once per engine. Output dates are always zero-padded `DD.MM.YYYY`.

use chrono::{Datelike, Duration, NaiveDate};
use labor_core::ExtractionSettings;

const DATE_FORMAT: &str = "%d.%m.%Y";

/// German month names (lowercase) and their numbers.
const MONTHS: [(&str, u32); 13] = [
    ("januar", 1),
    ("februar", 2),
    ("märz", 3),
    ("maerz", 3),
    ("april", 4),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("august", 8),
    ("september", 9),
    ("oktober", 10),
    ("november", 11),
    ("dezember", 12),
];

/// Reference date plus the year heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    today: NaiveDate,
    rolling_window_days: i64,
    max_past_years: i32,
}

impl Calendar {
    #[must_use]
    pub const fn new(today: NaiveDate, settings: &ExtractionSettings) -> Self {
        Self {
            today,
            rolling_window_days: settings.rolling_window_days,
            max_past_years: settings.max_past_years,
        }
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    /// `"25"` → `"2025"`; anything else is returned as is.
    #[must_use]
    pub fn expand_year(year: &str) -> String {
        if year.len() == 2 {
            format!("20{year}")
        } else {
            year.to_string()
        }
    }

    /// Month number for a German month name; unknown names map to January.
    #[must_use]
    pub fn month_number(name: &str) -> u32 {
        let name = name.trim().to_lowercase();
        MONTHS
            .iter()
            .find(|(month, _)| *month == name)
            .map_or(1, |(_, number)| *number)
    }

    /// Year for a day/month given without one.
    ///
    /// This year's date, unless it already lies more than the rolling window
    /// behind today: then next year. Days that do not exist this year
    /// (`30.02.`) stay in the current year, and so does everything when the
    /// window reaches outside the calendar.
    #[must_use]
    pub fn sensible_year(&self, day: u32, month: u32) -> i32 {
        let year = self.current_year();
        let cutoff = Duration::try_days(self.rolling_window_days)
            .and_then(|window| self.today.checked_sub_signed(window));
        match (NaiveDate::from_ymd_opt(year, month, day), cutoff) {
            (Some(date), Some(cutoff)) if date < cutoff => year + 1,
            _ => year,
        }
    }

    /// Replace years too far in the past by the current year.
    #[must_use]
    pub fn plausible_year(&self, year: i32) -> i32 {
        let current = self.current_year();
        match current.checked_sub(self.max_past_years) {
            Some(oldest) if year < oldest => current,
            _ => year,
        }
    }

    /// Canonical date from day, month and an optional year string, with
    /// years too far back replaced by the current one.
    ///
    /// Returns `None` for day/month outside `1..=31` / `1..=12`.
    #[must_use]
    pub fn resolve(&self, day: u32, month: u32, year: Option<&str>) -> Option<String> {
        let year = self.year_for(day, month, year)?;
        Some(format_date(day, month, self.plausible_year(year)))
    }

    /// Like [`Calendar::resolve`], but an explicit year is kept even when it
    /// lies far back. Ranges and day pairs sharing one year use this.
    #[must_use]
    pub fn resolve_unclamped(&self, day: u32, month: u32, year: Option<&str>) -> Option<String> {
        let year = self.year_for(day, month, year)?;
        Some(format_date(day, month, year))
    }

    fn year_for(&self, day: u32, month: u32, year: Option<&str>) -> Option<i32> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return None;
        }
        match year.filter(|y| !y.is_empty()) {
            Some(raw) => Self::expand_year(raw).parse::<i32>().ok(),
            None => Some(self.sensible_year(day, month)),
        }
    }

    /// Normalize `D.M.`, `D.M.YY` or `D.M.YYYY`.
    #[must_use]
    pub fn normalize_date(&self, raw: &str) -> Option<String> {
        let (day, month, year) = split_date(raw)?;
        self.resolve(day, month, year)
    }

    /// Normalize a date, taking `year` when the date carries none of its own.
    ///
    /// No past-year correction: the year of a range is taken as written.
    #[must_use]
    pub fn normalize_date_with_year(&self, raw: &str, year: &str) -> Option<String> {
        let (day, month, own_year) = split_date(raw)?;
        self.resolve_unclamped(day, month, own_year.or(Some(year)))
    }

    /// Expanded year at the end of `D.M.YY(YY)`.
    #[must_use]
    pub fn year_suffix(raw: &str) -> Option<String> {
        let (_, _, year) = split_date(raw)?;
        year.filter(|y| (2..=4).contains(&y.len()))
            .map(Self::expand_year)
    }

    /// Move a canonical date by `days`; `None` if it is not a calendar date.
    #[must_use]
    pub fn shift_days(date: &str, days: i64) -> Option<String> {
        let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
        let shifted = parsed.checked_add_signed(Duration::try_days(days)?)?;
        Some(shifted.format(DATE_FORMAT).to_string())
    }

    /// Parse a canonical `DD.MM.YYYY` date.
    #[must_use]
    pub fn parse(date: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
    }
}

/// Zero-padded `DD.MM.YYYY`.
#[must_use]
pub fn format_date(day: u32, month: u32, year: i32) -> String {
    format!("{day:02}.{month:02}.{year}")
}

fn split_date(raw: &str) -> Option<(u32, u32, Option<&str>)> {
    let mut parts = raw.trim().trim_end_matches('.').split('.');
    let day = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim().parse().ok()?;
    let year = parts.next().map(str::trim).filter(|y| !y.is_empty());
    if year.is_some_and(|y| !y.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    Some((day, month, year))
}
