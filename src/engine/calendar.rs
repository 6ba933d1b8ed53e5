use std::{collections::BTreeSet, ops::RangeInclusive};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::engine::series::{UsageRecord, UsageSeries};

/// Rate season. Summer schedules apply May through September.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            5..=9 => Self::Summer,
            _ => Self::Winter,
        }
    }
}

/// When a metering interval is billed on-peak. Hour bounds are inclusive.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct PeakWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub weekdays_only: bool,
    pub skip_holidays: bool,
}

impl Default for PeakWindow {
    fn default() -> Self {
        Self { start_hour: 15, end_hour: 18, weekdays_only: true, skip_holidays: true }
    }
}

impl PeakWindow {
    /// Whether the record is billed on-peak under this window.
    #[must_use]
    pub fn is_on_peak(&self, record: &UsageRecord, holidays: &HolidayCalendar) -> bool {
        let hour = record.start_hour();
        if hour < self.start_hour || hour > self.end_hour {
            return false;
        }
        // The tariff's weekday window runs Monday through Thursday:
        // Friday is billed off-peak.
        if self.weekdays_only && record.date.weekday().num_days_from_monday() >= 4 {
            return false;
        }
        if self.skip_holidays && holidays.contains(record.date) {
            return false;
        }
        true
    }
}

/// Observed US federal holidays over a fixed span of years.
///
/// Matches the standard federal list: fixed-date holidays falling on a
/// Saturday are observed the preceding Friday, on a Sunday the following
/// Monday. Juneteenth enters the list in 2021.
#[derive(Clone, Debug, Default)]
pub struct HolidayCalendar(BTreeSet<NaiveDate>);

impl HolidayCalendar {
    #[must_use]
    pub fn for_years(years: RangeInclusive<i32>) -> Self {
        let mut dates = BTreeSet::new();
        for year in years {
            dates.extend(holidays_of(year));
        }
        Self(dates)
    }

    /// Calendar spanning the series' first through last record year.
    #[must_use]
    pub fn spanning(series: &UsageSeries) -> Self {
        match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => Self::for_years(first.year()..=last.year()),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }
}

fn holidays_of(year: i32) -> Vec<NaiveDate> {
    let mut dates = vec![
        observed(date(year, 1, 1)),                    // New Year's Day
        nth_weekday(year, 1, Weekday::Mon, 3),         // Martin Luther King Jr. Day
        nth_weekday(year, 2, Weekday::Mon, 3),         // Washington's Birthday
        last_weekday(year, 5, Weekday::Mon),           // Memorial Day
        observed(date(year, 7, 4)),                    // Independence Day
        nth_weekday(year, 9, Weekday::Mon, 1),         // Labor Day
        nth_weekday(year, 10, Weekday::Mon, 2),        // Columbus Day
        observed(date(year, 11, 11)),                  // Veterans Day
        nth_weekday(year, 11, Weekday::Thu, 4),        // Thanksgiving
        observed(date(year, 12, 25)),                  // Christmas
    ];
    if year >= 2021 {
        dates.push(observed(date(year, 6, 19))); // Juneteenth
    }
    dates
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Infallible for the fixed holiday dates above.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn observed(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.pred_opt().unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> NaiveDate {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n).unwrap_or(NaiveDate::MIN)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let last_of_month = if month == 12 {
        date(year + 1, 1, 1)
    } else {
        date(year, month + 1, 1)
    }
    .pred_opt()
    .unwrap_or(NaiveDate::MIN);
    let mut day = last_of_month;
    while day.weekday() != weekday {
        day = day.pred_opt().unwrap_or(day);
    }
    day
}
