use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Current timestamp in application-local time.
///
/// Expense dates and notification timestamps are stored without an offset,
/// so every "now" in the domain goes through this function.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn local_today() -> NaiveDate {
    local_now().date()
}

/// Last representable instant of a calendar day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Calendar month containing a given instant, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl MonthWindow {
    pub fn containing(instant: NaiveDateTime) -> Self {
        Self::containing_date(instant.date())
    }

    pub fn containing_date(date: NaiveDate) -> Self {
        MonthWindow {
            start: start_of_day(first_day_of_month(date)),
            end: end_of_day(last_day_of_month(date)),
        }
    }

    pub fn current() -> Self {
        Self::containing(local_now())
    }

    /// The calendar month immediately before this one.
    pub fn previous(&self) -> Self {
        match self.start.date().pred_opt() {
            Some(day) => Self::containing_date(day),
            None => *self,
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// `YYYY-MM` key for this month.
    pub fn month_key(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }

    /// Parses a `YYYY-MM` month key.
    pub fn parse_month(month: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")?;
        Ok(Self::containing_date(date))
    }

    pub fn as_range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Inclusive timestamp range used by report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(Error::invalid_input("range end must not be before its start"));
        }
        Ok(DateRange { start, end })
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        get_days_between(self.start.date(), self.end.date())
    }
}

/// Preset ranges offered by the reports view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReportRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "this-month")]
    ThisMonth,
    #[serde(rename = "last-month")]
    LastMonth,
    #[serde(rename = "90d")]
    Last90Days,
}

impl ReportRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportRange::Last7Days => "7d",
            ReportRange::Last30Days => "30d",
            ReportRange::ThisMonth => "this-month",
            ReportRange::LastMonth => "last-month",
            ReportRange::Last90Days => "90d",
        }
    }

    /// Resolves the preset against the given day.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let trailing = |days: i64| DateRange {
            start: start_of_day(today - Duration::days(days)),
            end: end_of_day(today),
        };
        match self {
            ReportRange::Last7Days => trailing(7),
            ReportRange::Last30Days => trailing(30),
            ReportRange::Last90Days => trailing(90),
            ReportRange::ThisMonth => MonthWindow::containing_date(today).as_range(),
            ReportRange::LastMonth => MonthWindow::containing_date(today).previous().as_range(),
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "7d" => Ok(ReportRange::Last7Days),
            "30d" => Ok(ReportRange::Last30Days),
            "this-month" => Ok(ReportRange::ThisMonth),
            "last-month" => Ok(ReportRange::LastMonth),
            "90d" => Ok(ReportRange::Last90Days),
            other => Err(Error::invalid_input(format!("unknown report range '{}'", other))),
        }
    }
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}
