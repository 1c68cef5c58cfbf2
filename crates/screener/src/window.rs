//! Change windows: symbolic lookback labels resolved to concrete dates.
//!
//! Resolution is relative to the local calendar date. The current date is
//! the day before today so that it refers to the latest completed session;
//! no exchange calendar or timezone adjustment is applied, so the resolved
//! dates may fall on weekends or holidays.

use crate::error::{Result, ScreenError};
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use derive_more::Display;
use std::str::FromStr;

/// Lookback duration for a momentum return.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeWindow {
    /// Twenty years.
    #[display("maxChange")]
    MaxChange,
    /// Five years.
    #[display("5year")]
    FiveYears,
    /// One year.
    #[display("1year")]
    OneYear,
    /// Since January 1 of the current year.
    #[display("ytd")]
    YearToDate,
    /// Six calendar months.
    #[display("6month")]
    SixMonths,
    /// Three calendar months.
    #[display("3month")]
    ThreeMonths,
    /// One calendar month.
    #[display("1month")]
    OneMonth,
    /// Thirty days.
    #[display("30day")]
    ThirtyDays,
    /// Fifteen days.
    #[display("15day")]
    FifteenDays,
    /// Five days.
    #[display("5day")]
    FiveDays,
    /// One day.
    #[display("1day")]
    OneDay,
}

/// Span subtracted from the current date.
#[derive(Debug, Clone, Copy)]
enum Lookback {
    Months(u32),
    Days(u64),
    YearStart,
}

impl ChangeWindow {
    /// Every window, longest first.
    pub const ALL: [Self; 11] = [
        Self::MaxChange,
        Self::FiveYears,
        Self::OneYear,
        Self::YearToDate,
        Self::SixMonths,
        Self::ThreeMonths,
        Self::OneMonth,
        Self::ThirtyDays,
        Self::FifteenDays,
        Self::FiveDays,
        Self::OneDay,
    ];

    const fn lookback(self) -> Lookback {
        match self {
            Self::MaxChange => Lookback::Months(20 * 12),
            Self::FiveYears => Lookback::Months(5 * 12),
            Self::OneYear => Lookback::Months(12),
            Self::YearToDate => Lookback::YearStart,
            Self::SixMonths => Lookback::Months(6),
            Self::ThreeMonths => Lookback::Months(3),
            Self::OneMonth => Lookback::Months(1),
            Self::ThirtyDays => Lookback::Days(30),
            Self::FifteenDays => Lookback::Days(15),
            Self::FiveDays => Lookback::Days(5),
            Self::OneDay => Lookback::Days(1),
        }
    }

    /// Resolve against `today`.
    ///
    /// Month and year offsets clamp to the end of shorter months, so
    /// 2024-03-31 minus one month is 2024-02-29.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NoData`] for `ytd` when the current date is
    /// January 1, since the window would be empty.
    pub fn resolve(self, today: NaiveDate) -> Result<DateWindow> {
        let current = latest_session(today);
        let past = match self.lookback() {
            Lookback::Months(n) => current.checked_sub_months(Months::new(n)),
            Lookback::Days(n) => current.checked_sub_days(Days::new(n)),
            Lookback::YearStart => NaiveDate::from_ymd_opt(current.year(), 1, 1),
        }
        .ok_or_else(|| ScreenError::InvalidWindow(format!("{self} before {current} is out of range")))?;

        if past >= current {
            return Err(ScreenError::NoData(format!(
                "{self} window is empty on {current}"
            )));
        }

        Ok(DateWindow {
            window: self,
            current,
            past,
        })
    }

    /// Resolve against the local calendar date.
    pub fn resolve_now(self) -> Result<DateWindow> {
        self.resolve(Local::now().date_naive())
    }
}

impl FromStr for ChangeWindow {
    type Err = ScreenError;

    /// Labels match exactly; case and surrounding whitespace are significant.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.to_string() == s)
            .ok_or_else(|| ScreenError::InvalidWindow(s.to_string()))
    }
}

/// A resolved `(current, past)` date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Window the dates were resolved from.
    pub window: ChangeWindow,
    /// Latest completed session.
    pub current: NaiveDate,
    /// Start of the lookback.
    pub past: NaiveDate,
}

impl DateWindow {
    /// Current date as `YYYY-MM-DD`.
    pub fn current_iso(&self) -> String {
        self.current.format("%Y-%m-%d").to_string()
    }

    /// Past date as `YYYY-MM-DD`.
    pub fn past_iso(&self) -> String {
        self.past.format("%Y-%m-%d").to_string()
    }
}

/// The day before `today`, taken as the latest completed trading session.
pub fn latest_session(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}
