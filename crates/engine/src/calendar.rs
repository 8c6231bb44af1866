//! Calendar arithmetic used by the materialization engine.
//!
//! Every computation here works on [`NaiveDate`] in the proleptic Gregorian
//! calendar, so month lengths and leap years come from `chrono` rather than
//! from fixed approximations.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A ledger period: one calendar month of one year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    /// Build a period, rejecting months outside `1..=12`.
    pub fn new(month: u32, year: i32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { month, year })
    }

    /// The period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Count how many days of `month`/`year` fall on `weekday`.
///
/// Walks every day from the first to the last of the month. An invalid
/// month yields `0`.
pub fn count_weekday_in_month(year: i32, month: u32, weekday: Weekday) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let last = Period { month, year }.last_day();

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| day.weekday() == weekday)
        .count() as u32
}

/// `date` moved forward by `months` calendar months.
///
/// The day is clamped to the last day of the target month (Jan 31 + 1 month
/// is Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Move a credit card purchase date onto the card's due day.
///
/// Purchases made on or before the due day are billed that same month,
/// later purchases roll over to the next month.
pub fn shift_to_due_day(date: NaiveDate, due_day: u32) -> NaiveDate {
    let period = if date.day() > due_day {
        Period::of(add_months(Period::of(date).first_day(), 1))
    } else {
        Period::of(date)
    };
    let day = due_day.clamp(1, period.last_day().day());
    NaiveDate::from_ymd_opt(period.year, period.month, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn mondays_in_june_2024() {
        assert_eq!(count_weekday_in_month(2024, 6, Weekday::Mon), 4);
    }

    #[test]
    fn fridays_in_march_2024() {
        assert_eq!(count_weekday_in_month(2024, 3, Weekday::Fri), 5);
    }

    #[test]
    fn leap_february_has_five_thursdays() {
        assert_eq!(count_weekday_in_month(2024, 2, Weekday::Thu), 5);
        assert_eq!(count_weekday_in_month(2023, 2, Weekday::Thu), 4);
    }

    #[test]
    fn weekday_count_is_always_four_or_five() {
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for year in 2020..=2028 {
            for month in 1..=12 {
                let mut total = 0;
                for weekday in weekdays {
                    let count = count_weekday_in_month(year, month, weekday);
                    assert!((4..=5).contains(&count), "{year}-{month} {weekday}");
                    total += count;
                }
                assert_eq!(total, Period { month, year }.last_day().day());
            }
        }
    }

    #[test]
    fn invalid_month_counts_nothing() {
        assert_eq!(count_weekday_in_month(2024, 13, Weekday::Mon), 0);
    }

    #[test]
    fn period_bounds() {
        let period = Period::new(2, 2024).unwrap();
        assert_eq!(period.first_day(), date(2024, 2, 1));
        assert_eq!(period.last_day(), date(2024, 2, 29));
        assert_eq!(Period::new(12, 2023).unwrap().last_day(), date(2023, 12, 31));
        assert!(Period::new(0, 2024).is_err());
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 11, 15), 3), date(2025, 2, 15));
    }

    #[test]
    fn shift_keeps_month_when_before_due_day() {
        assert_eq!(shift_to_due_day(date(2024, 5, 3), 15), date(2024, 5, 15));
        assert_eq!(shift_to_due_day(date(2024, 5, 15), 15), date(2024, 5, 15));
    }

    #[test]
    fn shift_rolls_over_after_due_day() {
        assert_eq!(shift_to_due_day(date(2024, 5, 20), 15), date(2024, 6, 15));
        assert_eq!(shift_to_due_day(date(2024, 12, 20), 10), date(2025, 1, 10));
    }

    #[test]
    fn shift_clamps_to_short_month() {
        assert_eq!(shift_to_due_day(date(2023, 1, 31), 30), date(2023, 2, 28));
    }
}
