use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Calendar-borrowed difference between a start date and "today".
///
/// Plain component-wise subtraction with two borrow steps, not an exact
/// elapsed-time calculation. The day borrow uses the length of the month
/// preceding `today` (not the start month); that asymmetry matches the
/// reference behavior and is pinned by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedDuration {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

pub fn elapsed(start: NaiveDate, today: NaiveDate) -> ElapsedDuration {
    let mut years = today.year() - start.year();
    let mut months = today.month() as i32 - start.month() as i32;
    let mut days = today.day() as i32 - start.day() as i32;

    if days < 0 {
        months -= 1;
        let (prev_year, prev_month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        days += days_in_month(prev_year, prev_month) as i32;
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    ElapsedDuration { years, months, days }
}

impl fmt::Display for ElapsedDuration {
    /// Zero years and zero months are omitted; days always print.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.years > 0 {
            write!(f, "{} year{}, ", self.years, plural(self.years))?;
        }
        if self.months > 0 {
            write!(f, "{} month{}, ", self.months, plural(self.months))?;
        }
        write!(f, "{} day{}", self.days, plural(self.days))
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Use YYYY-MM-DD.".to_string())
}

/// Long-form rendering of the committed start date, e.g. "15 January 2020".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn elapsed_same_day_is_zero() {
        let day = date(2024, 2, 29);
        let result = elapsed(day, day);
        assert_eq!(
            result,
            ElapsedDuration {
                years: 0,
                months: 0,
                days: 0
            }
        );
    }

    #[test]
    fn elapsed_without_borrowing() {
        let result = elapsed(date(2020, 1, 10), date(2023, 4, 25));
        assert_eq!(
            result,
            ElapsedDuration {
                years: 3,
                months: 3,
                days: 15
            }
        );
    }

    #[test]
    fn elapsed_day_borrow_uses_month_before_today() {
        // May 9 minus Mar 10: the day borrow pulls April's 30 days.
        let result = elapsed(date(2023, 3, 10), date(2024, 5, 9));
        assert_eq!(
            result,
            ElapsedDuration {
                years: 1,
                months: 1,
                days: 29
            }
        );
    }

    #[test]
    fn elapsed_day_borrow_in_january_reaches_prior_december() {
        let result = elapsed(date(2023, 12, 15), date(2024, 1, 10));
        assert_eq!(
            result,
            ElapsedDuration {
                years: 0,
                months: 0,
                days: 26
            }
        );
    }

    #[test]
    fn elapsed_month_borrow() {
        let result = elapsed(date(2022, 11, 3), date(2024, 2, 3));
        assert_eq!(
            result,
            ElapsedDuration {
                years: 1,
                months: 3,
                days: 0
            }
        );
    }

    #[test]
    fn elapsed_components_stay_in_range() {
        let start = date(2019, 6, 18);
        for offset in 0..1500 {
            let today = start + chrono::Duration::days(offset);
            let result = elapsed(start, today);
            assert!(result.years >= 0);
            assert!((0..12).contains(&result.months));
            assert!((0..=31).contains(&result.days));
        }
    }

    #[test]
    fn display_omits_zero_years_and_months() {
        let zero = ElapsedDuration {
            years: 0,
            months: 0,
            days: 0,
        };
        assert_eq!(zero.to_string(), "0 days");

        let months_only = ElapsedDuration {
            years: 0,
            months: 5,
            days: 2,
        };
        assert_eq!(months_only.to_string(), "5 months, 2 days");

        let no_months = ElapsedDuration {
            years: 2,
            months: 0,
            days: 1,
        };
        assert_eq!(no_months.to_string(), "2 years, 1 day");
    }

    #[test]
    fn display_singular_forms() {
        let result = ElapsedDuration {
            years: 1,
            months: 1,
            days: 1,
        };
        assert_eq!(result.to_string(), "1 year, 1 month, 1 day");
    }

    #[test]
    fn parse_date_valid() {
        let parsed = parse_date("2020-01-15").unwrap();
        assert_eq!(parsed, date(2020, 1, 15));
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_date("15-01-2020").is_err());
        assert!(parse_date("2020-13-01").is_err());
        assert!(parse_date("yyyy-mm-dd").is_err());
    }

    #[test]
    fn format_long_date_en_gb_style() {
        assert_eq!(format_long_date(date(2020, 1, 15)), "15 January 2020");
        assert_eq!(format_long_date(date(2023, 3, 1)), "1 March 2023");
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
