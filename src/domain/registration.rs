//! Date rules applied before a user is registered.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use thiserror::Error;

use crate::constants::staff::PASSWORD_DATE_FORMAT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationRuleError {
    #[error("User must be at least {0} years old")]
    Underage(u32),

    #[error("Joined date must be later than date of birth")]
    JoinedBeforeBirth,

    #[error("Joined date cannot be Saturday or Sunday")]
    JoinedOnWeekend,
}

/// Checks the registration dates in order: minimum age as of `today`, joined
/// date not before birth, joined date on a weekday.
///
/// The date of birth must fall strictly before `today` minus `minimum_age`
/// years, so someone turning 18 today is still rejected.
pub fn check_registration_dates(
    date_of_birth: NaiveDate,
    date_joined: NaiveDate,
    today: NaiveDate,
    minimum_age: u32,
) -> Result<(), RegistrationRuleError> {
    let cutoff = today
        .checked_sub_months(Months::new(minimum_age.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN);

    if date_of_birth >= cutoff {
        return Err(RegistrationRuleError::Underage(minimum_age));
    }

    if date_joined < date_of_birth {
        return Err(RegistrationRuleError::JoinedBeforeBirth);
    }

    if matches!(date_joined.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(RegistrationRuleError::JoinedOnWeekend);
    }

    Ok(())
}

/// `{username}@{ddMMyyyy}`
#[must_use]
pub fn default_password(username: &str, date_of_birth: NaiveDate) -> String {
    format!("{username}@{}", date_of_birth.format(PASSWORD_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Monday
    fn today() -> NaiveDate {
        date(2024, 6, 17)
    }

    #[test]
    fn accepts_adult_joining_on_weekday() {
        let result = check_registration_dates(date(1990, 1, 1), date(2024, 6, 17), today(), 18);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_exact_eighteenth_birthday() {
        let result = check_registration_dates(date(2006, 6, 17), date(2024, 6, 17), today(), 18);
        assert_eq!(result, Err(RegistrationRuleError::Underage(18)));
    }

    #[test]
    fn accepts_day_after_eighteenth_birthday() {
        let result = check_registration_dates(date(2006, 6, 16), date(2024, 6, 17), today(), 18);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_minor() {
        let result = check_registration_dates(date(2010, 3, 3), date(2024, 6, 17), today(), 18);
        assert_eq!(result, Err(RegistrationRuleError::Underage(18)));
    }

    #[test]
    fn age_rule_is_checked_first() {
        // Minor joining on a Saturday before birth reports the age rule.
        let result = check_registration_dates(date(2010, 3, 3), date(2009, 1, 3), today(), 18);
        assert_eq!(result, Err(RegistrationRuleError::Underage(18)));
    }

    #[test]
    fn rejects_joined_before_birth() {
        let result = check_registration_dates(date(1990, 5, 10), date(1990, 5, 9), today(), 18);
        assert_eq!(result, Err(RegistrationRuleError::JoinedBeforeBirth));
    }

    #[test]
    fn rejects_weekend_join() {
        let saturday = date(2024, 6, 15);
        let sunday = date(2024, 6, 16);
        for joined in [saturday, sunday] {
            let result = check_registration_dates(date(1990, 1, 1), joined, today(), 18);
            assert_eq!(result, Err(RegistrationRuleError::JoinedOnWeekend));
        }
    }

    #[test]
    fn leap_day_birthday_cutoff() {
        // 2024-02-29 minus 18 years clamps to 2006-02-28
        let today = date(2024, 2, 29);
        assert!(check_registration_dates(date(2006, 2, 28), date(2024, 2, 29), today, 18).is_err());
        assert!(check_registration_dates(date(2006, 2, 27), date(2024, 2, 29), today, 18).is_ok());
    }

    #[test]
    fn default_password_format() {
        assert_eq!(default_password("jdoe", date(1995, 4, 7)), "jdoe@07041995");
    }
}
