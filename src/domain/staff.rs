//! Staff code and username generation.

use thiserror::Error;

use crate::constants::staff::STAFF_CODE_PREFIX;

/// Width of the zero-padded numeric part of a staff code.
const STAFF_NUMBER_WIDTH: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StaffCodeError {
    #[error("Staff code '{0}' has a non-numeric suffix")]
    NonNumeric(String),

    #[error("Staff code sequence exhausted after '{0}'")]
    Exhausted(String),
}

/// Parses the number behind the two-character prefix of a staff code.
///
/// ```rust
/// use assetdesk::domain::staff::parse_staff_number;
///
/// assert_eq!(parse_staff_number("SD0042"), Ok(42));
/// assert!(parse_staff_number("SDx1").is_err());
/// ```
pub fn parse_staff_number(code: &str) -> Result<u32, StaffCodeError> {
    code.get(STAFF_CODE_PREFIX.len()..)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| StaffCodeError::NonNumeric(code.to_string()))
}

/// Computes the staff code that follows the greatest of `existing`.
///
/// Codes are compared as strings, so `SD9999` is followed by `SD10000`, which
/// then sorts below `SD2000`. With no existing codes the configured default is
/// handed out unchanged.
pub fn next_staff_code<'a, I>(existing: I, default_code: &str) -> Result<String, StaffCodeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let Some(latest) = existing.into_iter().max() else {
        return Ok(default_code.to_string());
    };

    let next = parse_staff_number(latest)?
        .checked_add(1)
        .ok_or_else(|| StaffCodeError::Exhausted(latest.to_string()))?;

    Ok(format!(
        "{STAFF_CODE_PREFIX}{next:0width$}",
        width = STAFF_NUMBER_WIDTH
    ))
}

/// Derives the base username from a person's names.
pub trait UsernameFormatter: Send + Sync {
    fn base_username(&self, first_name: &str, last_name: &str) -> String;
}

/// Initials of the first name followed by the full last name: `John Doe` is `jdoe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitialsFormatter;

impl UsernameFormatter for InitialsFormatter {
    fn base_username(&self, first_name: &str, last_name: &str) -> String {
        let initials = first_name
            .split_whitespace()
            .filter_map(|word| word.chars().next());
        let last = last_name.split_whitespace().flat_map(str::chars);

        initials
            .chain(last)
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Appends a numeric disambiguator when `base` is already taken.
///
/// Every existing name equal to `base`, or continuing it with a digit, counts
/// as a collision. `n` collisions produce `base{n+1}`. Only the character
/// right after the base is inspected, so gaps in the sequence are not reused.
pub fn disambiguate_username<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let collisions = existing
        .into_iter()
        .filter(|name| collides_with(base, name))
        .count();

    if collisions == 0 {
        base.to_string()
    } else {
        format!("{base}{}", collisions + 1)
    }
}

fn collides_with(base: &str, name: &str) -> bool {
    name.strip_prefix(base).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|c| c.is_ascii_digit())
    })
}
