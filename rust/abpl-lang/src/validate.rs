//! Semantic checks on an accepted command tree.
//!
//! Times are either 12-hour (`h:mm AM`, hour 1-12) or 24-hour (`h:mm`,
//! hour 0-23). Dates are `<month> <day>, <year>` with a full or abbreviated
//! month name and a four digit year, and must exist in the calendar. When a
//! tree has both a start and an end date, the end must be strictly later.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::command::{CommandTree, Field};
use crate::error::SemanticError;
use crate::token::TokenKind;

static TIME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?:\s*([ap])m)?$").ok());

static DATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{1,2}),\s*(\d{4})$").ok());

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a clock time in 12-hour or 24-hour form.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let captures = TIME.as_ref()?.captures(text.trim())?;
    let hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = captures[2].parse().ok()?;

    let hour = match captures.get(3).map(|meridiem| meridiem.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (meridiem.as_str(), hour) {
                ("a", 12) => 0,
                ("a", hour) => hour,
                (_, 12) => 12,
                (_, hour) => hour + 12,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse a calendar date such as "March 10, 2025" or "mar 10, 2025".
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let captures = DATE.as_ref()?.captures(text.trim())?;
    let month = month_number(&captures[1])?;
    let day: u32 = captures[2].parse().ok()?;
    let year: i32 = captures[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// 1-based month for a full name, a three letter abbreviation, or "Sept".
fn month_number(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    let name = if name == "sept" { "sep" } else { name.as_str() };
    MONTHS
        .iter()
        .position(|month| *month == name || (name.len() == 3 && month.starts_with(name)))
        .map(|index| index as u32 + 1)
}

/// Check every time and date in `tree`, then the order of its date range.
///
/// The first failing check is returned. The function is pure: validating the
/// same tree again gives the same answer.
pub fn validate(tree: &CommandTree) -> Result<(), SemanticError> {
    let mut start: Option<(&Field, NaiveDate)> = None;
    let mut end: Option<(&Field, NaiveDate)> = None;

    for field in tree.fields() {
        let token = &field.token;
        match token.kind {
            TokenKind::Time => {
                if parse_time(&token.text).is_none() {
                    return Err(SemanticError::InvalidTime {
                        field: field.name,
                        value: token.text.clone(),
                        position: token.position,
                    });
                }
            }
            kind if kind.is_date() => {
                let date = parse_date(&token.text).ok_or_else(|| SemanticError::InvalidDate {
                    field: field.name,
                    value: token.text.clone(),
                    position: token.position,
                })?;
                match kind {
                    TokenKind::StartDate if start.is_none() => start = Some((field, date)),
                    TokenKind::EndDate if end.is_none() => end = Some((field, date)),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    if let (Some((first, from)), Some((last, until))) = (start, end) {
        if from >= until {
            return Err(SemanticError::DateOrder {
                start: first.token.text.clone(),
                end: last.token.text.clone(),
                position: last.token.position,
            });
        }
    }

    Ok(())
}
