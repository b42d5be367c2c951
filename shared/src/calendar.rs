//! Calendar command parsing and date rules.
//!
//! Inbound texts look like `DD-MM-YYYY event name`. Dates are parsed strictly:
//! exactly two day digits, two month digits and four year digits separated by
//! dashes, and the result must be a real Gregorian date (no rollover).

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::CalendarEvent;

/// chrono format matching the stored `DD-MM-YYYY` layout.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Why an inbound command was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Text did not split into a date token and an event name.
    #[error("Failed to parse message. Use format DD-MM-YYYY event name.")]
    MissingEventName,

    /// Date token is malformed, impossible, or not after today.
    #[error("The provided event date is not in the correct format or not a future date. Use format DD-MM-YYYY.")]
    InvalidDate,
}

impl CommandError {
    /// Text sent back to the user for this rejection.
    pub fn reply(&self) -> String {
        self.to_string()
    }
}

/// Split an SMS body on its first space into a date token and an event name.
pub fn split_command(text: &str) -> Result<(&str, &str), CommandError> {
    match text.split_once(' ') {
        Some((date, name)) if !date.is_empty() && !name.is_empty() => Ok((date, name)),
        _ => Err(CommandError::MissingEventName),
    }
}

/// Parse a `DD-MM-YYYY` string into a date, rejecting anything else.
pub fn parse_event_date(token: &str) -> Option<NaiveDate> {
    let bytes = token.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
        return None;
    }

    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    NaiveDate::parse_from_str(token, DATE_FORMAT).ok()
}

/// True when `token` is a valid `DD-MM-YYYY` date strictly after `today`.
pub fn is_valid_future_date(token: &str, today: NaiveDate) -> bool {
    parse_event_date(token).is_some_and(|date| date > today)
}

/// Parse and validate an inbound SMS body into an event to store.
pub fn parse_command(text: &str, today: NaiveDate) -> Result<CalendarEvent, CommandError> {
    let (date, name) = split_command(text)?;

    if !is_valid_future_date(date, today) {
        return Err(CommandError::InvalidDate);
    }

    Ok(CalendarEvent::new(date, name))
}

/// Format a date the way it is stored.
pub fn format_event_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
