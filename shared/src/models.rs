//! Shared data models.

use serde::{Deserialize, Serialize};

/// A calendar entry as accepted from an inbound SMS.
///
/// `date` is the `DD-MM-YYYY` string the user sent and doubles as the
/// store's partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub date: String,
    pub event_name: String,
}

impl CalendarEvent {
    pub fn new(date: impl Into<String>, event_name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            event_name: event_name.into(),
        }
    }
}
