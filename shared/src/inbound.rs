//! Inbound SMS handling: turn a Twilio webhook body into a stored event.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::calendar::parse_command;
use crate::http::parse_form;
use crate::store::EventStore;

/// Text used when the webhook carries no `Body` field. It splits into `No` and
/// `message text!`, so the sender gets the invalid-date reply, not the
/// parse-failure one.
pub const MISSING_BODY_TEXT: &str = "No message text!";

/// Process one inbound webhook body and return the reply text for the sender.
///
/// Every path yields a reply; a failed store write is logged and the sender
/// is still told the event was added.
pub async fn handle_message(store: &dyn EventStore, form_body: &str, today: NaiveDate) -> String {
    info!(body = %form_body, "Received Twilio message");

    let mut fields = parse_form(form_body);
    let text = fields
        .remove("Body")
        .unwrap_or_else(|| MISSING_BODY_TEXT.to_string());

    let event = match parse_command(&text, today) {
        Ok(event) => event,
        Err(e) => {
            info!(text = %text, reason = ?e, "Rejected calendar command");
            return e.reply();
        }
    };

    info!(date = %event.date, event_name = %event.event_name, "Adding calendar event");

    if let Err(e) = store.put(&event).await {
        error!(date = %event.date, error = %e, "Failed to store calendar event");
    }

    format!(
        "Event '{}' on {} has been added to the calendar.",
        event.event_name, event.date
    )
}
