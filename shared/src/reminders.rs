//! Daily reminder run: find today's events and text each one out.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::calendar::parse_event_date;
use crate::models::CalendarEvent;
use crate::notifier::Notifier;
use crate::store::EventStore;

/// Phone numbers a reminder is sent between.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub to: String,
    pub from: String,
}

/// Body of the SMS sent for an event.
pub fn reminder_text(event_name: &str) -> String {
    format!("Reminder: {} is happening today!", event_name)
}

/// Events from `store` dated `today`. A failed scan yields no events.
pub async fn todays_events(store: &dyn EventStore, today: NaiveDate) -> Vec<CalendarEvent> {
    let events = match store.scan_all().await {
        Ok(events) => events,
        Err(e) => {
            error!(error = %e, "Unable to scan the calendar table");
            return Vec::new();
        }
    };

    info!(events_scanned = events.len(), "Scanned calendar events");

    events
        .into_iter()
        .filter(|event| match parse_event_date(&event.date) {
            Some(date) => date == today,
            None => {
                warn!(date = %event.date, event_name = %event.event_name, "Skipping event with unparsable date");
                false
            }
        })
        .collect()
}

/// Send a reminder for every event dated `today` and return a line-per-attempt log.
pub async fn send_reminders(
    store: &dyn EventStore,
    notifier: &dyn Notifier,
    recipient: &Recipient,
    today: NaiveDate,
) -> String {
    info!(%today, "Starting reminder run");

    let mut log = String::new();
    let mut sent = 0u32;
    let mut failed = 0u32;

    for event in todays_events(store, today).await {
        let body = reminder_text(&event.event_name);

        match notifier.send(&recipient.to, &recipient.from, &body).await {
            Ok(sid) => {
                info!(sid = %sid, event_name = %event.event_name, "Reminder sent");
                log.push_str(&format!("Message sent with SID: {}\n", sid));
                sent += 1;
            }
            Err(e) => {
                error!(event_name = %event.event_name, error = %e, "Error sending Twilio message");
                log.push_str(&format!("Failed to send message for: {}\n", event.event_name));
                failed += 1;
            }
        }
    }

    info!(sent, failed, "Reminder run complete");

    log
}
