//! Shared library for the SMS calendar Lambda functions.
//!
//! This crate holds the calendar rules, the event store and SMS clients, and the
//! logic behind both the inbound webhook and the daily reminder job.

pub mod calendar;
pub mod config;
pub mod error;
pub mod http;
pub mod inbound;
pub mod models;
pub mod notifier;
pub mod reminders;
pub mod secrets;
pub mod store;

pub use calendar::{is_valid_future_date, parse_command, parse_event_date, CommandError};
pub use config::{Config, PartialTwilioConfig, TwilioConfig};
pub use error::{Error, Result};
pub use inbound::handle_message;
pub use models::CalendarEvent;
pub use notifier::{Notifier, TwilioClient};
pub use reminders::{send_reminders, Recipient};
pub use secrets::{get_twilio_credentials, TwilioCredentials};
pub use store::{DynamoEventStore, EventStore, MemoryEventStore};
