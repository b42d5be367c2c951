//! Configuration management for Lambda functions.

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::env;

use crate::{Error, Result};

/// Table used when `CALENDAR_TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "calendarTable";

/// Twilio REST endpoint used when `TWILIO_API_BASE_URL` is not set.
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding calendar events
    pub table_name: String,
    /// Zone used to decide what "today" is; host local time when unset
    pub timezone: Option<Tz>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let table_name =
            env::var("CALENDAR_TABLE_NAME").unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string());

        let timezone = match env::var("CALENDAR_TIMEZONE") {
            Ok(name) => Some(parse_timezone(&name)?),
            Err(_) => None,
        };

        Ok(Self {
            table_name,
            timezone,
        })
    }

    /// Current calendar date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::Config(format!("Unknown CALENDAR_TIMEZONE: {}", name)))
}

/// Twilio account and phone numbers used by the reminder job.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub to_number: String,
    pub api_base_url: String,
}

impl TwilioConfig {
    /// Load Twilio settings from environment variables.
    ///
    /// `credentials` is `None` when neither `TWILIO_ACCOUNT_SID` nor
    /// `TWILIO_AUTH_TOKEN` is set; the caller then reads them from
    /// `TWILIO_SECRET_ARN`.
    pub fn from_env() -> Result<PartialTwilioConfig> {
        let credentials = match (env::var("TWILIO_ACCOUNT_SID"), env::var("TWILIO_AUTH_TOKEN")) {
            (Ok(account_sid), Ok(auth_token)) => Some((account_sid, auth_token)),
            (Err(_), Err(_)) => None,
            (Err(_), Ok(_)) => return Err(missing("TWILIO_ACCOUNT_SID")),
            (Ok(_), Err(_)) => return Err(missing("TWILIO_AUTH_TOKEN")),
        };

        Ok(PartialTwilioConfig {
            credentials,
            secret_arn: env::var("TWILIO_SECRET_ARN").ok(),
            from_number: env::var("TWILIO_FROM_PHONE_NUMBER")
                .map_err(|_| missing("TWILIO_FROM_PHONE_NUMBER"))?,
            to_number: env::var("TWILIO_TO_PHONE_NUMBER")
                .map_err(|_| missing("TWILIO_TO_PHONE_NUMBER"))?,
            api_base_url: env::var("TWILIO_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TWILIO_BASE_URL.to_string()),
        })
    }
}

/// Twilio settings whose credentials may still need to come from Secrets Manager.
#[derive(Debug, Clone)]
pub struct PartialTwilioConfig {
    pub credentials: Option<(String, String)>,
    pub secret_arn: Option<String>,
    pub from_number: String,
    pub to_number: String,
    pub api_base_url: String,
}

impl PartialTwilioConfig {
    /// Complete the config with credentials fetched elsewhere.
    pub fn with_credentials(self, account_sid: String, auth_token: String) -> TwilioConfig {
        TwilioConfig {
            account_sid,
            auth_token,
            from_number: self.from_number,
            to_number: self.to_number,
            api_base_url: self.api_base_url,
        }
    }
}

fn missing(var: &str) -> Error {
    Error::Config(format!("{} not set", var))
}
