//! Outbound SMS delivery through the Twilio REST API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TwilioConfig;
use crate::{Error, Result};

/// Something that can deliver a text message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `body` from `from` to `to`, returning the provider's message id.
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String>;
}

/// Message resource returned by Twilio on success.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// Error body returned by Twilio on failure.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: Option<String>,
}

/// Twilio Programmable Messaging client.
pub struct TwilioClient {
    http_client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    api_base_url: String,
}

impl TwilioClient {
    pub fn new(config: &TwilioConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http_client: reqwest::Client, config: &TwilioConfig) -> Self {
        Self {
            http_client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base_url, self.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioClient {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String> {
        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await
            .map_err(|e| Error::Notifier(format!("Failed to reach Twilio: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Notifier(format!("Failed to read Twilio response: {}", e)))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<TwilioErrorBody>(&text)
                .ok()
                .and_then(|body| match (body.code, body.message) {
                    (Some(code), Some(message)) => Some(format!("{} ({})", message, code)),
                    (None, Some(message)) => Some(message),
                    _ => None,
                })
                .unwrap_or(text);
            return Err(Error::Notifier(format!("Twilio returned {}: {}", status, detail)));
        }

        let message: MessageResource = serde_json::from_str(&text)?;
        Ok(message.sid)
    }
}
