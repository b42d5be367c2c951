//! AWS Secrets Manager integration.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;

use crate::{Error, Result};

/// Twilio credentials stored as `{"account_sid": ..., "auth_token": ...}`.
#[derive(Debug, Deserialize)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

/// Fetch Twilio credentials from Secrets Manager. Called once per cold start.
pub async fn get_twilio_credentials(
    client: &SecretsClient,
    secret_arn: &str,
) -> Result<TwilioCredentials> {
    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get Twilio secret: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Twilio secret has no string value".to_string()))?;

    parse_twilio_credentials(secret_string)
}

fn parse_twilio_credentials(secret_string: &str) -> Result<TwilioCredentials> {
    serde_json::from_str(secret_string)
        .map_err(|e| Error::Aws(format!("Failed to parse Twilio credentials: {}", e)))
}
