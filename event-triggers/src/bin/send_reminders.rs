//! Send Reminders Lambda - Texts out today's calendar events.
//!
//! This Lambda runs daily via EventBridge and:
//! 1. Scans every event in the calendar table
//! 2. Keeps the ones dated today
//! 3. Sends one Twilio SMS per event
//! 4. Returns a line-per-attempt log of SIDs and failures

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::{
    get_twilio_credentials, send_reminders, Config, DynamoEventStore, Recipient, TwilioClient,
    TwilioConfig,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct AppState {
    config: Config,
    store: DynamoEventStore,
    twilio: TwilioClient,
    recipient: Recipient,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let dynamo_client = aws_sdk_dynamodb::Client::new(&aws_config);

        let config = Config::from_env()?;
        let twilio_config = load_twilio_config(&aws_config).await?;

        info!(
            table = %config.table_name,
            from = %twilio_config.from_number,
            "Send reminders Lambda initialised"
        );

        Ok(Self {
            store: DynamoEventStore::new(dynamo_client, config.table_name.clone()),
            twilio: TwilioClient::new(&twilio_config),
            recipient: Recipient {
                to: twilio_config.to_number,
                from: twilio_config.from_number,
            },
            config,
        })
    }
}

/// Twilio settings from the environment, with credentials from Secrets Manager
/// when they are not set directly.
async fn load_twilio_config(aws_config: &aws_config::SdkConfig) -> Result<TwilioConfig, Error> {
    let partial = TwilioConfig::from_env()?;

    if let Some((account_sid, auth_token)) = partial.credentials.clone() {
        return Ok(partial.with_credentials(account_sid, auth_token));
    }

    let secret_arn = partial
        .secret_arn
        .clone()
        .ok_or("TWILIO_ACCOUNT_SID/TWILIO_AUTH_TOKEN or TWILIO_SECRET_ARN must be set")?;

    let secrets_client = aws_sdk_secretsmanager::Client::new(aws_config);
    let credentials = get_twilio_credentials(&secrets_client, &secret_arn).await?;

    Ok(partial.with_credentials(credentials.account_sid, credentials.auth_token))
}

/// EventBridge `detail-type`, or empty for manual invokes with any other payload.
fn detail_type(payload: &Value) -> &str {
    payload
        .get("detail-type")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

async fn handler(state: Arc<AppState>, event: LambdaEvent<Value>) -> Result<String, Error> {
    info!(detail_type = %detail_type(&event.payload), "Processing reminder trigger");

    let log = send_reminders(
        &state.store,
        &state.twilio,
        &state.recipient,
        state.config.today(),
    )
    .await;

    Ok(log)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
