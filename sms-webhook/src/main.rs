//! Receive Message Lambda - Handles Twilio's inbound SMS webhook.
//!
//! API Gateway forwards Twilio's form-encoded POST here. The message text is
//! parsed as `DD-MM-YYYY event name`, future-dated events are written to the
//! calendar table, and a TwiML reply is always returned with status 200.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::twiml_response;
use shared::{handle_message, Config, DynamoEventStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    config: Config,
    store: DynamoEventStore,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let dynamo_client = aws_sdk_dynamodb::Client::new(&aws_config);

        let config = Config::from_env()?;
        info!(table = %config.table_name, "Receive message Lambda initialised");

        Ok(Self {
            store: DynamoEventStore::new(dynamo_client, config.table_name.clone()),
            config,
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let form_body = String::from_utf8_lossy(event.body().as_ref());

    let reply = handle_message(&state.store, &form_body, state.config.today()).await;

    twiml_response(&reply)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
