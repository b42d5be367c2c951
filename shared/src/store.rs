//! Calendar event persistence.
//!
//! Events live in a single DynamoDB table keyed by the `Date` string, so a
//! second event on the same day replaces the first.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::models::CalendarEvent;
use crate::{Error, Result};

/// Partition key attribute.
const DATE_ATTRIBUTE: &str = "Date";
/// Event label attribute.
const EVENT_NAME_ATTRIBUTE: &str = "eventName";

/// Storage for calendar events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Write an event, replacing any existing event with the same date.
    async fn put(&self, event: &CalendarEvent) -> Result<()>;

    /// Read every stored event. Dates are returned exactly as stored and may
    /// not parse. A failure after some events were read returns those events.
    async fn scan_all(&self) -> Result<Vec<CalendarEvent>>;
}

/// DynamoDB-backed event store.
pub struct DynamoEventStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoEventStore {
    /// Create a store over the given table.
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl EventStore for DynamoEventStore {
    async fn put(&self, event: &CalendarEvent) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_from_event(event)))
            .send()
            .await
            .map_err(|e| Error::Store(format!("Failed to put event: {}", e)))?;

        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<CalendarEvent>> {
        let mut items = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send();

        let mut events = Vec::new();
        let mut items_read = 0usize;
        while let Some(item) = items.next().await {
            let item = match item {
                Ok(item) => item,
                Err(e) if items_read == 0 => {
                    return Err(Error::Store(format!("Failed to scan table: {}", e)));
                }
                Err(e) => {
                    error!(
                        table = %self.table_name,
                        items_read,
                        error = %e,
                        "Scan failed part way; keeping events already read"
                    );
                    break;
                }
            };
            items_read += 1;

            match event_from_item(&item) {
                Some(event) => events.push(event),
                None => warn!(
                    table = %self.table_name,
                    "Skipping item without string Date and eventName attributes"
                ),
            }
        }

        Ok(events)
    }
}

fn item_from_event(event: &CalendarEvent) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            DATE_ATTRIBUTE.to_string(),
            AttributeValue::S(event.date.clone()),
        ),
        (
            EVENT_NAME_ATTRIBUTE.to_string(),
            AttributeValue::S(event.event_name.clone()),
        ),
    ])
}

fn event_from_item(item: &HashMap<String, AttributeValue>) -> Option<CalendarEvent> {
    let date = item.get(DATE_ATTRIBUTE)?.as_s().ok()?;
    let event_name = item.get(EVENT_NAME_ATTRIBUTE)?.as_s().ok()?;
    Some(CalendarEvent::new(date.as_str(), event_name.as_str()))
}

/// In-process event store with the same overwrite-by-date semantics.
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<BTreeMap<String, String>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn put(&self, event: &CalendarEvent) -> Result<()> {
        let mut events = self.events.write().await;
        events.insert(event.date.clone(), event.event_name.clone());
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<CalendarEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .map(|(date, name)| CalendarEvent::new(date.as_str(), name.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_conversion() {
        let event = CalendarEvent::new("01-01-2099", "New Year");
        let item = item_from_event(&event);

        assert_eq!(item.get("Date"), Some(&AttributeValue::S("01-01-2099".to_string())));
        assert_eq!(
            item.get("eventName"),
            Some(&AttributeValue::S("New Year".to_string()))
        );
        assert_eq!(event_from_item(&item), Some(event));
    }

    #[test]
    fn test_event_from_item_requires_string_attributes() {
        let mut item = HashMap::new();
        item.insert("Date".to_string(), AttributeValue::S("01-01-2099".to_string()));
        assert_eq!(event_from_item(&item), None);

        item.insert("eventName".to_string(), AttributeValue::N("7".to_string()));
        assert_eq!(event_from_item(&item), None);
    }

    #[tokio::test]
    async fn test_memory_store_last_write_wins() {
        let store = MemoryEventStore::new();

        store
            .put(&CalendarEvent::new("01-01-2099", "New Year"))
            .await
            .unwrap();
        let events = store.scan_all().await.unwrap();
        assert_eq!(events, vec![CalendarEvent::new("01-01-2099", "New Year")]);

        store
            .put(&CalendarEvent::new("01-01-2099", "New Year brunch"))
            .await
            .unwrap();
        let events = store.scan_all().await.unwrap();
        assert_eq!(events, vec![CalendarEvent::new("01-01-2099", "New Year brunch")]);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_keeps_distinct_dates() {
        let store = MemoryEventStore::new();
        assert!(store.is_empty().await);

        store.put(&CalendarEvent::new("02-01-2099", "b")).await.unwrap();
        store.put(&CalendarEvent::new("01-01-2099", "a")).await.unwrap();

        assert_eq!(store.len().await, 2);
    }
}
