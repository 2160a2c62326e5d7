//! # Mapping Events
//!
//! Optional diagnostic events emitted by the registry on registration and
//! lookup. A registry without a sink emits nothing here; `tracing` output is
//! independent of the sink.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingEventKind {
    EndpointMapped,
    MappingConflict,
    LookupHit,
    LookupMiss,
}

impl fmt::Display for MappingEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MappingEventKind::EndpointMapped => "mapping.endpoint_mapped",
            MappingEventKind::MappingConflict => "mapping.conflict",
            MappingEventKind::LookupHit => "mapping.lookup_hit",
            MappingEventKind::LookupMiss => "mapping.lookup_miss",
        };
        f.write_str(name)
    }
}

/// A single diagnostic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEvent {
    pub kind: MappingEventKind,
    pub key: String,
    pub handler: Option<String>,
    pub existing_handler: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl MappingEvent {
    pub fn new(kind: MappingEventKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            handler: None,
            existing_handler: None,
            occurred_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    #[must_use]
    pub fn with_existing_handler(mut self, handler: impl Into<String>) -> Self {
        self.existing_handler = Some(handler.into());
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Receiver for mapping events. Implementations must not block.
pub trait MappingEventSink: Send + Sync + fmt::Debug {
    fn publish(&self, event: &MappingEvent);
}

/// Forwards events to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl MappingEventSink for TracingEventSink {
    fn publish(&self, event: &MappingEvent) {
        tracing::debug!(
            event = %event.kind,
            key = %event.key,
            handler = event.handler.as_deref(),
            existing_handler = event.existing_handler.as_deref(),
            occurred_at = %event.occurred_at.to_rfc3339(),
            "MAPPING_EVENT"
        );
    }
}

/// Keeps every event in memory; used for diagnostics endpoints and tests
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<MappingEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MappingEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, kind: MappingEventKind) -> usize {
        self.events.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl MappingEventSink for CollectingEventSink {
    fn publish(&self, event: &MappingEvent) {
        self.events.lock().push(event.clone());
    }
}
