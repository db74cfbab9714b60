use serde::Serialize;

/// Schema version stamped on every outgoing event.
pub const EVENT_VERSION: &str = "1.0.0";

/// Metadata carried alongside every event payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeaders {
    pub event_type: String,
    pub version: String,
    pub requestor_id: String,
    pub content_type: String,
}

impl EventHeaders {
    pub fn new(event_type: &str, requestor_id: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            version: EVENT_VERSION.to_string(),
            requestor_id: requestor_id.to_string(),
            content_type: "application/json".to_string(),
        }
    }
}

/// Wire format of a published event: metadata plus a typed payload.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub headers: EventHeaders,
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(event_type: &str, requestor_id: &str, payload: T) -> Self {
        Self {
            headers: EventHeaders::new(event_type, requestor_id),
            payload,
        }
    }
}
