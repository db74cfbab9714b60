use async_nats::{Client, HeaderMap};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::BrokerConfig;
use crate::envelope::{Envelope, EVENT_VERSION};

/// NATS event publisher.
///
/// Publishing never fails the caller: serialization and broker errors
/// are logged and swallowed. A publisher without a connected client
/// drops every event with a warning.
#[derive(Clone, Default)]
pub struct EventPublisher {
    client: Option<Client>,
}

impl EventPublisher {
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A publisher that drops everything. Used when no broker is configured.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Connect according to config.
    ///
    /// A missing URL or a failed connection yields a disabled publisher;
    /// messaging is optional infrastructure and must not block startup.
    pub async fn connect(config: &BrokerConfig) -> Self {
        let Some(url) = &config.url else {
            warn!("NATS_URL not set, event publishing disabled");
            return Self::disabled();
        };

        match async_nats::connect(url).await {
            Ok(client) => {
                info!(url = %url, "Connected to NATS");
                Self::new(client)
            }
            Err(e) => {
                error!(error = %e, url = %url, "Failed to connect to NATS, event publishing disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Publish an event envelope to a subject.
    #[instrument(skip(self, payload), fields(subject = %subject, event_type = %event_type))]
    pub async fn publish<T: Serialize>(
        &self,
        subject: &str,
        event_type: &str,
        requestor_id: &str,
        payload: T,
    ) {
        let Some(client) = &self.client else {
            warn!("Event publisher disabled, dropping event");
            return;
        };

        let envelope = Envelope::new(event_type, requestor_id, payload);
        let body = match serde_json::to_vec(&envelope) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to serialize event");
                return;
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert("Nats-Msg-Id", Uuid::new_v4().to_string().as_str());
        headers.insert("eventType", event_type);
        headers.insert("version", EVENT_VERSION);
        headers.insert("requestorId", requestor_id);
        headers.insert("content-type", "application/json");

        if let Err(e) = client
            .publish_with_headers(subject.to_string(), headers, body.into())
            .await
        {
            error!(error = %e, "Failed to publish event");
        } else {
            info!("Event published");
        }
    }
}
