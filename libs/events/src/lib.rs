//! Integration event publishing over NATS.
//!
//! Events are a fire-and-forget side channel: the publisher never fails
//! the caller. Broker trouble is logged and swallowed, and a publisher
//! built without a broker URL is a silent no-op, so the API keeps
//! serving requests with or without messaging infrastructure.

mod config;
mod envelope;
mod publisher;

pub use config::BrokerConfig;
pub use envelope::{Envelope, EventHeaders};
pub use publisher::EventPublisher;
