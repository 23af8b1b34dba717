//! Kafka-backed notification publisher for the forum.
//!
//! Notification events are produced to a single topic, keyed by the
//! recipient's channel so a downstream relay can fan them out to connected
//! browser sessions. The wire format of that relay is not this crate's
//! concern; it ships `{event, data}` JSON and nothing more.
//!
//! ## Usage
//!
//! ```ignore
//! use forum_kafka::{KafkaNotificationPublisher, ProducerConfig};
//!
//! let config = ProducerConfig::from_env("localhost:9092", "forum-api");
//! let publisher = KafkaNotificationPublisher::new(&config, "forum.notifications")?;
//! ```

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use forum_ledger::errors::PublishError;
use forum_ledger::notifier::NotificationPublisher;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use thiserror::Error;

/// Configuration for creating a Kafka producer.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Kafka broker address (e.g., "localhost:9092")
    pub broker: String,
    /// Client ID for this producer
    pub client_id: String,
    /// SASL username (enables SASL/SSL if set)
    pub username: Option<String>,
    /// SASL password (required if username is set)
    pub password: Option<String>,
    /// Custom CA certificate in PEM format
    pub ssl_ca_pem: Option<String>,
}

impl ProducerConfig {
    /// Create a new ProducerConfig with the given broker and client_id.
    pub fn new(broker: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            broker: broker.into(),
            client_id: client_id.into(),
            username: None,
            password: None,
            ssl_ca_pem: None,
        }
    }

    /// Create a ProducerConfig from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KAFKA_BROKER` - Broker address (uses provided default if not set)
    /// - `KAFKA_USERNAME` - SASL username (optional)
    /// - `KAFKA_PASSWORD` - SASL password (optional)
    /// - `KAFKA_SSL_CA_PEM` - Custom CA cert in PEM format (optional)
    pub fn from_env(default_broker: &str, client_id: impl Into<String>) -> Self {
        Self {
            broker: env::var("KAFKA_BROKER").unwrap_or_else(|_| default_broker.to_string()),
            client_id: client_id.into(),
            username: env::var("KAFKA_USERNAME").ok(),
            password: env::var("KAFKA_PASSWORD").ok(),
            ssl_ca_pem: env::var("KAFKA_SSL_CA_PEM").ok(),
        }
    }
}

/// Error creating the Kafka producer.
#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("failed to create producer: {0}")]
    Creation(#[from] rdkafka::error::KafkaError),
}

fn create_producer(config: &ProducerConfig) -> Result<FutureProducer, ProducerError> {
    let mut client_config = ClientConfig::new();

    client_config
        .set("bootstrap.servers", &config.broker)
        .set("client.id", &config.client_id)
        .set("compression.type", "zstd")
        .set("message.timeout.ms", "5000");

    // SASL/SSL for managed Kafka; plaintext for local development.
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_config
            .set("security.protocol", "SASL_SSL")
            .set("sasl.mechanisms", "PLAIN")
            .set("sasl.username", username)
            .set("sasl.password", password);

        if let Some(ca_pem) = &config.ssl_ca_pem {
            client_config.set("ssl.ca.pem", ca_pem);
        }
    }

    Ok(client_config.create()?)
}

/// Publishes notification events to a Kafka topic, keyed by recipient channel.
pub struct KafkaNotificationPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaNotificationPublisher {
    /// Create a publisher producing to `topic` with the given configuration.
    pub fn new(config: &ProducerConfig, topic: impl Into<String>) -> Result<Self, ProducerError> {
        Ok(Self {
            producer: create_producer(config)?,
            topic: topic.into(),
        })
    }
}

#[async_trait]
impl NotificationPublisher for KafkaNotificationPublisher {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        let body = serde_json::to_vec(&serde_json::json!({
            "event": event,
            "data": payload,
        }))?;

        let record = FutureRecord::to(&self.topic).key(channel).payload(&body);
        self.producer
            .send(record, Timeout::After(Duration::from_secs(5)))
            .await
            .map_err(|(e, _)| PublishError::Transport(e.to_string()))?;
        Ok(())
    }
}
