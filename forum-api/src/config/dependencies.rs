use std::sync::Arc;

use forum_kafka::{KafkaNotificationPublisher, ProducerConfig};
use forum_ledger::{ContentService, NotificationPublisher, VoteLedger};
use forum_repository::{
    ContentRepository, PostgresContentRepository, PostgresVoteRepository, VoteRepository,
};

use crate::config::ApiConfig;
use crate::errors::StartupError;

/// `Dependencies` holds the wired-up services the HTTP layer runs on.
///
/// Construction connects to Postgres, creates the Kafka producer, and wires
/// the repositories and the publisher into the vote ledger and the content
/// service.
pub struct Dependencies {
    pub config: ApiConfig,
    pub ledger: Arc<VoteLedger>,
    pub content: Arc<ContentService>,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance from the environment.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `StartupError` if configuration, the database connection, or the
    /// producer fails.
    pub async fn new() -> Result<Self, StartupError> {
        let config = ApiConfig::from_env()?;

        let pool = sqlx::PgPool::connect(&config.database_url).await?;
        let votes: Arc<dyn VoteRepository> = Arc::new(PostgresVoteRepository::new(pool.clone()));
        let content_store: Arc<dyn ContentRepository> =
            Arc::new(PostgresContentRepository::new(pool));

        let producer_config = ProducerConfig::from_env(&config.kafka_broker, "forum-api");
        let publisher: Arc<dyn NotificationPublisher> = Arc::new(KafkaNotificationPublisher::new(
            &producer_config,
            config.notifications_topic.clone(),
        )?);

        let ledger = Arc::new(VoteLedger::new(votes.clone(), publisher.clone()));
        let content = Arc::new(ContentService::new(content_store, votes, publisher));

        Ok(Dependencies {
            config,
            ledger,
            content,
        })
    }
}
