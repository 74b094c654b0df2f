//! Shared application state

use crate::{
    config::Config,
    db::{InMemorySellerStore, PostgresSellerStore, SellerStore},
    events::SellerProducer,
    messaging::{InMemoryMessageSink, MessageSink, PostgresMessageSink},
    services::SellerService,
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub enum StoreKind {
    /// Sellers and outbound messages live in Postgres.
    Postgres,
    /// Everything stays in process memory (useful for tests and local runs).
    InMemory,
}

#[derive(Debug, Clone)]
pub struct AppStateOptions {
    pub run_migrations: bool,
    pub store: StoreKind,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
            store: StoreKind::Postgres,
        }
    }
}

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn SellerStore>,
    pub message_sink: Arc<dyn MessageSink>,
    pub seller_service: Arc<SellerService>,
}

impl AppState {
    /// Initialize the application state
    pub async fn new(config: Config) -> Result<Self> {
        let options = AppStateOptions {
            run_migrations: config.database.run_migrations,
            ..Default::default()
        };
        Self::new_with_options(config, options).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        tracing::info!(store = ?options.store, "Initializing application state...");

        let (store, sink): (Arc<dyn SellerStore>, Arc<dyn MessageSink>) = match options.store {
            StoreKind::InMemory => (
                Arc::new(InMemorySellerStore::new()),
                Arc::new(InMemoryMessageSink::new()),
            ),
            StoreKind::Postgres => {
                let db_pool = create_db_pool(&config).await?;

                if options.run_migrations {
                    tracing::info!("Running database migrations...");
                    sqlx::migrate!("./migrations")
                        .run(&db_pool)
                        .await
                        .map_err(|e| crate::Error::Internal(format!("Migration failed: {}", e)))?;
                }

                let sink: Arc<dyn MessageSink> = match config.messaging.backend.as_str() {
                    "memory" => Arc::new(InMemoryMessageSink::new()),
                    _ => Arc::new(PostgresMessageSink::new(
                        db_pool.clone(),
                        config.messaging.channel.clone(),
                    )),
                };
                (Arc::new(PostgresSellerStore::new(db_pool)), sink)
            }
        };

        Ok(Self::from_parts(config, store, sink))
    }

    /// Wire the services over an existing store and sink.
    pub fn from_parts(
        config: Config,
        store: Arc<dyn SellerStore>,
        message_sink: Arc<dyn MessageSink>,
    ) -> Self {
        let publisher = Arc::new(SellerProducer::new(
            message_sink.clone(),
            config.messaging.topics.clone(),
        ));
        let seller_service = Arc::new(SellerService::new(store.clone(), publisher));

        tracing::info!(
            store = store.backend_name(),
            "Application state initialized"
        );

        Self {
            config: Arc::new(config),
            store,
            message_sink,
            seller_service,
        }
    }
}

/// Create a Postgres pool with per-connection statement and lock timeouts.
pub async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;
    let lock_timeout = config.database.lock_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query(&format!("SET statement_timeout = '{}s'", statement_timeout))
                    .execute(&mut *conn)
                    .await?;

                // Fail fast instead of queueing behind a long-held seller row lock
                sqlx::query(&format!("SET lock_timeout = '{}s'", lock_timeout))
                    .execute(&mut *conn)
                    .await?;

                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
