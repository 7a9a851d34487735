//! Server initialization and runtime setup.
//!
//! Wires the Postgres pool, the Redis queue and status channel, the queue
//! consumer, and the Axum redirect server, then runs both until shutdown.

use crate::application::services::{DispatchService, LinkRewriter};
use crate::config::Config;
use crate::consumer::QueueConsumer;
use crate::infrastructure::persistence::{PgEmailRepository, PgLinkRepository};
use crate::infrastructure::queue::RedisJobQueue;
use crate::infrastructure::status::RedisStatusPublisher;
use crate::infrastructure::transport::SendGridTransport;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runs the relay with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Two Redis connections (the queue connection lives inside `BRPOP`,
///   so status events get their own)
/// - The queue consumer task
/// - Axum HTTP server for redirects and health
///
/// On SIGINT/SIGTERM the server stops accepting connections and the
/// consumer finishes its in-flight job before the call returns.
///
/// # Errors
///
/// Returns an error if:
/// - Database or Redis connection fails
/// - Migrations fail to apply
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let redis_client =
        redis::Client::open(config.redis_url.as_str()).context("Invalid Redis URL")?;

    // The queue connection spends its life blocked in BRPOP. Status events
    // must not queue up behind it, so they get a second connection.
    let queue_conn = ConnectionManager::new(redis_client.clone())
        .await
        .context("Failed to connect to Redis (queue)")?;
    let status_conn = ConnectionManager::new(redis_client)
        .await
        .context("Failed to connect to Redis (status channel)")?;
    tracing::info!("Connected to Redis");

    let pool_arc = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool_arc.clone()));
    let email_repository = Arc::new(PgEmailRepository::new(pool_arc));

    let transport = Arc::new(SendGridTransport::new(
        config.mail_api_base.clone(),
        config.sendgrid_api_key.clone(),
    ));
    let status = Arc::new(RedisStatusPublisher::new(
        status_conn,
        config.status_channel.clone(),
    ));
    let rewriter = LinkRewriter::new(link_repository.clone(), config.public_base_url.clone());
    let dispatcher = Arc::new(DispatchService::new(
        rewriter,
        email_repository,
        transport,
        status,
        config.sendgrid_from_email.clone(),
        config.delivery_timeout(),
    ));

    let queue = Arc::new(RedisJobQueue::new(queue_conn, config.queue_name.clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer = QueueConsumer::new(queue.clone(), dispatcher, config.queue_backoff());
    let consumer_handle = tokio::spawn(consumer.run(shutdown_rx));
    tracing::info!(queue = %config.queue_name, "Queue consumer started");

    let state = AppState::new(link_repository, queue);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    // The consumer sees the same signal; wait for it to finish the job in
    // flight before tearing down the process.
    consumer_handle
        .await
        .context("Queue consumer task failed")?;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives, then signals the consumer.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining");
    let _ = shutdown_tx.send(true);
}
