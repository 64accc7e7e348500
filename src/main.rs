use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use formrelay::config::Config;
use formrelay::db::{self, PgSubmissionStore};
use formrelay::email::templates::EmailLayout;
use formrelay::email::SmtpMailer;
use formrelay::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting formrelay");

    let layout = EmailLayout::load(&config.template_dir)?;
    tracing::info!("Email templates loaded from {}", config.template_dir.display());

    // The pool connects on first use; routes are served even while the store is down.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&config.database_url)?;
    let migration_pool = pool.clone();
    tokio::spawn(async move {
        db::migrate_until_ready(&migration_pool, Duration::from_secs(5)).await;
    });

    let mailer = SmtpMailer::new(&config.smtp)?;
    tracing::info!("SMTP relay configured ({}:{})", config.smtp.host, config.smtp.port);

    let addr = SocketAddr::new(config.host, config.port);
    let app = formrelay::build_app(AppState {
        config,
        store: Arc::new(PgSubmissionStore::new(pool)),
        mailer: Arc::new(mailer),
        layout,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
