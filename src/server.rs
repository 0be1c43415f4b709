//! Reservation server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: storage setup, migrations,
//! the REST API listener and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, AppState};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Keep all data in process memory instead of the configured database.
    pub in_memory: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            in_memory: false,
        }
    }
}

// ── Storage ────────────────────────────────────────────────────────

/// Repositories plus the connection backing them, if any.
pub struct Storage {
    pub repos: Arc<dyn RepositoryProvider>,
    pub db: Option<DatabaseConnection>,
}

/// Open the configured storage backend, migrating the schema when asked.
pub async fn open_storage(
    config: &AppConfig,
    auto_migrate: bool,
    in_memory: bool,
) -> Result<Storage, sea_orm::DbErr> {
    if in_memory {
        info!("Using in-memory storage; data is lost on shutdown");
        return Ok(Storage {
            repos: Arc::new(InMemoryRepositoryProvider::new()),
            db: None,
        });
    }

    let db = init_database(&config.database_config()).await?;
    if auto_migrate {
        info!("Running database migrations...");
        Migrator::up(&db, None).await?;
        info!("Migrations completed");
    }

    Ok(Storage {
        repos: Arc::new(SeaOrmRepositoryProvider::new(db.clone())),
        db: Some(db),
    })
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// ```rust,no_run
/// use roomescape::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     roomescape::shared::shutdown_signal().await;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Address the API is actually bound to
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown_tx: oneshot::Sender<()>,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting room escape reservation service...");

        let storage = open_storage(&app_cfg, opts.auto_migrate, opts.in_memory).await?;

        let jwt_config = app_cfg.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );
        let state = AppState::new(
            storage.repos.clone(),
            jwt_config,
            app_cfg.security.bcrypt_cost,
        );
        let router = create_api_router(state);

        let listener = tokio::net::TcpListener::bind(app_cfg.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos: storage.repos,
            config: app_cfg,
            local_addr,
            db: storage.db,
            shutdown_tx,
            api_task,
        })
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }

    /// Stop accepting requests, drain in-flight ones and close storage.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down...");
        let _ = self.shutdown_tx.send(());

        if let Err(e) = self.api_task.await {
            error!("REST API server task panicked: {}", e);
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Shutdown complete");
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
