use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use crm_portal as portal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = portal::config::load_config().context("failed to load configuration")?;
    portal::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool = portal::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;
    if cfg.auto_migrate {
        portal::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let db_arc = Arc::new(db_pool);
    let app_state = portal::AppState::new(db_arc.clone(), cfg.clone())
        .context("failed to initialise views")?;
    let app = portal::app_router(app_state);

    // Bind and serve
    let ip = cfg
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("invalid host address '{}'", cfg.host))?;
    let addr = SocketAddr::new(ip, cfg.port);
    info!(environment = %cfg.environment, "crm-portal listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database pool");
    match Arc::try_unwrap(db_arc) {
        Ok(pool) => portal::db::close_pool(pool).await?,
        Err(_) => info!("Database pool still shared; dropping without explicit close"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
