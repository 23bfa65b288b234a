//! order_mesh - process entry point
//!
//! ```text
//! order_mesh --gateway [--env dev] [--port 8080]   # API gateway
//! order_mesh --orders  [--env dev] [--port 8081]   # orders service
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info_span;

use order_mesh::config::{AppConfig, OrdersConfig};
use order_mesh::orders::adapters::{InMemoryDatabase, LogMessaging, PgDatabase, WebhookMessaging};
use order_mesh::orders::{Database, MessagingSystem, OrderEngine};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn use_gateway_mode() -> bool {
    std::env::args().any(|a| a == "--gateway")
}

fn use_orders_mode() -> bool {
    std::env::args().any(|a| a == "--orders")
}

fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = order_mesh::logging::init_logging(&app_config.log);

    tracing::info!("Starting order_mesh in {} mode", env);

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    if use_gateway_mode() {
        rt.block_on(run_gateway(&app_config))
    } else if use_orders_mode() {
        rt.block_on(run_orders(&app_config.orders))
    } else {
        anyhow::bail!("no mode selected, pass --gateway or --orders")
    }
}

async fn run_gateway(app_config: &AppConfig) -> anyhow::Result<()> {
    let config = &app_config.gateway;
    let port = get_port_override().unwrap_or(config.port);
    let orders = config.server_config()?;

    let listener = TcpListener::bind((config.host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, port))?;

    order_mesh::gateway::run_server(
        listener,
        orders,
        config.read_timeout(),
        info_span!("gateway", backend = %config.orders_url),
    )
    .await?;
    Ok(())
}

async fn run_orders(config: &OrdersConfig) -> anyhow::Result<()> {
    let port = get_port_override().unwrap_or(config.port);

    let pg = match &config.database_url {
        Some(url) => Some(Arc::new(
            PgDatabase::connect(url, config.max_connections, info_span!("database")).await?,
        )),
        None => {
            tracing::warn!("No database_url configured, orders are kept in memory");
            None
        }
    };
    let database: Arc<dyn Database> = match &pg {
        Some(pg) => pg.clone(),
        None => Arc::new(InMemoryDatabase::new()),
    };

    let messaging: Arc<dyn MessagingSystem> = match &config.events_url {
        Some(url) => Arc::new(WebhookMessaging::new(
            config.events_client()?,
            url.clone(),
            info_span!("messaging", url = %url),
        )),
        None => Arc::new(LogMessaging::new(info_span!("messaging"))),
    };

    let engine = Arc::new(OrderEngine::new(
        database,
        messaging,
        info_span!("order_engine"),
    ));

    let listener = TcpListener::bind((config.host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, port))?;
    let served = order_mesh::orders::api::run_server(listener, engine, info_span!("orders")).await;

    if let Some(pg) = pg {
        pg.close().await;
    }
    served?;
    Ok(())
}
