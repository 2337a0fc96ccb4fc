use ar_search::api::{self, AppState};
use ar_search::source::InvoiceLookup;
use ar_search::{create_http_client, AppConfig, GraphQlClient, RecordStore};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式, 级别由 RUST_LOG 控制 (默认 info)
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 创建客户端, 由应用根持有并注入
    let http = create_http_client()?;
    let client = GraphQlClient::from_config(http.clone(), &config.api).map(Arc::new);
    match &client {
        Some(c) => info!("Remote API: {}", c.endpoint()),
        None => info!("Remote API not configured, using static file / sample data"),
    }

    // 加载记录
    let store = RecordStore::from_config(&config, http, client.clone());
    let records = store.load().await;
    info!("Loaded {} records ({:?})", records.len(), records.origin);

    let lookup = client.map(|c| c as Arc<dyn InvoiceLookup>);
    let app = api::router(AppState::new(records, lookup));

    // 启动服务器
    let addr = config.bind_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/search?q=&category=  - type-ahead suggestions");
    info!("  POST /api/search/select        - select suggestion");
    info!("  GET  /api/invoice?invoice_number=");
    info!("  GET  /api/invoices");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
