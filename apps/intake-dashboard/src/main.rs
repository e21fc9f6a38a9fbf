use anyhow::{Context, Result};
use intake_dashboard::{built_info, router, AppConfig, AppState};
use intake_db::{init_db_pool, VisitStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,intake_dashboard=debug,tower_http=debug";

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Falha ao aguardar sinal de encerramento: {}", e);
    }
    info!("Encerrando servidor");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::default();
    init_tracing(config.log_json);

    info!(version = built_info::PKG_VERSION, "Iniciando intake-dashboard");

    let pool = init_db_pool(&config.db).await?;
    let state = AppState::new(VisitStore::new(pool), config.export_path.clone());
    let app = router(state, config.max_in_flight);

    info!("Servidor escutando em http://{}", config.bind_addr);
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Falha no servidor HTTP")?;

    Ok(())
}
