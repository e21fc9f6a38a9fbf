//! Rotas HTTP do painel de admissões
//!
//! Páginas HTML em `/`, `/dashboard` e `/export`; espelhos JSON em `/api`.

use axum::routing::{get, post};
use axum::Router;
use intake_db::VisitStore;
use std::path::PathBuf;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub mod dashboard;
pub mod export;
pub mod health;
pub mod patients;

/// Estado compartilhado entre os handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: VisitStore,
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(store: VisitStore, export_path: PathBuf) -> Self {
        Self { store, export_path }
    }
}

pub fn router(state: AppState, max_in_flight: usize) -> Router {
    Router::new()
        .route("/", get(patients::index))
        .route("/add", post(patients::add))
        .route("/dashboard", get(dashboard::page))
        .route("/export", get(export::download))
        .route("/api/patients", get(patients::list_json))
        .route("/api/dashboard", get(dashboard::stats_json))
        .route("/health", get(health::check))
        .layer(ConcurrencyLimitLayer::new(max_in_flight))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
