//! Intake Dashboard - Serviço de admissão de pacientes
//!
//! Registra admissões, aplica a triagem por regras e gera o painel de
//! estatísticas (contagens, prevalência, gráficos) e a exportação em CSV.

pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod html;
pub mod risk;
pub mod routes;
pub mod service;
pub mod stats;

/// Metadados de build gerados por `built`
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use config::AppConfig;
pub use error::AppError;
pub use routes::{router, AppState};
