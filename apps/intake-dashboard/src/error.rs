//! Erros do serviço e seu mapeamento para respostas HTTP

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use intake_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::charts::ChartError;
use crate::html;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("Dados corrompidos: {0}")]
    DataCorruption(String),

    #[error("Armazenamento indisponível: {0}")]
    StorageUnavailable(String),

    #[error("Falha na exportação: {0}")]
    Export(String),

    #[error("Erro interno: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DataCorruption(_) | AppError::Export(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Código estável, usado também no indicador de erro do formulário
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::DataCorruption(_) => "DATA_CORRUPTION",
            AppError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            AppError::Export(_) => "EXPORT_FAILED",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    /// Mensagem exibida ao operador, sem detalhes internos
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(detail) => detail.clone(),
            _ => message_for_code(self.code()).to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::InvalidInput(detail) => tracing::warn!(detail, "Requisição rejeitada"),
            other => tracing::error!(code = other.code(), error = %other, "Falha ao atender requisição"),
        }
    }
}

/// Texto amigável para um código de erro, inclusive os recebidos via query string
pub fn message_for_code(code: &str) -> &'static str {
    match code {
        "INVALID_INPUT" => "Some intake fields were missing. Please fill in the whole form.",
        "DATA_CORRUPTION" => "Stored records are corrupted; the dashboard could not be rendered.",
        "STORAGE_UNAVAILABLE" => "The patient database is unavailable. Try again shortly.",
        "EXPORT_FAILED" => "The export file could not be written.",
        _ => "An internal error occurred.",
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::StorageUnavailable(detail) => AppError::StorageUnavailable(detail),
            DbError::DataCorruption(detail) => AppError::DataCorruption(detail),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::DataCorruption(err.to_string())
    }
}

/// Páginas HTML: erro vira página, nunca stack trace
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = html::error_page(status, &self.public_message());
        (status, Html(body)).into_response()
    }
}

/// Corpo JSON das rotas `/api`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Mesmo erro, respondido em JSON
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();
        let body = ErrorBody {
            error: ErrorDetail {
                code: err.code(),
                message: err.public_message(),
            },
        };
        (err.status(), Json(body)).into_response()
    }
}
