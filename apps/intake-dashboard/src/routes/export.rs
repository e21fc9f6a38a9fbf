//! Download do CSV de pesquisa

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use super::AppState;
use crate::error::AppError;
use crate::export::EXPORT_FILE_NAME;
use crate::service;

pub async fn download(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = service::export_records(&state.store, &state.export_path).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    ))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get, send, test_router};
    use anyhow::Result;
    use axum::http::{header, StatusCode};
    use intake_db::testing::visit;

    #[tokio::test]
    async fn test_empty_export_is_header_only() -> Result<()> {
        let (_dir, state, app) = test_router().await?;

        let (response, body) = send(&app, get("/export")?).await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()?
            .starts_with("attachment"));
        assert_eq!(body, "ID,Admit Time,Symptoms,Diagnosis,Vitals,Hospital,Sync?,Notes\r\n");
        assert_eq!(std::fs::read_to_string(&state.export_path)?, body);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_lists_every_record() -> Result<()> {
        let (_dir, state, app) = test_router().await?;
        state.store.insert(&visit("1", "Fever", "Flu")).await?;
        state.store.insert(&visit("1", "Cough", "")).await?;

        let (_, body) = send(&app, get("/export")?).await?;

        assert_eq!(body.lines().count(), 3);
        assert!(body.contains("1,2024-03-01 09:30,Cough,,T 37.0,Central,N,"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_storage_shows_error_page() -> Result<()> {
        let (_dir, state, app) = test_router().await?;
        state.store.pool().close().await;

        let (response, body) = send(&app, get("/export")?).await?;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
        assert!(body.contains("database is unavailable"));
        assert!(!state.export_path.exists());
        Ok(())
    }
}
