//! Painel com estatísticas e gráficos

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageOutputFormat, RgbImage};
use std::io::Cursor;

use super::AppState;
use crate::error::{ApiError, AppError};
use crate::html::{self, EncodedCharts};
use crate::service;
use crate::stats::{summarize, DashboardStats};

pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let dashboard = service::get_dashboard(&state.store).await?;

    let charts = EncodedCharts {
        disease_pie: encode_png(&dashboard.disease_pie)?,
        symptom_bar: encode_png(&dashboard.symptom_bar)?,
        admissions_line: encode_png(&dashboard.admissions_line)?,
    };

    Ok(Html(html::dashboard_page(&dashboard.stats, &charts)))
}

/// Só os números, sem renderizar gráficos
pub async fn stats_json(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    let stats = summarize(&state.store).await.map_err(AppError::from)?;
    Ok(Json(stats))
}

/// PNG em base64, pronto para um `data:` URI
fn encode_png(image: &RgbImage) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(|e| AppError::Internal(format!("Falha ao codificar PNG: {}", e)))?;
    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get, send, test_router};
    use anyhow::Result;
    use axum::http::StatusCode;
    use intake_db::testing::visit;

    #[test]
    fn test_encode_png_signature() -> Result<()> {
        let encoded = encode_png(&RgbImage::new(4, 4))?;
        let bytes = STANDARD.decode(encoded)?;
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_page_embeds_three_charts() -> Result<()> {
        let (_dir, state, app) = test_router().await?;
        for i in 0..4 {
            state.store.insert(&visit(&i.to_string(), "Fever", "Flu")).await?;
        }

        let (response, body) = send(&app, get("/dashboard")?).await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body.matches("data:image/png;base64,").count(), 3);
        assert!(body.contains("Check: Fever Spike"));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupted_timestamp_shows_error_page() -> Result<()> {
        let (_dir, state, app) = test_router().await?;
        let mut corrupted = visit("1", "Fever", "Flu");
        corrupted.admit_time = "2024-13-45".to_string();
        state.store.insert(&corrupted).await?;

        let (response, body) = send(&app, get("/dashboard")?).await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("corrupted"));
        assert!(!body.contains("2024-13-45"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_storage_shows_error_page() -> Result<()> {
        let (_dir, state, app) = test_router().await?;
        state.store.pool().close().await;

        let (response, body) = send(&app, get("/dashboard")?).await?;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("database is unavailable"));
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_json() -> Result<()> {
        let (_dir, state, app) = test_router().await?;
        state.store.insert(&visit("1", "Cough", "Cold")).await?;

        let (response, body) = send(&app, get("/api/dashboard")?).await?;

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body)?;
        assert_eq!(json["total"], 1);
        assert_eq!(json["cough_count"], 1);
        assert_eq!(json["alert"], "No Alert");
        assert_eq!(json["diagnosis_prevalence"][0]["category"], "Cold");
        assert_eq!(json["diagnosis_prevalence"][0]["percentage"], 100.0);
        Ok(())
    }
}
