use axum::Json;
use serde_json::{json, Value};

use crate::built_info;

pub async fn check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": built_info::PKG_VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get, send, test_router};
    use anyhow::Result;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() -> Result<()> {
        let (_dir, _state, app) = test_router().await?;

        let (response, body) = send(&app, get("/health")?).await?;

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body)?;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
