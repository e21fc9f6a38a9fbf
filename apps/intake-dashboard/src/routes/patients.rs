//! Lista de pacientes e formulário de admissão

use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use chrono::Local;
use serde::Deserialize;
use tracing::warn;

use super::AppState;
use crate::error::{ApiError, AppError};
use crate::html;
use crate::service::{self, IntakeForm, TriagedVisit};

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Código de erro deixado pelo redirecionamento de `/add`
    pub error: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let patients = service::list_patients(&state.store).await?;
    Ok(Html(html::patients_page(&patients, query.error.as_deref())))
}

pub async fn list_json(State(state): State<AppState>) -> Result<Json<Vec<TriagedVisit>>, ApiError> {
    Ok(Json(service::list_patients(&state.store).await?))
}

/// Sempre redireciona para a lista; em caso de falha leva o código do erro,
/// inclusive quando o corpo do formulário nem chega a ser decodificado
pub async fn add(
    State(state): State<AppState>,
    form: Result<Form<IntakeForm>, FormRejection>,
) -> Redirect {
    let admitted = Local::now().naive_local();
    let result = match form {
        Ok(Form(form)) => service::add_patient(&state.store, form, admitted).await,
        Err(rejection) => Err(AppError::InvalidInput(rejection.body_text())),
    };

    match result {
        Ok(_) => Redirect::to("/"),
        Err(err) => {
            warn!(code = err.code(), error = %err, "Admissão não registrada");
            Redirect::to(&format!("/?error={}", err.code()))
        }
    }
}
