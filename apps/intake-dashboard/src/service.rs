//! Operações expostas à camada de apresentação
//!
//! Cada operação recebe o `VisitStore` injetado; não há estado global.

use chrono::NaiveDateTime;
use image::RgbImage;
use intake_db::{NewPatientVisit, PatientVisit, VisitStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use validator::Validate;

use crate::charts::{render_admissions_over_time, render_disease_pie, render_symptom_bar};
use crate::error::AppError;
use crate::export::write_export;
use crate::risk::{classify, RiskLabel};
use crate::stats::{summarize, DashboardStats};

/// Registro acompanhado do rótulo de risco calculado na leitura
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriagedVisit {
    #[serde(flatten)]
    pub visit: PatientVisit,
    pub risk: RiskLabel,
}

/// Formulário de admissão. Campos ausentes são rejeitados; vazios são aceitos como vieram.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IntakeForm {
    #[validate(required)]
    pub id: Option<String>,
    #[validate(required)]
    pub symptoms: Option<String>,
    #[validate(required)]
    pub diagnosis: Option<String>,
    #[validate(required)]
    pub vitals: Option<String>,
    #[validate(required)]
    pub hospital: Option<String>,
    #[validate(required)]
    pub sync: Option<String>,
    #[validate(required)]
    pub notes: Option<String>,
}

impl TryFrom<IntakeForm> for NewPatientVisit {
    type Error = AppError;

    fn try_from(form: IntakeForm) -> Result<Self, Self::Error> {
        if let Err(errors) = form.validate() {
            let mut missing: Vec<&str> = errors.field_errors().keys().copied().collect();
            missing.sort_unstable();
            return Err(AppError::InvalidInput(format!(
                "missing fields: {}",
                missing.join(", ")
            )));
        }

        Ok(NewPatientVisit {
            id: form.id.unwrap_or_default(),
            symptoms: form.symptoms.unwrap_or_default(),
            diagnosis: form.diagnosis.unwrap_or_default(),
            vitals: form.vitals.unwrap_or_default(),
            hospital: form.hospital.unwrap_or_default(),
            sync_flag: form.sync.unwrap_or_default(),
            notes: form.notes.unwrap_or_default(),
        })
    }
}

/// Painel completo: números e as três imagens ainda não codificadas
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub disease_pie: RgbImage,
    pub symptom_bar: RgbImage,
    pub admissions_line: RgbImage,
}

/// Todos os registros, na ordem de gravação, com o rótulo de risco
pub async fn list_patients(store: &VisitStore) -> Result<Vec<TriagedVisit>, AppError> {
    let visits = store.list_all().await?;
    Ok(visits
        .into_iter()
        .map(|visit| {
            let risk = classify(&visit.symptoms);
            TriagedVisit { visit, risk }
        })
        .collect())
}

/// Grava uma admissão carimbada com `admitted`
pub async fn add_patient(
    store: &VisitStore,
    form: IntakeForm,
    admitted: NaiveDateTime,
) -> Result<PatientVisit, AppError> {
    let visit = NewPatientVisit::try_from(form)?.admitted_at(admitted);
    store.insert(&visit).await?;
    Ok(visit)
}

pub async fn get_dashboard(store: &VisitStore) -> Result<Dashboard, AppError> {
    // Leituras separadas: uma gravação concorrente pode cair entre elas
    let stats = summarize(store).await?;
    let visits = store.list_all().await?;

    let admissions_line = render_admissions_over_time(&visits)?;
    let disease_pie = render_disease_pie(&stats.diagnosis_prevalence);
    let symptom_bar = render_symptom_bar(&stats.symptom_prevalence);

    info!(total = stats.total, alert = stats.alert, "Painel gerado");
    Ok(Dashboard {
        stats,
        disease_pie,
        symptom_bar,
        admissions_line,
    })
}

/// Gera o CSV com todos os registros, grava em `path` e devolve o conteúdo
pub async fn export_records(store: &VisitStore, path: &Path) -> Result<Vec<u8>, AppError> {
    let visits = store.list_all().await?;
    write_export(path, &visits).map_err(|e| AppError::Export(e.to_string()))
}
