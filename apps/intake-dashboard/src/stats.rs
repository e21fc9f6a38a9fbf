//! Estatísticas agregadas do painel

use intake_db::{DbError, VisitFilter, VisitStore};
use serde::Serialize;

/// Alerta exibido quando os casos de febre passam do limite
pub const FEVER_SPIKE_ALERT: &str = "Check: Fever Spike";
pub const NO_ALERT: &str = "No Alert";

/// Acima deste número de casos de febre o alerta é disparado
const FEVER_SPIKE_THRESHOLD: i64 = 3;

/// Categoria com contagem e porcentagem sobre o total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrevalenceRow {
    pub category: String,
    pub count: i64,
    pub percentage: f64,
}

impl PrevalenceRow {
    pub fn new(category: impl Into<String>, count: i64, total: i64) -> Self {
        Self {
            category: category.into(),
            count,
            percentage: percentage(count, total),
        }
    }
}

/// Números do painel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: i64,
    pub fever_count: i64,
    pub cough_count: i64,
    pub synced_hospital_count: i64,
    pub alert: &'static str,
    pub diagnosis_prevalence: Vec<PrevalenceRow>,
    pub symptom_prevalence: Vec<PrevalenceRow>,
}

/// `count / total * 100` arredondado em duas casas; zero quando não há registros.
///
/// O arredondamento é feito sobre o valor binário exato, com empate para o par
/// (1/32 = 3.125 vira 3.12).
pub fn percentage(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let value = count as f64 / total as f64 * 100.0;
    format!("{:.2}", value).parse().unwrap_or(value)
}

pub fn alert_for(fever_count: i64) -> &'static str {
    if fever_count > FEVER_SPIKE_THRESHOLD {
        FEVER_SPIKE_ALERT
    } else {
        NO_ALERT
    }
}

/// Calcula as estatísticas do painel lendo o registro completo.
///
/// As contagens de febre e tosse usam substring com caixa exata ("Fever",
/// "Cough"), ao contrário da triagem, que ignora a caixa.
pub async fn summarize(store: &VisitStore) -> Result<DashboardStats, DbError> {
    let total = store.count_where(&VisitFilter::All).await?;
    let fever_count = store
        .count_where(&VisitFilter::SymptomsContain("Fever".to_string()))
        .await?;
    let cough_count = store
        .count_where(&VisitFilter::SymptomsContain("Cough".to_string()))
        .await?;
    let synced_hospital_count = store
        .count_distinct_hospitals_where(&VisitFilter::Synced)
        .await?;

    let diagnosis_prevalence = store
        .diagnosis_counts()
        .await?
        .into_iter()
        .map(|(diagnosis, count)| PrevalenceRow::new(diagnosis, count, total))
        .collect();

    let symptom_prevalence = vec![
        PrevalenceRow::new("Fever", fever_count, total),
        PrevalenceRow::new("Cough", cough_count, total),
    ];

    Ok(DashboardStats {
        total,
        fever_count,
        cough_count,
        synced_hospital_count,
        alert: alert_for(fever_count),
        diagnosis_prevalence,
        symptom_prevalence,
    })
}
