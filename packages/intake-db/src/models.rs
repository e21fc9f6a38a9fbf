//! Modelos de dados do registro de admissões
//!
//! Todos os campos são texto livre, exatamente como recebidos na admissão.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Formato do horário de admissão gravado pelo servidor
pub const ADMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Valor de `sync_flag` que marca o registro como sincronizado com a central
pub const SYNCED_FLAG: &str = "Y";

/// Um evento de admissão, imutável depois de gravado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientVisit {
    /// Identificador informado pelo operador (pode repetir)
    pub id: String,
    /// Horário de admissão, `YYYY-MM-DD HH:MM`
    pub admit_time: String,
    pub symptoms: String,
    /// Chave de agrupamento para prevalência
    pub diagnosis: String,
    pub vitals: String,
    /// Unidade de origem
    pub hospital: String,
    /// `"Y"` quando sincronizado com o sistema central
    pub sync_flag: String,
    pub notes: String,
}

impl PatientVisit {
    /// Indica se o registro já foi propagado para o sistema central
    pub fn is_synced(&self) -> bool {
        self.sync_flag == SYNCED_FLAG
    }
}

impl FromRow<'_, SqliteRow> for PatientVisit {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        // Colunas sem NOT NULL: um NULL vira string vazia
        let text = |column: &str| -> sqlx::Result<String> {
            Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
        };

        Ok(Self {
            id: text("id")?,
            admit_time: text("admit_time")?,
            symptoms: text("symptoms")?,
            diagnosis: text("diagnosis")?,
            vitals: text("vitals")?,
            hospital: text("hospital")?,
            sync_flag: text("sync")?,
            notes: text("notes")?,
        })
    }
}

/// Dados de uma nova admissão, antes do carimbo de horário
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatientVisit {
    pub id: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub vitals: String,
    pub hospital: String,
    pub sync_flag: String,
    pub notes: String,
}

impl NewPatientVisit {
    /// Carimba o horário de admissão e produz o registro definitivo
    pub fn admitted_at(self, admitted: NaiveDateTime) -> PatientVisit {
        PatientVisit {
            id: self.id,
            admit_time: admitted.format(ADMIT_TIME_FORMAT).to_string(),
            symptoms: self.symptoms,
            diagnosis: self.diagnosis,
            vitals: self.vitals,
            hospital: self.hospital,
            sync_flag: self.sync_flag,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn intake() -> NewPatientVisit {
        NewPatientVisit {
            id: "A-17".to_string(),
            symptoms: "Fever, cough".to_string(),
            diagnosis: "Flu".to_string(),
            vitals: "BP 120/80".to_string(),
            hospital: "North".to_string(),
            sync_flag: "N".to_string(),
            notes: "sem alergias".to_string(),
        }
    }

    #[test]
    fn test_admitted_at_formats_minutes() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 59))
            .expect("data válida");

        let visit = intake().admitted_at(at);

        assert_eq!(visit.admit_time, "2024-01-09 07:05");
        assert_eq!(visit.id, "A-17");
        assert_eq!(visit.notes, "sem alergias");
    }

    #[test]
    fn test_only_uppercase_y_is_synced() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 9)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("data válida");
        let mut visit = intake().admitted_at(at);
        assert!(!visit.is_synced());

        visit.sync_flag = "y".to_string();
        assert!(!visit.is_synced());

        visit.sync_flag = "Y".to_string();
        assert!(visit.is_synced());
    }
}
