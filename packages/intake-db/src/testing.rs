//! Utilitários de teste: banco temporário e registros de exemplo

use anyhow::Result;
use tempfile::{tempdir, TempDir};

use crate::models::PatientVisit;
use crate::store::VisitStore;
use crate::{init_db_pool, DbConfig};

/// Cria um `VisitStore` sobre um arquivo SQLite em diretório temporário.
/// O `TempDir` precisa viver enquanto o store for usado.
pub async fn temp_store() -> Result<(TempDir, VisitStore)> {
    let dir = tempdir()?;
    let config = DbConfig {
        db_path: dir.path().join("intake.db").to_string_lossy().into_owned(),
        max_connections: 1,
    };
    let pool = init_db_pool(&config).await?;
    Ok((dir, VisitStore::new(pool)))
}

/// Registro de exemplo com horário fixo
pub fn visit(id: &str, symptoms: &str, diagnosis: &str) -> PatientVisit {
    PatientVisit {
        id: id.to_string(),
        admit_time: "2024-03-01 09:30".to_string(),
        symptoms: symptoms.to_string(),
        diagnosis: diagnosis.to_string(),
        vitals: "T 37.0".to_string(),
        hospital: "Central".to_string(),
        sync_flag: "N".to_string(),
        notes: String::new(),
    }
}
