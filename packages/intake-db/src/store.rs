//! Registro de admissões sobre uma única tabela SQLite
//!
//! `VisitStore` é o handle injetado em cada componente que lê ou grava
//! admissões. Cada operação é uma única instrução com commit implícito.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbError;
use crate::models::{PatientVisit, SYNCED_FLAG};

/// Predicado usado nas contagens agregadas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitFilter {
    /// Todos os registros
    All,
    /// Sintomas contendo a substring, diferenciando maiúsculas de minúsculas
    SymptomsContain(String),
    /// Registros com `sync = 'Y'`
    Synced,
}

impl VisitFilter {
    /// Cláusula WHERE e o parâmetro associado, quando houver
    fn clause(&self) -> (&'static str, Option<&str>) {
        match self {
            VisitFilter::All => ("1 = 1", None),
            // instr() compara bytes; LIKE ignoraria a caixa em ASCII
            VisitFilter::SymptomsContain(needle) => ("instr(symptoms, ?) > 0", Some(needle.as_str())),
            VisitFilter::Synced => ("sync = ?", Some(SYNCED_FLAG)),
        }
    }
}

/// Handle de acesso ao registro de admissões
#[derive(Debug, Clone)]
pub struct VisitStore {
    pool: SqlitePool,
}

impl VisitStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Grava uma admissão
    pub async fn insert(&self, visit: &PatientVisit) -> Result<(), DbError> {
        sqlx::query("INSERT INTO patients VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
            .bind(&visit.id)
            .bind(&visit.admit_time)
            .bind(&visit.symptoms)
            .bind(&visit.diagnosis)
            .bind(&visit.vitals)
            .bind(&visit.hospital)
            .bind(&visit.sync_flag)
            .bind(&visit.notes)
            .execute(&self.pool)
            .await?;

        info!(patient_id = %visit.id, admit_time = %visit.admit_time, "Admissão registrada");
        Ok(())
    }

    /// Lista todas as admissões na ordem de inserção
    pub async fn list_all(&self) -> Result<Vec<PatientVisit>, DbError> {
        let visits = sqlx::query_as::<_, PatientVisit>(
            "SELECT id, admit_time, symptoms, diagnosis, vitals, hospital, sync, notes \
             FROM patients ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("{} admissões carregadas", visits.len());
        Ok(visits)
    }

    /// Conta os registros que satisfazem o filtro
    pub async fn count_where(&self, filter: &VisitFilter) -> Result<i64, DbError> {
        let (clause, param) = filter.clause();
        let sql = format!("SELECT COUNT(*) FROM patients WHERE {}", clause);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(param) = param {
            query = query.bind(param);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// Conta unidades distintas entre os registros que satisfazem o filtro
    pub async fn count_distinct_hospitals_where(&self, filter: &VisitFilter) -> Result<i64, DbError> {
        let (clause, param) = filter.clause();
        let sql = format!(
            "SELECT COUNT(DISTINCT hospital) FROM patients WHERE {}",
            clause
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(param) = param {
            query = query.bind(param);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// Contagem por diagnóstico, ignorando diagnósticos vazios
    pub async fn diagnosis_counts(&self) -> Result<Vec<(String, i64)>, DbError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT diagnosis, COUNT(*) FROM patients \
             WHERE diagnosis IS NOT NULL AND diagnosis <> '' \
             GROUP BY diagnosis ORDER BY diagnosis",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{temp_store, visit};
    use anyhow::Result;

    #[tokio::test]
    async fn test_list_preserves_insertion_order_and_duplicates() -> Result<()> {
        let (_dir, store) = temp_store().await?;

        store.insert(&visit("B", "Cough", "Cold")).await?;
        store.insert(&visit("A", "Fever", "Flu")).await?;
        store.insert(&visit("B", "None", "")).await?;

        let ids: Vec<String> = store.list_all().await?.into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["B", "A", "B"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_fields_round_trip_unmodified() -> Result<()> {
        let (_dir, store) = temp_store().await?;
        let mut original = visit("X-1", "  Fever, \"high\"\ncough ", "Flu");
        original.vitals = "HR 110; T 39,2".to_string();
        original.notes = "Ação: isolar".to_string();

        store.insert(&original).await?;

        assert_eq!(store.list_all().await?, vec![original]);
        Ok(())
    }

    #[tokio::test]
    async fn test_symptom_filter_is_case_sensitive() -> Result<()> {
        let (_dir, store) = temp_store().await?;
        store.insert(&visit("1", "Fever and cough", "Flu")).await?;
        store.insert(&visit("2", "fever", "Flu")).await?;
        store.insert(&visit("3", "High Fever", "")).await?;

        let fever = VisitFilter::SymptomsContain("Fever".to_string());
        assert_eq!(store.count_where(&fever).await?, 2);
        assert_eq!(store.count_where(&VisitFilter::All).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_distinct_synced_hospitals() -> Result<()> {
        let (_dir, store) = temp_store().await?;
        for (hospital, flag) in [("North", "Y"), ("North", "Y"), ("South", "Y"), ("East", "N"), ("West", "y")] {
            let mut v = visit("p", "None", "");
            v.hospital = hospital.to_string();
            v.sync_flag = flag.to_string();
            store.insert(&v).await?;
        }

        assert_eq!(store.count_distinct_hospitals_where(&VisitFilter::Synced).await?, 2);
        assert_eq!(store.count_distinct_hospitals_where(&VisitFilter::All).await?, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_diagnosis_counts_skip_empty() -> Result<()> {
        let (_dir, store) = temp_store().await?;
        store.insert(&visit("1", "Fever", "Flu")).await?;
        store.insert(&visit("2", "Cough", "Cold")).await?;
        store.insert(&visit("3", "Fever", "Flu")).await?;
        store.insert(&visit("4", "None", "")).await?;

        assert_eq!(
            store.diagnosis_counts().await?,
            vec![("Cold".to_string(), 1), ("Flu".to_string(), 2)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() -> Result<()> {
        let (_dir, store) = temp_store().await?;
        store.pool().close().await;

        let err = store
            .insert(&visit("1", "Fever", "Flu"))
            .await
            .expect_err("pool fechado deve falhar");
        assert!(err.is_unavailable());
        Ok(())
    }
}
