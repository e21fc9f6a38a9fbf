//! Sistema de migrações para banco de dados
//!
//! Este módulo gerencia as migrações do banco de dados SQLite. A versão
//! aplicada fica em `PRAGMA user_version`, então reexecutar é seguro.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Lista de migrações SQL a serem aplicadas
const MIGRATIONS: &[&str] = &[
    // 001_patients.sql
    // Sem chave primária nem índices: o id vem do operador e pode repetir
    r#"
    CREATE TABLE IF NOT EXISTS patients (
        id TEXT,
        admit_time TEXT,
        symptoms TEXT,
        diagnosis TEXT,
        vitals TEXT,
        hospital TEXT,
        sync TEXT,
        notes TEXT
    )
    "#,
];

/// Versão de schema que `run_migrations` deixa aplicada
pub fn latest_version() -> i64 {
    MIGRATIONS.len() as i64
}

/// Executa todas as migrações pendentes no banco de dados
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Aplicando migrações de banco de dados...");

    let mut version: i64 = 0;
    match sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
    {
        Ok(v) => version = v,
        Err(e) => {
            // Continuar mesmo assim, pois pode ser a primeira execução
            error!("Erro ao obter versão do banco: {}", e);
        }
    }

    info!("Versão atual do banco: {}", version);

    for (i, migration_sql) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as i64;

        if migration_version <= version {
            info!("Migração {} já aplicada", migration_version);
            continue;
        }

        info!("Aplicando migração {}...", migration_version);

        let mut transaction = pool.begin().await.with_context(|| {
            format!("Falha ao iniciar transação para migração {}", migration_version)
        })?;

        sqlx::query(migration_sql)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao executar migração {}", migration_version))?;

        sqlx::query(&format!("PRAGMA user_version = {}", migration_version))
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao atualizar versão para {}", migration_version))?;

        transaction.commit().await.with_context(|| {
            format!("Falha ao confirmar transação para migração {}", migration_version)
        })?;

        info!("Migração {} aplicada com sucesso", migration_version);
    }

    info!("Migrações concluídas. Versão atual: {}", latest_version());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use tempfile::tempdir;

    async fn open(path: &std::path::Path) -> Result<SqlitePool> {
        let conn_options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Ok(SqlitePool::connect_with(conn_options).await?)
    }

    #[tokio::test]
    async fn test_migrations() -> Result<()> {
        let temp_dir = tempdir()?;
        let pool = open(&temp_dir.path().join("test_migrations.db")).await?;

        run_migrations(&pool).await?;

        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;
        assert_eq!(version, latest_version());

        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('patients')")
            .fetch_all(&pool)
            .await?;
        assert_eq!(
            columns,
            vec!["id", "admit_time", "symptoms", "diagnosis", "vitals", "hospital", "sync", "notes"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() -> Result<()> {
        let temp_dir = tempdir()?;
        let pool = open(&temp_dir.path().join("twice.db")).await?;

        run_migrations(&pool).await?;
        run_migrations(&pool).await?;

        // Nenhum índice ou restrição além da tabela
        let indexes: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = 'patients'",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(indexes, 0);

        Ok(())
    }
}
