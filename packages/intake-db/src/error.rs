//! Definições de erro para a biblioteca intake-db
//!
//! Este módulo define os tipos de erro usados pelo `VisitStore`

use thiserror::Error;

/// Erros específicos para operações de banco de dados
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Armazenamento indisponível: {0}")]
    StorageUnavailable(String),

    #[error("Erro de consulta: {0}")]
    Query(String),

    #[error("Dados corrompidos: {0}")]
    DataCorruption(String),

    #[error("Erro interno: {0}")]
    Internal(String),
}

impl DbError {
    /// Indica se a falha vem do armazenamento em si (arquivo travado, disco cheio, pool fechado)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::StorageUnavailable(_))
    }
}

/// Códigos primários do SQLite que indicam armazenamento indisponível
/// (BUSY, LOCKED, IOERR, FULL, CANTOPEN, READONLY)
const UNAVAILABLE_CODES: &[&str] = &["5", "6", "8", "10", "13", "14"];

/// Conversão de erros específicos do SQLx para nossos tipos de erro
impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(dbe) => {
                if let Some(code) = dbe.code() {
                    // Códigos estendidos carregam o primário nos 8 bits inferiores
                    let primary = code
                        .parse::<i32>()
                        .map(|c| (c & 0xff).to_string())
                        .unwrap_or_else(|_| code.to_string());
                    if UNAVAILABLE_CODES.contains(&primary.as_str()) {
                        return DbError::StorageUnavailable(dbe.message().to_string());
                    }
                }
                DbError::Query(dbe.message().to_string())
            }
            sqlx::Error::ColumnNotFound(col) => {
                DbError::Query(format!("Coluna não encontrada: {}", col))
            }
            sqlx::Error::TypeNotFound { type_name } => {
                DbError::Query(format!("Tipo não encontrado: {}", type_name))
            }
            sqlx::Error::ColumnDecode { index, source } => DbError::DataCorruption(format!(
                "Erro ao decodificar coluna {}: {}",
                index, source
            )),
            sqlx::Error::Decode(source) => DbError::DataCorruption(source.to_string()),
            sqlx::Error::Io(io_err) => DbError::StorageUnavailable(io_err.to_string()),
            sqlx::Error::Configuration(conf_err) => {
                DbError::StorageUnavailable(conf_err.to_string())
            }
            sqlx::Error::PoolClosed => {
                DbError::StorageUnavailable("Pool de conexões fechado".to_string())
            }
            sqlx::Error::PoolTimedOut => {
                DbError::StorageUnavailable("Timeout no pool de conexões".to_string())
            }
            sqlx::Error::WorkerCrashed => {
                DbError::Internal("Worker do banco de dados falhou".to_string())
            }
            _ => DbError::Internal(format!("Erro inesperado: {:?}", error)),
        }
    }
}
