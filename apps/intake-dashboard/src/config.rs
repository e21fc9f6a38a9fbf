//! Configuração do serviço
//!
//! Local do banco, porta e arquivo de exportação são constantes de implantação,
//! sem leitura de variáveis de ambiente.

use intake_db::DbConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::export::EXPORT_FILE_NAME;

/// Porta HTTP do serviço
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    /// Endereço em que o servidor HTTP escuta
    pub bind_addr: SocketAddr,
    /// Onde o CSV exportado é gravado antes do download
    pub export_path: PathBuf,
    /// Requisições simultâneas aceitas por rota
    pub max_in_flight: usize,
    /// Logs em JSON em vez de texto
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db: DbConfig::default(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            export_path: PathBuf::from(EXPORT_FILE_NAME),
            max_in_flight: 16,
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_deployment_constants() {
        let config = AppConfig::default();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.db.db_path, "data/intake_patients.db");
        assert_eq!(config.export_path, PathBuf::from("intake_research_data.csv"));
        assert!(config.max_in_flight > 0);
        assert!(!config.log_json);
    }
}
