use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEDUP_ENV: &str = "DEPLOY_DETECTOR_DEDUP";
pub const COMPRESS_ENV: &str = "DEPLOY_DETECTOR_COMPRESS";
pub const EXTENDED_ANALYSIS_ENV: &str = "DEPLOY_DETECTOR_EXTENDED_ANALYSIS";
pub const MAX_PAYLOAD_ENV: &str = "DEPLOY_DETECTOR_MAX_PAYLOAD_BYTES";
pub const FUNCTIONS_PATH_ENV: &str = "DEPLOY_DETECTOR_FUNCTIONS_PATH";
pub const EVENTS_PATH_ENV: &str = "DEPLOY_DETECTOR_EVENTS_PATH";

/// Configuração do detector de implantação de contratos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Descarta entregas repetidas do mesmo hash de transação
    pub dedup: bool,
    /// Comprime o payload de opcodes (gzip + base64); sem compressão anexa o JSON
    pub compress_payload: bool,
    /// Executa a análise estendida e anexa o resultado ao alerta
    pub extended_analysis: bool,
    /// Tamanho máximo, em bytes, do texto do payload de opcodes
    pub max_payload_bytes: usize,
    /// Substitui o dicionário de funções embutido
    pub functions_path: Option<PathBuf>,
    /// Substitui o dicionário de eventos embutido
    pub events_path: Option<PathBuf>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            dedup: true,
            compress_payload: true,
            extended_analysis: false,
            max_payload_bytes: 512 * 1024, // 512 KiB
            functions_path: None,
            events_path: None,
        }
    }
}

impl DetectorConfig {
    /// Lê a configuração do ambiente; valores ausentes ou inválidos mantêm o padrão
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dedup: env_flag(DEDUP_ENV).unwrap_or(defaults.dedup),
            compress_payload: env_flag(COMPRESS_ENV).unwrap_or(defaults.compress_payload),
            extended_analysis: env_flag(EXTENDED_ANALYSIS_ENV).unwrap_or(defaults.extended_analysis),
            max_payload_bytes: std::env::var(MAX_PAYLOAD_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_payload_bytes),
            functions_path: env_path(FUNCTIONS_PATH_ENV),
            events_path: env_path(EVENTS_PATH_ENV),
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    parse_flag(&std::env::var(key).ok()?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
