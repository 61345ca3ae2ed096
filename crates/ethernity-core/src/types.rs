/*!
 * Ethernity Types
 * 
 * Tipos comuns usados em toda a workspace Ethernity
 */

use ethereum_types::{Address, H256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Severidade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Status de transação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success,
    Failure,
    /// Recibos anteriores ao Byzantium não carregam status
    Unknown,
}

impl TransactionStatus {
    /// Converte o campo `status` do recibo JSON-RPC (`0x1` sucesso, `0x0` falha).
    pub fn from_receipt_status(status: Option<u64>) -> Self {
        match status {
            Some(1) => TransactionStatus::Success,
            Some(_) => TransactionStatus::Failure,
            None => TransactionStatus::Unknown,
        }
    }
}

/// Recibo de transação, reduzido aos campos que a workspace consome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TransactionHash,
    pub status: TransactionStatus,
    /// Endereço do contrato implantado, presente apenas em transações de criação
    pub contract_address: Option<Address>,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}
