use crate::opcodes::Instruction;
use async_trait::async_trait;
use ethernity_core::{utils::keccak256, Error, Result};
use ethereum_types::Address;
use serde::{Deserialize, Serialize};

/// Análise adicional e opcional anexada ao alerta.
#[async_trait]
pub trait ExtendedAnalyzer: Send + Sync {
    /// Nome usado nos logs
    fn name(&self) -> &'static str;

    async fn analyze(
        &self,
        address: Address,
        bytecode: &[u8],
        instructions: &[Instruction],
    ) -> Result<serde_json::Value>;
}

/// Métricas estruturais do código implantado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetrics {
    pub byte_length: usize,
    pub instruction_count: usize,
    pub push_count: usize,
    /// Keccak-256 do bytecode, em hex com prefixo
    pub code_hash: String,
}

impl CodeMetrics {
    pub fn compute(bytecode: &[u8], instructions: &[Instruction]) -> Self {
        Self {
            byte_length: bytecode.len(),
            instruction_count: instructions.len(),
            push_count: instructions.iter().filter(|i| i.immediate.is_some()).count(),
            code_hash: format!("0x{}", hex::encode(keccak256(bytecode))),
        }
    }
}

/// Analisador padrão: apenas métricas, sem interpretar o comportamento do contrato.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeMetricsAnalyzer;

#[async_trait]
impl ExtendedAnalyzer for CodeMetricsAnalyzer {
    fn name(&self) -> &'static str {
        "code-metrics"
    }

    async fn analyze(
        &self,
        _address: Address,
        bytecode: &[u8],
        instructions: &[Instruction],
    ) -> Result<serde_json::Value> {
        serde_json::to_value(CodeMetrics::compute(bytecode, instructions))
            .map_err(|e| Error::EncodeError(format!("falha ao serializar métricas: {}", e)))
    }
}
