use crate::payload::OpcodePayload;
use crate::signatures::{Resolution, SignatureMatch};
use crate::types::TransactionEvent;
use chrono::{DateTime, Utc};
use ethernity_core::types::{Severity, TransactionHash};
use ethereum_types::Address;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub const ALERT_NAME: &str = "Contract deconstruct";
const ALERT_PREFIX: &str = "CD";

/// Alerta emitido para cada contrato implantado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub metadata: AlertMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMetadata {
    pub transaction: TransactionHash,
    pub contract_address: Address,
    pub functions: Vec<SignatureMatch>,
    pub unknown_functions: Vec<String>,
    pub events: Vec<SignatureMatch>,
    pub unknown_events: Vec<String>,
    /// Bytecode implantado, em hex com prefixo
    pub bytecode: String,
    /// Ausente quando a compressão falha ou o limite de tamanho é excedido
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opcodes: Option<OpcodePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<serde_json::Value>,
}

/// Tudo o que a análise de um contrato produziu antes da montagem do alerta.
#[derive(Debug, Clone, Default)]
pub struct DeploymentAnalysis {
    pub functions: Resolution,
    pub events: Resolution,
    pub bytecode: Vec<u8>,
    pub opcodes: Option<OpcodePayload>,
    pub analysis: Option<serde_json::Value>,
}

/// Monta alertas; o contador garante identificadores distintos no mesmo milissegundo.
#[derive(Debug, Default)]
pub struct AlertBuilder {
    sequence: AtomicU64,
}

impl AlertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, tx: &TransactionEvent, contract: Address, analysis: &DeploymentAnalysis) -> Alert {
        let created_at = Utc::now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        // grafia EIP-55
        let address = ethers::utils::to_checksum(&contract, None);

        Alert {
            id: format!(
                "{}-{}-{}-{}",
                ALERT_PREFIX,
                &address[2..10],
                created_at.timestamp_millis(),
                seq
            ),
            name: ALERT_NAME.to_string(),
            description: format!("{} {}", ALERT_NAME, &address[..10]),
            severity: Severity::Info,
            created_at,
            metadata: AlertMetadata {
                transaction: tx.hash,
                contract_address: contract,
                functions: analysis.functions.matched.clone(),
                unknown_functions: analysis.functions.unresolved.clone(),
                events: analysis.events.matched.clone(),
                unknown_events: analysis.events.unresolved.clone(),
                bytecode: format!("0x{}", hex::encode(&analysis.bytecode)),
                opcodes: analysis.opcodes.clone(),
                analysis: analysis.analysis.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::H256;

    fn tx() -> TransactionEvent {
        TransactionEvent {
            hash: H256::repeat_byte(0x01),
            from: Address::repeat_byte(0x02),
            to: None,
            block_number: Some(1),
        }
    }

    #[test]
    fn builds_complete_informational_alert() {
        let contract = Address::from_low_u64_be(0xabcd);
        let analysis = DeploymentAnalysis {
            functions: Resolution {
                matched: vec![SignatureMatch { text: "transfer(address,uint256)".into(), hex: "a9059cbb".into() }],
                unresolved: vec!["deadbeef".into()],
            },
            bytecode: vec![0x60, 0x80],
            ..Default::default()
        };
        let alert = AlertBuilder::new().build(&tx(), contract, &analysis);

        assert_eq!(alert.severity, Severity::Info);
        assert_eq!(alert.name, ALERT_NAME);
        assert_eq!(alert.description, "Contract deconstruct 0x00000000");
        assert!(alert.id.starts_with("CD-00000000-"));
        assert_eq!(alert.metadata.transaction, H256::repeat_byte(0x01));
        assert_eq!(alert.metadata.contract_address, contract);
        assert_eq!(alert.metadata.unknown_functions, vec!["deadbeef"]);
        assert_eq!(alert.metadata.bytecode, "0x6080");
        assert!(alert.metadata.events.is_empty());
        assert!(alert.metadata.opcodes.is_none());
    }

    #[test]
    fn description_uses_checksummed_address() {
        let contract: Address = "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        let alert = AlertBuilder::new().build(&tx(), contract, &DeploymentAnalysis::default());
        assert_eq!(alert.description, "Contract deconstruct 0x5aAeb605");
        assert!(alert.id.starts_with("CD-5aAeb605-"));
    }

    #[test]
    fn ids_differ_within_same_millisecond() {
        let builder = AlertBuilder::new();
        let analysis = DeploymentAnalysis::default();
        let a = builder.build(&tx(), Address::repeat_byte(0xab), &analysis);
        let b = builder.build(&tx(), Address::repeat_byte(0xab), &analysis);
        assert_ne!(a.id, b.id);
        assert!(a.id.to_ascii_lowercase().starts_with("cd-abababab-"));
    }

    #[test]
    fn metadata_serialises_camel_case_without_empty_optionals() {
        let alert = AlertBuilder::new().build(&tx(), Address::repeat_byte(0xab), &DeploymentAnalysis::default());
        let json = serde_json::to_value(&alert).unwrap();
        let meta = &json["metadata"];
        assert!(meta.get("contractAddress").is_some());
        assert!(meta.get("unknownFunctions").is_some());
        assert!(meta.get("opcodes").is_none());
        assert!(meta.get("analysis").is_none());
        assert_eq!(json["severity"], "Info");
    }
}
