/*!
 * Ethernity Detector Deploy
 *
 * Detector de contratos recém-implantados. Para cada transação de criação
 * bem-sucedida, decodifica o bytecode implantado, extrai os imediatos de
 * PUSH4 (seletores de função) e PUSH32 (tópicos de evento), resolve-os em
 * dicionários estáticos de assinaturas e emite um alerta informativo com
 * uma cópia comprimida do fluxo de opcodes.
 */

pub mod alert;
pub mod analysis;
pub mod classifier;
pub mod config;
pub mod dedup;
pub mod detector;
pub mod notifier;
pub mod opcodes;
pub mod payload;
pub mod selectors;
pub mod signatures;
pub mod types;

// Re-exportações públicas
pub use alert::{Alert, AlertBuilder, AlertMetadata, DeploymentAnalysis};
pub use analysis::{CodeMetrics, CodeMetricsAnalyzer, ExtendedAnalyzer};
pub use config::DetectorConfig;
pub use dedup::TransactionDedupCache;
pub use detector::{ContractDeployDetector, SkipReason};
pub use notifier::LogNotifier;
pub use opcodes::{BytecodeDecoder, EvmDecoder, Instruction};
pub use payload::{OpcodePayload, PayloadEncoding};
pub use selectors::SelectorCandidates;
pub use signatures::{Resolution, SignatureDictionaries, SignatureDictionary, SignatureMatch};
pub use types::TransactionEvent;
