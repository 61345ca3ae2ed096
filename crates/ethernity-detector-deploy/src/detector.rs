use crate::alert::{Alert, AlertBuilder, DeploymentAnalysis};
use crate::analysis::{CodeMetricsAnalyzer, ExtendedAnalyzer};
use crate::classifier::{classify, is_creation_candidate};
use crate::config::DetectorConfig;
use crate::dedup::TransactionDedupCache;
use crate::opcodes::{BytecodeDecoder, EvmDecoder, Instruction};
use crate::payload::{encode_opcodes, OpcodePayload};
use crate::selectors::{extract, SelectorCandidates};
use crate::signatures::{resolve, Resolution, SignatureDictionaries};
use crate::types::TransactionEvent;
use ethernity_core::traits::{EventNotifier, RpcProvider};
use ethernity_core::types::TransactionHash;
use ethernity_core::{Error, Result};
use ethereum_types::Address;
use std::sync::Arc;
use tracing::{debug, info, warn, Level};

/// Motivo pelo qual uma transação não gerou alerta.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("transação já processada")]
    AlreadyProcessed,
    #[error("não é criação de contrato")]
    NotCreation,
    #[error("recibo ainda não disponível")]
    ReceiptMissing,
    #[error("falha ao obter recibo: {0}")]
    ReceiptUnavailable(#[source] Error),
    #[error("falha ao obter código de {0:?}: {1}")]
    CodeUnavailable(Address, #[source] Error),
    #[error("bytecode vazio em {0:?}")]
    EmptyBytecode(Address),
    #[error("falha ao decodificar bytecode: {0}")]
    Decode(#[source] Error),
    #[error("falha na resolução de assinaturas: {0}")]
    Resolution(String),
}

impl SkipReason {
    /// Nível de log: rotina em debug, falha remota passageira em info, o resto em warn.
    pub fn level(&self) -> Level {
        match self {
            SkipReason::AlreadyProcessed
            | SkipReason::NotCreation
            | SkipReason::ReceiptMissing
            | SkipReason::EmptyBytecode(_) => Level::DEBUG,
            SkipReason::ReceiptUnavailable(e) | SkipReason::CodeUnavailable(_, e) if e.is_transient() => Level::INFO,
            _ => Level::WARN,
        }
    }

    fn log(&self, tx_hash: TransactionHash) {
        let level = self.level();
        if level == Level::DEBUG {
            debug!(tx = ?tx_hash, reason = %self, "transação ignorada");
        } else if level == Level::INFO {
            info!(tx = ?tx_hash, reason = %self, "falha remota, análise abortada");
        } else {
            warn!(tx = ?tx_hash, reason = %self, "análise abortada");
        }
    }
}

/// Detector de implantação de contratos.
///
/// Para cada transação de criação bem-sucedida obtém o código implantado, extrai
/// seletores e tópicos, resolve-os nos dicionários e monta um único alerta. Qualquer
/// falha depois da classificação descarta apenas a transação corrente.
pub struct ContractDeployDetector {
    provider: Arc<dyn RpcProvider>,
    config: DetectorConfig,
    dictionaries: SignatureDictionaries,
    decoder: Arc<dyn BytecodeDecoder>,
    dedup: Option<TransactionDedupCache>,
    extended: Option<Arc<dyn ExtendedAnalyzer>>,
    builder: AlertBuilder,
}

impl ContractDeployDetector {
    /// Cria o detector carregando os dicionários indicados pela configuração.
    pub fn new(provider: Arc<dyn RpcProvider>, config: DetectorConfig) -> Result<Self> {
        let dictionaries = SignatureDictionaries::load(
            config.functions_path.as_deref(),
            config.events_path.as_deref(),
        )?;
        Ok(Self::with_dictionaries(provider, config, dictionaries))
    }

    pub fn with_dictionaries(
        provider: Arc<dyn RpcProvider>,
        config: DetectorConfig,
        dictionaries: SignatureDictionaries,
    ) -> Self {
        let dedup = config.dedup.then(TransactionDedupCache::new);
        let extended: Option<Arc<dyn ExtendedAnalyzer>> = if config.extended_analysis {
            Some(Arc::new(CodeMetricsAnalyzer))
        } else {
            None
        };

        Self {
            provider,
            config,
            dictionaries,
            decoder: Arc::new(EvmDecoder::default()),
            dedup,
            extended,
            builder: AlertBuilder::new(),
        }
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn BytecodeDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Substitui o analisador estendido; só é executado com `extended_analysis` ligado.
    pub fn with_extended_analyzer(mut self, analyzer: Arc<dyn ExtendedAnalyzer>) -> Self {
        if self.config.extended_analysis {
            self.extended = Some(analyzer);
        }
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn dedup_cache(&self) -> Option<&TransactionDedupCache> {
        self.dedup.as_ref()
    }

    /// Processa uma transação e devolve no máximo um alerta. Nunca propaga erros.
    pub async fn handle_transaction(&self, tx: &TransactionEvent) -> Option<Alert> {
        match self.analyze(tx).await {
            Ok(alert) => {
                info!(
                    tx = ?tx.hash,
                    contract = ?alert.metadata.contract_address,
                    functions = alert.metadata.functions.len(),
                    events = alert.metadata.events.len(),
                    "contrato implantado analisado"
                );
                Some(alert)
            }
            Err(reason) => {
                reason.log(tx.hash);
                None
            }
        }
    }

    /// Processa a transação e entrega o alerta serializado ao notificador.
    pub async fn process(&self, tx: &TransactionEvent, notifier: &dyn EventNotifier) -> Option<Alert> {
        let alert = self.handle_transaction(tx).await?;
        match serde_json::to_vec(&alert) {
            Ok(bytes) => {
                if let Err(e) = notifier.notify(bytes).await {
                    warn!(alert = %alert.id, error = %e, "falha ao notificar alerta");
                }
            }
            Err(e) => warn!(alert = %alert.id, error = %e, "falha ao serializar alerta"),
        }
        Some(alert)
    }

    /// Executa o pipeline completo, expondo o motivo quando não há alerta.
    pub async fn analyze(&self, tx: &TransactionEvent) -> std::result::Result<Alert, SkipReason> {
        if let Some(cache) = &self.dedup {
            if !cache.check_and_mark(tx.hash) {
                return Err(SkipReason::AlreadyProcessed);
            }
        }

        if !is_creation_candidate(tx) {
            return Err(SkipReason::NotCreation);
        }

        let receipt = self
            .provider
            .get_transaction_receipt(tx.hash)
            .await
            .map_err(SkipReason::ReceiptUnavailable)?
            .ok_or(SkipReason::ReceiptMissing)?;
        let contract = classify(tx, Some(&receipt)).ok_or(SkipReason::NotCreation)?;

        let bytecode = self
            .provider
            .get_code(contract)
            .await
            .map_err(|e| SkipReason::CodeUnavailable(contract, e))?;
        if bytecode.is_empty() {
            return Err(SkipReason::EmptyBytecode(contract));
        }

        let instructions = self.decoder.decode(&bytecode).map_err(SkipReason::Decode)?;
        let (functions, events) = self.resolve_candidates(extract(&instructions)).await?;
        let opcodes = self.encode_payload(tx.hash, &instructions);
        let analysis = self.extended_analysis(contract, &bytecode, &instructions).await;

        let deployment = DeploymentAnalysis {
            functions,
            events,
            bytecode,
            opcodes,
            analysis,
        };
        Ok(self.builder.build(tx, contract, &deployment))
    }

    /// Funções e eventos são resolvidos em tarefas independentes, unidas antes do alerta.
    async fn resolve_candidates(
        &self,
        candidates: SelectorCandidates,
    ) -> std::result::Result<(Resolution, Resolution), SkipReason> {
        let SelectorCandidates { functions, events } = candidates;
        let function_dict = Arc::clone(&self.dictionaries.functions);
        let event_dict = Arc::clone(&self.dictionaries.events);

        let (functions, events) = tokio::join!(
            tokio::task::spawn_blocking(move || resolve(&functions, &function_dict)),
            tokio::task::spawn_blocking(move || resolve(&events, &event_dict)),
        );

        let functions = functions.map_err(|e| SkipReason::Resolution(e.to_string()))?;
        let events = events.map_err(|e| SkipReason::Resolution(e.to_string()))?;
        Ok((functions, events))
    }

    fn encode_payload(&self, tx_hash: TransactionHash, instructions: &[Instruction]) -> Option<OpcodePayload> {
        match encode_opcodes(instructions, self.config.compress_payload, self.config.max_payload_bytes) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(tx = ?tx_hash, error = %e, "payload de opcodes omitido");
                None
            }
        }
    }

    async fn extended_analysis(
        &self,
        contract: Address,
        bytecode: &[u8],
        instructions: &[Instruction],
    ) -> Option<serde_json::Value> {
        let analyzer = self.extended.as_ref()?;
        match analyzer.analyze(contract, bytecode, instructions).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(analyzer = analyzer.name(), contract = ?contract, error = %e, "análise estendida falhou");
                None
            }
        }
    }
}
