/*!
 * Ethernity RPC
 *
 * Cliente RPC para interação com nodes Ethereum
 */

use async_trait::async_trait;
use ethernity_core::{Error, error::Result, types::*};
use ethereum_types::{Address, H256};
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use web3::{
    Web3,
    transports::{Http, WebSocket},
    types::{H160, H256 as Web3H256},
};

/// Variável de ambiente com o endpoint do node
pub const ENDPOINT_ENV: &str = "ETHERNITY_RPC_ENDPOINT";
/// Variável de ambiente com o timeout por chamada, em segundos
pub const TIMEOUT_ENV: &str = "ETHERNITY_RPC_TIMEOUT_SECS";

/// Configuração do cliente RPC
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub endpoint: String,
    /// Limite de latência por chamada, aplicado na camada de transporte
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RpcConfig {
    /// Lê a configuração do ambiente, mantendo o padrão para valores ausentes ou inválidos
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                config.endpoint = endpoint.to_string();
            }
        }

        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }
}

/// Enum para diferentes tipos de transporte
pub enum TransportType {
    Http(Web3<Http>),
    WebSocket(Web3<WebSocket>),
}

/// Cliente RPC para Ethereum
pub struct EthernityRpcClient {
    transport: TransportType,
    config: RpcConfig,
}

impl EthernityRpcClient {
    /// Cria um novo cliente RPC HTTP
    pub async fn new_http(config: RpcConfig) -> Result<Self> {
        let transport = Http::new(&config.endpoint)
            .map_err(|e| Error::RpcError(format!("Falha ao conectar via HTTP: {}", e)))?;

        let client = Self {
            transport: TransportType::Http(Web3::new(transport)),
            config,
        };

        // Verifica a conexão
        client.get_block_number().await?;
        Ok(client)
    }

    /// Cria um novo cliente RPC WebSocket
    pub async fn new_websocket(config: RpcConfig) -> Result<Self> {
        let transport = with_timeout(config.timeout, "conexão WebSocket", WebSocket::new(&config.endpoint))
            .await?;

        let client = Self {
            transport: TransportType::WebSocket(Web3::new(transport)),
            config,
        };

        // Verifica a conexão
        client.get_block_number().await?;
        Ok(client)
    }

    /// Cria um novo cliente baseado na URL
    pub async fn new(config: RpcConfig) -> Result<Self> {
        if config.endpoint.starts_with("ws") {
            Self::new_websocket(config).await
        } else {
            Self::new_http(config).await
        }
    }

    /// Cria um cliente a partir das variáveis de ambiente
    pub async fn from_env() -> Result<Self> {
        Self::new(RpcConfig::from_env()).await
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Obtém o recibo de uma transação
    pub async fn get_transaction_receipt(&self, tx_hash: TransactionHash) -> Result<Option<TransactionReceipt>> {
        // Converte para o formato do web3
        let web3_hash = Web3H256::from_slice(tx_hash.as_bytes());
        let what = "recibo da transação";

        let receipt = match &self.transport {
            TransportType::Http(web3) => {
                with_timeout(self.config.timeout, what, web3.eth().transaction_receipt(web3_hash)).await?
            },
            TransportType::WebSocket(web3) => {
                with_timeout(self.config.timeout, what, web3.eth().transaction_receipt(web3_hash)).await?
            }
        };

        let Some(receipt) = receipt else {
            debug!(tx = ?tx_hash, "recibo ainda não disponível");
            return Ok(None);
        };

        Ok(Some(TransactionReceipt {
            transaction_hash: H256::from_slice(receipt.transaction_hash.as_bytes()),
            status: TransactionStatus::from_receipt_status(receipt.status.map(|s| s.as_u64())),
            contract_address: receipt
                .contract_address
                .map(|addr| Address::from_slice(addr.as_bytes())),
        }))
    }

    /// Obtém o número do bloco atual
    pub async fn get_block_number(&self) -> Result<u64> {
        let what = "número do bloco";
        let block_number = match &self.transport {
            TransportType::Http(web3) => {
                with_timeout(self.config.timeout, what, web3.eth().block_number()).await?
            },
            TransportType::WebSocket(web3) => {
                with_timeout(self.config.timeout, what, web3.eth().block_number()).await?
            }
        };

        Ok(block_number.as_u64())
    }

    /// Obtém o código de um contrato
    pub async fn get_code(&self, address: Address) -> Result<Vec<u8>> {
        let what = "código do contrato";
        let result = match &self.transport {
            TransportType::Http(web3) => {
                with_timeout(self.config.timeout, what, web3.eth().code(H160::from_slice(address.as_bytes()), None)).await?
            },
            TransportType::WebSocket(web3) => {
                with_timeout(self.config.timeout, what, web3.eth().code(H160::from_slice(address.as_bytes()), None)).await?
            }
        };

        Ok(result.0)
    }
}

/// Executa uma chamada web3 respeitando o timeout configurado
async fn with_timeout<T, F>(timeout: Duration, what: &str, call: F) -> Result<T>
where
    F: Future<Output = web3::Result<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Error::RpcError(format!("Falha ao obter {}: {}", what, e))),
        Err(_) => Err(Error::TimeoutError(format!("{} excedeu {:?}", what, timeout))),
    }
}

/// Implementação da trait RpcProvider do ethernity-core
#[async_trait]
impl ethernity_core::traits::RpcProvider for EthernityRpcClient {
    async fn get_transaction_receipt(&self, tx_hash: TransactionHash) -> Result<Option<TransactionReceipt>> {
        self.get_transaction_receipt(tx_hash).await
    }

    async fn get_code(&self, address: Address) -> Result<Vec<u8>> {
        self.get_code(address).await
    }

    async fn get_block_number(&self) -> Result<u64> {
        self.get_block_number().await
    }
}
