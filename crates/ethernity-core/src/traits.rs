/*!
 * Ethernity Traits
 * 
 * Traits comuns usados em toda a workspace Ethernity
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{TransactionHash, TransactionReceipt};
use ethereum_types::Address;

/// Trait para provedores RPC
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// Obtém o recibo de uma transação; `None` se o node ainda não o conhece
    async fn get_transaction_receipt(&self, tx_hash: TransactionHash) -> Result<Option<TransactionReceipt>>;
    
    /// Obtém o código implantado de um contrato (vazio para contas externas)
    async fn get_code(&self, address: Address) -> Result<Vec<u8>>;

    /// Obtém o número do bloco atual
    async fn get_block_number(&self) -> Result<u64>;
}

/// Trait para notificadores de eventos
#[async_trait]
pub trait EventNotifier: Send + Sync {
    /// Envia uma notificação de evento
    async fn notify(&self, event_data: Vec<u8>) -> Result<()>;
    
    /// Verifica se o notificador está disponível
    async fn is_available(&self) -> bool;
}
