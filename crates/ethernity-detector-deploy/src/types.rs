use ethernity_core::types::TransactionHash;
use ethereum_types::Address;
use serde::{Deserialize, Serialize};

/// Transação entregue pelo host, uma por chamada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub hash: TransactionHash,
    pub from: Address,
    /// Destinatário declarado; `None` em transações de criação
    pub to: Option<Address>,
    pub block_number: Option<u64>,
}

impl From<&ethers::types::Transaction> for TransactionEvent {
    fn from(tx: &ethers::types::Transaction) -> Self {
        Self {
            hash: tx.hash,
            from: tx.from,
            to: tx.to,
            block_number: tx.block_number.map(|n| n.as_u64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::H256;

    #[test]
    fn converts_from_ethers_transaction() {
        let tx = ethers::types::Transaction {
            hash: H256::repeat_byte(0x01),
            from: Address::repeat_byte(0x02),
            to: None,
            block_number: Some(7u64.into()),
            ..Default::default()
        };
        let event = TransactionEvent::from(&tx);
        assert_eq!(event.hash, tx.hash);
        assert_eq!(event.from, tx.from);
        assert_eq!(event.to, None);
        assert_eq!(event.block_number, Some(7));
    }
}
