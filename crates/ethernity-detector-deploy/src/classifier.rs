use crate::types::TransactionEvent;
use ethernity_core::{types::TransactionReceipt, utils::is_null_recipient};
use ethereum_types::Address;

/// Pré-filtro barato, sem I/O: apenas transações sem destinatário (ou com o endereço
/// zero) podem implantar um contrato.
pub fn is_creation_candidate(tx: &TransactionEvent) -> bool {
    is_null_recipient(tx.to.as_ref())
}

/// Decide se a transação implantou um contrato e devolve o endereço implantado.
///
/// Exige destinatário nulo, recibo com sucesso e endereço de contrato não vazio.
/// Recibo ausente equivale a "não é criação".
pub fn classify(tx: &TransactionEvent, receipt: Option<&TransactionReceipt>) -> Option<Address> {
    if !is_creation_candidate(tx) {
        return None;
    }
    let receipt = receipt?;
    if !receipt.is_success() {
        return None;
    }
    receipt.contract_address.filter(|addr| !addr.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethernity_core::types::TransactionStatus;
    use ethereum_types::H256;

    fn tx(to: Option<Address>) -> TransactionEvent {
        TransactionEvent {
            hash: H256::repeat_byte(0x01),
            from: Address::repeat_byte(0x02),
            to,
            block_number: None,
        }
    }

    fn receipt(status: TransactionStatus, contract: Option<Address>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: H256::repeat_byte(0x01),
            status,
            contract_address: contract,
        }
    }

    #[test]
    fn creation_with_null_or_zero_recipient() {
        let contract = Address::repeat_byte(0xab);
        let ok = receipt(TransactionStatus::Success, Some(contract));
        assert_eq!(classify(&tx(None), Some(&ok)), Some(contract));
        assert_eq!(classify(&tx(Some(Address::zero())), Some(&ok)), Some(contract));
    }

    #[test]
    fn zero_recipient_from_node_passes_prefilter() {
        let node_tx = ethers::types::Transaction {
            to: Some(Address::zero()),
            ..Default::default()
        };
        assert!(is_creation_candidate(&TransactionEvent::from(&node_tx)));
        assert!(is_creation_candidate(&tx(None)));
    }

    #[test]
    fn regular_call_is_not_creation() {
        let ok = receipt(TransactionStatus::Success, Some(Address::repeat_byte(0xab)));
        assert_eq!(classify(&tx(Some(Address::repeat_byte(0x11))), Some(&ok)), None);
        assert!(!is_creation_candidate(&tx(Some(Address::repeat_byte(0x11)))));
    }

    #[test]
    fn failed_missing_or_empty_receipt_is_not_creation() {
        let contract = Some(Address::repeat_byte(0xab));
        assert_eq!(classify(&tx(None), None), None);
        assert_eq!(classify(&tx(None), Some(&receipt(TransactionStatus::Failure, contract))), None);
        assert_eq!(classify(&tx(None), Some(&receipt(TransactionStatus::Unknown, contract))), None);
        assert_eq!(classify(&tx(None), Some(&receipt(TransactionStatus::Success, None))), None);
        assert_eq!(
            classify(&tx(None), Some(&receipt(TransactionStatus::Success, Some(Address::zero())))),
            None
        );
    }
}
