use async_trait::async_trait;
use ethernity_core::error::{Error, Result};
use ethernity_core::traits::{EventNotifier, RpcProvider};
use ethernity_core::types::{TransactionHash, TransactionReceipt, TransactionStatus};
use ethereum_types::{Address, H256};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct MockProvider {
    receipts: HashMap<TransactionHash, TransactionReceipt>,
    code: HashMap<Address, Vec<u8>>,
}

#[async_trait]
impl RpcProvider for MockProvider {
    async fn get_transaction_receipt(&self, tx_hash: TransactionHash) -> Result<Option<TransactionReceipt>> {
        Ok(self.receipts.get(&tx_hash).cloned())
    }

    async fn get_code(&self, address: Address) -> Result<Vec<u8>> {
        self.code
            .get(&address)
            .cloned()
            .ok_or_else(|| Error::NotFound("code".into()))
    }

    async fn get_block_number(&self) -> Result<u64> {
        Ok(42)
    }
}

#[derive(Default)]
struct MemoryNotifier {
    sent: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl EventNotifier for MemoryNotifier {
    async fn notify(&self, event_data: Vec<u8>) -> Result<()> {
        self.sent.lock().unwrap().push(event_data);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn mock_provider_behind_trait_object() {
    let hash = H256::repeat_byte(0x01);
    let contract = Address::repeat_byte(0xab);
    let mut mock = MockProvider::default();
    mock.receipts.insert(
        hash,
        TransactionReceipt {
            transaction_hash: hash,
            status: TransactionStatus::from_receipt_status(Some(1)),
            contract_address: Some(contract),
        },
    );
    mock.code.insert(contract, vec![0x60, 0x00]);

    let provider: Box<dyn RpcProvider> = Box::new(mock);
    let receipt = provider.get_transaction_receipt(hash).await.unwrap().unwrap();
    assert!(receipt.is_success());
    assert_eq!(receipt.contract_address, Some(contract));
    assert!(provider.get_transaction_receipt(H256::zero()).await.unwrap().is_none());
    assert_eq!(provider.get_code(contract).await.unwrap(), vec![0x60, 0x00]);
    assert!(matches!(provider.get_code(Address::zero()).await, Err(Error::NotFound(_))));
    assert_eq!(provider.get_block_number().await.unwrap(), 42);
}

#[tokio::test]
async fn notifier_collects_payloads() {
    let notifier = MemoryNotifier::default();
    assert!(notifier.is_available().await);
    notifier.notify(b"{}".to_vec()).await.unwrap();
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[test]
fn receipt_status_mapping() {
    assert_eq!(TransactionStatus::from_receipt_status(Some(1)), TransactionStatus::Success);
    assert_eq!(TransactionStatus::from_receipt_status(Some(0)), TransactionStatus::Failure);
    assert_eq!(TransactionStatus::from_receipt_status(None), TransactionStatus::Unknown);
    assert!(Error::RpcError("down".into()).is_transient());
    assert!(Error::TimeoutError("slow".into()).is_transient());
    assert!(!Error::DecodeError("bad".into()).is_transient());
}
