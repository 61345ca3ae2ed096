use ethernity_core::{traits::RpcProvider, types::TransactionStatus, Error};
use ethernity_rpc::{EthernityRpcClient, RpcConfig};
use ethereum_types::{Address, H256};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const CONTRACT: &str = "0xabcdef0123456789abcdef0123456789abcdef01";

fn receipt_json(status: &str, contract: Option<&str>) -> Value {
    json!({
        "transactionHash": format!("0x{}", "11".repeat(32)),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x10",
        "from": "0x1111111111111111111111111111111111111111",
        "to": null,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "contractAddress": contract,
        "logs": [],
        "status": status,
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x2",
        "effectiveGasPrice": "0x1"
    })
}

/// Servidor JSON-RPC mínimo que ecoa o `id` de cada requisição
async fn node(receipt: Value, code_delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(move |req: &Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            let id = body["id"].clone();
            let (result, delay) = match body["method"].as_str().unwrap() {
                "eth_blockNumber" => (json!("0x10"), Duration::ZERO),
                "eth_getTransactionReceipt" => (receipt.clone(), Duration::ZERO),
                "eth_getCode" => (json!("0x6080604052"), code_delay),
                other => panic!("unexpected method {other}"),
            };
            let response = if result.get("error").is_some() {
                json!({"jsonrpc": "2.0", "id": id, "error": result["error"]})
            } else {
                json!({"jsonrpc": "2.0", "id": id, "result": result})
            };
            ResponseTemplate::new(200).set_body_json(response).set_delay(delay)
        })
        .mount(&server)
        .await;
    server
}

fn config(server: &MockServer, timeout: Duration) -> RpcConfig {
    RpcConfig { endpoint: server.uri(), timeout }
}

#[tokio::test]
async fn receipt_of_contract_creation_is_mapped() {
    let server = node(receipt_json("0x1", Some(CONTRACT)), Duration::ZERO).await;
    let client = EthernityRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();

    let receipt = client
        .get_transaction_receipt(H256::repeat_byte(0x11))
        .await
        .unwrap()
        .expect("receipt");
    assert_eq!(receipt.status, TransactionStatus::Success);
    assert_eq!(receipt.transaction_hash, H256::repeat_byte(0x11));
    assert_eq!(
        receipt.contract_address,
        Some(ethernity_core::utils::hex_to_address(CONTRACT).unwrap())
    );
    assert_eq!(client.get_block_number().await.unwrap(), 16);
}

#[tokio::test]
async fn reverted_receipt_reports_failure() {
    let server = node(receipt_json("0x0", None), Duration::ZERO).await;
    let client = EthernityRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let receipt = client.get_transaction_receipt(H256::zero()).await.unwrap().unwrap();
    assert_eq!(receipt.status, TransactionStatus::Failure);
    assert!(receipt.contract_address.is_none());
}

#[tokio::test]
async fn unknown_receipt_is_none() {
    let server = node(Value::Null, Duration::ZERO).await;
    let client = EthernityRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    assert!(client.get_transaction_receipt(H256::zero()).await.unwrap().is_none());
}

#[tokio::test]
async fn node_error_becomes_rpc_error() {
    let error = json!({"error": {"code": -32000, "message": "boom"}});
    let server = node(error, Duration::ZERO).await;
    let client = EthernityRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let res = client.get_transaction_receipt(H256::zero()).await;
    assert!(matches!(res, Err(Error::RpcError(_))));
}

#[tokio::test]
async fn code_is_fetched_through_trait() {
    let server = node(Value::Null, Duration::ZERO).await;
    let client = EthernityRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let provider: &dyn RpcProvider = &client;
    let code = provider.get_code(Address::repeat_byte(0xab)).await.unwrap();
    assert_eq!(code, vec![0x60, 0x80, 0x60, 0x40, 0x52]);
}

#[tokio::test]
async fn slow_node_hits_transport_timeout() {
    let server = node(Value::Null, Duration::from_secs(2)).await;
    let client = EthernityRpcClient::new(config(&server, Duration::from_millis(200))).await.unwrap();
    let res = client.get_code(Address::repeat_byte(0xab)).await;
    assert!(matches!(res, Err(Error::TimeoutError(_))));
}
