use std::env;
use std::sync::Arc;

use anyhow::Result;
use ethernity_detector_deploy::classifier::is_creation_candidate;
use ethernity_detector_deploy::{ContractDeployDetector, DetectorConfig, LogNotifier, TransactionEvent};
use ethernity_rpc::{EthernityRpcClient, RpcConfig};
use ethers::prelude::*;
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut rpc_config = RpcConfig::from_env();
    if let Some(endpoint) = args.get(1) {
        rpc_config.endpoint = endpoint.clone();
    }
    if !rpc_config.endpoint.starts_with("ws") {
        eprintln!("Uso: {} <WS_RPC_ENDPOINT>", args[0]);
        eprintln!("Exemplo: {} ws://localhost:8546", args[0]);
        std::process::exit(1);
    }

    let ws = Ws::connect(rpc_config.endpoint.clone()).await?;
    let provider = Provider::new(ws);

    let rpc_client = Arc::new(EthernityRpcClient::new(rpc_config).await?);
    let detector = ContractDeployDetector::new(rpc_client, DetectorConfig::from_env())?;
    let notifier = LogNotifier;

    let mut blocks = provider.subscribe_blocks().await?;
    tracing::info!("aguardando novos blocos...");

    while let Some(header) = blocks.next().await {
        let Some(number) = header.number else { continue };
        let block = match provider.get_block_with_txs(number).await {
            Ok(Some(block)) => block,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(block = %number, error = %err, "falha ao obter bloco");
                continue;
            }
        };

        for event in block.transactions.iter().map(TransactionEvent::from) {
            if is_creation_candidate(&event) {
                detector.process(&event, &notifier).await;
            }
        }
    }

    Ok(())
}
