use async_trait::async_trait;
use ethernity_core::{traits::EventNotifier, Result};
use tracing::info;

/// Notificador que emite cada alerta como uma linha de log estruturado.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl EventNotifier for LogNotifier {
    async fn notify(&self, event_data: Vec<u8>) -> Result<()> {
        info!(target: "ethernity::alerts", alert = %String::from_utf8_lossy(&event_data));
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}
