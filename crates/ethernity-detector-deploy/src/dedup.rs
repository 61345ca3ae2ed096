use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ethernity_core::types::TransactionHash;

/// Cache de transações já vistas durante a vida do processo.
///
/// Sem expiração nem despejo: uma entrada por hash, criada na primeira vez que o hash
/// aparece. A instância pertence ao detector que a criou.
#[derive(Debug, Default)]
pub struct TransactionDedupCache {
    seen: DashMap<TransactionHash, bool>,
}

impl TransactionDedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, hash: &TransactionHash) -> bool {
        self.seen.get(hash).map_or(false, |entry| *entry.value())
    }

    pub fn mark_seen(&self, hash: TransactionHash) {
        self.seen.insert(hash, true);
    }

    /// Verifica e marca sob o mesmo lock de shard.
    ///
    /// Retorna `true` apenas para a primeira chamada com um dado hash, mesmo com
    /// entregas concorrentes.
    pub fn check_and_mark(&self, hash: TransactionHash) -> bool {
        match self.seen.entry(hash) {
            Entry::Occupied(mut entry) => {
                if *entry.get() {
                    false
                } else {
                    entry.insert(true);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(true);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
