use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::types::{BrokerRecord, TrustScoreUpdate};

/// Storage collaborator the engine reads brokers from and writes scores to.
///
/// The engine owns no storage of its own; implementations decide where
/// records live (in memory, a JSON file, a database behind the web app).
#[async_trait]
pub trait BrokerStore: Send + Sync {
    /// Fetch a broker record by id. `Ok(None)` means the id is unknown;
    /// `Err` means the store itself failed.
    async fn fetch_broker(&self, id: &str) -> Result<Option<BrokerRecord>>;

    /// Write a computed trust score back onto the broker's record,
    /// overwriting any previous score.
    async fn persist_trust_score(&self, id: &str, update: &TrustScoreUpdate) -> Result<()>;

    /// Every broker id the store knows about, for the batch workflow.
    async fn list_broker_ids(&self) -> Result<Vec<String>>;
}

/// In-memory store over a BTreeMap, used by tests and the `list` command
/// (which scores without persisting anywhere durable).
pub struct MemoryStore {
    brokers: Mutex<BTreeMap<String, BrokerRecord>>,
}

impl MemoryStore {
    pub fn new(brokers: impl IntoIterator<Item = BrokerRecord>) -> Self {
        Self {
            brokers: Mutex::new(
                brokers
                    .into_iter()
                    .map(|b| (b.id.clone(), b))
                    .collect(),
            ),
        }
    }

    /// Snapshot of a single record (for inspecting persisted scores).
    pub fn get(&self, id: &str) -> Option<BrokerRecord> {
        self.brokers.lock().unwrap().get(id).cloned()
    }

    /// Snapshot of all records in id order.
    pub fn all(&self) -> Vec<BrokerRecord> {
        self.brokers.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl BrokerStore for MemoryStore {
    async fn fetch_broker(&self, id: &str) -> Result<Option<BrokerRecord>> {
        Ok(self.brokers.lock().unwrap().get(id).cloned())
    }

    async fn persist_trust_score(&self, id: &str, update: &TrustScoreUpdate) -> Result<()> {
        let mut brokers = self.brokers.lock().unwrap();
        let broker = brokers
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("broker '{}' not present in store", id))?;
        broker.trust_score = Some(update.trust_score);
        broker.trust_score_components = Some(update.trust_score_components.clone());
        broker.updated_at = Some(update.updated_at);
        Ok(())
    }

    async fn list_broker_ids(&self) -> Result<Vec<String>> {
        Ok(self.brokers.lock().unwrap().keys().cloned().collect())
    }
}
