use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};

use super::store::BrokerStore;
use super::types::{BrokerRecord, TrustScoreUpdate};

/// On-disk shape of a broker data file.
#[derive(Debug, Serialize, Deserialize)]
pub struct BrokerFile {
    pub version: u32,
    #[serde(default)]
    pub brokers: Vec<BrokerRecord>,
}

impl BrokerFile {
    pub fn new() -> Self {
        Self {
            version: 1,
            brokers: Vec::new(),
        }
    }
}

impl Default for BrokerFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a broker data file.
///
/// A missing file is an error here (unlike optional state files): scoring
/// an empty catalog silently would mask a bad `--brokers` path.
pub fn load_broker_file(path: &Path) -> Result<BrokerFile> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open broker data file at {}", path.display()))?;

    let data: BrokerFile =
        serde_json::from_reader(file).context("Failed to parse broker data file")?;

    if data.version != 1 {
        anyhow::bail!("Unsupported broker data file version: {}", data.version);
    }

    Ok(data)
}

/// Save a broker data file atomically so a crash mid-write never leaves a
/// corrupted catalog behind.
pub fn save_broker_file(path: &Path, data: &BrokerFile) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, data).context("Failed to serialize broker data")?;

    file.commit().context("Failed to save broker data file")?;

    Ok(())
}

/// File-backed broker store: the catalog is loaded once, and every score
/// persist rewrites the file atomically.
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<BrokerFile>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = load_broker_file(&path)?;
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Snapshot of all records, in file order.
    pub fn all(&self) -> Vec<BrokerRecord> {
        self.data.lock().unwrap().brokers.clone()
    }
}

#[async_trait]
impl BrokerStore for JsonFileStore {
    async fn fetch_broker(&self, id: &str) -> Result<Option<BrokerRecord>> {
        let data = self.data.lock().unwrap();
        Ok(data.brokers.iter().find(|b| b.id == id).cloned())
    }

    async fn persist_trust_score(&self, id: &str, update: &TrustScoreUpdate) -> Result<()> {
        let mut data = self.data.lock().unwrap();

        let broker = data
            .brokers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| anyhow::anyhow!("broker '{}' not present in data file", id))?;

        broker.trust_score = Some(update.trust_score);
        broker.trust_score_components = Some(update.trust_score_components.clone());
        broker.updated_at = Some(update.updated_at);

        save_broker_file(&self.path, &data)
    }

    async fn list_broker_ids(&self) -> Result<Vec<String>> {
        let data = self.data.lock().unwrap();
        Ok(data.brokers.iter().map(|b| b.id.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_sample_file(name: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        let _ = std::fs::remove_file(&path);

        let mut data = BrokerFile::new();
        data.brokers.push(BrokerRecord::bare("b1", "First"));
        data.brokers.push(BrokerRecord::bare("b2", "Second"));
        save_broker_file(&path, &data).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_errors() {
        let path = env::temp_dir().join("broker_trust_test_missing.json");
        let _ = std::fs::remove_file(&path);
        assert!(load_broker_file(&path).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = write_sample_file("broker_trust_test_roundtrip.json");

        let loaded = load_broker_file(&path).unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.brokers.len(), 2);
        assert_eq!(loaded.brokers[0].id, "b1");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let path = env::temp_dir().join("broker_trust_test_version.json");
        std::fs::write(&path, r#"{"version": 9, "brokers": []}"#).unwrap();
        assert!(load_broker_file(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_store_fetch_and_list() {
        let path = write_sample_file("broker_trust_test_store.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.list_broker_ids().await.unwrap(), vec!["b1", "b2"]);
        assert!(store.fetch_broker("b2").await.unwrap().is_some());
        assert!(store.fetch_broker("b3").await.unwrap().is_none());

        let _ = std::fs::remove_file(&path);
    }
}
