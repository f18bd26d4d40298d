pub mod file;
pub mod store;
pub mod types;

pub use file::JsonFileStore;
pub use store::{BrokerStore, MemoryStore};
pub use types::{BrokerRecord, TrustScoreComponents, TrustScoreUpdate};
