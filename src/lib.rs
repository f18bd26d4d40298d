// Public library surface for the CLI and potential reuse.

pub mod broker;
pub mod config;
pub mod engine;
pub mod output;
pub mod scoring;

pub use broker::{BrokerRecord, BrokerStore, JsonFileStore, MemoryStore, TrustScoreComponents};
pub use engine::{EngineError, TrustScoreEngine, UpdateSummary};
pub use scoring::{TrustBand, TrustWeights};
