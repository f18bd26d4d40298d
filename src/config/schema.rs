use serde::{Deserialize, Serialize};

use crate::scoring::TrustWeights;

/// Top-level CLI configuration.
///
/// Example YAML (~/.config/broker-trust/config.yaml):
/// ```yaml
/// brokers_file: /var/lib/broker-trust/brokers.json
/// weights:
///   regulation: 0.30
///   financial_stability: 0.25
///   user_feedback: 0.20
///   transparency: 0.15
///   platform_reliability: 0.10
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default broker data file; `--brokers` overrides it.
    #[serde(default)]
    pub brokers_file: Option<String>,

    /// Weight overrides; defaults to the published methodology weights.
    #[serde(default)]
    pub weights: Option<TrustWeights>,
}
