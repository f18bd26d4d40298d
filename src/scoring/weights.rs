use serde::{Deserialize, Serialize};

/// Component weights for the overall trust score.
///
/// The stock weights sum to exactly 1.0 and match the published
/// methodology; alternate weightings can be injected through config
/// for experimentation, subject to validation at startup.
///
/// Example YAML:
/// ```yaml
/// weights:
///   regulation: 0.30
///   financial_stability: 0.25
///   user_feedback: 0.20
///   transparency: 0.15
///   platform_reliability: 0.10
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrustWeights {
    pub regulation: f64,
    pub financial_stability: f64,
    pub user_feedback: f64,
    pub transparency: f64,
    pub platform_reliability: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            regulation: 0.30,
            financial_stability: 0.25,
            user_feedback: 0.20,
            transparency: 0.15,
            platform_reliability: 0.10,
        }
    }
}

impl TrustWeights {
    /// Sum of all five weights (1.0 for a valid weighting).
    pub fn total(&self) -> f64 {
        self.regulation
            + self.financial_stability
            + self.user_feedback
            + self.transparency
            + self.platform_reliability
    }
}
