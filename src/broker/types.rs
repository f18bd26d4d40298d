use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::factors::{
    BrokerFactors, CapitalAdequacy, FinancialStabilityFactors, JurisdictionTier,
    PlatformReliabilityFactors, RegulationFactors, RegulatoryHistory, TransparencyFactors,
    UserFeedbackFactors,
};

/// Version string stamped into every computed score so stored scores can be
/// told apart after a methodology change.
pub const METHODOLOGY_VERSION: &str = "v2.1";

/// A broker as stored by the storage collaborator.
///
/// Read-only input to the scoring engine except for the persisted score
/// fields (`trust_score`, `trust_score_components`, `updated_at`), which the
/// update workflow overwrites. Nearly everything is optional: real broker
/// records are incomplete upstream, and extraction substitutes documented
/// defaults rather than rejecting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerRecord {
    pub id: String,
    pub name: String,

    /// Regulators holding this broker's licenses; the first entry is the
    /// primary regulator, the rest count as additional licenses.
    #[serde(default)]
    pub regulators: Vec<String>,
    #[serde(default)]
    pub regulatory_history: Option<RegulatoryHistory>,
    #[serde(default)]
    pub jurisdiction_tier: Option<JurisdictionTier>,

    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub parent_company: Option<String>,
    #[serde(default)]
    pub publicly_traded: Option<bool>,
    #[serde(default)]
    pub capital_adequacy: Option<CapitalAdequacy>,
    /// Client fund insurance coverage in currency units.
    #[serde(default)]
    pub insurance_coverage: Option<f64>,

    #[serde(default)]
    pub reviews: Option<ReviewAggregate>,
    #[serde(default)]
    pub transparency: Option<TransparencyInfo>,

    /// Trading server locations; platform reliability counts them.
    #[serde(default)]
    pub server_locations: Vec<String>,

    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub trust_score_components: Option<TrustScoreComponents>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregated review data for a broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAggregate {
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub support_rating: Option<f64>,
}

/// Raw transparency signals. Each check prefers the 0-100 audit score where
/// one exists (passing at 70 or above) and falls back to the plain flag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransparencyInfo {
    #[serde(default)]
    pub pricing_clarity_score: Option<f64>,
    #[serde(default)]
    pub pricing_clarity: Option<bool>,
    #[serde(default)]
    pub terms_accessibility_score: Option<f64>,
    #[serde(default)]
    pub terms_accessibility: Option<bool>,
    #[serde(default)]
    pub regulatory_disclosures_score: Option<f64>,
    #[serde(default)]
    pub regulatory_disclosures: Option<bool>,
    #[serde(default)]
    pub fee_transparency_score: Option<f64>,
    #[serde(default)]
    pub fee_transparency: Option<bool>,
    #[serde(default)]
    pub conflict_of_interest_score: Option<f64>,
    #[serde(default)]
    pub conflict_of_interest: Option<bool>,
}

/// One weighted component of the overall trust score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent<F> {
    /// Sub-score in [0, 100].
    pub score: f64,
    /// Weight applied when aggregating into the overall score.
    pub weight: f64,
    /// The factor inputs the sub-score was computed from.
    pub factors: F,
}

/// The full trust score for one broker: the overall number plus the five
/// weighted sub-components it was derived from.
///
/// Fully derived data. Recomputing from the same `BrokerRecord` snapshot
/// yields the same result except for `last_updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreComponents {
    /// Overall trust score in [0, 100], rounded to 2 decimal places.
    pub overall: f64,
    pub regulation: ScoreComponent<RegulationFactors>,
    pub financial_stability: ScoreComponent<FinancialStabilityFactors>,
    pub user_feedback: ScoreComponent<UserFeedbackFactors>,
    pub transparency: ScoreComponent<TransparencyFactors>,
    pub platform_reliability: ScoreComponent<PlatformReliabilityFactors>,
    pub last_updated: DateTime<Utc>,
    pub methodology: String,
}

impl TrustScoreComponents {
    /// The five sub-scores in weight order (regulation first).
    pub fn sub_scores(&self) -> [f64; 5] {
        [
            self.regulation.score,
            self.financial_stability.score,
            self.user_feedback.score,
            self.transparency.score,
            self.platform_reliability.score,
        ]
    }

    /// The extracted factors, reassembled.
    pub fn factors(&self) -> BrokerFactors {
        BrokerFactors {
            regulation: self.regulation.factors.clone(),
            financial_stability: self.financial_stability.factors.clone(),
            user_feedback: self.user_feedback.factors.clone(),
            transparency: self.transparency.factors,
            platform_reliability: self.platform_reliability.factors.clone(),
        }
    }
}

/// The slice of a broker record the update workflow writes back to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustScoreUpdate {
    pub trust_score: f64,
    pub trust_score_components: TrustScoreComponents,
    pub updated_at: DateTime<Utc>,
}

impl BrokerRecord {
    /// Minimal record with every optional field absent. Scoring such a
    /// record exercises the full default-substitution path.
    pub fn bare(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            regulators: Vec::new(),
            regulatory_history: None,
            jurisdiction_tier: None,
            founded_year: None,
            parent_company: None,
            publicly_traded: None,
            capital_adequacy: None,
            insurance_coverage: None,
            reviews: None,
            transparency: None,
            server_locations: Vec::new(),
            trust_score: None,
            trust_score_components: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_record_has_no_optional_data() {
        let b = BrokerRecord::bare("b1", "Test Broker");
        assert_eq!(b.id, "b1");
        assert!(b.regulators.is_empty());
        assert!(b.founded_year.is_none());
        assert!(b.trust_score.is_none());
    }

    #[test]
    fn test_record_parses_from_sparse_json() {
        // Upstream records routinely omit most fields.
        let json = r#"{"id": "b2", "name": "Sparse Broker", "regulators": ["FCA"]}"#;
        let b: BrokerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(b.regulators, vec!["FCA".to_string()]);
        assert!(b.reviews.is_none());
        assert!(b.transparency.is_none());
        assert!(b.server_locations.is_empty());
    }

    #[test]
    fn test_record_json_roundtrip_keeps_score_fields() {
        let mut b = BrokerRecord::bare("b3", "Scored Broker");
        b.trust_score = Some(87.5);
        b.updated_at = Some(Utc::now());

        let json = serde_json::to_string(&b).unwrap();
        let back: BrokerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.trust_score, Some(87.5));
        assert!(back.updated_at.is_some());
    }
}
