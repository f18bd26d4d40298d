use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::broker::store::BrokerStore;
use crate::broker::types::{
    BrokerRecord, ScoreComponent, TrustScoreComponents, TrustScoreUpdate, METHODOLOGY_VERSION,
};
use crate::scoring::{
    calculators, extract_factors, TrustWeights,
};

/// Failure at the single-broker update boundary.
///
/// Calculators cannot fail (they run over already-defaulted factor
/// structs), so the only failure modes are the storage collaborator's.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("broker not found: {0}")]
    NotFound(String),

    #[error("storage failure while updating broker {id}")]
    Storage {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Outcome of a batch update: per-broker failures are counted, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    pub updated: usize,
    pub failed: usize,
}

/// The trust score engine: extraction + five calculators + aggregation,
/// plus the update workflow against a storage collaborator.
///
/// Stateless apart from the injected weights; scoring the same broker
/// snapshot twice yields identical scores (only `last_updated` moves).
pub struct TrustScoreEngine<S> {
    store: S,
    weights: TrustWeights,
}

impl<S> TrustScoreEngine<S> {
    pub fn new(store: S, weights: TrustWeights) -> Self {
        Self { store, weights }
    }

    pub fn weights(&self) -> &TrustWeights {
        &self.weights
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compute the full trust score for a broker record snapshot.
    /// Pure except for the `last_updated` timestamp.
    pub fn score_broker(&self, broker: &BrokerRecord) -> TrustScoreComponents {
        let factors = extract_factors(broker);

        let regulation = calculators::regulation_score(&factors.regulation);
        let financial_stability =
            calculators::financial_stability_score(&factors.financial_stability);
        let user_feedback = calculators::user_feedback_score(&factors.user_feedback);
        let transparency = calculators::transparency_score(&factors.transparency);
        let platform_reliability =
            calculators::platform_reliability_score(&factors.platform_reliability);

        let overall = calculators::overall_score(
            &[
                regulation,
                financial_stability,
                user_feedback,
                transparency,
                platform_reliability,
            ],
            &self.weights,
        );

        debug!(
            broker = %broker.id,
            overall,
            regulation,
            financial_stability,
            user_feedback,
            transparency,
            platform_reliability,
            "computed trust score"
        );

        TrustScoreComponents {
            overall,
            regulation: ScoreComponent {
                score: regulation,
                weight: self.weights.regulation,
                factors: factors.regulation,
            },
            financial_stability: ScoreComponent {
                score: financial_stability,
                weight: self.weights.financial_stability,
                factors: factors.financial_stability,
            },
            user_feedback: ScoreComponent {
                score: user_feedback,
                weight: self.weights.user_feedback,
                factors: factors.user_feedback,
            },
            transparency: ScoreComponent {
                score: transparency,
                weight: self.weights.transparency,
                factors: factors.transparency,
            },
            platform_reliability: ScoreComponent {
                score: platform_reliability,
                weight: self.weights.platform_reliability,
                factors: factors.platform_reliability,
            },
            last_updated: Utc::now(),
            methodology: METHODOLOGY_VERSION.to_string(),
        }
    }
}

impl<S: BrokerStore> TrustScoreEngine<S> {
    /// Recompute one broker's trust score and persist it back to storage.
    ///
    /// Storage failures (unknown id, rejected write) surface as
    /// `EngineError`; scoring itself cannot fail.
    pub async fn update_trust_score(&self, id: &str) -> Result<TrustScoreComponents, EngineError> {
        let broker = self
            .store
            .fetch_broker(id)
            .await
            .map_err(|source| EngineError::Storage {
                id: id.to_string(),
                source,
            })?
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        let components = self.score_broker(&broker);

        let update = TrustScoreUpdate {
            trust_score: components.overall,
            trust_score_components: components.clone(),
            updated_at: components.last_updated,
        };

        self.store
            .persist_trust_score(id, &update)
            .await
            .map_err(|source| EngineError::Storage {
                id: id.to_string(),
                source,
            })?;

        Ok(components)
    }

    /// Recompute and persist trust scores for every broker the store knows.
    ///
    /// Sequential fan-out with per-item isolation: one broker's failure is
    /// logged and counted, and the iteration always continues.
    pub async fn update_all_trust_scores(&self) -> Result<UpdateSummary, EngineError> {
        let ids = self
            .store
            .list_broker_ids()
            .await
            .map_err(|source| EngineError::Storage {
                id: "*".to_string(),
                source,
            })?;

        let mut summary = UpdateSummary::default();

        for id in ids {
            match self.update_trust_score(&id).await {
                Ok(_) => summary.updated += 1,
                Err(e) => {
                    warn!(broker = %id, error = %e, "trust score update failed");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
