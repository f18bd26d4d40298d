use chrono::{Datelike, Utc};

use super::factors::{
    BrokerFactors, ExecutionQuality, FinancialStabilityFactors, PlatformReliabilityFactors,
    RecentTrend, RegulationFactors, TransparencyFactors, UserFeedbackFactors,
};
use crate::broker::types::BrokerRecord;

/// Audit scores at or above this pass the corresponding transparency check.
const TRANSPARENCY_PASS_SCORE: f64 = 70.0;

/// Extract the five factor structs from a broker record snapshot.
///
/// Absent fields silently fall back to documented defaults instead of
/// erroring. That permissiveness is deliberate: most upstream broker
/// records are incomplete, and rejecting them would leave the bulk of the
/// catalog unscored.
pub fn extract_factors(broker: &BrokerRecord) -> BrokerFactors {
    BrokerFactors {
        regulation: extract_regulation(broker),
        financial_stability: extract_financial_stability(broker),
        user_feedback: extract_user_feedback(broker),
        transparency: extract_transparency(broker),
        platform_reliability: extract_platform_reliability(broker),
    }
}

fn extract_regulation(broker: &BrokerRecord) -> RegulationFactors {
    let primary_regulator = broker
        .regulators
        .first()
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());

    // Everything past the primary regulator counts as an additional license.
    let additional_licenses = broker.regulators.iter().skip(1).cloned().collect();

    RegulationFactors {
        primary_regulator,
        additional_licenses,
        regulatory_history: broker.regulatory_history.unwrap_or_default(),
        jurisdiction_tier: broker.jurisdiction_tier.unwrap_or_default(),
    }
}

fn extract_financial_stability(broker: &BrokerRecord) -> FinancialStabilityFactors {
    let years_in_business = broker
        .founded_year
        .map(|founded| (Utc::now().year() - founded).max(0) as u32)
        .unwrap_or(0);

    FinancialStabilityFactors {
        parent_company: broker
            .parent_company
            .clone()
            .unwrap_or_else(|| "Independent".to_string()),
        publicly_traded: broker.publicly_traded.unwrap_or(false),
        capital_adequacy: broker.capital_adequacy.unwrap_or_default(),
        insurance_coverage: broker.insurance_coverage.unwrap_or(0.0),
        years_in_business,
    }
}

fn extract_user_feedback(broker: &BrokerRecord) -> UserFeedbackFactors {
    let reviews = broker.reviews.as_ref();

    UserFeedbackFactors {
        average_rating: reviews.and_then(|r| r.average_rating).unwrap_or(3.0),
        total_reviews: reviews.and_then(|r| r.total_reviews).unwrap_or(0),
        // No trend analysis exists upstream; every broker reads as stable.
        recent_trend: RecentTrend::Stable,
        // Withdrawal complaints are not tracked upstream.
        withdrawal_complaints: 0,
        support_rating: reviews.and_then(|r| r.support_rating).unwrap_or(3.0),
    }
}

fn extract_transparency(broker: &BrokerRecord) -> TransparencyFactors {
    let info = broker.transparency.clone().unwrap_or_default();

    TransparencyFactors {
        pricing_clarity: transparency_check(&info.pricing_clarity_score, &info.pricing_clarity),
        terms_accessibility: transparency_check(
            &info.terms_accessibility_score,
            &info.terms_accessibility,
        ),
        regulatory_disclosures: transparency_check(
            &info.regulatory_disclosures_score,
            &info.regulatory_disclosures,
        ),
        fee_transparency: transparency_check(&info.fee_transparency_score, &info.fee_transparency),
        conflict_of_interest: transparency_check(
            &info.conflict_of_interest_score,
            &info.conflict_of_interest,
        ),
    }
}

/// Prefer the numeric audit score (pass at >= 70) over the plain flag;
/// with neither present the check fails.
fn transparency_check(score: &Option<f64>, flag: &Option<bool>) -> bool {
    match (score, flag) {
        (Some(s), _) => *s >= TRANSPARENCY_PASS_SCORE,
        (None, Some(f)) => *f,
        (None, None) => false,
    }
}

fn extract_platform_reliability(broker: &BrokerRecord) -> PlatformReliabilityFactors {
    // TODO: replace these placeholder values with real uptime and execution
    // telemetry once the monitoring feed is wired in. Only the server
    // location count comes from actual record data today.
    PlatformReliabilityFactors {
        uptime_percentage: 99.5,
        execution_quality: ExecutionQuality::Good,
        technical_issues: 1,
        slippage_reports: 0,
        server_locations: broker.server_locations.len() as u32,
    }
}
