use serde::{Deserialize, Serialize};

/// How clean a broker's record with its regulators has been.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryHistory {
    #[default]
    Clean,
    MinorIssues,
    MajorIssues,
}

/// Coarse classification of regulatory strictness (tier1 strongest, offshore weakest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionTier {
    Tier1,
    Tier2,
    #[default]
    Tier3,
    Offshore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CapitalAdequacy {
    Strong,
    #[default]
    Adequate,
    Weak,
}

/// Direction of recent review sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecentTrend {
    Improving,
    #[default]
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionQuality {
    Excellent,
    #[default]
    Good,
    Average,
    Poor,
}

/// Inputs to the regulation sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationFactors {
    pub primary_regulator: String,
    pub additional_licenses: Vec<String>,
    pub regulatory_history: RegulatoryHistory,
    pub jurisdiction_tier: JurisdictionTier,
}

/// Inputs to the financial stability sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStabilityFactors {
    pub parent_company: String,
    pub publicly_traded: bool,
    pub capital_adequacy: CapitalAdequacy,
    /// Client fund insurance coverage in currency units.
    pub insurance_coverage: f64,
    pub years_in_business: u32,
}

/// Inputs to the user feedback sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedbackFactors {
    /// Average review rating on a 0-5 scale.
    pub average_rating: f64,
    pub total_reviews: u32,
    pub recent_trend: RecentTrend,
    pub withdrawal_complaints: u32,
    /// Support rating on a 0-5 scale.
    pub support_rating: f64,
}

/// Inputs to the transparency sub-score. Each flag is worth 20 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencyFactors {
    pub pricing_clarity: bool,
    pub terms_accessibility: bool,
    pub regulatory_disclosures: bool,
    pub fee_transparency: bool,
    pub conflict_of_interest: bool,
}

impl TransparencyFactors {
    /// Number of transparency checks the broker passes.
    pub fn passed(&self) -> u32 {
        [
            self.pricing_clarity,
            self.terms_accessibility,
            self.regulatory_disclosures,
            self.fee_transparency,
            self.conflict_of_interest,
        ]
        .iter()
        .filter(|b| **b)
        .count() as u32
    }
}

/// Inputs to the platform reliability sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformReliabilityFactors {
    pub uptime_percentage: f64,
    pub execution_quality: ExecutionQuality,
    /// Incidents per month.
    pub technical_issues: u32,
    pub slippage_reports: u32,
    pub server_locations: u32,
}

/// All five factor structs extracted from a single broker record snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerFactors {
    pub regulation: RegulationFactors,
    pub financial_stability: FinancialStabilityFactors,
    pub user_feedback: UserFeedbackFactors,
    pub transparency: TransparencyFactors,
    pub platform_reliability: PlatformReliabilityFactors,
}
