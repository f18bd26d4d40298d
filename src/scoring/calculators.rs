use super::factors::{
    CapitalAdequacy, ExecutionQuality, FinancialStabilityFactors, JurisdictionTier,
    PlatformReliabilityFactors, RecentTrend, RegulationFactors, RegulatoryHistory,
    TransparencyFactors, UserFeedbackFactors,
};
use super::weights::TrustWeights;

/// Points awarded for the primary regulator, keyed by uppercase name.
/// Unknown regulators score the floor value of 15.
const REGULATOR_POINTS: &[(&str, f64)] = &[
    ("FCA", 40.0),
    ("CFTC", 40.0),
    ("BAFIN", 40.0),
    ("NFA", 40.0),
    ("ASIC", 38.0),
    ("FINMA", 38.0),
    ("MAS", 38.0),
    ("CYSEC", 35.0),
    ("FSCA", 25.0),
    ("FSC", 20.0),
    ("IFSC", 18.0),
    ("VFSC", 15.0),
];

const UNKNOWN_REGULATOR_POINTS: f64 = 15.0;

fn regulator_points(name: &str) -> f64 {
    let needle = name.trim().to_uppercase();
    REGULATOR_POINTS
        .iter()
        .find(|(reg, _)| *reg == needle)
        .map(|(_, pts)| *pts)
        .unwrap_or(UNKNOWN_REGULATOR_POINTS)
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Regulation sub-score.
///
/// Primary regulator up to 40 points, +3 per additional license capped at
/// 15, regulatory history 25/15/5, jurisdiction tier 20/15/10/5.
pub fn regulation_score(factors: &RegulationFactors) -> f64 {
    let regulator = regulator_points(&factors.primary_regulator);

    let licenses = (factors.additional_licenses.len() as f64 * 3.0).min(15.0);

    let history = match factors.regulatory_history {
        RegulatoryHistory::Clean => 25.0,
        RegulatoryHistory::MinorIssues => 15.0,
        RegulatoryHistory::MajorIssues => 5.0,
    };

    let tier = match factors.jurisdiction_tier {
        JurisdictionTier::Tier1 => 20.0,
        JurisdictionTier::Tier2 => 15.0,
        JurisdictionTier::Tier3 => 10.0,
        JurisdictionTier::Offshore => 5.0,
    };

    clamp_score(regulator + licenses + history + tier)
}

/// Financial stability sub-score.
///
/// Ownership 20/15/10 (publicly traded / named parent / independent),
/// capital adequacy 30/20/10, insurance coverage tiered up to 25, years in
/// business tiered up to 25.
pub fn financial_stability_score(factors: &FinancialStabilityFactors) -> f64 {
    let ownership = if factors.publicly_traded {
        20.0
    } else if factors.parent_company != "Independent" {
        15.0
    } else {
        10.0
    };

    let capital = match factors.capital_adequacy {
        CapitalAdequacy::Strong => 30.0,
        CapitalAdequacy::Adequate => 20.0,
        CapitalAdequacy::Weak => 10.0,
    };

    let insurance = if factors.insurance_coverage >= 1_000_000.0 {
        25.0
    } else if factors.insurance_coverage >= 500_000.0 {
        20.0
    } else if factors.insurance_coverage >= 100_000.0 {
        15.0
    } else if factors.insurance_coverage > 0.0 {
        10.0
    } else {
        0.0
    };

    let longevity = if factors.years_in_business >= 20 {
        25.0
    } else if factors.years_in_business >= 10 {
        20.0
    } else if factors.years_in_business >= 5 {
        15.0
    } else if factors.years_in_business >= 2 {
        10.0
    } else {
        5.0
    };

    clamp_score(ownership + capital + insurance + longevity)
}

/// User feedback sub-score.
///
/// Rating up to 40, review-volume credibility up to 20, trend 15/10/5,
/// withdrawal-complaint penalty off a 15-point ceiling, support up to 10.
pub fn user_feedback_score(factors: &UserFeedbackFactors) -> f64 {
    let rating = factors.average_rating / 5.0 * 40.0;

    let volume = if factors.total_reviews >= 1000 {
        20.0
    } else if factors.total_reviews >= 500 {
        18.0
    } else if factors.total_reviews >= 100 {
        15.0
    } else if factors.total_reviews >= 50 {
        12.0
    } else if factors.total_reviews >= 10 {
        8.0
    } else {
        5.0
    };

    let trend = match factors.recent_trend {
        RecentTrend::Improving => 15.0,
        RecentTrend::Stable => 10.0,
        RecentTrend::Declining => 5.0,
    };

    // Each complaint costs 2 points off a 15-point ceiling, floored at 0.
    let withdrawals = (15.0 - factors.withdrawal_complaints as f64 * 2.0).max(0.0);

    let support = factors.support_rating / 5.0 * 10.0;

    clamp_score(rating + volume + trend + withdrawals + support)
}

/// Transparency sub-score: 20 points per passed check.
pub fn transparency_score(factors: &TransparencyFactors) -> f64 {
    clamp_score(factors.passed() as f64 * 20.0)
}

/// Platform reliability sub-score.
///
/// Uptime tiered up to 40, execution quality 30/25/15/5, technical-issues
/// penalty off a 20-point ceiling, server-location bonus capped at 10.
pub fn platform_reliability_score(factors: &PlatformReliabilityFactors) -> f64 {
    let uptime = if factors.uptime_percentage >= 99.9 {
        40.0
    } else if factors.uptime_percentage >= 99.5 {
        35.0
    } else if factors.uptime_percentage >= 99.0 {
        30.0
    } else if factors.uptime_percentage >= 98.0 {
        20.0
    } else {
        10.0
    };

    let execution = match factors.execution_quality {
        ExecutionQuality::Excellent => 30.0,
        ExecutionQuality::Good => 25.0,
        ExecutionQuality::Average => 15.0,
        ExecutionQuality::Poor => 5.0,
    };

    let issues = (20.0 - factors.technical_issues as f64 * 3.0).max(0.0);

    let locations = (factors.server_locations as f64 * 2.0).min(10.0);

    clamp_score(uptime + execution + issues + locations)
}

/// Round to 2 decimal places. `f64::round` rounds half away from zero,
/// which is round-half-up for the non-negative scores produced here.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted overall score over already-clamped sub-scores, rounded to 2
/// decimal places. Pure arithmetic; always lands in [0, 100] for a valid
/// weighting.
pub fn overall_score(sub_scores: &[f64; 5], weights: &TrustWeights) -> f64 {
    let [regulation, financial_stability, user_feedback, transparency, platform_reliability] =
        sub_scores;

    round2(
        regulation * weights.regulation
            + financial_stability * weights.financial_stability
            + user_feedback * weights.user_feedback
            + transparency * weights.transparency
            + platform_reliability * weights.platform_reliability,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regulation(
        regulator: &str,
        licenses: usize,
        history: RegulatoryHistory,
        tier: JurisdictionTier,
    ) -> RegulationFactors {
        RegulationFactors {
            primary_regulator: regulator.to_string(),
            additional_licenses: (0..licenses).map(|i| format!("L{}", i)).collect(),
            regulatory_history: history,
            jurisdiction_tier: tier,
        }
    }

    #[test]
    fn test_regulation_fca_clean_tier1_two_licenses() {
        // 40 (FCA) + 6 (2 licenses) + 25 (clean) + 20 (tier1) = 91
        let f = regulation("FCA", 2, RegulatoryHistory::Clean, JurisdictionTier::Tier1);
        assert_eq!(regulation_score(&f), 91.0);
    }

    #[test]
    fn test_regulation_unknown_regulator_floor() {
        // 15 + 0 + 5 + 5 = 25
        let f = regulation(
            "Some Island Authority",
            0,
            RegulatoryHistory::MajorIssues,
            JurisdictionTier::Offshore,
        );
        assert_eq!(regulation_score(&f), 25.0);
    }

    #[test]
    fn test_regulation_lookup_case_insensitive() {
        let lower = regulation("fca", 0, RegulatoryHistory::Clean, JurisdictionTier::Tier1);
        let upper = regulation("FCA", 0, RegulatoryHistory::Clean, JurisdictionTier::Tier1);
        assert_eq!(regulation_score(&lower), regulation_score(&upper));
    }

    #[test]
    fn test_regulation_license_points_capped_at_15() {
        // 40 + 15 (capped, not 30) + 25 + 20 = 100
        let f = regulation("CFTC", 10, RegulatoryHistory::Clean, JurisdictionTier::Tier1);
        assert_eq!(regulation_score(&f), 100.0);
    }

    #[test]
    fn test_financial_stability_max_example() {
        // 20 + 30 + 25 + 25 = 100
        let f = FinancialStabilityFactors {
            parent_company: "MegaCorp".to_string(),
            publicly_traded: true,
            capital_adequacy: CapitalAdequacy::Strong,
            insurance_coverage: 2_000_000.0,
            years_in_business: 25,
        };
        assert_eq!(financial_stability_score(&f), 100.0);
    }

    #[test]
    fn test_financial_stability_ownership_tiers() {
        let mut f = FinancialStabilityFactors {
            parent_company: "Independent".to_string(),
            publicly_traded: false,
            capital_adequacy: CapitalAdequacy::Weak,
            insurance_coverage: 0.0,
            years_in_business: 0,
        };
        // 10 + 10 + 0 + 5 = 25
        assert_eq!(financial_stability_score(&f), 25.0);

        f.parent_company = "Holdings Ltd".to_string();
        // Named parent bumps ownership to 15.
        assert_eq!(financial_stability_score(&f), 30.0);

        f.publicly_traded = true;
        // Publicly traded wins over parent company.
        assert_eq!(financial_stability_score(&f), 35.0);
    }

    #[test]
    fn test_financial_stability_insurance_breakpoints() {
        let base = |coverage: f64| FinancialStabilityFactors {
            parent_company: "Independent".to_string(),
            publicly_traded: false,
            capital_adequacy: CapitalAdequacy::Adequate,
            insurance_coverage: coverage,
            years_in_business: 0,
        };
        // Fixed part: 10 + 20 + 5 = 35
        assert_eq!(financial_stability_score(&base(0.0)), 35.0);
        assert_eq!(financial_stability_score(&base(1.0)), 45.0);
        assert_eq!(financial_stability_score(&base(100_000.0)), 50.0);
        assert_eq!(financial_stability_score(&base(500_000.0)), 55.0);
        assert_eq!(financial_stability_score(&base(1_000_000.0)), 60.0);
    }

    #[test]
    fn test_user_feedback_max_example() {
        // 40 + 20 + 15 + 15 + 10 = 100
        let f = UserFeedbackFactors {
            average_rating: 5.0,
            total_reviews: 2000,
            recent_trend: RecentTrend::Improving,
            withdrawal_complaints: 0,
            support_rating: 5.0,
        };
        assert_eq!(user_feedback_score(&f), 100.0);
    }

    #[test]
    fn test_user_feedback_complaint_penalty_floors_at_zero() {
        let mut f = UserFeedbackFactors {
            average_rating: 3.0,
            total_reviews: 0,
            recent_trend: RecentTrend::Stable,
            withdrawal_complaints: 3,
            support_rating: 3.0,
        };
        // 24 + 5 + 10 + (15 - 6) + 6 = 54
        assert_eq!(user_feedback_score(&f), 54.0);

        f.withdrawal_complaints = 100;
        // Ceiling exhausted: 24 + 5 + 10 + 0 + 6 = 45
        assert_eq!(user_feedback_score(&f), 45.0);
    }

    #[test]
    fn test_user_feedback_volume_breakpoints() {
        let base = |reviews: u32| UserFeedbackFactors {
            average_rating: 0.0,
            total_reviews: reviews,
            recent_trend: RecentTrend::Declining,
            withdrawal_complaints: 100,
            support_rating: 0.0,
        };
        // Everything else zeroed out except trend (5).
        assert_eq!(user_feedback_score(&base(0)), 10.0);
        assert_eq!(user_feedback_score(&base(10)), 13.0);
        assert_eq!(user_feedback_score(&base(50)), 17.0);
        assert_eq!(user_feedback_score(&base(100)), 20.0);
        assert_eq!(user_feedback_score(&base(500)), 23.0);
        assert_eq!(user_feedback_score(&base(1000)), 25.0);
    }

    #[test]
    fn test_transparency_direct_count() {
        let f = |n: u32| TransparencyFactors {
            pricing_clarity: n >= 1,
            terms_accessibility: n >= 2,
            regulatory_disclosures: n >= 3,
            fee_transparency: n >= 4,
            conflict_of_interest: n >= 5,
        };
        assert_eq!(transparency_score(&f(0)), 0.0);
        assert_eq!(transparency_score(&f(3)), 60.0);
        assert_eq!(transparency_score(&f(5)), 100.0);
    }

    #[test]
    fn test_platform_reliability_max_example() {
        // 40 + 30 + 20 + 10 (capped) = 100
        let f = PlatformReliabilityFactors {
            uptime_percentage: 99.95,
            execution_quality: ExecutionQuality::Excellent,
            technical_issues: 0,
            slippage_reports: 0,
            server_locations: 10,
        };
        assert_eq!(platform_reliability_score(&f), 100.0);
    }

    #[test]
    fn test_platform_reliability_uptime_breakpoints() {
        let base = |uptime: f64| PlatformReliabilityFactors {
            uptime_percentage: uptime,
            execution_quality: ExecutionQuality::Poor,
            technical_issues: 100,
            slippage_reports: 0,
            server_locations: 0,
        };
        // Fixed part: 5 (execution) + 0 + 0
        assert_eq!(platform_reliability_score(&base(99.9)), 45.0);
        assert_eq!(platform_reliability_score(&base(99.5)), 40.0);
        assert_eq!(platform_reliability_score(&base(99.0)), 35.0);
        assert_eq!(platform_reliability_score(&base(98.0)), 25.0);
        assert_eq!(platform_reliability_score(&base(90.0)), 15.0);
    }

    #[test]
    fn test_platform_reliability_issue_penalty() {
        let base = |issues: u32| PlatformReliabilityFactors {
            uptime_percentage: 99.5,
            execution_quality: ExecutionQuality::Good,
            technical_issues: issues,
            slippage_reports: 0,
            server_locations: 0,
        };
        // 35 + 25 + (20 - 3*issues)
        assert_eq!(platform_reliability_score(&base(0)), 80.0);
        assert_eq!(platform_reliability_score(&base(1)), 77.0);
        assert_eq!(platform_reliability_score(&base(7)), 60.0);
        // Penalty floors at zero rather than going negative.
        assert_eq!(platform_reliability_score(&base(50)), 60.0);
    }

    #[test]
    fn test_all_calculators_stay_in_range_on_extremes() {
        let reg = regulation("FCA", 1000, RegulatoryHistory::Clean, JurisdictionTier::Tier1);
        assert!(regulation_score(&reg) <= 100.0);

        let fin = FinancialStabilityFactors {
            parent_company: String::new(),
            publicly_traded: true,
            capital_adequacy: CapitalAdequacy::Strong,
            insurance_coverage: f64::MAX,
            years_in_business: u32::MAX,
        };
        let s = financial_stability_score(&fin);
        assert!((0.0..=100.0).contains(&s));

        let fb = UserFeedbackFactors {
            average_rating: 5.0,
            total_reviews: u32::MAX,
            recent_trend: RecentTrend::Improving,
            withdrawal_complaints: u32::MAX,
            support_rating: 5.0,
        };
        let s = user_feedback_score(&fb);
        assert!((0.0..=100.0).contains(&s));

        let pr = PlatformReliabilityFactors {
            uptime_percentage: 100.0,
            execution_quality: ExecutionQuality::Excellent,
            technical_issues: 0,
            slippage_reports: u32::MAX,
            server_locations: u32::MAX,
        };
        let s = platform_reliability_score(&pr);
        assert!((0.0..=100.0).contains(&s));
    }

    #[test]
    fn test_overall_weighted_sum_identity() {
        let weights = TrustWeights::default();
        let subs = [91.0, 100.0, 54.0, 60.0, 77.0];
        let expected =
            round2(91.0 * 0.30 + 100.0 * 0.25 + 54.0 * 0.20 + 60.0 * 0.15 + 77.0 * 0.10);
        assert_eq!(overall_score(&subs, &weights), expected);
    }

    #[test]
    fn test_overall_rounds_to_two_decimals() {
        let weights = TrustWeights::default();
        // 33.333 * every weight sums back to 33.333 -> rounds to 33.33
        let subs = [33.333; 5];
        assert_eq!(overall_score(&subs, &weights), 33.33);
    }

    #[test]
    fn test_overall_bounds() {
        let weights = TrustWeights::default();
        assert_eq!(overall_score(&[0.0; 5], &weights), 0.0);
        assert_eq!(overall_score(&[100.0; 5], &weights), 100.0);
    }

    #[test]
    fn test_round2_half_up() {
        // 87.125 is exactly representable, so this genuinely exercises
        // the half-up case.
        assert_eq!(round2(87.125), 87.13);
        assert_eq!(round2(87.124), 87.12);
        assert_eq!(round2(50.0), 50.0);
    }
}
