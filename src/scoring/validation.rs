use super::weights::TrustWeights;

/// Tolerance for the weight-sum check; weights come from YAML decimals.
const SUM_EPSILON: f64 = 1e-6;

/// Validate a weight configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &TrustWeights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let named = [
        ("weights.regulation", weights.regulation),
        ("weights.financial_stability", weights.financial_stability),
        ("weights.user_feedback", weights.user_feedback),
        ("weights.transparency", weights.transparency),
        ("weights.platform_reliability", weights.platform_reliability),
    ];

    for (name, value) in named {
        if !value.is_finite() {
            errors.push(format!("{}: must be a finite number", name));
        } else if !(0.0..=1.0).contains(&value) {
            errors.push(format!("{}: must be within [0, 1], got {}", name, value));
        }
    }

    let total = weights.total();
    if total.is_finite() && (total - 1.0).abs() > SUM_EPSILON {
        errors.push(format!("weights: must sum to 1.0, got {}", total));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
