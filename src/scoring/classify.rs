use serde::{Deserialize, Serialize};

/// Presentation band for an overall trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl TrustBand {
    /// Classify an overall score using the fixed thresholds
    /// (>=90 Excellent, >=80 Good, >=70 Fair, else Poor).
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            TrustBand::Excellent
        } else if score >= 80.0 {
            TrustBand::Good
        } else if score >= 70.0 {
            TrustBand::Fair
        } else {
            TrustBand::Poor
        }
    }

    /// Human label shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            TrustBand::Excellent => "Excellent",
            TrustBand::Good => "Good",
            TrustBand::Fair => "Fair",
            TrustBand::Poor => "Poor",
        }
    }

    /// Styling bucket consumed by presentation layers (CSS class name
    /// upstream, color choice in the CLI table).
    pub fn style_bucket(&self) -> &'static str {
        match self {
            TrustBand::Excellent => "trust-excellent",
            TrustBand::Good => "trust-good",
            TrustBand::Fair => "trust-fair",
            TrustBand::Poor => "trust-poor",
        }
    }
}
