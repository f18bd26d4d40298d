pub mod calculators;
pub mod classify;
pub mod extract;
pub mod factors;
pub mod validation;
pub mod weights;

pub use calculators::{
    financial_stability_score, overall_score, platform_reliability_score, regulation_score,
    transparency_score, user_feedback_score,
};
pub use classify::TrustBand;
pub use extract::extract_factors;
pub use validation::validate_weights;
pub use weights::TrustWeights;
