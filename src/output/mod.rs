pub mod formatter;

pub use formatter::{format_broker_detail, format_scored_table, should_use_colors, ScoredBroker};
