use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::broker::types::{BrokerRecord, TrustScoreComponents};
use crate::scoring::TrustBand;

/// A broker with its computed trust score for display
pub struct ScoredBroker<'a> {
    pub broker: &'a BrokerRecord,
    pub components: &'a TrustScoreComponents,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a broker name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Render a band label with its color applied
fn format_band(band: TrustBand, use_colors: bool) -> String {
    let label = band.label();
    if !use_colors {
        return label.to_string();
    }
    match band {
        TrustBand::Excellent => label.green().to_string(),
        TrustBand::Good => label.cyan().to_string(),
        TrustBand::Fair => label.yellow().to_string(),
        TrustBand::Poor => label.red().to_string(),
    }
}

/// Format brokers as a scored table: Index, Score, Band, Name
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column: 6 chars, right-aligned (fits "100.00")
/// Band column: 9 chars, left-aligned (fits "Excellent")
pub fn format_scored_table(brokers: &[ScoredBroker], use_colors: bool) -> String {
    if brokers.is_empty() {
        return "No brokers found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 6;
    let band_width = 9;
    let separator = "  ";

    brokers
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index = format!("{:>width$}.", idx + 1, width = index_width - 1);
            let score = format!("{:>width$.2}", scored.components.overall, width = score_width);
            let band = TrustBand::from_score(scored.components.overall);
            let band_label = format!("{:<width$}", band.label(), width = band_width);

            // Width budget: index + score + band + separators, rest for the name.
            let fixed = index_width + score_width + band_width + separator.len() * 3;
            let name = match term_width {
                Some(w) if w > fixed + 10 => truncate_name(&scored.broker.name, w - fixed),
                _ => scored.broker.name.clone(),
            };

            if use_colors {
                // Re-render the band with color but keep the plain-width padding.
                let colored_band = format!(
                    "{}{}",
                    format_band(band, true),
                    " ".repeat(band_width.saturating_sub(band.label().len()))
                );
                format!(
                    "{}{}{}{}{}{}{}",
                    index.dimmed(),
                    separator,
                    score.bold(),
                    separator,
                    colored_band,
                    separator,
                    name
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}",
                    index, separator, score, separator, band_label, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single broker with a full sub-score breakdown (for `show`)
pub fn format_broker_detail(scored: &ScoredBroker, use_colors: bool) -> String {
    let c = scored.components;
    let band = TrustBand::from_score(c.overall);

    let header = if use_colors {
        format!(
            "{} ({})\n  Trust Score: {} ({})",
            scored.broker.name.bold(),
            scored.broker.id,
            format!("{:.2}", c.overall).bold(),
            format_band(band, true)
        )
    } else {
        format!(
            "{} ({})\n  Trust Score: {:.2} ({})",
            scored.broker.name,
            scored.broker.id,
            c.overall,
            band.label()
        )
    };

    let rows = [
        ("Regulation", c.regulation.score, c.regulation.weight),
        (
            "Financial Stability",
            c.financial_stability.score,
            c.financial_stability.weight,
        ),
        ("User Feedback", c.user_feedback.score, c.user_feedback.weight),
        ("Transparency", c.transparency.score, c.transparency.weight),
        (
            "Platform Reliability",
            c.platform_reliability.score,
            c.platform_reliability.weight,
        ),
    ];

    let breakdown = rows
        .iter()
        .map(|(label, score, weight)| {
            format!("  {:<20} {:>6.2}  (weight {:.2})", label, score, weight)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n{}\n  Methodology: {}  Updated: {}",
        header,
        breakdown,
        c.methodology,
        c.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
