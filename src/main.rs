use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use broker_trust::engine::{EngineError, TrustScoreEngine};
use broker_trust::output::ScoredBroker;
use broker_trust::scoring::{validate_weights, TrustWeights};
use broker_trust::{BrokerStore, JsonFileStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List brokers sorted by trust score (default if no subcommand)
    List,
    /// Show the full sub-score breakdown for one broker
    Show {
        /// Broker id as it appears in the data file
        id: String,
    },
    /// Recompute and persist the trust score for one broker
    Update {
        /// Broker id as it appears in the data file
        id: String,
    },
    /// Recompute and persist trust scores for every broker
    UpdateAll,
}

#[derive(Parser, Debug)]
#[command(name = "broker-trust")]
#[command(about = "Broker trust score CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/broker-trust/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the broker data file (overrides the config entry)
    #[arg(short, long, global = true)]
    brokers: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match broker_trust::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate weight overrides at startup
    let weights = config.weights.unwrap_or_default();
    if let Err(errors) = validate_weights(&weights) {
        eprintln!("Weight config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose && weights != TrustWeights::default() {
        eprintln!("Using weight overrides from config");
    }

    // Resolve the broker data file
    let brokers_path = match cli.brokers.or(config.brokers_file) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("No broker data file configured.");
            eprintln!("Pass --brokers <file> or add to ~/.config/broker-trust/config.yaml:");
            eprintln!("  brokers_file: /path/to/brokers.json");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let store = match JsonFileStore::open(&brokers_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Broker data error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let engine = TrustScoreEngine::new(store, weights);
    let use_colors = broker_trust::output::should_use_colors();

    match command {
        Commands::List => {
            // Score every broker without persisting anything.
            let brokers = engine.store().all();

            if cli.verbose {
                eprintln!("Loaded {} brokers from {}", brokers.len(), brokers_path.display());
            }

            let mut scored: Vec<_> = brokers
                .iter()
                .map(|b| (b, engine.score_broker(b)))
                .collect();

            // Sort by score descending; ties break alphabetically by name.
            scored.sort_by(|a, b| {
                b.1.overall
                    .partial_cmp(&a.1.overall)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.name.cmp(&b.0.name))
            });

            let rows: Vec<ScoredBroker> = scored
                .iter()
                .map(|(broker, components)| ScoredBroker {
                    broker,
                    components,
                })
                .collect();

            println!(
                "{}",
                broker_trust::output::format_scored_table(&rows, use_colors)
            );

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} brokers in {:?}",
                    rows.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Show { id } => {
            let broker = match engine.store().fetch_broker(&id).await {
                Ok(Some(b)) => b,
                Ok(None) => {
                    eprintln!("Broker '{}' not found in data file.", id);
                    std::process::exit(EXIT_NOT_FOUND);
                }
                Err(e) => {
                    eprintln!("Broker data error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            let components = engine.score_broker(&broker);
            println!(
                "{}",
                broker_trust::output::format_broker_detail(
                    &ScoredBroker {
                        broker: &broker,
                        components: &components,
                    },
                    use_colors
                )
            );
        }
        Commands::Update { id } => match engine.update_trust_score(&id).await {
            Ok(components) => {
                println!("Updated '{}': trust score {:.2}", id, components.overall);
            }
            Err(EngineError::NotFound(_)) => {
                eprintln!("Broker '{}' not found in data file.", id);
                std::process::exit(EXIT_NOT_FOUND);
            }
            Err(e) => {
                eprintln!("Update failed: {}", e);
                std::process::exit(EXIT_DATA);
            }
        },
        Commands::UpdateAll => match engine.update_all_trust_scores().await {
            Ok(summary) => {
                println!(
                    "Updated {} brokers, {} failed.",
                    summary.updated, summary.failed
                );
                if cli.verbose {
                    eprintln!("Batch finished in {:?}", start_time.elapsed());
                }
                if summary.failed > 0 {
                    std::process::exit(EXIT_DATA);
                }
            }
            Err(e) => {
                eprintln!("Batch update failed: {}", e);
                std::process::exit(EXIT_DATA);
            }
        },
    }

    std::process::exit(EXIT_SUCCESS);
}
