use std::fs;
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use elig_classify::{Classifier, KeywordSets};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "elig", version, about = "SNAP classification for bank-statement transactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a CSV of transactions and print a JSON statement summary.
    Classify {
        /// Transactions CSV (id, description, amount, direction, ...).
        csv: PathBuf,
        /// Optional TOML file overriding the built-in keyword sets.
        #[arg(long)]
        keywords: Option<PathBuf>,
        /// Statement period label carried into the summary.
        #[arg(long, default_value = "")]
        period: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify {
            csv,
            keywords,
            period,
        } => {
            let classifier = match keywords {
                Some(path) => {
                    let content = fs::read_to_string(&path)
                        .with_context(|| format!("reading keyword config {}", path.display()))?;
                    Classifier::new(KeywordSets::from_toml(&content)?)
                }
                None => Classifier::default(),
            };

            let file = File::open(&csv)
                .with_context(|| format!("opening transactions file {}", csv.display()))?;
            let transactions = elig_import::read_transactions(file)?;
            tracing::info!(count = transactions.len(), "classifying transactions");

            let summary = elig_import::summarize(transactions, &period, &classifier);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
