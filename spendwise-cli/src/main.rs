use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use spendwise_core::{CategorizationResult, NewTransaction, TransactionKind};
use spendwise_ingest::{import_csv, parse_date};
use std::path::PathBuf;
use tracing::{info, warn};

mod config;
mod ledger;
mod report_cmd;
mod state;

use config::{build_categorizer, init_config, load_config};
use ledger::Ledger;
use report_cmd::{ReportCommand, run_report};

#[derive(Parser, Debug)]
#[command(name = "spendwise", version, about = "Categorize and report on personal transactions")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Categorize a description without storing anything
    Categorize {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List every category a transaction can be filed under
    Categories,

    /// Record one transaction
    Add {
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        #[arg(long, default_value = "")]
        description: String,
        /// Leave out to auto-categorize
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type", default_value = "expense")]
        kind: TransactionKind,
    },

    /// Bulk upload a CSV (date, amount, description, category, type)
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Show stored transactions, newest first
    List {
        #[arg(long, default_value_t = 1000)]
        limit: usize,
    },

    /// Override the category of a stored transaction
    Recategorize {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        category: String,
    },

    /// Aggregated reports over the ledger
    Report {
        /// Treat this date as today (default: today in the configured timezone)
        #[arg(long)]
        as_of: Option<String>,

        #[command(subcommand)]
        command: ReportCommand,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,
    /// Print the config file location
    Path,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = state::config_path()?;
    let cfg = load_config(&config_path)?;

    if let Command::Config { command } = &cli.command {
        match command {
            ConfigCommand::Init => init_config(&config_path)?,
            ConfigCommand::Path => println!("{}", config_path.display()),
        }
        return Ok(());
    }

    let categorizer = build_categorizer(&cfg)?;
    let ledger_path = state::ledger_path()?;

    match cli.command {
        Command::Categorize { text } => {
            let result = categorizer.categorize(&text.join(" "));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }

        Command::Categories => {
            let list = categorizer.list_categories();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for name in list {
                    println!("{name}");
                }
            }
        }

        Command::Add {
            date,
            amount,
            description,
            category,
            kind,
        } => {
            let Some(date) = parse_date(&date) else {
                bail!("unreadable date: {} (use YYYY-MM-DD)", date);
            };
            let assigned = categorizer.assign(&description, category.as_deref());

            let mut ledger = Ledger::load(&ledger_path)?;
            let id = ledger.insert(NewTransaction {
                date,
                amount,
                description,
                category: assigned.category.clone(),
                kind,
            });
            ledger.save(&ledger_path)?;

            if cli.json {
                let out = serde_json::json!({
                    "transaction_id": id,
                    "category": assigned.category,
                    "confidence": assigned.auto.as_ref().map(|r| r.confidence),
                    "suggestions": assigned.auto.as_ref().map(|r| &r.suggestions),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Created transaction {id}: {}", assigned.category);
                if let Some(auto) = &assigned.auto {
                    println!(
                        "  auto-assigned (confidence: {}, suggestions: {})",
                        auto.confidence,
                        auto.suggestions.join(", ")
                    );
                }
            }
        }

        Command::Import { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {} (pass --csv <path>)", csv.display());
            }
            let report = import_csv(&csv, &categorizer)
                .with_context(|| format!("importing {}", csv.display()))?;

            if report.skipped > 0 {
                let skipped = report.skipped;
                warn!(csv = %csv.display(), skipped, "rows skipped during import");
            }

            let mut ledger = Ledger::load(&ledger_path)?;
            let inserted = ledger.extend(report.transactions);
            ledger.save(&ledger_path)?;
            info!(csv = %csv.display(), inserted, "imported transactions");

            if cli.json {
                let out = serde_json::json!({ "inserted": inserted, "skipped": report.skipped });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Imported {} transactions from {}", inserted, csv.display());
                if report.skipped > 0 {
                    println!("Skipped {} rows with unreadable dates", report.skipped);
                }
            }
        }

        Command::List { limit } => {
            let ledger = Ledger::load(&ledger_path)?;
            let recent = ledger.recent(limit);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recent)?);
            } else {
                for t in recent {
                    println!(
                        "{:>5}  {}  {:>10.2}  {:<8} {:<16} {}",
                        t.id, t.date, t.amount, t.kind, t.category, t.description
                    );
                }
            }
        }

        Command::Recategorize { id, category: requested } => {
            let category = categorizer.recategorize(&requested);
            if category != requested.trim() {
                info!(id, requested = %requested, canonical = %category, "category normalized");
            }
            let mut ledger = Ledger::load(&ledger_path)?;
            ledger.set_category(id, category.clone())?;
            ledger.save(&ledger_path)?;
            info!(id, category = %category, "recategorized transaction");
            println!("Transaction {id} is now {category}");
        }

        Command::Report { as_of, command } => {
            let today = match as_of {
                Some(raw) => match parse_date(&raw) {
                    Some(d) => d,
                    None => bail!("unreadable --as-of date: {}", raw),
                },
                None => cfg.reports.today()?,
            };
            let ledger = Ledger::load(&ledger_path)?;
            run_report(command, &ledger.transactions, &cfg.reports, today, cli.json)?;
        }

        Command::Config { .. } => {}
    }

    Ok(())
}

fn print_result(result: &CategorizationResult) {
    println!("category:    {}", result.category);
    println!("confidence:  {}", result.confidence);
    println!("suggestions: {}", result.suggestions.join(", "));
}
