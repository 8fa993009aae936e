//! Lifespan CLI — date checks for connection workflows.
//!
//! Commands: overlap, adjacent, validate, normalize, completions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use serde::Serialize;

use lifespan_core::{
    Config, ConflictScope, ConnectionRecord, DateRecord, TemporalPoint, TemporalRange,
    TemporalService,
};

#[derive(Parser)]
#[command(name = "lifespan")]
#[command(version)]
#[command(about = "Temporal precision and date-range checks for Lifespan")]
struct Cli {
    /// Config file (defaults to ./lifespan.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check a proposed connection against existing ones
    Overlap {
        /// JSON or YAML file holding a list of existing connections
        #[arg(long)]
        connections: PathBuf,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        object: String,
        #[arg(long)]
        kind: String,
        /// Start date (YYYY, YYYY-MM or YYYY-MM-DD)
        #[arg(long, allow_hyphen_values = true)]
        start: TemporalPoint,
        /// End date; omit for an ongoing connection
        #[arg(long, allow_hyphen_values = true)]
        end: Option<TemporalPoint>,
        /// Id of the connection being edited, excluded from the check
        #[arg(long)]
        id: Option<String>,
    },
    /// Check whether two date ranges meet with no gap
    Adjacent {
        #[arg(long, allow_hyphen_values = true)]
        start: TemporalPoint,
        #[arg(long, allow_hyphen_values = true)]
        end: Option<TemporalPoint>,
        #[arg(long, allow_hyphen_values = true)]
        other_start: TemporalPoint,
        #[arg(long, allow_hyphen_values = true)]
        other_end: Option<TemporalPoint>,
    },
    /// Validate a span's start and end dates
    Validate {
        #[arg(long, allow_hyphen_values = true)]
        start: TemporalPoint,
        #[arg(long, allow_hyphen_values = true)]
        end: Option<TemporalPoint>,
    },
    /// Resolve dates to concrete calendar boundaries
    Normalize {
        #[arg(long, allow_hyphen_values = true)]
        start: TemporalPoint,
        #[arg(long, allow_hyphen_values = true)]
        end: Option<TemporalPoint>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Serialize)]
struct OverlapOutput<'a> {
    overlaps: bool,
    scope: ConflictScope,
    conflicts: Vec<&'a ConnectionRecord>,
}

#[derive(Serialize)]
struct AdjacentOutput {
    adjacent: bool,
    overlaps: bool,
}

#[derive(Serialize)]
struct ValidateOutput {
    valid: bool,
    precisions_valid: bool,
}

#[derive(Serialize)]
struct NormalizeOutput {
    start_date: String,
    end_date: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "lifespan", &mut std::io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = Config::resolve(cli.config.as_deref(), &cwd).context("Failed to load config")?;
    let service = TemporalService::new(config.constraints);

    match cli.command {
        Commands::Overlap {
            connections,
            subject,
            object,
            kind,
            start,
            end,
            id,
        } => {
            let existing = read_connections(&connections)?;
            let candidate = ConnectionRecord {
                id,
                subject,
                object,
                kind,
                dates: DateRecord::from_points(&start, end.as_ref()),
            };
            let conflicts = service
                .find_conflicts(&candidate, &existing)
                .context("Invalid candidate dates")?;
            print_json(&OverlapOutput {
                overlaps: !conflicts.is_empty(),
                scope: service.scope_for(&candidate.kind),
                conflicts,
            })
        }
        Commands::Adjacent {
            start,
            end,
            other_start,
            other_end,
        } => {
            let a = TemporalRange::from_points(start, end).context("Invalid first range")?;
            let b = TemporalRange::from_points(other_start, other_end)
                .context("Invalid second range")?;
            print_json(&AdjacentOutput {
                adjacent: a.is_adjacent(&b),
                overlaps: a.overlaps(&b),
            })
        }
        Commands::Validate { start, end } => {
            let record = DateRecord::from_points(&start, end.as_ref());
            print_json(&ValidateOutput {
                valid: service.validate_span_dates(&record),
                precisions_valid: service.validate_span_precisions(&record),
            })
        }
        Commands::Normalize { start, end } => {
            let record = DateRecord::from_points(&start, end.as_ref());
            let start_date = service.normalized_start_date(&record)?;
            let end_date = service.normalized_end_date(&record)?;
            print_json(&NormalizeOutput {
                start_date: iso(start_date),
                end_date: end_date.map(iso),
            })
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_connections(path: &Path) -> Result<Vec<ConnectionRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let connections = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), "loaded existing connections");
    Ok(connections)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
