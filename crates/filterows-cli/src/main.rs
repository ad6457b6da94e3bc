//! filterows CLI: build and inspect filter row definitions.

mod config;

use clap::{Parser, Subcommand};
use filterows_core::date::{create_date_options, DateOptions, DateOptionsResult};
use filterows_core::exclusive::{get_exclusive, ExclusiveOptions};
use filterows_core::{get_operators, FilterType, Rows};
use filterows_dsl::{parse_rows, Format};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "filterows")]
#[command(about = "Build validated filter rows from a declarative configuration", long_about = None)]
struct Cli {
    /// Log filter (overrides FILTEROWS_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the rows of a configuration file and print them as JSON
    Build {
        /// Path to the row configuration (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Input format (overrides extension inference)
        #[arg(long)]
        format: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a row configuration file
    Validate {
        /// Path to the row configuration (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Input format (overrides extension inference)
        #[arg(long)]
        format: Option<String>,
    },

    /// List the operators of a filter type
    Operators {
        /// Dotted filter type, e.g. `date.days.weekdays`
        filter_type: String,
    },

    /// Resolve the effective operator set of a filter type
    Resolve {
        filter_type: String,

        #[arg(long)]
        include: Vec<String>,

        #[arg(long)]
        omit: Vec<String>,
    },

    /// Print the date preset rules of a date sub-type
    Dates {
        /// One of `date.basic`, `date.days`, `date.days.weekdays`, `date.days.weekends`
        filter_type: String,

        #[arg(long)]
        include: Vec<String>,

        #[arg(long)]
        omit: Vec<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let mut cfg = CliConfig::from_env();
    if let Some(filter) = cli.log {
        cfg.log_filter = filter;
    }
    init_tracing(&cfg.log_filter);

    let result = match cli.command {
        Commands::Build {
            config,
            format,
            pretty,
        } => build_rows(&config, format.as_deref(), &cfg).and_then(|rows| {
            print_json(&rows, pretty || cfg.pretty)
        }),
        Commands::Validate { config, format } => build_rows(&config, format.as_deref(), &cfg)
            .map(|rows| println!("✓ Configuration is valid ({} rows)", rows.len())),
        Commands::Operators { filter_type } => list_operators(&filter_type),
        Commands::Resolve {
            filter_type,
            include,
            omit,
        } => resolve_operators(filter_type, include, omit),
        Commands::Dates {
            filter_type,
            include,
            omit,
            pretty,
        } => date_options(&filter_type, include, omit, pretty || cfg.pretty),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn resolve_format(
    path: &Path,
    flag: Option<&str>,
    cfg: &CliConfig,
) -> Result<Format, Box<dyn std::error::Error>> {
    if let Some(flag) = flag {
        return Ok(flag.parse()?);
    }
    Ok(cfg.format.unwrap_or_else(|| Format::from_path(path)))
}

fn build_rows(
    path: &Path,
    format: Option<&str>,
    cfg: &CliConfig,
) -> Result<Rows, Box<dyn std::error::Error>> {
    let format = resolve_format(path, format, cfg)?;
    let src = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading row configuration");

    let parsed = parse_rows(&src, format)?;
    Ok(parsed.build()?)
}

fn list_operators(filter_type: &str) -> Result<(), Box<dyn std::error::Error>> {
    for op in get_operators(filter_type)? {
        println!("{}", op);
    }
    Ok(())
}

fn resolve_operators(
    filter_type: String,
    include: Vec<String>,
    omit: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ops = get_exclusive(&ExclusiveOptions {
        filter_type,
        include,
        omit,
    })?;
    println!("{}", ops.join(", "));
    Ok(())
}

fn date_options(
    filter_type: &str,
    include: Vec<String>,
    omit: Vec<String>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_type: FilterType = filter_type.parse()?;
    let rules = create_date_options(&DateOptions {
        filter_type,
        include,
        omit,
        rules: None,
    })?;
    print_json(&DateOptionsResult { filter_type, rules }, pretty)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
