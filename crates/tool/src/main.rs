use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::rotation::{CyclicSpan, RotationLength};

mod commands;
mod config;

use commands::EntityKind;
use config::{LogFormat, ToolConfig};

#[derive(Parser)]
#[command(name = "roster-tool")]
#[command(about = "Normalize roster records and convert shift template timings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce the references of a JSON record (or list) to ids
    Normalize {
        #[arg(value_enum)]
        kind: EntityKind,
        file: PathBuf,
    },
    /// Load a JSON listing into the tenant cache and print the cached views
    Load {
        #[arg(value_enum)]
        kind: EntityKind,
        file: PathBuf,
        /// Tenant scope; defaults to TENANT_ID
        #[arg(short, long)]
        tenant: Option<i64>,
    },
    /// Convert day offsets and times of day into ISO-8601 durations
    ToAbsolute {
        start_day: u32,
        #[arg(value_parser = commands::parse_time_of_day)]
        start_time: NaiveTime,
        end_day: u32,
        #[arg(value_parser = commands::parse_time_of_day)]
        end_time: NaiveTime,
        /// Rotation length in days; defaults to ROTATION_LENGTH
        #[arg(short, long)]
        rotation: Option<u32>,
    },
    /// Convert ISO-8601 start offset and duration into day offsets and times
    ToCyclic {
        start_offset: String,
        duration: String,
        /// Rotation length in days; defaults to ROTATION_LENGTH
        #[arg(short, long)]
        rotation: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ToolConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format);

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Normalize { kind, file } => commands::normalize(kind, &read_input(&file)?)?,
        Commands::Load { kind, file, tenant } => {
            let tenant_id = tenant.unwrap_or(config.tenant_id);
            commands::load(kind, &read_input(&file)?, tenant_id)?
        }
        Commands::ToAbsolute {
            start_day,
            start_time,
            end_day,
            end_time,
            rotation,
        } => {
            let span = CyclicSpan {
                start_day_offset: start_day,
                start_time,
                end_day_offset: end_day,
                end_time,
            };
            commands::to_absolute(&span, rotation_length(rotation, &config)?)?
        }
        Commands::ToCyclic {
            start_offset,
            duration,
            rotation,
        } => commands::to_cyclic(&start_offset, &duration, rotation_length(rotation, &config)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_tool=info,roster_cache=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    tracing::debug!(path = %path.display(), "Reading input");
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn rotation_length(flag: Option<u32>, config: &ToolConfig) -> anyhow::Result<RotationLength> {
    match flag {
        Some(days) => Ok(RotationLength::new(days)?),
        None => Ok(config.rotation_length),
    }
}
