use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_rotation::config::RotationConfig;
use u_rotation::ledger::FairnessLedger;
use u_rotation::models::{Holiday, Schedule};
use u_rotation::registry::{HolidayRegistry, Roster};
use u_rotation::scheduler::RotationEngine;

#[derive(Parser)]
#[command(
    name = "u-rotation",
    version,
    about = "Fair monthly duty rotation with weighted workload tracking",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a month and print it
    Generate {
        #[arg(long)]
        year: i32,

        /// Month (1-12)
        #[arg(long)]
        month: u32,

        /// Roster TOML file
        #[arg(long)]
        roster: PathBuf,

        /// Holidays CSV file (start_date,end_date,name)
        #[arg(long)]
        holidays: Option<PathBuf>,

        /// Configuration TOML file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Classify a date and show its weight
    Classify {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Holidays CSV file
        #[arg(long)]
        holidays: Option<PathBuf>,

        /// Configuration TOML file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_format, cli.verbose);

    match cli.command {
        Commands::Generate {
            year,
            month,
            roster,
            holidays,
            config,
            format,
        } => generate(
            year,
            month,
            &roster,
            holidays.as_deref(),
            config.as_deref(),
            format,
        ),
        Commands::Classify {
            date,
            holidays,
            config,
        } => classify(date, holidays.as_deref(), config.as_deref()),
    }
}

fn setup_tracing(format: LogFormat, verbose: bool) {
    let default = if verbose {
        "u_rotation=debug,info"
    } else {
        "u_rotation=info,warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RotationConfig> {
    let config = match path {
        Some(p) => RotationConfig::from_file(p)
            .with_context(|| format!("Failed to load config file: {}", p.display()))?,
        None => RotationConfig::default(),
    };
    let config = config.apply_env().context("Invalid environment override")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn load_holidays(path: Option<&Path>) -> Result<Vec<Holiday>> {
    let Some(p) = path else {
        return Ok(Vec::new());
    };
    let mut registry = HolidayRegistry::new();
    registry
        .import_csv_file(p)
        .with_context(|| format!("Failed to import holidays: {}", p.display()))?;
    Ok(registry.holidays())
}

fn generate(
    year: i32,
    month: u32,
    roster_path: &Path,
    holidays_path: Option<&Path>,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path)?;
    let roster = Roster::from_file(roster_path)
        .with_context(|| format!("Failed to load roster: {}", roster_path.display()))?;
    let holidays = load_holidays(holidays_path)?;

    let engine = RotationEngine::from_config(config)?;
    let mut ledger = FairnessLedger::new();
    let schedule = engine
        .generate_monthly_schedule(&roster, year, month, &holidays, &mut ledger)
        .with_context(|| format!("Failed to generate schedule for {year}-{month:02}"))?;

    match format {
        OutputFormat::Json => {
            let metrics: Vec<_> = roster
                .groups()
                .iter()
                .map(|g| (g.id.clone(), ledger.fairness_metrics(&g.id)))
                .collect();
            let out = serde_json::json!({
                "schedule": schedule,
                "entries": schedule.entries(),
                "fairness": metrics.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => print_text(&schedule, &roster, &ledger),
    }
    Ok(())
}

fn print_text(schedule: &Schedule, roster: &Roster, ledger: &FairnessLedger) {
    println!("Schedule {}-{:02}", schedule.year, schedule.month);
    for shift in &schedule.shifts {
        let marker = if schedule.had_fallback(shift.date, &shift.group_id) {
            " (fallback)"
        } else {
            ""
        };
        println!(
            "{}  {:<12} {:<20} {:<20} {:.1}{}",
            shift.date, shift.group_id, shift.person, shift.day_type, shift.weight, marker
        );
    }

    println!();
    for group in roster.groups() {
        let m = ledger.fairness_metrics(&group.id);
        println!(
            "{}: weighted std-dev {:.3}, max weighted diff {:.2}, max total diff {}",
            group.id, m.weighted_std_dev, m.max_weighted_diff, m.max_total_diff
        );
        for (person, stats) in ledger.group_stats(&group.id) {
            println!(
                "  {:<20} days {:>3}  weighted {:>6.2}",
                person, stats.total_assignments, stats.total_weighted_score
            );
        }
    }
}

fn classify(
    date: NaiveDate,
    holidays_path: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let holidays = load_holidays(holidays_path)?;
    let (day_type, weight) = config.weight_model()?.price(date, &holidays);
    println!("{date}  {day_type}  {weight:.2}");
    Ok(())
}
