// ABOUTME: Liftlog CLI - prints workout analytics reports for a CSV export as JSON
// ABOUTME: Overview, shortcuts, group browser, exercise search, per-exercise report and comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Headline metrics and rankings for 2024
//! liftlog --file export.csv --from 2024-01-01 --to 2024-12-31 overview
//!
//! # Exercise shortcuts ranked by peak estimated 1RM
//! liftlog shortcuts --order peak-one-rep-max
//!
//! # Chest exercises starting with S
//! liftlog search --group chest --starts-with S
//!
//! # Full report with a 10-week forecast
//! liftlog exercise "Supino Reto" --horizon 10
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use liftlog::config::DashboardConfig;
use liftlog::dashboard::{Dashboard, DashboardFilter, ExerciseQuery, StartsWith};
use liftlog::errors::{AppError, ErrorResponse};
use liftlog::ingestion::WorkoutDataCache;
use liftlog::intelligence::SummaryOrdering;
use liftlog::logging::LoggingConfig;
use liftlog::models::MuscleGroup;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "liftlog",
    version,
    about = "Strength-training analytics for workout log exports",
    long_about = "Reads a semicolon-delimited workout export and prints volume, estimated 1RM, forecasts and alerts as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Workout export file (defaults to LIFTLOG_DATA_FILE, then the app's export name)
    #[arg(long, short = 'f', global = true)]
    file: Option<PathBuf>,

    /// First date included (YYYY-MM-DD or DD.MM.YYYY)
    #[arg(long, global = true, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Last date included (YYYY-MM-DD or DD.MM.YYYY)
    #[arg(long, global = true, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Only sets of this routine
    #[arg(long, global = true)]
    routine: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Headline metrics, daily volume, top exercises, routines and calendar
    Overview,

    /// Most relevant exercises with short labels
    Shortcuts {
        /// Ranking criterion
        #[arg(long, value_enum, default_value_t = ShortcutOrder::Sessions)]
        order: ShortcutOrder,
    },

    /// Exercises grouped by muscle group
    Groups,

    /// Search exercise names
    Search {
        /// Muscle group label (e.g. chest, back, legs)
        #[arg(long, value_parser = parse_group)]
        group: Option<MuscleGroup>,

        /// First letter A-Z, or '#' for names not starting with a letter
        #[arg(long)]
        starts_with: Option<StartsWith>,

        /// Case-insensitive substring
        #[arg(long, short = 'q')]
        query: Option<String>,
    },

    /// Series, forecast, set table and alerts for one exercise
    Exercise {
        /// Exact exercise name
        name: String,

        /// Forecast horizon in weeks (at least 1)
        #[arg(long, value_parser = parse_horizon)]
        horizon: Option<usize>,
    },

    /// Two exercises side by side
    Compare {
        /// First exercise name
        first: String,

        /// Second exercise name
        second: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShortcutOrder {
    /// Most training days
    Sessions,
    /// Highest total volume
    Volume,
    /// Highest estimated 1RM
    PeakOneRepMax,
}

impl From<ShortcutOrder> for SummaryOrdering {
    fn from(order: ShortcutOrder) -> Self {
        match order {
            ShortcutOrder::Sessions => Self::Sessions,
            ShortcutOrder::Volume => Self::Volume,
            ShortcutOrder::PeakOneRepMax => Self::PeakOneRepMax,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d.%m.%Y"))
        .map_err(|e| format!("invalid date '{value}': {e}"))
}

fn parse_horizon(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(weeks) if weeks > 0 => Ok(weeks),
        _ => Err(format!("invalid horizon '{value}': expected a whole number of weeks >= 1")),
    }
}

fn parse_group(value: &str) -> Result<MuscleGroup, String> {
    MuscleGroup::from_label(value).ok_or_else(|| {
        let labels: Vec<&str> = MuscleGroup::ALL.iter().map(|g| g.label()).collect();
        format!("unknown muscle group '{value}', expected one of {}", labels.join(", "))
    })
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }

    let mut cache = WorkoutDataCache::new(config.cache_capacity);
    let sets = cache.get_or_load(&config.data_file)?;
    info!(path = %config.data_file.display(), sets = sets.len(), "workout export ready");

    let dashboard = Dashboard::new(Arc::unwrap_or_clone(sets), config.analysis);
    let filter = DashboardFilter {
        start: cli.from,
        end: cli.to,
        routine: cli.routine,
    };

    match cli.command {
        Command::Overview => print_json(&dashboard.overview(&filter)),
        Command::Shortcuts { order } => print_json(&dashboard.shortcuts(&filter, order.into())),
        Command::Groups => print_json(&dashboard.group_browser(&filter)),
        Command::Search {
            group,
            starts_with,
            query,
        } => {
            let query = ExerciseQuery {
                group,
                starts_with,
                text: query,
            };
            print_json(&dashboard.search_exercises(&filter, &query))
        }
        Command::Exercise { name, horizon } => {
            let report = dashboard
                .exercise_report(&filter, &name, horizon)
                .ok_or_else(|| AppError::not_found(format!("sets for exercise '{name}'")))?;
            print_json(&report)
        }
        Command::Compare { first, second } => {
            print_json(&dashboard.compare(&filter, &first, &second))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    logging.init()?;

    run(cli).inspect_err(|error| {
        if let Some(app_error) = error.downcast_ref::<AppError>() {
            if let Ok(body) = serde_json::to_string_pretty(&ErrorResponse::from(app_error)) {
                println!("{body}");
            }
        }
    })
}
