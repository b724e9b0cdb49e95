// ABOUTME: Environment configuration for the dashboard and CLI: data source, cache size and analysis thresholds
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog_core::constants::ingestion::{DEFAULT_CACHE_CAPACITY, DEFAULT_DATA_FILE};
use liftlog_core::errors::{AppError, AppResult};
use liftlog_intelligence::AnalysisConfig;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Environment variable naming the workout export
pub const DATA_FILE_ENV: &str = "LIFTLOG_DATA_FILE";
/// Environment variable bounding the export cache
pub const CACHE_CAPACITY_ENV: &str = "LIFTLOG_CACHE_CAPACITY";

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Workout export to analyse
    pub data_file: PathBuf,
    /// Number of exports kept by the data cache
    pub cache_capacity: usize,
    /// Analysis thresholds
    pub analysis: AnalysisConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an analysis override is malformed or fails validation
    pub fn from_env() -> AppResult<Self> {
        let data_file = env::var(DATA_FILE_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from);

        let cache_capacity = match env::var(CACHE_CAPACITY_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_CACHE_CAPACITY,
                        "invalid {CACHE_CAPACITY_ENV}, using default"
                    );
                    DEFAULT_CACHE_CAPACITY
                }
            },
            Err(_) => DEFAULT_CACHE_CAPACITY,
        };

        let analysis = AnalysisConfig::from_environment()
            .map_err(|e| AppError::config(e.to_string()).with_source(e))?;

        Ok(Self {
            data_file,
            cache_capacity,
            analysis,
        })
    }
}
