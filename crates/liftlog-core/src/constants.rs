// ABOUTME: Named defaults for every window, threshold and limit used by the analytics engine
// ABOUTME: Organized by domain so configuration layers can override them explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Every magic number of the analytics engine lives here under a name. The
//! intelligence crate's `AnalysisConfig` starts from these values and lets the
//! environment override them.

/// Per-set metric derivation
pub mod derivation {
    /// Divisor in the Epley formula `w * (1 + r / 30)`
    pub const EPLEY_REPS_DIVISOR: f64 = 30.0;
    /// Default moving-average window for trend lines
    pub const DEFAULT_TREND_WINDOW: usize = 5;
}

/// Exercise naming heuristics
pub mod naming {
    /// Default maximum length of a display alias, in characters
    pub const DEFAULT_ALIAS_MAX_LEN: usize = 16;
    /// Minimum joined length of the first two words before a third is added
    pub const ALIAS_TWO_WORD_MIN_LEN: usize = 6;
    /// Suffix appended to truncated aliases
    pub const ALIAS_ELLIPSIS: char = '…';
}

/// Weekly 1RM forecasting
pub mod forecast {
    /// Minimum observations required before and after weekly resampling
    pub const MIN_OBSERVATIONS: usize = 5;
    /// Default number of weeks to forecast
    pub const DEFAULT_HORIZON_WEEKS: usize = 6;
    /// Two-sided 95% normal quantile for model intervals
    pub const CONFIDENCE_Z: f64 = 1.96;
    /// Largest autoregressive order searched
    pub const MAX_AR_ORDER: usize = 2;
    /// Largest moving-average order searched
    pub const MAX_MA_ORDER: usize = 2;
    /// Largest differencing order searched
    pub const MAX_DIFFERENCING: usize = 1;
    /// Iteration cap for each model fit
    pub const MAX_OPTIMIZER_ITERATIONS: usize = 500;
}

/// Plateau and volume-drop alerts
pub mod alerts {
    /// Number of trailing weekly points inspected for a plateau
    pub const PLATEAU_LOOKBACK_POINTS: usize = 8;
    /// Minimum weekly points before a plateau can be assessed
    pub const PLATEAU_MIN_POINTS: usize = 5;
    /// Relative slope below which the series is considered flat
    pub const PLATEAU_SLOPE_THRESHOLD: f64 = 0.01;
    /// Size of the recent and prior windows compared for volume drops, in weeks
    pub const VOLUME_DROP_WINDOW_WEEKS: usize = 2;
    /// Minimum weekly points before a volume drop can be assessed
    pub const VOLUME_DROP_MIN_WEEKS: usize = 4;
    /// Recent mean must fall below this fraction of the prior mean
    pub const VOLUME_DROP_RATIO: f64 = 0.8;
    /// Advisory shown when the 1RM trend is flat
    pub const PLATEAU_MESSAGE: &str =
        "Possible 1RM plateau. Consider a deload, switching the variation or adjusting volume/intensity.";
    /// Advisory shown when weekly volume has dropped
    pub const VOLUME_DROP_MESSAGE: &str =
        "Recent volume dropped more than 20% versus previous weeks. Check recovery, sleep and stress.";
}

/// Dashboard listing limits
pub mod dashboard {
    /// Exercises listed in the top-by-volume ranking
    pub const TOP_EXERCISES_LIMIT: usize = 10;
    /// Exercises listed in shortcut grids and group panels
    pub const SHORTCUT_LIMIT: usize = 12;
}

/// Ingestion defaults
pub mod ingestion {
    /// Export file name written by the workout logging app
    pub const DEFAULT_DATA_FILE: &str = "Exportação CSV.eml";
    /// Field delimiter of the export
    pub const CSV_DELIMITER: u8 = b';';
    /// Date format of the `Date` column
    pub const DATE_FORMAT: &str = "%d.%m.%Y";
    /// Number of distinct sources kept by the data cache
    pub const DEFAULT_CACHE_CAPACITY: usize = 4;
}
