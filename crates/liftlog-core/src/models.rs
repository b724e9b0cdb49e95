// ABOUTME: Workout data models shared by ingestion, analytics and reporting layers
// ABOUTME: Defines logged sets, derived sets, muscle groups, date-keyed series and forecasts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Data Models
//!
//! A [`WorkoutSet`] is one row of the export, immutable after ingestion.
//! Derived attributes (volume, estimated 1RM, muscle group) live on
//! [`DerivedSet`] and never touch the source fields.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One logged set as exported by the workout app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Time of day the set was logged
    pub time: Option<NaiveTime>,
    /// Routine label (e.g. "Push A")
    pub routine: String,
    /// Free-text exercise name
    pub exercise: String,
    /// Position of the set within the exercise, starting at 1
    pub set_number: u32,
    /// Load in kilograms
    pub weight: Option<f64>,
    /// Repetitions performed
    pub reps: Option<u32>,
    /// Duration for cardio entries
    pub duration: Option<f64>,
    /// Distance for cardio entries
    pub distance: Option<f64>,
}

impl WorkoutSet {
    /// Create a strength set with weight and reps
    #[must_use]
    pub fn strength(
        date: NaiveDate,
        routine: impl Into<String>,
        exercise: impl Into<String>,
        set_number: u32,
        weight: Option<f64>,
        reps: Option<u32>,
    ) -> Self {
        Self {
            date,
            time: None,
            routine: routine.into(),
            exercise: exercise.into(),
            set_number,
            weight,
            reps,
            duration: None,
            distance: None,
        }
    }
}

/// Coarse muscle-group taxonomy assigned to exercise names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MuscleGroup {
    /// Pectorals (bench presses, flyes, crossovers)
    Chest,
    /// Lats, traps and rhomboids (rows, pulldowns, pull-ups)
    Back,
    /// Quadriceps and hamstrings (squats, leg presses, lunges)
    Legs,
    /// Deltoids (overhead presses, raises)
    Shoulders,
    /// Elbow flexors (curls)
    Biceps,
    /// Elbow extensors (pushdowns, extensions, dips)
    Triceps,
    /// Hip extensors (hip thrusts, glute bridges)
    Glutes,
    /// Calf raises
    Calves,
    /// Abdominals and trunk (planks, crunches)
    Core,
    /// Conditioning work (treadmill, bike, running)
    Cardio,
    /// Catch-all for names matching no rule
    Other,
}

impl MuscleGroup {
    /// Every group, in classification-rule order followed by the catch-all
    pub const ALL: [Self; 11] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Glutes,
        Self::Calves,
        Self::Core,
        Self::Cardio,
        Self::Other,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Biceps => "Biceps",
            Self::Triceps => "Triceps",
            Self::Glutes => "Glutes",
            Self::Calves => "Calves",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
            Self::Other => "Other",
        }
    }

    /// Parse a display label, case-insensitively
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A logged set with its computed attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSet {
    /// Source record, never mutated
    #[serde(flatten)]
    pub set: WorkoutSet,
    /// `weight * reps`, missing if either operand is missing
    pub volume: Option<f64>,
    /// Epley estimate, missing for missing weight/reps or zero reps
    pub estimated_1rm: Option<f64>,
    /// Classifier output, always present
    pub muscle_group: MuscleGroup,
}

/// One (date, value) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation date (day, or the Sunday closing a week)
    pub date: NaiveDate,
    /// Observed value
    pub value: f64,
}

/// Date-keyed series with strictly increasing dates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

/// Series keyed by calendar day
pub type DailySeries = TimeSeries;
/// Series keyed by the Sunday closing each calendar week
pub type WeeklySeries = TimeSeries;

impl TimeSeries {
    /// Build a series, rejecting unordered or duplicate dates
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if dates are not strictly increasing
    pub fn try_from_points(points: Vec<SeriesPoint>) -> AppResult<Self> {
        if let Some(pair) = points.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(AppError::invalid_input(format!(
                "series dates must be strictly increasing: {} is followed by {}",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { points })
    }

    /// Build a series from a date-ordered map
    #[must_use]
    pub fn from_map(map: BTreeMap<NaiveDate, f64>) -> Self {
        Self {
            points: map
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        }
    }

    /// Keep the dates of `self` but replace the values
    ///
    /// Extra values are ignored and missing ones truncate the series.
    #[must_use]
    pub fn with_values(&self, values: &[f64]) -> Self {
        Self {
            points: self
                .points
                .iter()
                .zip(values)
                .map(|(point, &value)| SeriesPoint {
                    date: point.date,
                    value,
                })
                .collect(),
        }
    }

    /// Ordered observations
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Values in date order
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Dates in order
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Latest observation
    #[must_use]
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop non-finite values
    #[must_use]
    pub fn dropna(&self) -> Self {
        Self {
            points: self
                .points
                .iter()
                .copied()
                .filter(|p| p.value.is_finite())
                .collect(),
        }
    }
}

/// Which strategy produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Automatically selected ARIMA(p, d, q)
    Arima {
        /// Autoregressive order
        p: usize,
        /// Differencing order
        d: usize,
        /// Moving-average order
        q: usize,
    },
    /// Least-squares line over the week index
    LinearTrend,
}

/// One forecast week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Sunday closing the forecast week
    pub week: NaiveDate,
    /// Point forecast
    pub forecast: f64,
    /// Lower interval bound
    pub lower: f64,
    /// Upper interval bound
    pub upper: f64,
}

/// Weekly forecast anchored one week after the last observed week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Strategy that produced the points
    pub method: ForecastMethod,
    /// Forecast weeks in order
    pub points: Vec<ForecastPoint>,
}

/// Per-exercise ranking row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    /// Exercise name
    pub exercise: String,
    /// Classified muscle group
    pub muscle_group: MuscleGroup,
    /// Distinct training dates
    pub session_count: usize,
    /// Summed volume over all sets (missing volumes count as zero)
    pub total_volume: f64,
    /// Highest estimated 1RM, if any set has one
    pub peak_estimated_1rm: Option<f64>,
}

/// Headline numbers of a filtered period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMetrics {
    /// Distinct training dates
    pub training_days: usize,
    /// Distinct exercise names
    pub distinct_exercises: usize,
    /// Number of logged sets
    pub total_sets: usize,
    /// Mean volume over sets that have one, zero when none do
    pub mean_volume_per_set: f64,
}
