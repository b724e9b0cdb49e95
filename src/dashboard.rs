// ABOUTME: Dashboard query service answering overview, shortcut, browsing and per-exercise report queries
// ABOUTME: Owns the derived sets and turns filter inputs into plain serializable report data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dashboard
//!
//! Every query takes a [`DashboardFilter`] (inclusive date range and optional
//! routine) and returns plain data. Rendering is up to the caller.

use chrono::NaiveDate;
use liftlog_core::errors::AppError;
use liftlog_core::models::{
    BasicMetrics, DailySeries, DerivedSet, ExerciseSummary, ForecastResult, MuscleGroup,
    WeeklySeries, WorkoutSet,
};
use liftlog_intelligence::aggregation::{CalendarCell, ExerciseVolume, RoutineCount};
use liftlog_intelligence::{
    AggregationEngine, AlertEngine, AnalysisConfig, ExerciseClassifier, ForecastEngine,
    MetricDeriver, Reducer, SetFilter, SetMetric, SummaryOrdering,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::debug;

/// Global filter applied before every query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// First date included
    pub start: Option<NaiveDate>,
    /// Last date included
    pub end: Option<NaiveDate>,
    /// Only sets of this routine
    pub routine: Option<String>,
}

impl DashboardFilter {
    fn set_filter(&self) -> SetFilter {
        SetFilter {
            start: self.start,
            end: self.end,
            routine: self.routine.clone(),
            exercises: None,
        }
    }
}

/// A series with its moving-average trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesWithTrend {
    /// Observed values
    pub series: DailySeries,
    /// Trailing moving average over the same dates
    pub trend: DailySeries,
}

/// Overview page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    /// Headline counts
    pub metrics: BasicMetrics,
    /// Summed volume per training day
    pub daily_volume: SeriesWithTrend,
    /// Exercises with the highest total volume
    pub top_exercises: Vec<ExerciseVolume>,
    /// Sets per routine
    pub routines: Vec<RoutineCount>,
    /// Month × day volume cells
    pub calendar: Vec<CalendarCell>,
}

/// Exercise shortcut with its short label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortcut {
    /// Display alias
    pub alias: String,
    /// Aggregates used for ranking
    #[serde(flatten)]
    pub summary: ExerciseSummary,
}

/// Exercise name with its short label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasedExercise {
    /// Full exercise name
    pub exercise: String,
    /// Display alias
    pub alias: String,
}

/// One muscle group panel of the group browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPanel {
    /// Muscle group
    pub group: MuscleGroup,
    /// Distinct exercises trained in the group
    pub exercise_count: usize,
    /// Most logged exercises, by set count
    pub exercises: Vec<AliasedExercise>,
}

/// First-character filter for exercise search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartsWith {
    /// Names starting with this letter, case-insensitively
    Letter(char),
    /// Names whose first character is not a letter
    NonLetter,
}

impl StartsWith {
    fn matches(self, name: &str) -> bool {
        let Some(first) = name.chars().next() else {
            return false;
        };
        match self {
            Self::Letter(letter) => first.to_uppercase().eq(letter.to_uppercase()),
            Self::NonLetter => !first.is_alphabetic(),
        }
    }
}

impl FromStr for StartsWith {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some('#'), None) => Ok(Self::NonLetter),
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Self::Letter(c.to_ascii_uppercase())),
            _ => Err(AppError::invalid_input(format!(
                "starting letter must be A-Z or '#', got '{trimmed}'"
            ))),
        }
    }
}

/// Exercise search criteria; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseQuery {
    /// Only exercises of this muscle group
    pub group: Option<MuscleGroup>,
    /// Only names with this first character
    pub starts_with: Option<StartsWith>,
    /// Case-insensitive substring
    pub text: Option<String>,
}

/// Headline numbers for one exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseHeadline {
    /// Heaviest logged weight
    pub max_weight: Option<f64>,
    /// Highest estimated 1RM
    pub max_estimated_1rm: Option<f64>,
    /// Summed volume
    pub total_volume: f64,
}

/// One row of the set table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRow {
    /// Session date
    pub date: NaiveDate,
    /// Set number
    pub set_number: u32,
    /// Load
    pub weight: Option<f64>,
    /// Repetitions
    pub reps: Option<u32>,
    /// Weight times reps
    pub volume: Option<f64>,
}

/// Everything shown for one exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseReport {
    /// Exercise name
    pub exercise: String,
    /// Display alias
    pub alias: String,
    /// Muscle group
    pub muscle_group: MuscleGroup,
    /// Headline numbers
    pub headline: ExerciseHeadline,
    /// Daily max weight
    pub weight: SeriesWithTrend,
    /// Daily max estimated 1RM, empty when no set has one
    pub estimated_1rm: SeriesWithTrend,
    /// Daily summed volume
    pub volume: SeriesWithTrend,
    /// Weekly max estimated 1RM the forecast is fitted on
    pub weekly_1rm: WeeklySeries,
    /// Weekly 1RM forecast, absent with too little history or a zero horizon
    pub forecast: Option<ForecastResult>,
    /// Sets, newest date first then by set number
    pub sets: Vec<SetRow>,
    /// Advisory messages
    pub alerts: Vec<String>,
}

/// One side of an exercise comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedExercise {
    /// Exercise name
    pub exercise: String,
    /// Headline numbers
    pub headline: ExerciseHeadline,
    /// Daily max weight
    pub max_weight: DailySeries,
}

/// Two exercises side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// First exercise
    pub first: ComparedExercise,
    /// Second exercise
    pub second: ComparedExercise,
}

/// Query service over one loaded export
pub struct Dashboard {
    sets: Vec<DerivedSet>,
    config: AnalysisConfig,
    forecaster: ForecastEngine,
    alerts: AlertEngine,
}

impl Dashboard {
    /// Derive metrics for every set and build the engines from `config`
    #[must_use]
    pub fn new(sets: Vec<WorkoutSet>, config: AnalysisConfig) -> Self {
        let forecaster = ForecastEngine::new(&config.forecast);
        Self::with_forecast_engine(sets, config, forecaster)
    }

    /// Dashboard with a caller-supplied forecast engine
    #[must_use]
    pub fn with_forecast_engine(
        sets: Vec<WorkoutSet>,
        config: AnalysisConfig,
        forecaster: ForecastEngine,
    ) -> Self {
        let alerts = AlertEngine::new(config.alerts.clone());
        Self {
            sets: MetricDeriver::derive_all(sets),
            config,
            forecaster,
            alerts,
        }
    }

    /// Every derived set, in load order
    #[must_use]
    pub fn sets(&self) -> &[DerivedSet] {
        &self.sets
    }

    /// Analysis configuration in use
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// First and last logged dates
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.sets.iter().map(|s| s.set.date).min()?;
        let last = self.sets.iter().map(|s| s.set.date).max()?;
        Some((first, last))
    }

    /// Distinct non-empty routine labels, sorted
    #[must_use]
    pub fn routines(&self) -> Vec<String> {
        self.sets
            .iter()
            .map(|s| s.set.routine.as_str())
            .filter(|r| !r.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn filtered(&self, filter: &DashboardFilter) -> Vec<&DerivedSet> {
        AggregationEngine::filter(&self.sets, &filter.set_filter())
    }

    fn alias(&self, name: &str) -> String {
        ExerciseClassifier::make_alias(name, self.config.presentation.alias_max_len)
    }

    fn with_trend(&self, series: DailySeries) -> SeriesWithTrend {
        let trend = MetricDeriver::compute_trend(&series, self.config.trend.window);
        SeriesWithTrend { series, trend }
    }

    /// Headline counts, volume evolution, rankings and the consistency calendar
    #[must_use]
    pub fn overview(&self, filter: &DashboardFilter) -> OverviewReport {
        let sets = self.filtered(filter);
        let daily_volume = AggregationEngine::daily_sum(sets.iter().copied(), SetMetric::Volume);

        OverviewReport {
            metrics: AggregationEngine::basic_metrics(sets.iter().copied()),
            daily_volume: self.with_trend(daily_volume),
            top_exercises: AggregationEngine::top_exercises_by_volume(
                sets.iter().copied(),
                self.config.presentation.top_exercises_limit,
            ),
            routines: AggregationEngine::routine_counts(sets.iter().copied()),
            calendar: AggregationEngine::consistency_calendar(sets.iter().copied()),
        }
    }

    /// Top exercises ranked by the chosen ordering
    #[must_use]
    pub fn shortcuts(&self, filter: &DashboardFilter, ordering: SummaryOrdering) -> Vec<Shortcut> {
        let mut summaries = AggregationEngine::exercise_summary(self.filtered(filter));
        AggregationEngine::rank_summaries(&mut summaries, ordering);
        summaries
            .into_iter()
            .take(self.config.presentation.shortcut_limit)
            .map(|summary| Shortcut {
                alias: self.alias(&summary.exercise),
                summary,
            })
            .collect()
    }

    /// One panel per trained muscle group
    #[must_use]
    pub fn group_browser(&self, filter: &DashboardFilter) -> Vec<GroupPanel> {
        AggregationEngine::group_breakdown(
            self.filtered(filter),
            self.config.presentation.shortcut_limit,
        )
        .into_iter()
        .map(|breakdown| GroupPanel {
            group: breakdown.group,
            exercise_count: breakdown.exercise_count,
            exercises: breakdown
                .top_exercises
                .into_iter()
                .map(|exercise| AliasedExercise {
                    alias: self.alias(&exercise),
                    exercise,
                })
                .collect(),
        })
        .collect()
    }

    /// Sorted exercise names matching every set criterion of `query`
    #[must_use]
    pub fn search_exercises(&self, filter: &DashboardFilter, query: &ExerciseQuery) -> Vec<String> {
        let sets = self.filtered(filter);
        let in_group = sets
            .into_iter()
            .filter(|set| query.group.is_none_or(|group| set.muscle_group == group));
        let needle = query
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        AggregationEngine::exercise_names(in_group)
            .into_iter()
            .filter(|name| {
                needle
                    .as_deref()
                    .is_none_or(|needle| name.to_lowercase().contains(needle))
            })
            .filter(|name| query.starts_with.is_none_or(|start| start.matches(name)))
            .collect()
    }

    fn headline(sets: &[&DerivedSet]) -> ExerciseHeadline {
        let max_of = |metric: SetMetric| {
            sets.iter()
                .filter_map(|set| metric.value(set))
                .reduce(f64::max)
        };
        ExerciseHeadline {
            max_weight: max_of(SetMetric::Weight),
            max_estimated_1rm: max_of(SetMetric::EstimatedOneRepMax),
            total_volume: sets
                .iter()
                .filter_map(|set| SetMetric::Volume.value(set))
                .sum(),
        }
    }

    /// Full analysis of one exercise, `None` when it has no sets under the filter
    ///
    /// `horizon_weeks` overrides the configured forecast horizon; zero yields no forecast.
    #[must_use]
    pub fn exercise_report(
        &self,
        filter: &DashboardFilter,
        exercise: &str,
        horizon_weeks: Option<usize>,
    ) -> Option<ExerciseReport> {
        let sets = AggregationEngine::for_exercise(self.filtered(filter), exercise);
        let first = sets.first()?;
        debug!(exercise, sets = sets.len(), "building exercise report");

        let daily_1rm =
            AggregationEngine::daily_max(sets.iter().copied(), SetMetric::EstimatedOneRepMax);
        let horizon = horizon_weeks.unwrap_or(self.config.forecast.horizon_weeks);
        let forecast = self.forecaster.forecast_with_horizon(&daily_1rm, horizon);
        let weekly_1rm = AggregationEngine::resample_weekly(&daily_1rm, Reducer::Max);

        let mut rows: Vec<SetRow> = sets
            .iter()
            .map(|set| SetRow {
                date: set.set.date,
                set_number: set.set.set_number,
                weight: set.set.weight,
                reps: set.set.reps,
                volume: set.volume,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.set_number.cmp(&b.set_number))
        });

        Some(ExerciseReport {
            exercise: exercise.to_owned(),
            alias: self.alias(exercise),
            muscle_group: first.muscle_group,
            headline: Self::headline(&sets),
            weight: self.with_trend(AggregationEngine::daily_max(
                sets.iter().copied(),
                SetMetric::Weight,
            )),
            estimated_1rm: self.with_trend(daily_1rm),
            volume: self.with_trend(AggregationEngine::daily_sum(
                sets.iter().copied(),
                SetMetric::Volume,
            )),
            weekly_1rm,
            forecast,
            sets: rows,
            alerts: self.alerts.generate_alerts(sets.iter().copied()),
        })
    }

    fn compared(&self, filter: &DashboardFilter, exercise: &str) -> ComparedExercise {
        let sets = AggregationEngine::for_exercise(self.filtered(filter), exercise);
        ComparedExercise {
            exercise: exercise.to_owned(),
            headline: Self::headline(&sets),
            max_weight: AggregationEngine::daily_max(sets.iter().copied(), SetMetric::Weight),
        }
    }

    /// Daily max weight and headline numbers of two exercises
    #[must_use]
    pub fn compare(&self, filter: &DashboardFilter, first: &str, second: &str) -> ComparisonReport {
        ComparisonReport {
            first: self.compared(filter, first),
            second: self.compared(filter, second),
        }
    }
}
