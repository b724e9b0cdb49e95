// ABOUTME: Aggregation of derived sets into daily and weekly series and per-exercise summaries
// ABOUTME: Applies date/routine/exercise filters and builds rankings, calendars and group breakdowns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Aggregation Engine
//!
//! Weeks are calendar weeks ending on Sunday and are keyed by that Sunday.
//! `resample_weekly` is sparse: weeks without observations are absent.
//! `resample_weekly_dense` fills every week between the first and last
//! observation, which is what contiguous volume windows need.

use chrono::{Datelike, Duration, NaiveDate};
use liftlog_core::models::{
    BasicMetrics, DailySeries, DerivedSet, ExerciseSummary, MuscleGroup, TimeSeries, WeeklySeries,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-set value that can be aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetMetric {
    /// Load lifted
    Weight,
    /// Epley estimate
    EstimatedOneRepMax,
    /// Weight times reps
    Volume,
}

impl SetMetric {
    /// Value of this metric for a set, `None` when missing or not finite
    #[must_use]
    pub fn value(self, set: &DerivedSet) -> Option<f64> {
        let value = match self {
            Self::Weight => set.set.weight,
            Self::EstimatedOneRepMax => set.estimated_1rm,
            Self::Volume => set.volume,
        };
        value.filter(|v| v.is_finite())
    }
}

/// How a bucket of observations collapses to one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    /// Largest value, for weight and 1RM
    Max,
    /// Total, for volume
    Sum,
}

impl Reducer {
    fn fold(self, acc: f64, value: f64) -> f64 {
        match self {
            Self::Max => acc.max(value),
            Self::Sum => acc + value,
        }
    }
}

/// User-selected filter parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFilter {
    /// First date included
    pub start: Option<NaiveDate>,
    /// Last date included
    pub end: Option<NaiveDate>,
    /// Only sets of this routine
    pub routine: Option<String>,
    /// Only sets of these exercises
    pub exercises: Option<Vec<String>>,
}

impl SetFilter {
    /// Whether a set passes every active criterion
    #[must_use]
    pub fn matches(&self, set: &DerivedSet) -> bool {
        let date = set.set.date;
        self.start.is_none_or(|start| date >= start)
            && self.end.is_none_or(|end| date <= end)
            && self
                .routine
                .as_deref()
                .is_none_or(|routine| set.set.routine == routine)
            && self
                .exercises
                .as_ref()
                .is_none_or(|names| names.iter().any(|n| *n == set.set.exercise))
    }
}

/// Order used to rank exercise summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrdering {
    /// Most distinct training dates first
    #[default]
    Sessions,
    /// Highest total volume first
    Volume,
    /// Highest peak estimated 1RM first, missing last
    PeakOneRepMax,
}

/// Total volume of one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseVolume {
    /// Exercise name
    pub exercise: String,
    /// Summed volume
    pub volume: f64,
}

/// Number of sets logged under one routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineCount {
    /// Routine label
    pub routine: String,
    /// Logged sets
    pub sets: usize,
}

/// Volume trained on one day, laid out by month and day of month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Month as `YYYY-MM`
    pub month: String,
    /// Day of month (1-31)
    pub day: u32,
    /// Summed volume
    pub volume: f64,
}

/// Exercises trained within one muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    /// Muscle group
    pub group: MuscleGroup,
    /// Distinct exercises in the group
    pub exercise_count: usize,
    /// Most frequently logged exercises, by set count
    pub top_exercises: Vec<String>,
}

/// Descending float comparison with NaN treated as equal
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Groups derived sets into series, summaries and listings
pub struct AggregationEngine;

impl AggregationEngine {
    /// Sets passing the filter, in input order
    #[must_use]
    pub fn filter<'a>(sets: &'a [DerivedSet], filter: &SetFilter) -> Vec<&'a DerivedSet> {
        sets.iter().filter(|set| filter.matches(set)).collect()
    }

    /// Sets of one exercise, in input order
    #[must_use]
    pub fn for_exercise<'a, I>(sets: I, exercise: &str) -> Vec<&'a DerivedSet>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        sets.into_iter()
            .filter(|set| set.set.exercise == exercise)
            .collect()
    }

    /// Per-date maximum of `metric`; dates with no value are omitted
    #[must_use]
    pub fn daily_max<'a, I>(sets: I, metric: SetMetric) -> DailySeries
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for set in sets {
            if let Some(value) = metric.value(set) {
                by_date
                    .entry(set.set.date)
                    .and_modify(|acc| *acc = acc.max(value))
                    .or_insert(value);
            }
        }
        TimeSeries::from_map(by_date)
    }

    /// Per-date sum of `metric`; a date whose sets all lack the metric sums to zero
    #[must_use]
    pub fn daily_sum<'a, I>(sets: I, metric: SetMetric) -> DailySeries
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for set in sets {
            *by_date.entry(set.set.date).or_insert(0.0) += metric.value(set).unwrap_or(0.0);
        }
        TimeSeries::from_map(by_date)
    }

    /// Sunday closing the calendar week that contains `date`
    #[must_use]
    pub fn week_ending(date: NaiveDate) -> NaiveDate {
        let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
        date + Duration::days(days_to_sunday)
    }

    /// Bucket points into Sunday-ending weeks and reduce each bucket
    ///
    /// Non-finite values are ignored and weeks without observations are absent.
    #[must_use]
    pub fn resample_weekly(series: &DailySeries, reducer: Reducer) -> WeeklySeries {
        let mut by_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for point in series.points().iter().filter(|p| p.value.is_finite()) {
            by_week
                .entry(Self::week_ending(point.date))
                .and_modify(|acc| *acc = reducer.fold(*acc, point.value))
                .or_insert(point.value);
        }
        TimeSeries::from_map(by_week)
    }

    /// Like [`Self::resample_weekly`] but every Sunday from the first to the last
    /// observed week is present, with `fill` for weeks without observations
    #[must_use]
    pub fn resample_weekly_dense(
        series: &DailySeries,
        reducer: Reducer,
        fill: f64,
    ) -> WeeklySeries {
        let sparse = Self::resample_weekly(series, reducer);
        let points = sparse.points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return sparse;
        };

        let mut by_week: BTreeMap<NaiveDate, f64> =
            points.iter().map(|p| (p.date, p.value)).collect();
        let mut week = first.date;
        while week < last.date {
            week += Duration::weeks(1);
            by_week.entry(week).or_insert(fill);
        }
        TimeSeries::from_map(by_week)
    }

    /// One summary row per exercise, sorted by exercise name
    #[must_use]
    pub fn exercise_summary<'a, I>(sets: I) -> Vec<ExerciseSummary>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        struct Accumulator {
            dates: BTreeSet<NaiveDate>,
            total_volume: f64,
            peak: Option<f64>,
        }

        let mut by_exercise: BTreeMap<(&str, MuscleGroup), Accumulator> = BTreeMap::new();
        for set in sets {
            let acc = by_exercise
                .entry((set.set.exercise.as_str(), set.muscle_group))
                .or_insert_with(|| Accumulator {
                    dates: BTreeSet::new(),
                    total_volume: 0.0,
                    peak: None,
                });
            acc.dates.insert(set.set.date);
            acc.total_volume += SetMetric::Volume.value(set).unwrap_or(0.0);
            if let Some(one_rm) = SetMetric::EstimatedOneRepMax.value(set) {
                acc.peak = Some(acc.peak.map_or(one_rm, |peak| peak.max(one_rm)));
            }
        }

        by_exercise
            .into_iter()
            .map(|((exercise, muscle_group), acc)| ExerciseSummary {
                exercise: exercise.to_owned(),
                muscle_group,
                session_count: acc.dates.len(),
                total_volume: acc.total_volume,
                peak_estimated_1rm: acc.peak,
            })
            .collect()
    }

    /// Sort summaries for a ranking view; ties keep their existing order
    pub fn rank_summaries(summaries: &mut [ExerciseSummary], ordering: SummaryOrdering) {
        match ordering {
            SummaryOrdering::Sessions => {
                summaries.sort_by(|a, b| b.session_count.cmp(&a.session_count));
            }
            SummaryOrdering::Volume => {
                summaries.sort_by(|a, b| descending(a.total_volume, b.total_volume));
            }
            SummaryOrdering::PeakOneRepMax => {
                summaries.sort_by(|a, b| match (a.peak_estimated_1rm, b.peak_estimated_1rm) {
                    (Some(x), Some(y)) => descending(x, y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                });
            }
        }
    }

    /// Headline numbers for a set of logged sets
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: set counts are far below 2^52
    pub fn basic_metrics<'a, I>(sets: I) -> BasicMetrics
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let mut dates = BTreeSet::new();
        let mut exercises = BTreeSet::new();
        let mut total_sets = 0;
        let (mut volume_sum, mut volume_count) = (0.0, 0_usize);

        for set in sets {
            total_sets += 1;
            dates.insert(set.set.date);
            exercises.insert(set.set.exercise.as_str());
            if let Some(volume) = SetMetric::Volume.value(set) {
                volume_sum += volume;
                volume_count += 1;
            }
        }

        BasicMetrics {
            training_days: dates.len(),
            distinct_exercises: exercises.len(),
            total_sets,
            mean_volume_per_set: if volume_count == 0 {
                0.0
            } else {
                volume_sum / volume_count as f64
            },
        }
    }

    /// Exercises with the highest summed volume, at most `limit`
    #[must_use]
    pub fn top_exercises_by_volume<'a, I>(sets: I, limit: usize) -> Vec<ExerciseVolume>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for set in sets {
            *totals.entry(set.set.exercise.as_str()).or_insert(0.0) +=
                SetMetric::Volume.value(set).unwrap_or(0.0);
        }

        let mut ranked: Vec<ExerciseVolume> = totals
            .into_iter()
            .map(|(exercise, volume)| ExerciseVolume {
                exercise: exercise.to_owned(),
                volume,
            })
            .collect();
        ranked.sort_by(|a, b| descending(a.volume, b.volume));
        ranked.truncate(limit);
        ranked
    }

    /// Set counts per routine, most frequent first, ties by name
    #[must_use]
    pub fn routine_counts<'a, I>(sets: I) -> Vec<RoutineCount>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for set in sets {
            *counts.entry(set.set.routine.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<RoutineCount> = counts
            .into_iter()
            .map(|(routine, sets)| RoutineCount {
                routine: routine.to_owned(),
                sets,
            })
            .collect();
        ranked.sort_by(|a, b| b.sets.cmp(&a.sets));
        ranked
    }

    /// Daily summed volume laid out as month × day-of-month cells
    #[must_use]
    pub fn consistency_calendar<'a, I>(sets: I) -> Vec<CalendarCell>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        Self::daily_sum(sets, SetMetric::Volume)
            .points()
            .iter()
            .map(|point| CalendarCell {
                month: point.date.format("%Y-%m").to_string(),
                day: point.date.day(),
                volume: point.value,
            })
            .collect()
    }

    /// Per muscle group, sorted by label: exercise count and most logged exercises
    #[must_use]
    pub fn group_breakdown<'a, I>(sets: I, limit: usize) -> Vec<GroupBreakdown>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let mut by_group: HashMap<MuscleGroup, BTreeMap<&str, usize>> = HashMap::new();
        for set in sets {
            *by_group
                .entry(set.muscle_group)
                .or_default()
                .entry(set.set.exercise.as_str())
                .or_insert(0) += 1;
        }

        let mut groups: Vec<GroupBreakdown> = by_group
            .into_iter()
            .map(|(group, counts)| {
                let exercise_count = counts.len();
                let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1));
                GroupBreakdown {
                    group,
                    exercise_count,
                    top_exercises: ranked
                        .into_iter()
                        .take(limit)
                        .map(|(name, _)| name.to_owned())
                        .collect(),
                }
            })
            .collect();
        groups.sort_by(|a, b| a.group.label().cmp(b.group.label()));
        groups
    }

    /// Distinct exercise names in sorted order
    #[must_use]
    pub fn exercise_names<'a, I>(sets: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        sets.into_iter()
            .map(|set| set.set.exercise.as_str())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}
