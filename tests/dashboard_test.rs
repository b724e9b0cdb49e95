// ABOUTME: Integration tests for the dashboard query service over a multi-week workout log
// ABOUTME: Validates filters, shortcuts, group browsing, search and per-exercise reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::cast_precision_loss)] // Small week indices

mod common;

use chrono::Duration;
use common::{day, first_monday, set, weekly_single_reps};
use liftlog::dashboard::{Dashboard, DashboardFilter, ExerciseQuery, StartsWith};
use liftlog::intelligence::{AnalysisConfig, ForecastEngine, SummaryOrdering};
use liftlog::models::{ForecastMethod, MuscleGroup, WorkoutSet};

/// Ten weeks: steady bench progress, flat squat, occasional rows and planks
fn training_log() -> Vec<WorkoutSet> {
    let mut sets = Vec::new();
    for week in 0..10 {
        let monday = first_monday() + Duration::weeks(week);
        let thursday = monday + Duration::days(3);
        let bench = 2.5_f64.mul_add(week as f64, 80.0);

        sets.push(set(monday, "Supino Reto", 1, bench, 8));
        sets.push(set(monday, "Supino Reto", 2, bench, 6));

        let mut squat = set(thursday, "Agachamento Livre", 1, 100.0, 5);
        squat.routine = "Legs".into();
        sets.push(squat);

        if week % 3 == 0 {
            sets.push(set(monday, "Remada Curvada", 1, 60.0, 10));
        }
    }
    sets.push(WorkoutSet::strength(
        day(2024, 1, 2),
        "Core",
        "Prancha",
        1,
        None,
        None,
    ));
    sets
}

fn dashboard() -> Dashboard {
    Dashboard::new(training_log(), AnalysisConfig::default())
}

#[test]
fn test_date_range_and_routines() {
    let dashboard = dashboard();

    assert_eq!(
        dashboard.date_range(),
        Some((day(2024, 1, 1), day(2024, 3, 7)))
    );
    assert_eq!(dashboard.routines(), vec!["Core", "Legs", "Push"]);
    assert_eq!(dashboard.sets().len(), 10 * 3 + 4 + 1);
}

#[test]
fn test_overview_respects_filter() {
    let dashboard = dashboard();
    let filter = DashboardFilter {
        start: Some(day(2024, 1, 1)),
        end: Some(day(2024, 1, 7)),
        routine: Some("Push".into()),
    };
    let overview = dashboard.overview(&filter);

    assert_eq!(overview.metrics.training_days, 1);
    assert_eq!(overview.metrics.total_sets, 3);
    assert_eq!(overview.routines.len(), 1);
    assert_eq!(overview.daily_volume.series.len(), 1);
    assert_eq!(overview.daily_volume.trend.len(), 1);
    assert!((overview.daily_volume.series.values()[0] - (640.0 + 480.0 + 600.0)).abs() < 0.001);
}

#[test]
fn test_overview_unfiltered() {
    let overview = dashboard().overview(&DashboardFilter::default());

    assert_eq!(overview.metrics.distinct_exercises, 4);
    assert_eq!(overview.top_exercises[0].exercise, "Supino Reto");
    assert_eq!(overview.routines[0].routine, "Push");
    assert_eq!(overview.calendar.len(), overview.metrics.training_days);
}

#[test]
fn test_shortcuts_ranked_with_aliases() {
    let shortcuts =
        dashboard().shortcuts(&DashboardFilter::default(), SummaryOrdering::PeakOneRepMax);

    assert_eq!(shortcuts[0].summary.exercise, "Supino Reto");
    assert_eq!(shortcuts[0].alias, "Supino Reto");
    assert_eq!(shortcuts[1].summary.exercise, "Agachamento Livre");
    assert_eq!(shortcuts[1].alias, "Agachamento Liv…");
    assert_eq!(shortcuts.last().unwrap().summary.exercise, "Prancha");
}

#[test]
fn test_group_browser_panels() {
    let panels = dashboard().group_browser(&DashboardFilter::default());
    let groups: Vec<MuscleGroup> = panels.iter().map(|p| p.group).collect();

    assert_eq!(
        groups,
        vec![
            MuscleGroup::Back,
            MuscleGroup::Chest,
            MuscleGroup::Core,
            MuscleGroup::Legs
        ]
    );
    assert_eq!(panels[1].exercises[0].exercise, "Supino Reto");
    assert_eq!(panels[1].exercise_count, 1);
}

#[test]
fn test_search_exercises() {
    let dashboard = dashboard();
    let all = DashboardFilter::default();

    let chest = ExerciseQuery {
        group: Some(MuscleGroup::Chest),
        ..ExerciseQuery::default()
    };
    assert_eq!(dashboard.search_exercises(&all, &chest), vec!["Supino Reto"]);

    let letter = ExerciseQuery {
        starts_with: Some("r".parse().unwrap()),
        ..ExerciseQuery::default()
    };
    assert_eq!(dashboard.search_exercises(&all, &letter), vec!["Remada Curvada"]);

    let text = ExerciseQuery {
        text: Some("  LIVRE ".into()),
        ..ExerciseQuery::default()
    };
    assert_eq!(dashboard.search_exercises(&all, &text), vec!["Agachamento Livre"]);

    let none = ExerciseQuery {
        starts_with: Some(StartsWith::NonLetter),
        ..ExerciseQuery::default()
    };
    assert!(dashboard.search_exercises(&all, &none).is_empty());
}

#[test]
fn test_starts_with_parsing() {
    assert_eq!("s".parse::<StartsWith>().unwrap(), StartsWith::Letter('S'));
    assert_eq!("#".parse::<StartsWith>().unwrap(), StartsWith::NonLetter);
    assert!("ab".parse::<StartsWith>().is_err());
    assert!("1".parse::<StartsWith>().is_err());
}

#[test]
fn test_exercise_report_for_progressing_lift() {
    let report = dashboard()
        .exercise_report(&DashboardFilter::default(), "Supino Reto", Some(4))
        .unwrap();

    assert_eq!(report.muscle_group, MuscleGroup::Chest);
    assert_eq!(report.headline.max_weight, Some(102.5));
    assert_eq!(report.weight.series.len(), 10);
    assert_eq!(report.weekly_1rm.len(), 10);
    assert!(report.alerts.is_empty());

    let forecast = report.forecast.unwrap();
    assert_eq!(forecast.points.len(), 4);
    assert_eq!(forecast.points[0].week, day(2024, 3, 17));

    // Newest date first, then ascending set number
    assert_eq!(report.sets[0].date, day(2024, 3, 4));
    assert_eq!(report.sets[0].set_number, 1);
    assert_eq!(report.sets[1].set_number, 2);
}

#[test]
fn test_exercise_report_zero_horizon_has_no_forecast() {
    let report = dashboard()
        .exercise_report(&DashboardFilter::default(), "Supino Reto", Some(0))
        .unwrap();

    assert!(report.forecast.is_none());
    assert_eq!(report.weekly_1rm.len(), 10);
}

#[test]
fn test_exercise_report_flags_plateau() {
    let report = dashboard()
        .exercise_report(&DashboardFilter::default(), "Agachamento Livre", None)
        .unwrap();

    assert_eq!(report.alerts.len(), 1);
    assert!(report.alerts[0].contains("plateau"));
    assert_eq!(
        report.forecast.unwrap().points.len(),
        AnalysisConfig::default().forecast.horizon_weeks
    );
}

#[test]
fn test_exercise_report_without_history() {
    let dashboard = dashboard();
    let all = DashboardFilter::default();

    assert!(dashboard.exercise_report(&all, "Rosca Direta", None).is_none());

    let plank = dashboard.exercise_report(&all, "Prancha", None).unwrap();
    assert!(plank.forecast.is_none());
    assert!(plank.estimated_1rm.series.is_empty());
    assert!(plank.alerts.is_empty());
}

#[test]
fn test_rows_not_enough_for_forecast() {
    // Four logged weeks is below the five-observation minimum
    let report = dashboard()
        .exercise_report(&DashboardFilter::default(), "Remada Curvada", None)
        .unwrap();
    assert!(report.forecast.is_none());
    assert_eq!(report.weekly_1rm.len(), 4);
}

#[test]
fn test_custom_forecast_engine() {
    let config = AnalysisConfig::default();
    let engine = ForecastEngine::new(&config.forecast);
    let one_rms: Vec<f64> = (0..20).map(|i| 2.0_f64.mul_add(f64::from(i), 100.0)).collect();
    let dashboard = Dashboard::with_forecast_engine(
        weekly_single_reps("Supino Reto", &one_rms),
        config,
        engine,
    );

    let report = dashboard
        .exercise_report(&DashboardFilter::default(), "Supino Reto", Some(2))
        .unwrap();
    assert_eq!(
        report.forecast.unwrap().method,
        ForecastMethod::Arima { p: 0, d: 1, q: 0 }
    );
}

#[test]
fn test_compare_two_exercises() {
    let comparison =
        dashboard().compare(&DashboardFilter::default(), "Supino Reto", "Remada Curvada");

    assert_eq!(comparison.first.exercise, "Supino Reto");
    assert_eq!(comparison.first.max_weight.len(), 10);
    assert_eq!(comparison.second.headline.max_weight, Some(60.0));
    assert!((comparison.second.headline.total_volume - 4.0 * 600.0).abs() < 0.001);
}
