// ABOUTME: Unit tests for keyword-based muscle group classification and alias generation
// ABOUTME: Validates first-match rule order, ambiguity reporting and alias length guarantees
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use liftlog::intelligence::classifier::RULES;
use liftlog::intelligence::ExerciseClassifier;
use liftlog::models::MuscleGroup;

#[test]
fn test_classify_known_exercises() {
    let cases = [
        ("Supino Reto", MuscleGroup::Chest),
        ("Crucifixo Inclinado", MuscleGroup::Chest),
        ("Remada Curvada", MuscleGroup::Back),
        ("Puxada Frontal", MuscleGroup::Back),
        ("Agachamento Livre", MuscleGroup::Legs),
        ("Leg Press 45", MuscleGroup::Legs),
        ("Elevação Lateral", MuscleGroup::Shoulders),
        ("Desenvolvimento Militar", MuscleGroup::Shoulders),
        ("Rosca Direta (barra)", MuscleGroup::Biceps),
        ("Tríceps Testa", MuscleGroup::Triceps),
        ("Hip Thrust", MuscleGroup::Glutes),
        ("Panturrilha em Pé", MuscleGroup::Calves),
        ("Prancha", MuscleGroup::Core),
        ("Esteira", MuscleGroup::Cardio),
    ];
    for (name, expected) in cases {
        assert_eq!(ExerciseClassifier::classify(name), expected, "{name}");
    }
}

#[test]
fn test_classify_is_case_and_whitespace_insensitive() {
    assert_eq!(ExerciseClassifier::classify("  SUPINO INCLINADO "), MuscleGroup::Chest);
    assert_eq!(ExerciseClassifier::classify("bench press"), MuscleGroup::Chest);
}

#[test]
fn test_unmatched_and_missing_names_are_other() {
    assert_eq!(ExerciseClassifier::classify("xyz-unknown-move"), MuscleGroup::Other);
    assert_eq!(ExerciseClassifier::classify(""), MuscleGroup::Other);
    assert_eq!(ExerciseClassifier::classify_opt(None), MuscleGroup::Other);
    assert_eq!(
        ExerciseClassifier::classify_opt(Some("Remada Baixa")),
        MuscleGroup::Back
    );
}

#[test]
fn test_first_matching_rule_wins() {
    let name = "Supino com Remada";
    assert_eq!(ExerciseClassifier::classify(name), MuscleGroup::Chest);
    assert_eq!(
        ExerciseClassifier::matching_groups(name),
        vec![MuscleGroup::Chest, MuscleGroup::Back]
    );
    assert!(ExerciseClassifier::is_ambiguous(name));
}

#[test]
fn test_rule_order_decides_ambiguous_names() {
    // "pulley" is a triceps keyword but "puxada" matches the earlier back rule
    assert_eq!(ExerciseClassifier::classify("Puxada Pulley"), MuscleGroup::Back);
    assert_eq!(ExerciseClassifier::classify("Tríceps Pulley"), MuscleGroup::Triceps);
}

#[test]
fn test_single_rule_names_are_not_ambiguous() {
    assert!(!ExerciseClassifier::is_ambiguous("Supino Reto"));
    assert!(!ExerciseClassifier::is_ambiguous("xyz-unknown-move"));
    assert!(ExerciseClassifier::matching_groups("xyz-unknown-move").is_empty());
}

#[test]
fn test_rules_cover_every_group_but_other() {
    let groups: Vec<MuscleGroup> = RULES.iter().map(|rule| rule.group).collect();
    assert_eq!(groups.len(), 10);
    assert_eq!(&groups[..], &MuscleGroup::ALL[..10]);
}

#[test]
fn test_classify_is_deterministic() {
    for name in ["Supino Reto", "Rower", "Abdominal Crunch", "???"] {
        assert_eq!(
            ExerciseClassifier::classify(name),
            ExerciseClassifier::classify(name)
        );
    }
}

#[test]
fn test_alias_strips_parenthesized_qualifier() {
    let alias = ExerciseClassifier::make_alias("Rosca Direta (barra)", 16);
    assert_eq!(alias, "Rosca Direta");
    assert!(!alias.contains("barra"));
}

#[test]
fn test_alias_word_selection() {
    assert_eq!(ExerciseClassifier::make_alias("Leg Press 45", 16), "Leg Press");
    assert_eq!(ExerciseClassifier::make_alias("Le Pe Xy Zw", 16), "Le Pe Xy");
    assert_eq!(ExerciseClassifier::make_alias("Abs", 16), "Abs");
    assert_eq!(ExerciseClassifier::make_alias("  Supino  ", 16), "Supino");
}

#[test]
fn test_alias_truncates_with_ellipsis() {
    let alias = ExerciseClassifier::make_alias("Desenvolvimento Militar", 16);
    assert_eq!(alias, "Desenvolvimento…");
    assert_eq!(alias.chars().count(), 16);

    let alias = ExerciseClassifier::make_alias("Agachamento Sumô", 8);
    assert_eq!(alias, "Agacham…");
}

#[test]
fn test_alias_counts_characters_not_bytes() {
    assert_eq!(
        ExerciseClassifier::make_alias("Elevação Lateral com Halteres", 16),
        "Elevação Lateral"
    );
}

#[test]
fn test_alias_trims_before_ellipsis() {
    // The cut lands right after a space, which is dropped before the ellipsis
    assert_eq!(ExerciseClassifier::make_alias("Abc Defghij", 5), "Abc…");
}

#[test]
fn test_alias_empty_input() {
    assert_eq!(ExerciseClassifier::make_alias("", 16), "");
    assert_eq!(ExerciseClassifier::make_alias("Supino", 0), "");
}

#[test]
fn test_alias_never_exceeds_max_len() {
    let names = [
        "Supino Reto com Barra",
        "Remada Unilateral (halter) Pegada Neutra",
        "A B C D E F G",
        "Extensora",
        "Cadeira Abdutora Máquina",
        "(só parênteses)",
        "Glúteo Coice na Polia Baixa",
    ];
    for name in names {
        for max_len in 1..=20 {
            let alias = ExerciseClassifier::make_alias(name, max_len);
            assert!(
                alias.chars().count() <= max_len,
                "{name:?} with {max_len} gave {alias:?}"
            );
        }
    }
}
