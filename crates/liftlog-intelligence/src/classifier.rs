// ABOUTME: Keyword classifier mapping free-text exercise names to a fixed muscle-group taxonomy
// ABOUTME: Also produces compact display aliases for exercise names in dense listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Classification
//!
//! Names from the workout app are free text, mostly Portuguese with some
//! English. Classification lower-cases and trims the name and scans an
//! ordered rule list; the first rule with any keyword contained in the name
//! wins, so rule order is part of the contract. Names matching no rule fall
//! into [`MuscleGroup::Other`].

use liftlog_core::constants::naming::{ALIAS_ELLIPSIS, ALIAS_TWO_WORD_MIN_LEN};
use liftlog_core::models::MuscleGroup;
use regex::Regex;
use std::sync::LazyLock;

/// One ordered classification rule
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Substrings that trigger the rule (already lower-case)
    pub keywords: &'static [&'static str],
    /// Group assigned when the rule fires
    pub group: MuscleGroup,
}

impl ClassificationRule {
    /// Whether any keyword occurs in the normalized name
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k))
    }
}

/// Classification rules in evaluation order
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        keywords: &["supino", "bench", "crucifixo", "crossover", "peck deck", "fly"],
        group: MuscleGroup::Chest,
    },
    ClassificationRule {
        keywords: &[
            "remada",
            "puxada",
            "pulldown",
            "barra fixa",
            "serrote",
            "pullover",
            "row",
        ],
        group: MuscleGroup::Back,
    },
    ClassificationRule {
        keywords: &[
            "agachamento",
            "squat",
            "leg press",
            "hack",
            "afundo",
            "lunge",
            "extensora",
            "flexora",
            "adutora",
            "abdutora",
        ],
        group: MuscleGroup::Legs,
    },
    ClassificationRule {
        keywords: &[
            "desenvolvimento",
            "elevação lateral",
            "elevação frontal",
            "arnold",
            "shoulder",
            "militar",
        ],
        group: MuscleGroup::Shoulders,
    },
    ClassificationRule {
        keywords: &["rosca", "curl", "bíceps", "biceps"],
        group: MuscleGroup::Biceps,
    },
    ClassificationRule {
        keywords: &["tríceps", "triceps", "paralelas", "mergulho", "pulley", "testa"],
        group: MuscleGroup::Triceps,
    },
    ClassificationRule {
        keywords: &[
            "glúteo",
            "gluteo",
            "hip thrust",
            "coice",
            "abdução",
            "elevação pélvica",
        ],
        group: MuscleGroup::Glutes,
    },
    ClassificationRule {
        keywords: &["panturrilha", "gemelar", "calf"],
        group: MuscleGroup::Calves,
    },
    ClassificationRule {
        keywords: &["abdominal", "abs", "prancha", "crunch", "core"],
        group: MuscleGroup::Core,
    },
    ClassificationRule {
        keywords: &["esteira", "bike", "spinning", "corrida", "remador", "rower"],
        group: MuscleGroup::Cardio,
    },
];

/// Parenthesized qualifiers such as "(barra)" with their leading whitespace
/// Stored as Option so a compilation failure degrades to no stripping
static PARENTHESIZED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").ok());

/// Muscle-group classifier and alias generator
pub struct ExerciseClassifier;

impl ExerciseClassifier {
    fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Classify an exercise name; total and deterministic
    #[must_use]
    pub fn classify(name: &str) -> MuscleGroup {
        let normalized = Self::normalize(name);
        RULES
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map_or(MuscleGroup::Other, |rule| rule.group)
    }

    /// Classify a possibly missing name; missing names are `Other`
    #[must_use]
    pub fn classify_opt(name: Option<&str>) -> MuscleGroup {
        name.map_or(MuscleGroup::Other, Self::classify)
    }

    /// Every group whose rule matches, in rule order
    #[must_use]
    pub fn matching_groups(name: &str) -> Vec<MuscleGroup> {
        let normalized = Self::normalize(name);
        RULES
            .iter()
            .filter(|rule| rule.matches(&normalized))
            .map(|rule| rule.group)
            .collect()
    }

    /// Whether more than one rule matches, meaning rule order decided the group
    #[must_use]
    pub fn is_ambiguous(name: &str) -> bool {
        Self::matching_groups(name).len() > 1
    }

    /// Compact display label of at most `max_len` characters
    ///
    /// Drops parenthesized qualifiers, then keeps the first two words when they
    /// span at least six characters, else the first three words when there are
    /// three, else the whole stripped name. Overlong results are cut to
    /// `max_len - 1` characters plus an ellipsis.
    #[must_use]
    pub fn make_alias(name: &str, max_len: usize) -> String {
        if name.is_empty() || max_len == 0 {
            return String::new();
        }

        let stripped = PARENTHESIZED
            .as_ref()
            .map_or_else(|| name.to_owned(), |re| re.replace_all(name, "").into_owned());
        let stripped = stripped.trim();

        let parts: Vec<&str> = stripped.split_whitespace().collect();
        let first_two = parts.iter().take(2).copied().collect::<Vec<_>>().join(" ");
        let alias = if first_two.chars().count() >= ALIAS_TWO_WORD_MIN_LEN {
            first_two
        } else if parts.len() >= 3 {
            parts[..3].join(" ")
        } else {
            stripped.to_owned()
        };

        if alias.chars().count() <= max_len {
            return alias;
        }

        let mut truncated: String = alias.chars().take(max_len - 1).collect();
        truncated.truncate(truncated.trim_end().len());
        truncated.push(ALIAS_ELLIPSIS);
        truncated
    }
}
