//! Ordered first-match-wins decision lists for profile fields.
//!
//! Each field is an explicit sequence of `(condition, outcome)` pairs; the
//! first condition that holds decides the value, otherwise the list default
//! applies. Lists are plain data so each can be inspected and tested alone.

use super::lexicon::{duration_value, is_experience_duration, unreachable_tags};
use super::types::ClaimSet;

#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// At least one of the tags is present.
    AnyOf(&'static [&'static str]),
    /// At least one tag reads as a duration.
    AnyDuration,
}

impl Condition {
    pub fn holds(&self, flat: &ClaimSet) -> bool {
        match self {
            Self::AnyOf(tags) => flat.contains_any(tags),
            Self::AnyDuration => flat.iter().any(is_experience_duration),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Fixed(&'static str),
    /// The duration tag with the smallest leading number; ties go to the
    /// lexicographically smaller tag.
    SmallestDuration,
    /// One of two values depending on whether `tag` is present.
    Either {
        tag: &'static str,
        present: &'static str,
        absent: &'static str,
    },
}

impl Outcome {
    fn resolve(&self, flat: &ClaimSet) -> Option<String> {
        match self {
            Self::Fixed(value) => Some((*value).to_string()),
            Self::SmallestDuration => flat
                .iter()
                .filter(|tag| is_experience_duration(tag))
                .min_by(|a, b| duration_value(a).cmp(&duration_value(b)).then(a.cmp(b)))
                .map(str::to_string),
            Self::Either {
                tag,
                present,
                absent,
            } => Some(if flat.contains(tag) { present } else { absent }.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecisionRule {
    pub when: Condition,
    pub then: Outcome,
}

#[derive(Debug, Clone, Copy)]
pub struct DecisionList {
    pub field: &'static str,
    pub rules: &'static [DecisionRule],
    pub default: &'static str,
}

impl DecisionList {
    pub fn resolve(&self, flat: &ClaimSet) -> String {
        self.rules
            .iter()
            .find(|rule| rule.when.holds(flat))
            .and_then(|rule| rule.then.resolve(flat))
            .unwrap_or_else(|| self.default.to_string())
    }

    /// Index of the rule that decides the field, if any.
    pub fn matching_rule(&self, flat: &ClaimSet) -> Option<usize> {
        self.rules.iter().position(|rule| rule.when.holds(flat))
    }

    /// Rules whose condition names only tags the extractor never emits.
    pub fn unreachable_rules(&self) -> Vec<String> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| match rule.when {
                Condition::AnyOf(tags) if unreachable_tags(tags).len() == tags.len() => Some(
                    format!("{} rule #{index}: never extracted: {}", self.field, tags.join(", ")),
                ),
                _ => None,
            })
            .collect()
    }
}
