use std::collections::BTreeSet;

use super::lexicon::{
    is_inflation_duration, unreachable_tags, PairRule, CONFESSION_EVIDENCE, CONFESSION_TRIGGERS,
    INTERNSHIP, PAIR_RULES,
};
use super::types::{ClaimSet, Contradiction, LieType};

/// Rule-based contradiction detector over a subject's pooled claims.
///
/// The battery runs in a fixed order: duration multiplicity, then every
/// exact-pair rule, then self-admission. Rules are independent; any number
/// may fire and the same claim may back several contradictions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContradictionDetector;

impl ContradictionDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, claim_sets: &[ClaimSet]) -> Vec<Contradiction> {
        self.detect_flat(&ClaimSet::flatten(claim_sets))
    }

    pub fn detect_flat(&self, flat: &ClaimSet) -> Vec<Contradiction> {
        let mut contradictions = Vec::new();

        if let Some(c) = self.check_experience_inflation(flat) {
            contradictions.push(c);
        }
        contradictions.extend(
            PAIR_RULES
                .iter()
                .filter_map(|rule| self.check_pair(rule, flat)),
        );
        if let Some(c) = self.check_self_admission(flat) {
            contradictions.push(c);
        }

        contradictions
    }

    /// More than one distinct duration, or an internship alongside any
    /// duration.
    fn check_experience_inflation(&self, flat: &ClaimSet) -> Option<Contradiction> {
        let mut claims: BTreeSet<&str> = flat.iter().filter(|t| is_inflation_duration(t)).collect();
        let has_internship = flat.contains(INTERNSHIP);

        if claims.len() > 1 || (has_internship && !claims.is_empty()) {
            if has_internship {
                claims.insert(INTERNSHIP);
            }
            return Some(Contradiction::new(LieType::ExperienceInflation, claims));
        }
        None
    }

    fn check_pair(&self, rule: &PairRule, flat: &ClaimSet) -> Option<Contradiction> {
        (flat.contains(rule.tag_a) && flat.contains(rule.tag_b))
            .then(|| Contradiction::new(rule.lie_type, rule.claims.iter().copied()))
    }

    /// Fires on any confession trigger but only reports fraud, copying and
    /// self-correction as evidence, so an internship alone yields an empty
    /// claim list.
    fn check_self_admission(&self, flat: &ClaimSet) -> Option<Contradiction> {
        if !flat.contains_any(CONFESSION_TRIGGERS) {
            return None;
        }
        let evidence = CONFESSION_EVIDENCE
            .iter()
            .copied()
            .filter(|tag| flat.contains(tag));
        Some(Contradiction::new(LieType::SelfAdmittedDeception, evidence))
    }

    /// Pair rules that can never fire because one of their tags is outside
    /// the extraction vocabulary.
    pub fn unreachable_rules(&self) -> Vec<String> {
        PAIR_RULES
            .iter()
            .filter_map(|rule| {
                let missing = unreachable_tags(&[rule.tag_a, rule.tag_b]);
                (!missing.is_empty()).then(|| {
                    format!(
                        "{} ({:?} + {:?}): never extracted: {}",
                        rule.lie_type,
                        rule.tag_a,
                        rule.tag_b,
                        missing.join(", ")
                    )
                })
            })
            .collect()
    }
}
