use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The deduplicated claim tags extracted from one transcript, or the union
/// of several. Ordered so iteration never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeSet<String>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn contains_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.contains(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union of every set; tags repeated across sessions collapse.
    pub fn flatten<'a>(sets: impl IntoIterator<Item = &'a ClaimSet>) -> ClaimSet {
        sets.into_iter()
            .flat_map(|set| set.0.iter().cloned())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ClaimSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Category of inconsistency between claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LieType {
    ExperienceInflation,
    RoleConflict,
    ResumeInflation,
    SkillInflation,
    OwnershipInflation,
    LeadershipConfusion,
    SelfAdmittedDeception,
}

impl LieType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExperienceInflation => "experience_inflation",
            Self::RoleConflict => "role_conflict",
            Self::ResumeInflation => "resume_inflation",
            Self::SkillInflation => "skill_inflation",
            Self::OwnershipInflation => "ownership_inflation",
            Self::LeadershipConfusion => "leadership_confusion",
            Self::SelfAdmittedDeception => "self_admitted_deception",
        }
    }
}

impl std::fmt::Display for LieType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fired contradiction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub lie_type: LieType,
    pub contradictory_claims: Vec<String>,
}

impl Contradiction {
    pub fn new<S: Into<String>>(lie_type: LieType, claims: impl IntoIterator<Item = S>) -> Self {
        Self {
            lie_type,
            contradictory_claims: claims.into_iter().map(Into::into).collect(),
        }
    }
}

/// Consolidated best-guess profile of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthProfile {
    pub programming_experience: String,
    pub programming_language: String,
    pub skill_mastery: String,
    pub leadership_claims: String,
    pub team_experience: String,
    #[serde(rename = "skills and other keywords")]
    pub other_keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_set_deduplicates() {
        let set: ClaimSet = ["kafka", "team", "kafka"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("kafka"));
        assert!(!set.contains("rails"));
    }

    #[test]
    fn test_claim_set_flatten() {
        let a: ClaimSet = ["6 years", "team"].into_iter().collect();
        let b: ClaimSet = ["3 years", "team"].into_iter().collect();
        let flat = ClaimSet::flatten([&a, &b]);
        assert_eq!(flat.iter().collect::<Vec<_>>(), vec!["3 years", "6 years", "team"]);
    }

    #[test]
    fn test_claim_set_contains_any() {
        let set: ClaimSet = ["junior"].into_iter().collect();
        assert!(set.contains_any(&["fraud", "junior"]));
        assert!(!set.contains_any(&["fraud", "copied"]));
        assert!(!set.contains_any(&[]));
    }

    #[test]
    fn test_lie_type_serializes_snake_case() {
        let json = serde_json::to_string(&LieType::SelfAdmittedDeception).unwrap();
        assert_eq!(json, r#""self_admitted_deception""#);
        assert_eq!(LieType::ExperienceInflation.to_string(), "experience_inflation");
    }

    #[test]
    fn test_truth_profile_keyword_field_name() {
        let profile = TruthProfile {
            programming_experience: "unknown".to_string(),
            programming_language: String::new(),
            skill_mastery: "intermediate".to_string(),
            leadership_claims: "fabricated".to_string(),
            team_experience: "individual contributor".to_string(),
            other_keywords: vec!["kafka".to_string()],
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["skills and other keywords"][0], "kafka");
        assert!(value.get("other_keywords").is_none());
    }
}
