use super::lexicon::{is_structural_tag, INTERNSHIP, SELF_CORRECTION, WEEKEND_WORKSHOP};
use super::rules::{Condition, DecisionList, DecisionRule, Outcome};
use super::types::{ClaimSet, TruthProfile};

pub const PROGRAMMING_EXPERIENCE: DecisionList = DecisionList {
    field: "programming_experience",
    rules: &[
        DecisionRule {
            when: Condition::AnyOf(&[INTERNSHIP]),
            then: Outcome::Fixed("internship (summer, ~1 year exposure)"),
        },
        DecisionRule {
            when: Condition::AnyOf(&[WEEKEND_WORKSHOP]),
            then: Outcome::Fixed("limited (Rails strong, AI/ML minimal)"),
        },
        DecisionRule {
            when: Condition::AnyDuration,
            then: Outcome::SmallestDuration,
        },
    ],
    default: "unknown",
};

/// Language keyword to reported label, one rule per keyword in priority
/// order.
pub const PROGRAMMING_LANGUAGE: DecisionList = DecisionList {
    field: "programming_language",
    rules: &[
        DecisionRule {
            when: Condition::AnyOf(&["python"]),
            then: Outcome::Fixed("python"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["java"]),
            then: Outcome::Fixed("java"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["c++"]),
            then: Outcome::Fixed("c++"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["react"]),
            then: Outcome::Fixed("javascript/react"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["rails"]),
            then: Outcome::Fixed("ruby"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["django"]),
            then: Outcome::Fixed("Python (Django, Celery)"),
        },
    ],
    default: "",
};

pub const SKILL_MASTERY: DecisionList = DecisionList {
    field: "skill_mastery",
    rules: &[
        DecisionRule {
            when: Condition::AnyOf(&[INTERNSHIP, "junior", "fraud", WEEKEND_WORKSHOP]),
            then: Outcome::Fixed("beginner"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["seasoned", "expert", "mastered", "advanced"]),
            then: Outcome::Fixed("advanced"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["obsessive understanding"]),
            then: Outcome::Fixed("expert in distributed systems"),
        },
    ],
    default: "intermediate",
};

/// The default repeats the first branch: leadership is only "possible" when
/// a leadership word shows up with no walk-back at all.
pub const LEADERSHIP_CLAIMS: DecisionList = DecisionList {
    field: "leadership_claims",
    rules: &[
        DecisionRule {
            when: Condition::AnyOf(&[SELF_CORRECTION, "fraud", "copied", INTERNSHIP, "junior"]),
            then: Outcome::Fixed("fabricated"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["leader", "mentor", "architect", "principal"]),
            then: Outcome::Fixed("possible"),
        },
    ],
    default: "fabricated",
};

pub const TEAM_EXPERIENCE: DecisionList = DecisionList {
    field: "team_experience",
    rules: &[
        DecisionRule {
            when: Condition::AnyOf(&[INTERNSHIP, "just watched"]),
            then: Outcome::Fixed("observer / minimal contribution"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["fraud", "junior"]),
            then: Outcome::Either {
                tag: "principal",
                present: "junior/principal engineer but not lead architect",
                absent: "junior dev (not architect)",
            },
        },
        DecisionRule {
            when: Condition::AnyOf(&["manages"]),
            then: Outcome::Fixed("manages 6 engineers"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["mentor"]),
            then: Outcome::Fixed("tech lead / mentor"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["team"]),
            then: Outcome::Fixed("team player"),
        },
        DecisionRule {
            when: Condition::AnyOf(&["individual"]),
            then: Outcome::Fixed("individual contributor"),
        },
    ],
    default: "individual contributor",
};

pub const DECISION_LISTS: &[DecisionList] = &[
    PROGRAMMING_EXPERIENCE,
    PROGRAMMING_LANGUAGE,
    SKILL_MASTERY,
    LEADERSHIP_CLAIMS,
    TEAM_EXPERIENCE,
];

/// Builds one best-guess profile from a subject's pooled claims. Every
/// field is resolved independently of the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthConsolidator;

impl TruthConsolidator {
    pub fn new() -> Self {
        Self
    }

    pub fn consolidate(&self, claim_sets: &[ClaimSet]) -> TruthProfile {
        self.consolidate_flat(&ClaimSet::flatten(claim_sets))
    }

    pub fn consolidate_flat(&self, flat: &ClaimSet) -> TruthProfile {
        TruthProfile {
            programming_experience: PROGRAMMING_EXPERIENCE.resolve(flat),
            programming_language: PROGRAMMING_LANGUAGE.resolve(flat),
            skill_mastery: SKILL_MASTERY.resolve(flat),
            leadership_claims: LEADERSHIP_CLAIMS.resolve(flat),
            team_experience: TEAM_EXPERIENCE.resolve(flat),
            other_keywords: other_keywords(flat),
        }
    }

    pub fn unreachable_rules(&self) -> Vec<String> {
        DECISION_LISTS
            .iter()
            .flat_map(DecisionList::unreachable_rules)
            .collect()
    }
}

/// Leftover tags not consumed by a structured field.
fn other_keywords(flat: &ClaimSet) -> Vec<String> {
    flat.iter()
        .filter(|tag| !is_structural_tag(tag))
        .map(str::to_string)
        .collect()
}
