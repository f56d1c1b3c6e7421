//! Fixed vocabularies and rule tables shared by the extractor, the
//! contradiction detector and the truth consolidator.
//!
//! Everything here is read-only for the life of the process. Compiled
//! patterns are built lazily on first use and then shared.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::types::LieType;

/// English stopwords (NLTK list). Apostrophe forms never survive
/// normalization but are kept so the list stays recognisable.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Spelled-out numbers replaced by their digit form.
pub const NUMBER_WORDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
];

/// Languages, frameworks and architecture/ops vocabulary.
pub const SKILL_TERMS: &[&str] = &[
    "python",
    "java",
    "c++",
    "machine",
    "learning",
    "debugging",
    "kubernetes",
    "kafka",
    "react",
    "django",
    "celery",
    "rails",
    "tensorflow",
    "pytorch",
    "smote",
    "cosmos db",
    "microservices",
    "distributed systems",
    "low latency",
    "backend systems",
    "networking",
    "security",
    "e-commerce",
    "caching",
    "geo-replication",
    "class imbalance",
    "custom hook",
    "sprints",
];

/// Seniority and role words.
pub const ROLE_TERMS: &[&str] = &[
    "team",
    "leader",
    "alone",
    "individual",
    "contributor",
    "mentor",
    "architect",
    "engineer",
    "dev",
    "junior",
    "senior",
    "principal",
    "manager",
];

/// Admission and hedging phrases that betray an earlier overstatement.
pub const DECEPTION_MARKERS: &[&str] = &[
    "fraud",
    "copied",
    "exaggerate",
    "lied",
    "not what they think",
    "just watched",
    "mostly watched",
    "just deploy",
    "specific component",
    "handled part",
    "stitched parts",
    "mostly copied",
    "weekend workshop",
    "lead engineer might be wrong",
    "architected is too strong",
    "he designed the core",
    "i'm a junior dev",
    "not an architect",
    "only took a weekend workshop",
    "not exactly six years",
    "maybe three-ish",
    "coordinated is different from lead",
    "life cycle is a team thing",
    "handled part of it",
    "built parts of things",
    "stitched services together",
    "occasionally owned a small feature",
    "mostly copied patterns",
    "assembled other people's modules",
    "stitching counts as designing",
];

pub const INTERNSHIP: &str = "internship";
pub const SELF_CORRECTION: &str = "self_correction";
pub const WEEKEND_WORKSHOP: &str = "weekend workshop";

/// Connectives that signal the speaker is walking a claim back.
const SELF_CORRECTION_CUES: &[&str] = &[
    "actually",
    "no actually",
    "sorry",
    "mean",
    "is too strong",
    "might be the wrong",
    "is different",
    "was the architect of a specific",
    "should correct",
    "he designed",
];

/// Units that may follow a number in a duration phrase. Longer forms come
/// first so `6 years` is captured whole rather than as `6 year`.
const DURATION_UNITS: &[&str] = &[
    "years",
    "year",
    "months",
    "month",
    r"full\s+time",
    r"counting\s+freelance",
    r"weekend\s+workshop",
];

/// Substrings that make a tag count as a duration claim when checking for
/// experience inflation.
pub const INFLATION_DURATION_CUES: &[&str] =
    &["year", "month", "full time", "freelance", "weekend workshop"];

/// Substrings that make a tag count as a duration when consolidating the
/// experience field. Broader than the inflation cues: any `workshop` counts.
pub const EXPERIENCE_DURATION_CUES: &[&str] =
    &["year", "month", "full time", "freelance", "workshop"];

/// Tags whose presence means the subject admitted to something.
pub const CONFESSION_TRIGGERS: &[&str] =
    &["fraud", "copied", SELF_CORRECTION, INTERNSHIP, WEEKEND_WORKSHOP];

/// The subset of confession triggers that is reported as evidence.
pub const CONFESSION_EVIDENCE: &[&str] = &["fraud", "copied", SELF_CORRECTION];

/// A fixed `(tag_a, tag_b) -> lie_type` association with its narrative.
#[derive(Debug, Clone, Copy)]
pub struct PairRule {
    pub tag_a: &'static str,
    pub tag_b: &'static str,
    pub lie_type: LieType,
    pub claims: &'static [&'static str],
}

/// Exact-pair contradiction rules, evaluated in this order. Several
/// reference narrative phrases the extractor never emits; see
/// [`unreachable_tags`].
pub const PAIR_RULES: &[PairRule] = &[
    PairRule {
        tag_a: "seasoned devops engineer",
        tag_b: INTERNSHIP,
        lie_type: LieType::RoleConflict,
        claims: &[
            "seasoned DevOps engineer managing production",
            "internship, mostly watched seniors",
        ],
    },
    PairRule {
        tag_a: "lead engineer",
        tag_b: "developer on the e-commerce team",
        lie_type: LieType::RoleConflict,
        claims: &["lead engineer", "developer on small component"],
    },
    PairRule {
        tag_a: "principal cwar engineer",
        tag_b: "grow into that lead architect role",
        lie_type: LieType::ResumeInflation,
        claims: &["architected entire system", "architected one service"],
    },
    PairRule {
        tag_a: "built my back end from the first line",
        tag_b: "he designed the core architecture",
        lie_type: LieType::RoleConflict,
        claims: &["I built everything", "lead dev designed architecture/schema"],
    },
    PairRule {
        tag_a: "seasoned ruby on rails developer",
        tag_b: WEEKEND_WORKSHOP,
        lie_type: LieType::SkillInflation,
        claims: &["seasoned AI/ML professional", "only took weekend workshop"],
    },
    PairRule {
        tag_a: "lead architect",
        tag_b: "i'm a junior dev",
        lie_type: LieType::ResumeInflation,
        claims: &["7 years lead architect", "junior dev, 2 years experience"],
    },
    PairRule {
        tag_a: "drew architecture",
        tag_b: "mostly copied",
        lie_type: LieType::SkillInflation,
        claims: &["drew architecture", "mostly copied and stitched"],
    },
    PairRule {
        tag_a: "built entire projects",
        tag_b: "stitched parts",
        lie_type: LieType::OwnershipInflation,
        claims: &["built entire projects", "only stitched parts"],
    },
    PairRule {
        tag_a: "6 years",
        tag_b: "3 years",
        lie_type: LieType::ExperienceInflation,
        claims: &["6 years", "3 years"],
    },
    PairRule {
        tag_a: "handled full lifecycle",
        tag_b: "handled part",
        lie_type: LieType::OwnershipInflation,
        claims: &["handled full lifecycle", "handled only part of it"],
    },
    PairRule {
        tag_a: "6 years",
        tag_b: "3 full time",
        lie_type: LieType::ExperienceInflation,
        claims: &["6 years", "3 years", "4 years"],
    },
    PairRule {
        tag_a: "led sprints",
        tag_b: "coordinated is different from lead",
        lie_type: LieType::LeadershipConfusion,
        claims: &["led sprints", "coordinated (not lead)"],
    },
];

pub fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

pub fn is_stopword(token: &str) -> bool {
    stopwords().contains(token)
}

/// Whole-word number spellings.
pub fn number_word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let words: Vec<&str> = NUMBER_WORDS.iter().map(|(word, _)| *word).collect();
        Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|")))
            .expect("number word pattern is valid")
    })
}

pub fn digit_for(word: &str) -> Option<&'static str> {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| w.eq_ignore_ascii_case(word))
        .map(|(_, digit)| *digit)
}

/// A number (digits or a spelled-out word) followed by a duration unit.
pub fn duration_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let words: Vec<&str> = NUMBER_WORDS.iter().map(|(word, _)| *word).collect();
        Regex::new(&format!(
            r"(?:\d+|\b(?:{}))\s*(?:{})",
            words.join("|"),
            DURATION_UNITS.join("|")
        ))
        .expect("duration pattern is valid")
    })
}

pub fn self_correction_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&SELF_CORRECTION_CUES.join("|")).expect("self-correction pattern is valid")
    })
}

pub fn is_inflation_duration(tag: &str) -> bool {
    INFLATION_DURATION_CUES.iter().any(|cue| tag.contains(cue))
}

pub fn is_experience_duration(tag: &str) -> bool {
    EXPERIENCE_DURATION_CUES.iter().any(|cue| tag.contains(cue))
}

/// Tags consumed by a structured profile field; everything else is reported
/// under "skills and other keywords".
pub fn is_structural_tag(tag: &str) -> bool {
    is_experience_duration(tag)
        || tag == SELF_CORRECTION
        || ROLE_TERMS.contains(&tag)
        || DECEPTION_MARKERS.contains(&tag)
}

/// Numeric value of a duration tag: its leading digits or spelled-out
/// number. Tags with neither rank as zero.
pub fn duration_value(tag: &str) -> u64 {
    let digits: String = tag.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        return digits.parse().unwrap_or(u64::MAX);
    }
    NUMBER_WORDS
        .iter()
        .find(|(word, _)| tag.starts_with(word))
        .and_then(|(_, digit)| digit.parse().ok())
        .unwrap_or(0)
}

/// Whether the extractor can ever emit `tag`.
pub fn is_producible_tag(tag: &str) -> bool {
    if tag == INTERNSHIP || tag == SELF_CORRECTION {
        return true;
    }
    if SKILL_TERMS.contains(&tag) || ROLE_TERMS.contains(&tag) || DECEPTION_MARKERS.contains(&tag)
    {
        return true;
    }
    duration_pattern()
        .find(tag)
        .is_some_and(|m| m.start() == 0 && m.end() == tag.len())
}

/// Every tag in `tags` the extractor can never emit.
pub fn unreachable_tags<'a>(tags: &[&'a str]) -> Vec<&'a str> {
    tags.iter()
        .copied()
        .filter(|tag| !is_producible_tag(tag))
        .collect()
}
