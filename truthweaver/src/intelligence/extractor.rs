use super::lexicon::{
    duration_pattern, self_correction_pattern, DECEPTION_MARKERS, INTERNSHIP, ROLE_TERMS,
    SELF_CORRECTION, SKILL_TERMS,
};
use super::normalizer::normalize;
use super::types::ClaimSet;

/// Lexical claim extractor.
///
/// Works on two views of a transcript: the normalized token stream, which
/// bounds whether there is anything to scan at all, and the raw lowercase
/// text, which keeps the phrase context (stopwords, punctuation) that the
/// multi-word patterns depend on. Holds no state between transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimExtractor;

impl ClaimExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, raw_text: &str) -> ClaimSet {
        let tokens = normalize(raw_text);
        if tokens.is_empty() {
            return ClaimSet::new();
        }

        let lowered = raw_text.to_lowercase();
        let mut claims = ClaimSet::new();

        claims.extend(durations(&lowered));
        if lowered.contains(INTERNSHIP) {
            claims.insert(INTERNSHIP);
        }
        claims.extend(present_terms(&lowered, SKILL_TERMS));
        claims.extend(present_terms(&lowered, ROLE_TERMS));
        claims.extend(present_terms(&lowered, DECEPTION_MARKERS));
        if self_correction_pattern().is_match(&lowered) {
            claims.insert(SELF_CORRECTION);
        }

        tracing::trace!(
            token_count = tokens.len(),
            claim_count = claims.len(),
            "Extracted claims"
        );

        claims
    }
}

/// Duration phrases, kept verbatim. A match lying wholly inside a
/// deception marker (`not exactly six years`) belongs to that marker.
fn durations(lowered: &str) -> Vec<&str> {
    let marker_spans: Vec<(usize, usize)> = DECEPTION_MARKERS
        .iter()
        .flat_map(|marker| {
            lowered
                .match_indices(marker)
                .map(|(start, _)| (start, start + marker.len()))
        })
        .collect();

    duration_pattern()
        .find_iter(lowered)
        .filter(|m| {
            !marker_spans
                .iter()
                .any(|&(start, end)| start <= m.start() && m.end() <= end)
        })
        .map(|m| m.as_str())
        .collect()
}

fn present_terms<'a>(
    lowered: &'a str,
    vocabulary: &'static [&'static str],
) -> impl Iterator<Item = &'static str> + 'a {
    vocabulary
        .iter()
        .copied()
        .filter(move |term| lowered.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        ClaimExtractor::new()
            .extract(text)
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_extract_empty() {
        assert!(ClaimExtractor::new().extract("").is_empty());
        assert!(ClaimExtractor::new().extract("   ...  ").is_empty());
    }

    #[test]
    fn test_extract_durations_are_literal() {
        let claims = ClaimExtractor::new().extract("I have 6 years of Python, well 6year really");
        assert!(claims.contains("6 years"));
        assert!(claims.contains("6year"));
        assert!(claims.contains("python"));
    }

    #[test]
    fn test_extract_duration_phrases() {
        let claims = ClaimExtractor::new()
            .extract("3 full time, 4 counting freelance, and one weekend workshop");
        assert!(claims.contains("3 full time"));
        assert!(claims.contains("4 counting freelance"));
        assert!(claims.contains("one weekend workshop"));
        assert!(claims.contains("weekend workshop"));
    }

    #[test]
    fn test_marker_phrase_is_not_a_duration() {
        let claims = ClaimExtractor::new().extract("Handled part of it. Not exactly six years.");
        assert!(claims.contains("not exactly six years"));
        assert!(!claims.contains("six years"));

        let claims = ClaimExtractor::new()
            .extract("Not exactly six years, more like six years part time.");
        assert!(claims.contains("six years"));
    }

    #[test]
    fn test_extract_internship() {
        let claims = ClaimExtractor::new().extract("It was a summer Internship, I just watched.");
        assert!(claims.contains("internship"));
        assert!(claims.contains("just watched"));
    }

    #[test]
    fn test_extract_terms_are_substring_matches() {
        let claims = ClaimExtractor::new().extract("Mostly JavaScript on the e-commerce teams");
        assert!(claims.contains("java"));
        assert!(claims.contains("e-commerce"));
        assert!(claims.contains("team"));
    }

    #[test]
    fn test_extract_roles() {
        assert_eq!(
            tags("Senior principal engineer"),
            vec!["engineer", "principal", "senior"]
        );
    }

    #[test]
    fn test_extract_self_correction_collapses() {
        let claims = ClaimExtractor::new()
            .extract("Actually, sorry, I should correct that: architect is too strong.");
        assert!(claims.contains("self_correction"));
        assert!(!claims.contains("actually"));
        assert!(!claims.contains("sorry"));
        assert!(claims.contains("architect"));
    }

    #[test]
    fn test_extract_deception_markers() {
        let claims = ClaimExtractor::new()
            .extract("Honestly I mostly copied patterns and stitched services together.");
        assert!(claims.contains("copied"));
        assert!(claims.contains("mostly copied"));
        assert!(claims.contains("mostly copied patterns"));
        assert!(claims.contains("stitched services together"));
    }

    #[test]
    fn test_extract_is_order_independent() {
        let extractor = ClaimExtractor::new();
        let a = extractor.extract("Kafka pipelines. I was the team leader. 5 years.");
        let b = extractor.extract("5 years. I was the team leader. Kafka pipelines.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_extract_no_claims() {
        assert!(ClaimExtractor::new().extract("Hello there, nice weather").is_empty());
    }
}
