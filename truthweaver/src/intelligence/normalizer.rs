use super::lexicon::{digit_for, is_stopword, number_word_pattern};

/// Lowercase, spell out number words as digits, strip punctuation and drop
/// stopwords.
///
/// Punctuation becomes a space so adjacent words never merge. Number words
/// are replaced on whole-word boundaries only (`tenant` stays `tenant`).
/// Total: empty or punctuation-only input yields no tokens.
pub fn normalize(text: &str) -> Vec<String> {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let spelled = number_word_pattern().replace_all(&stripped, |caps: &regex::Captures<'_>| {
        digit_for(&caps[0]).unwrap_or(&caps[0]).to_string()
    });

    spelled
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_drops_stopwords() {
        assert_eq!(
            normalize("I worked on the Kafka cluster"),
            vec!["worked", "kafka", "cluster"]
        );
    }

    #[test]
    fn test_normalize_spells_out_numbers() {
        assert_eq!(normalize("Six years, maybe Three"), vec!["6", "years", "maybe", "3"]);
    }

    #[test]
    fn test_normalize_respects_word_boundaries() {
        assert_eq!(normalize("tenant often someone"), vec!["tenant", "often", "someone"]);
    }

    #[test]
    fn test_normalize_punctuation_separates_words() {
        assert_eq!(normalize("c++/java,python"), vec!["c", "java", "python"]);
        assert_eq!(normalize("e-commerce"), vec!["e", "commerce"]);
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        assert!(normalize("").is_empty());
        assert!(normalize("?!... --").is_empty());
        assert!(normalize("I was the one who").len() == 1);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Honestly, I've been a senior dev for SIX years... no, actually three.",
            "x_ten one_two ten's",
            "Ünïcödé text with ten words",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.join(" "));
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_non_ascii_is_stripped() {
        assert_eq!(normalize("café résumé"), vec!["caf", "r", "sum"]);
    }
}
