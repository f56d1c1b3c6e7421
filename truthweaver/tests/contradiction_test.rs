use truthweaver::intelligence::contradiction::ContradictionDetector;
use truthweaver::intelligence::{ClaimExtractor, ClaimSet, LieType};

fn claims_for(sessions: &[&str]) -> Vec<ClaimSet> {
    let extractor = ClaimExtractor::new();
    sessions.iter().map(|text| extractor.extract(text)).collect()
}

#[test]
fn test_consistent_sessions_raise_nothing() {
    let detector = ContradictionDetector::new();

    let cases = vec![
        vec!["I have 4 years with Kafka.", "Yes, 4 years, mostly on Kafka."],
        vec!["I work on the team doing React.", "React with the team, yes."],
        vec!["", ""],
    ];

    for sessions in cases {
        let result = detector.detect(&claims_for(&sessions));
        assert!(result.is_empty(), "Unexpected contradictions for {sessions:?}: {result:?}");
    }
}

#[test]
fn test_inconsistent_durations() {
    let detector = ContradictionDetector::new();

    let cases = vec![
        (vec!["I have 6 years in backend systems.", "It was 2 years."], 1),
        (vec!["6 years of Java.", "Really 3 years."], 2),
        (vec!["6 years total.", "3 full time."], 2),
    ];

    for (sessions, expected_inflation) in cases {
        let result = detector.detect(&claims_for(&sessions));
        let inflation = result
            .iter()
            .filter(|c| c.lie_type == LieType::ExperienceInflation)
            .count();
        assert_eq!(inflation, expected_inflation, "Failed for: {sessions:?}");
    }
}

#[test]
fn test_hedged_duration_is_not_inflation() {
    let detector = ContradictionDetector::new();
    let result = detector.detect(&claims_for(&[
        "Django. Sorry",
        "Handled part of it. Microservices. Not exactly six years. Manager",
        "",
    ]));

    let lie_types: Vec<LieType> = result.iter().map(|c| c.lie_type).collect();
    assert_eq!(lie_types, vec![LieType::SelfAdmittedDeception]);
    assert_eq!(result[0].contradictory_claims, vec!["self_correction"]);
}

#[test]
fn test_internship_confession() {
    let detector = ContradictionDetector::new();
    let result = detector.detect(&claims_for(&[
        "Two years building caching layers.",
        "To be honest it was an internship.",
    ]));

    assert_eq!(result[0].lie_type, LieType::ExperienceInflation);
    assert_eq!(
        result[0].contradictory_claims,
        vec!["internship", "two years"]
    );
    assert_eq!(result[1].lie_type, LieType::SelfAdmittedDeception);
    assert!(result[1].contradictory_claims.is_empty());
}

#[test]
fn test_rule_audit_names_dead_pairs() {
    let dead = ContradictionDetector::new().unreachable_rules();
    assert_eq!(dead.len(), 10);
    assert!(dead.iter().all(|rule| rule.contains("never extracted")));
}
