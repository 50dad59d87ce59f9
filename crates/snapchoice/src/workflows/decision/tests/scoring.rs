use super::common::*;
use crate::workflows::decision::domain::{Advisory, Decision, OptionInput, Rating, RawRating};
use crate::workflows::decision::scoring::{
    calculate_confidence, calculate_score, compare_ranked, rank, ScoringEngine, ValidationError,
};
use std::cmp::Ordering;

#[test]
fn score_stays_within_bounds_and_moves_with_each_criterion() {
    for u in 1..=10u8 {
        for i in 1..=10u8 {
            for d in 1..=10u8 {
                let score = calculate_score(u.into(), i.into(), d.into());
                assert!(
                    (1.0 - SCORE_EPSILON..=10.0 + SCORE_EPSILON).contains(&score),
                    "score {score} out of range for ({u}, {i}, {d})"
                );

                if u < 10 {
                    assert!(calculate_score((u + 1).into(), i.into(), d.into()) >= score);
                }
                if i < 10 {
                    assert!(calculate_score(u.into(), (i + 1).into(), d.into()) >= score);
                }
                if d < 10 {
                    assert!(calculate_score(u.into(), i.into(), (d + 1).into()) <= score);
                }
            }
        }
    }
}

#[test]
fn score_extremes_hit_the_ends_of_the_scale() {
    assert_score(calculate_score(Rating::MIN, Rating::MIN, Rating::MAX), 1.0);
    assert_score(calculate_score(Rating::MAX, Rating::MAX, Rating::MIN), 10.0);
}

#[test]
fn confidence_is_relative_gap_capped_below_certainty() {
    assert_eq!(calculate_confidence(8.1, 5.75), 29);
    assert_eq!(calculate_confidence(10.0, 1.0), 90);
    assert_eq!(calculate_confidence(8.0, 7.0), 13);
    assert_eq!(calculate_confidence(10.0, 0.0), 99);
}

#[test]
fn confidence_is_zero_for_degenerate_inputs() {
    assert_eq!(calculate_confidence(0.0, 0.0), 0);
    assert_eq!(calculate_confidence(0.0, 4.0), 0);
    assert_eq!(calculate_confidence(f64::NAN, 4.0), 0);
    assert_eq!(calculate_confidence(5.0, 5.2), 0);
}

#[test]
fn rank_rejects_fewer_than_two_options() {
    assert_eq!(
        rank(&[]),
        Err(ValidationError::InsufficientOptions { usable: 0 })
    );
    assert_eq!(
        rank(&named(&["Only"])),
        Err(ValidationError::InsufficientOptions { usable: 1 })
    );
}

#[test]
fn rank_rejects_more_than_five_options() {
    let options = named(&["A", "B", "C", "D", "E", "F"]);
    assert_eq!(
        rank(&options),
        Err(ValidationError::TooManyOptions { provided: 6 })
    );
}

#[test]
fn rank_orders_example_by_score() {
    let ranking = rank(&example_decision().options).expect("example ranks");

    let names: Vec<&str> = ranking.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Build MVP Fast", "Deep Research Mode", "Learn New Framework"]
    );
    assert_score(ranking.options[0].score, 8.10);
    assert_score(ranking.options[1].score, 5.75);
    assert_score(ranking.options[2].score, 5.40);
    assert!(!ranking.low_differentiation);
    assert!(!ranking.close_scores);
}

#[test]
fn near_tie_prefers_higher_importance_over_nominal_score() {
    let options = vec![
        OptionInput::rated("Louder", 10, 5, 5),
        OptionInput::rated("Weightier", 8, 6, 4),
    ];

    let ranking = rank(&options).expect("two options rank");

    assert_score(ranking.options[0].score, 6.95);
    assert_eq!(ranking.options[0].name, "Weightier");
    assert_eq!(ranking.options[1].name, "Louder");
    assert!(ranking.close_scores);
}

#[test]
fn near_tie_with_equal_importance_prefers_urgency() {
    let options = vec![
        OptionInput::rated("Steady", 5, 5, 5),
        OptionInput::rated("Pressing", 7, 5, 8),
    ];

    let ranking = rank(&options).expect("two options rank");

    assert_eq!(ranking.options[0].name, "Pressing");
}

#[test]
fn comparator_prefers_easier_option_when_everything_else_ties() {
    let mut easy = scored("Easy", 5, 5, 3);
    let mut hard = scored("Hard", 5, 5, 7);
    easy.score = 6.0;
    hard.score = 6.05;

    assert_eq!(compare_ranked(&easy, &hard), Ordering::Less);
    assert_eq!(compare_ranked(&hard, &easy), Ordering::Greater);
}

#[test]
fn scores_outside_tolerance_ignore_tie_break_keys() {
    let options = vec![
        OptionInput::rated("Balanced", 5, 5, 5),
        OptionInput::rated("Valuable", 5, 6, 6),
    ];

    let ranking = rank(&options).expect("two options rank");

    assert_eq!(ranking.options[0].name, "Valuable");
    assert!(ranking.close_scores, "gap of 0.15 is close");
    assert!(!ranking.low_differentiation);
}

#[test]
fn identical_ratings_flag_low_differentiation_and_keep_input_order() {
    let ranking = rank(&named(&["First", "Second"])).expect("two options rank");

    assert!(ranking.low_differentiation);
    assert!(ranking.close_scores);
    assert_eq!(ranking.options[0].name, "First");
    assert_eq!(ranking.options[1].name, "Second");
}

#[test]
fn blank_names_get_positional_defaults_until_two_are_kept() {
    let options = vec![
        OptionInput::rated("   ", 6, 6, 6),
        OptionInput::rated("Named", 5, 5, 5),
        OptionInput::rated("", 9, 9, 1),
        OptionInput::rated("Last", 3, 3, 3),
    ];

    let ranking = rank(&options).expect("options rank");

    let mut names: Vec<&str> = ranking.options.iter().map(|o| o.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Last", "Named", "Option 1"]);
}

#[test]
fn two_blank_options_still_rank() {
    let ranking = rank(&Decision::blank().options).expect("blank decision ranks");

    assert_eq!(ranking.options[0].name, "Option 1");
    assert_eq!(ranking.options[1].name, "Option 2");
    assert!(ranking.low_differentiation);
}

#[test]
fn names_are_trimmed_and_truncated() {
    let long = format!("  {}  ", "x".repeat(75));
    let options = vec![
        OptionInput::rated(long, 9, 9, 1),
        OptionInput::rated(" Short ", 1, 1, 10),
    ];

    let ranking = rank(&options).expect("options rank");

    assert_eq!(ranking.options[0].name.chars().count(), 60);
    assert_eq!(ranking.options[1].name, "Short");
}

#[test]
fn name_limit_counts_utf16_units() {
    let options = vec![
        OptionInput::rated("🚀".repeat(31), 9, 9, 1),
        OptionInput::rated(format!("{}🚀", "a".repeat(59)), 1, 1, 10),
        OptionInput::rated("é".repeat(70), 1, 1, 10),
    ];

    let ranking = rank(&options).expect("options rank");
    let names: Vec<&str> = ranking.options.iter().map(|o| o.name.as_str()).collect();

    assert_eq!(names[0], "🚀".repeat(30));
    assert!(names.contains(&"a".repeat(59).as_str()));
    assert!(names.contains(&"é".repeat(60).as_str()));
}

#[test]
fn malformed_ratings_are_normalized_instead_of_rejected() {
    let options = vec![
        OptionInput {
            name: "Typed".to_string(),
            urgency: Some(RawRating::Text("eleven".to_string())),
            importance: Some(RawRating::Whole(42)),
            difficulty: None,
        },
        OptionInput::rated("Plain", 5, 5, 5),
    ];

    let ranking = rank(&options).expect("options rank");
    let typed = ranking
        .options
        .iter()
        .find(|option| option.name == "Typed")
        .expect("typed option kept");

    assert_eq!(typed.urgency, Rating::DEFAULT);
    assert_eq!(typed.importance, Rating::MAX);
    assert_eq!(typed.difficulty, Rating::DEFAULT);
}

#[test]
fn engine_evaluates_example_end_to_end() {
    let result = ScoringEngine::new()
        .evaluate(&example_decision())
        .expect("example evaluates");

    let winner = result.winner().expect("winner present");
    assert_eq!(winner.name, "Build MVP Fast");
    assert_eq!(result.confidence, 29);
    assert!(result.advisories.is_empty());
    assert!(result.reasoning.starts_with("Given the time-sensitivity of your options"));
}

#[test]
fn engine_reports_every_applicable_advisory() {
    let decision = Decision::new("   ", named(&["Same", "Same again"]));

    let result = ScoringEngine::new()
        .evaluate(&decision)
        .expect("decision evaluates");

    assert_eq!(
        result.advisories,
        vec![
            Advisory::MissingContext,
            Advisory::LowDifferentiation,
            Advisory::CloseScores
        ]
    );
    assert!(result.low_differentiation());
    assert!(result.close_scores());
    assert_eq!(result.confidence, 0);
}
