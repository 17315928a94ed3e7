use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use super::bracket::generate_brackets;
use crate::evaluation::{Evaluation, EvaluationLog};

fn evaluation(
    stage: &str,
    participant: &str,
    score: u8,
    accepted: bool,
    minute: i64,
) -> Evaluation {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Evaluation {
        id: format!("eval-{stage}-{participant}"),
        stage: stage.to_string(),
        participant_id: participant.to_string(),
        participant_name: participant.to_string(),
        score,
        accepted,
        evaluated_at: base + Duration::minutes(minute),
        evaluated_by: "admin".to_string(),
    }
}

fn bracket_for<'a>(
    brackets: &'a [super::bracket::StageBracket],
    stage_name: &str,
) -> &'a super::bracket::StageBracket {
    brackets.iter().find(|b| b.stage == stage_name).unwrap()
}

#[test]
fn test_one_bracket_per_catalog_stage_in_order() {
    let brackets = generate_brackets(&EvaluationLog::new());

    let names: Vec<&str> = brackets.iter().map(|b| b.stage.as_str()).collect();
    assert_eq!(
        names,
        vec!["Clasificatoria", "Octavos de Final", "Cuartos de Final", "Semifinal", "Final"]
    );
    for bracket in &brackets {
        assert!(bracket.participants.is_empty());
        assert!(bracket.winner.is_none());
    }
}

#[test]
fn test_ranking_is_score_descending_with_distinct_positions() {
    let log = EvaluationLog::from_records(vec![
        evaluation("clasificatoria", "C", 70, true, 0),
        evaluation("clasificatoria", "A", 95, true, 1),
        evaluation("clasificatoria", "B", 95, true, 2),
    ]);

    let brackets = generate_brackets(&log);
    let bracket = bracket_for(&brackets, "Clasificatoria");

    let positions: Vec<u32> = bracket.participants.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    // Both 95s rank ahead of C; C is fixed at position 3
    assert_eq!(bracket.participants[2].id, "C");
    assert!(bracket.participants[0].score == 95 && bracket.participants[1].score == 95);
}

#[test]
fn test_tie_break_is_earlier_evaluation_first() {
    // B scored the same but was evaluated before A
    let log = EvaluationLog::from_records(vec![
        evaluation("clasificatoria", "A", 95, true, 10),
        evaluation("clasificatoria", "B", 95, true, 5),
    ]);

    let brackets = generate_brackets(&log);
    let bracket = bracket_for(&brackets, "Clasificatoria");

    assert_eq!(bracket.participants[0].id, "B");
    assert_eq!(bracket.participants[1].id, "A");
    assert_eq!(bracket.winner.as_deref(), Some("B"));
}

#[test]
fn test_tie_break_is_independent_of_insertion_order() {
    let records = vec![
        evaluation("clasificatoria", "A", 95, true, 3),
        evaluation("clasificatoria", "B", 95, true, 3),
        evaluation("clasificatoria", "C", 70, false, 1),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let forward = generate_brackets(&EvaluationLog::from_records(records));
    let backward = generate_brackets(&EvaluationLog::from_records(reversed));

    assert_eq!(forward, backward);
    // Identical timestamps fall back to participant id
    assert_eq!(bracket_for(&forward, "Clasificatoria").participants[0].id, "A");
}

#[test]
fn test_winner_requires_accepted_top_scorer() {
    let log = EvaluationLog::from_records(vec![
        evaluation("semifinal", "A", 92, false, 0),
        evaluation("semifinal", "B", 88, true, 1),
    ]);

    let brackets = generate_brackets(&log);
    let bracket = bracket_for(&brackets, "Semifinal");

    // Top scorer was rejected: no winner, no fallback to position 2
    assert_eq!(bracket.participants[0].id, "A");
    assert!(bracket.winner.is_none());
}

#[test]
fn test_winner_is_accepted_top_scorer() {
    let log = EvaluationLog::from_records(vec![
        evaluation("final", "A", 97, true, 0),
        evaluation("final", "B", 88, true, 1),
    ]);

    let brackets = generate_brackets(&log);
    assert_eq!(bracket_for(&brackets, "Final").winner.as_deref(), Some("A"));
}

proptest! {
    /// Positions are always the exact permutation 1..=n, scores never
    /// increase down the ranking, and the winner rule holds for any log.
    #[test]
    fn prop_bracket_invariants(entries in prop::collection::vec((0u8..=100, any::<bool>()), 0..30)) {
        let records: Vec<Evaluation> = entries
            .iter()
            .enumerate()
            .map(|(i, (score, accepted))| {
                evaluation("clasificatoria", &format!("P{i:02}"), *score, *accepted, i as i64)
            })
            .collect();
        let expected_len = records.len();

        let brackets = generate_brackets(&EvaluationLog::from_records(records));
        let bracket = brackets.iter().find(|b| b.stage == "Clasificatoria").unwrap();

        prop_assert_eq!(bracket.participants.len(), expected_len);

        for (index, entry) in bracket.participants.iter().enumerate() {
            prop_assert_eq!(entry.position, index as u32 + 1);
        }
        for pair in bracket.participants.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }

        match bracket.participants.first() {
            Some(top) if top.accepted => prop_assert_eq!(bracket.winner.as_deref(), Some(top.id.as_str())),
            _ => prop_assert!(bracket.winner.is_none()),
        }
    }
}
