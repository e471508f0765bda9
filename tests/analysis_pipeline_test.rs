//! End-to-end pipeline tests
//!
//! Exercises the full analyze() path on realistic batches and checks the
//! cross-component invariants: score bounds, permutation invariance,
//! idempotence, and the documented empty-input behavior.

use convopulse::analysis::recommendations::DEFAULT_RECOMMENDATION;
use convopulse::analysis::Momentum;
use convopulse::analysis::Tone;
use convopulse::models::RawRecord;
use convopulse::models::RawReaction;
use convopulse::ConversationAnalyzer;
use convopulse::ConvoPulseError;

fn message(ts: f64, user: &str, text: &str) -> RawRecord {
    RawRecord {
        ts: Some(serde_json::json!(format!("{ts:.6}"))),
        user: Some(user.to_string()),
        text: Some(text.to_string()),
        channel: Some("C1".to_string()),
        ..RawRecord::default()
    }
}

fn with_reaction(mut record: RawRecord, emoji: &str, count: u32) -> RawRecord {
    record.reactions.push(RawReaction {
        name: emoji.to_string(),
        count: Some(count),
        users: Vec::new(),
    });
    record
}

#[test]
fn empty_input_law() {
    let report = ConversationAnalyzer::new().analyze(&[]).unwrap();

    assert_eq!(report.sentiment.score, 0.0);
    assert_eq!(report.sentiment.dominant_tone, Tone::Neutral);
    assert_eq!(report.health, 30);
    assert_eq!(report.recommendations[0], DEFAULT_RECOMMENDATION);
    assert!(report.warnings.is_empty());
}

#[test]
fn scores_stay_in_bounds_for_arbitrary_batches() {
    let analyzer = ConversationAnalyzer::new();

    let batches: Vec<Vec<RawRecord>> = vec![
        vec![message(1_700_000_000.0, "U1", "terrible awful worst hate")],
        (0..50)
            .map(|i| message(1_700_000_000.0 + f64::from(i), "U1", "great amazing wonderful"))
            .collect(),
        vec![
            with_reaction(message(1_700_000_000.0, "U1", ""), "rage", 40),
            message(1_700_000_100.0, "U2", ""),
        ],
    ];

    for batch in batches {
        let report = analyzer.analyze(&batch).unwrap();
        assert!(report.health <= 100);
        assert!((-1.0..=1.0).contains(&report.sentiment.score));
        assert!(!report.recommendations.is_empty());
    }
}

#[test]
fn analysis_is_invariant_under_permutation() {
    let analyzer = ConversationAnalyzer::new();

    let batch: Vec<RawRecord> = (0..12)
        .map(|i| {
            let text = if i % 3 == 0 { "great work" } else { "status update" };
            message(1_700_000_000.0 + f64::from(i * 90), &format!("U{}", i % 4), text)
        })
        .collect();

    // A fixed "shuffle": reversed and interleaved
    let mut permuted: Vec<RawRecord> = batch.iter().rev().cloned().collect();
    permuted.swap(0, 7);
    permuted.swap(3, 11);

    let original = analyzer.analyze(&batch).unwrap();
    let shuffled = analyzer.analyze(&permuted).unwrap();

    assert_eq!(original.sentiment.score, shuffled.sentiment.score);
    assert_eq!(original.temporal.momentum, shuffled.temporal.momentum);
    assert_eq!(original.temporal.peak_hour, shuffled.temporal.peak_hour);
    assert_eq!(original.health, shuffled.health);
    assert_eq!(original.recommendations, shuffled.recommendations);
    assert_eq!(
        original.engagement.most_active_participant,
        shuffled.engagement.most_active_participant
    );
}

#[test]
fn analysis_is_idempotent() {
    let analyzer = ConversationAnalyzer::new();
    let batch: Vec<RawRecord> = (0..8)
        .map(|i| message(1_700_000_000.0 + f64::from(i * 30), "U1", "thanks for the fix"))
        .collect();

    let first = serde_json::to_string(&analyzer.analyze(&batch).unwrap()).unwrap();
    let second = serde_json::to_string(&analyzer.analyze(&batch).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn adding_positive_records_lifts_a_neutral_batch() {
    let analyzer = ConversationAnalyzer::new();

    let mut batch: Vec<RawRecord> = (0..5)
        .map(|i| message(1_700_000_000.0 + f64::from(i * 60), "U1", "status update"))
        .collect();
    let baseline = analyzer.analyze(&batch).unwrap().sentiment.score;

    batch.push(message(
        1_700_000_360.0,
        "U2",
        "great amazing wonderful fantastic",
    ));
    let lifted = analyzer.analyze(&batch).unwrap().sentiment.score;

    assert!(lifted >= baseline);
}

// Ten upbeat messages, one reaction each, five authors, all inside one hour
#[test]
fn scenario_active_positive_channel() {
    let analyzer = ConversationAnalyzer::new();

    let batch: Vec<RawRecord> = (0..10)
        .map(|i| {
            with_reaction(
                message(
                    1_700_000_000.0 + f64::from(i * 300),
                    &format!("U{}", i % 5),
                    "great job team",
                ),
                "+1",
                1,
            )
        })
        .collect();

    let report = analyzer.analyze(&batch).unwrap();

    assert!(matches!(
        report.sentiment.dominant_tone,
        Tone::Positive | Tone::VeryPositive
    ));
    assert_eq!(report.engagement.participation_rate, 50.0);
    assert_eq!(report.temporal.momentum, Momentum::Stable);
    assert!(report.health >= 70, "health was {}", report.health);
}

// Twenty messages from a single author over thirty minutes
#[test]
fn scenario_monologue_channel() {
    let analyzer = ConversationAnalyzer::new();

    let batch: Vec<RawRecord> = (0..20)
        .map(|i| message(1_700_000_000.0 + f64::from(i * 90), "U1", "another thought"))
        .collect();

    let report = analyzer.analyze(&batch).unwrap();

    assert_eq!(report.engagement.unique_participants, 1);
    assert_eq!(report.engagement.participation_rate, 5.0);
    assert!(report.health <= 55, "health was {}", report.health);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("Participation is concentrated")));
}

// First three messages a second apart, last three two hours apart
#[test]
fn scenario_dying_thread() {
    let analyzer = ConversationAnalyzer::new();

    let base = 1_700_000_000.0;
    let timestamps = [
        base,
        base + 1.0,
        base + 2.0,
        base + 7202.0,
        base + 14_402.0,
        base + 21_602.0,
    ];
    let batch: Vec<RawRecord> = timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| message(ts, &format!("U{i}"), "still here"))
        .collect();

    let report = analyzer.analyze(&batch).unwrap();

    assert_eq!(report.temporal.momentum, Momentum::Decreasing);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("slowing down")));
}

#[test]
fn malformed_entries_surface_as_warnings_not_failures() {
    let analyzer = ConversationAnalyzer::new();

    let batch = vec![
        message(1_700_000_000.0, "U1", "hello"),
        RawRecord::default(),
        message(1_700_000_060.0, "U2", "hi"),
    ];

    let report = analyzer.analyze(&batch).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.engagement.unique_participants, 2);
}

#[test]
fn fully_invalid_batch_is_a_recoverable_error() {
    let analyzer = ConversationAnalyzer::new();

    let err = analyzer
        .analyze(&[RawRecord::default(), RawRecord::default()])
        .unwrap_err();
    assert!(matches!(err, ConvoPulseError::EmptyBatch { dropped: 2 }));
}

#[test]
fn duplicate_ids_keep_first_and_warn() {
    let analyzer = ConversationAnalyzer::new();

    let first = message(1_700_000_000.0, "U1", "original");
    let duplicate = message(1_700_000_000.0, "U2", "copy");
    let other = message(1_700_000_060.0, "U3", "fresh");

    let report = analyzer.analyze(&[first, duplicate, other]).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.engagement.unique_participants, 2);
}
