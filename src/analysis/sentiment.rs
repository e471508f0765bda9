//! Lexicon-based sentiment scoring
//!
//! Each record is scored independently from its text tokens (AFINN-style
//! word scores, -5 to +5) and its reactions (emoji weight table). A single
//! emoji occurrence carries more weight than a single word hit, reflecting
//! reactions as the stronger signal.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;
use serde::Serialize;

use crate::models::CanonicalRecord;

// Bundled lexicons, loaded at compile time
const AFINN_LEXICON: &str = include_str!("../../data/afinn.txt");
const EMOJI_WEIGHTS: &str = include_str!("../../data/emoji.txt");

/// Scale applied to a full-strength (+/-5) word score. A maximum-strength
/// word contributes +/-0.2 to a record's score.
pub const WORD_WEIGHT: f32 = 0.2;

/// AFINN scores range over -5..=5.
pub const AFINN_SCALE: f32 = 5.0;

/// Batch score above which the dominant tone is `VeryPositive`.
pub const VERY_POSITIVE_THRESHOLD: f32 = 0.6;

/// Batch score above which the dominant tone is `Positive`.
pub const POSITIVE_THRESHOLD: f32 = 0.2;

/// Batch score below which the dominant tone is `Negative`.
pub const NEGATIVE_THRESHOLD: f32 = -0.2;

lazy_static! {
    static ref BUILTIN_LEXICON: SentimentLexicon = SentimentLexicon::parse_builtin();
}

/// Word and emoji sentiment tables. Injectable so tests can substitute a
/// minimal fixed lexicon.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    words: HashMap<String, i8>,
    emoji: HashMap<String, f32>,
}

impl SentimentLexicon {
    #[must_use]
    pub fn new(words: HashMap<String, i8>, emoji: HashMap<String, f32>) -> Self {
        Self { words, emoji }
    }

    /// The bundled AFINN subset plus the emoji reaction table.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_LEXICON.clone()
    }

    fn parse_builtin() -> Self {
        let mut words = HashMap::new();
        for line in AFINN_LEXICON.lines() {
            if let Some((word, score)) = line.split_once('\t') {
                if let Ok(score) = score.trim().parse::<i8>() {
                    words.insert(word.to_lowercase(), score);
                }
            }
        }

        let mut emoji = HashMap::new();
        for line in EMOJI_WEIGHTS.lines() {
            if let Some((name, weight)) = line.split_once('\t') {
                if let Ok(weight) = weight.trim().parse::<f32>() {
                    emoji.insert(name.to_string(), weight);
                }
            }
        }

        Self { words, emoji }
    }

    #[must_use]
    pub fn word_score(&self, token: &str) -> Option<i8> {
        self.words.get(token).copied()
    }

    #[must_use]
    pub fn emoji_weight(&self, name: &str) -> Option<f32> {
        self.emoji.get(name).copied()
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Overall emotional valence of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::VeryPositive => "very positive",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        };
        write!(f, "{label}")
    }
}

/// Batch sentiment summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Mean of per-record scores, each clamped to [-1, 1].
    pub score: f32,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub dominant_tone: Tone,
}

/// Scores batches against a fixed lexicon.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: SentimentLexicon,
}

impl SentimentScorer {
    /// Scorer over the bundled lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lexicon: SentimentLexicon::builtin(),
        }
    }

    /// Scorer over a caller-supplied lexicon.
    #[must_use]
    pub fn with_lexicon(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    /// Score one record: word hits plus emoji reaction weights, clamped.
    #[must_use]
    pub fn score_record(&self, record: &CanonicalRecord) -> f32 {
        let mut word_net = 0.0_f32;
        for token in tokenize(&record.text) {
            if let Some(score) = self.lexicon.word_score(&token) {
                word_net += f32::from(score) / AFINN_SCALE * WORD_WEIGHT;
            }
        }

        let mut emoji_net = 0.0_f32;
        for reaction in &record.reactions {
            if let Some(weight) = self.lexicon.emoji_weight(&reaction.emoji) {
                emoji_net += weight * reaction.count as f32;
            }
        }

        (word_net + emoji_net).clamp(-1.0, 1.0)
    }

    /// Score a whole batch. A zero-record batch is a defined neutral
    /// baseline (score 0), not an error.
    #[must_use]
    pub fn score_batch(&self, records: &[CanonicalRecord]) -> SentimentResult {
        let mut positive_count = 0;
        let mut negative_count = 0;
        let mut neutral_count = 0;
        let mut total = 0.0_f32;

        for record in records {
            let score = self.score_record(record);
            total += score;
            if score > 0.0 {
                positive_count += 1;
            } else if score < 0.0 {
                negative_count += 1;
            } else {
                neutral_count += 1;
            }
        }

        let score = if records.is_empty() {
            0.0
        } else {
            total / records.len() as f32
        };

        SentimentResult {
            score,
            positive_count,
            negative_count,
            neutral_count,
            dominant_tone: tone_for(score),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn tone_for(score: f32) -> Tone {
    if score > VERY_POSITIVE_THRESHOLD {
        Tone::VeryPositive
    } else if score > POSITIVE_THRESHOLD {
        Tone::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Lowercased alphanumeric tokens split on word boundaries.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reaction;

    fn record(text: &str, reactions: Vec<(&str, u32)>) -> CanonicalRecord {
        CanonicalRecord {
            id: text.to_string(),
            timestamp: 0.0,
            author_id: Some("U1".to_string()),
            text: text.to_string(),
            channel_id: "C1".to_string(),
            thread_root: None,
            reply_count: 0,
            reactions: reactions
                .into_iter()
                .map(|(emoji, count)| Reaction {
                    emoji: emoji.to_string(),
                    count,
                    reactor_ids: Vec::new(),
                })
                .collect(),
            has_files: false,
            is_bot: false,
            is_edited: false,
        }
    }

    fn fixed_scorer() -> SentimentScorer {
        let words = HashMap::from([("up".to_string(), 5_i8), ("down".to_string(), -5_i8)]);
        let emoji = HashMap::from([("yay".to_string(), 0.3_f32), ("boo".to_string(), -0.3_f32)]);
        SentimentScorer::with_lexicon(SentimentLexicon::new(words, emoji))
    }

    #[test]
    fn empty_batch_is_neutral_baseline() {
        let result = fixed_scorer().score_batch(&[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.dominant_tone, Tone::Neutral);
        assert_eq!(result.neutral_count, 0);
    }

    #[test]
    fn word_hits_scale_with_lexicon_strength() {
        let scorer = fixed_scorer();
        // One full-strength word: 5/5 * 0.2
        let score = scorer.score_record(&record("up", vec![]));
        assert!((score - WORD_WEIGHT).abs() < 1e-6);

        let score = scorer.score_record(&record("down down", vec![]));
        assert!((score + 2.0 * WORD_WEIGHT).abs() < 1e-6);
    }

    #[test]
    fn emoji_outweighs_a_single_word_hit() {
        let scorer = fixed_scorer();
        // 0.3 emoji against one -5 word at 0.2: net positive
        let score = scorer.score_record(&record("down", vec![("yay", 2)]));
        assert!(score > 0.0);
    }

    #[test]
    fn record_scores_are_clamped() {
        let scorer = fixed_scorer();
        let score = scorer.score_record(&record("up up up up up up up", vec![("yay", 10)]));
        assert_eq!(score, 1.0);

        let score = scorer.score_record(&record("down down down down down down", vec![("boo", 10)]));
        assert_eq!(score, -1.0);
    }

    #[test]
    fn tone_thresholds_are_exact() {
        assert_eq!(tone_for(0.61), Tone::VeryPositive);
        assert_eq!(tone_for(0.6), Tone::Positive);
        assert_eq!(tone_for(0.21), Tone::Positive);
        assert_eq!(tone_for(0.2), Tone::Neutral);
        assert_eq!(tone_for(0.0), Tone::Neutral);
        assert_eq!(tone_for(-0.2), Tone::Neutral);
        assert_eq!(tone_for(-0.21), Tone::Negative);
    }

    #[test]
    fn batch_counts_split_by_record_sign() {
        let scorer = fixed_scorer();
        let records = vec![
            record("up", vec![]),
            record("down", vec![]),
            record("nothing scored here", vec![]),
        ];
        let result = scorer.score_batch(&records);

        assert_eq!(result.positive_count, 1);
        assert_eq!(result.negative_count, 1);
        assert_eq!(result.neutral_count, 1);
        assert!((result.score - 0.0).abs() < 1e-6);
    }

    #[test]
    fn builtin_lexicon_scores_common_words() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score_record(&record("great work everyone", vec![])) > 0.0);
        assert!(scorer.score_record(&record("this is terrible", vec![])) < 0.0);
        assert!(scorer.score_record(&record("deploy finished", vec![("tada", 1)])) > 0.0);
    }

    #[test]
    fn tokenizer_strips_punctuation_and_case() {
        let scorer = SentimentScorer::new();
        let bare = scorer.score_record(&record("great", vec![]));
        let decorated = scorer.score_record(&record("GREAT!!!", vec![]));
        assert!((bare - decorated).abs() < 1e-6);
    }
}
