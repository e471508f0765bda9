//! Conversation analytics pipeline
//!
//! One pure, synchronous pass over a bounded batch of conversation records:
//! normalize, then score sentiment, temporal patterns, and engagement
//! independently, then fold those into a composite health score and a set
//! of recommendations. The engine holds no state between calls beyond the
//! sentiment lexicon it was constructed with, so it is safe to share across
//! threads and to call concurrently on independent batches.

pub mod engagement;
pub mod health;
pub mod normalizer;
pub mod recommendations;
pub mod sentiment;
pub mod temporal;

use serde::Deserialize;
use serde::Serialize;

use crate::models::NormalizationWarning;
use crate::models::RawRecord;
use crate::Result;

pub use engagement::EngagementProfile;
pub use normalizer::Normalized;
pub use sentiment::SentimentLexicon;
pub use sentiment::SentimentResult;
pub use sentiment::SentimentScorer;
pub use sentiment::Tone;
pub use temporal::Momentum;
pub use temporal::TemporalProfile;

/// Immutable output bundle for one analyzed batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sentiment: SentimentResult,
    pub temporal: TemporalProfile,
    pub engagement: EngagementProfile,
    /// Composite health score, 0-100.
    pub health: u8,
    pub recommendations: Vec<String>,
    /// Diagnostics for raw entries that were dropped during normalization.
    pub warnings: Vec<NormalizationWarning>,
}

impl AnalysisReport {
    /// Render the report as human-readable text for the CLI.
    #[must_use]
    pub fn format_text(&self) -> String {
        let mut output = String::new();

        output.push_str("═══════════════════════════════════════\n");
        output.push_str("CONVERSATION HEALTH REPORT\n");
        output.push_str("═══════════════════════════════════════\n\n");

        output.push_str(&format!("Health score: {}/100\n\n", self.health));

        output.push_str(&format!(
            "Sentiment: {} ({:+.2}) | {} positive / {} negative / {} neutral\n",
            self.sentiment.dominant_tone,
            self.sentiment.score,
            self.sentiment.positive_count,
            self.sentiment.negative_count,
            self.sentiment.neutral_count
        ));

        output.push_str(&format!(
            "Activity: peak hour {:02}:00 UTC | {:.1} msg/h | momentum {} | span {:.1}h\n",
            self.temporal.peak_hour,
            self.temporal.velocity_per_hour,
            self.temporal.momentum,
            self.temporal.span_hours
        ));

        output.push_str(&format!(
            "Engagement: {} participants | participation {:.0}% | {:.2} reactions/msg | threads {:.0}%\n",
            self.engagement.unique_participants,
            self.engagement.participation_rate,
            self.engagement.reactions_per_record,
            self.engagement.thread_participation_rate
        ));

        if let Some(author) = &self.engagement.most_active_participant {
            output.push_str(&format!("Most active: {author}\n"));
        }

        output.push_str("\nRecommendations:\n");
        for (index, recommendation) in self.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", index + 1, recommendation));
        }

        if !self.warnings.is_empty() {
            output.push_str(&format!(
                "\n{} record(s) dropped during normalization\n",
                self.warnings.len()
            ));
        }

        output
    }
}

/// The analytics engine. Construct once, call `analyze` per batch.
#[derive(Debug, Clone)]
pub struct ConversationAnalyzer {
    scorer: SentimentScorer,
}

impl ConversationAnalyzer {
    /// Analyzer over the bundled sentiment lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scorer: SentimentScorer::new(),
        }
    }

    /// Analyzer over a caller-supplied lexicon (tests substitute a minimal
    /// fixed one for determinism).
    #[must_use]
    pub fn with_lexicon(lexicon: SentimentLexicon) -> Self {
        Self {
            scorer: SentimentScorer::with_lexicon(lexicon),
        }
    }

    /// Run the full pipeline over one raw batch.
    ///
    /// Records are sorted by `(timestamp, id)` before any order-sensitive
    /// computation, so the result is invariant under input permutation and
    /// bit-identical across repeated calls.
    pub fn analyze(&self, raw: &[RawRecord]) -> Result<AnalysisReport> {
        let Normalized {
            mut records,
            warnings,
        } = normalizer::normalize(raw)?;

        records.sort_by(|a, b| {
            a.timestamp
                .partial_cmp(&b.timestamp)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        let sentiment = self.scorer.score_batch(&records);
        let temporal = temporal::profile(&records);
        let engagement = engagement::profile(&records);
        let health = health::score(&engagement, &temporal, records.len());
        let recommendations = recommendations::generate(&sentiment, &temporal, &engagement, health);

        tracing::debug!(
            records = records.len(),
            health,
            sentiment = sentiment.score,
            "Analyzed conversation batch"
        );

        Ok(AnalysisReport {
            sentiment,
            temporal,
            engagement,
            health,
            recommendations,
            warnings,
        })
    }
}

impl Default for ConversationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
