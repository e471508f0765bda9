//! Rule-table-driven recommendations
//!
//! Evaluates a fixed, ordered rule table against the computed metrics and
//! collects the message for every rule that fires. The output is
//! deduplicated and never empty.

use crate::analysis::engagement::EngagementProfile;
use crate::analysis::health;
use crate::analysis::sentiment::SentimentResult;
use crate::analysis::temporal::Momentum;
use crate::analysis::temporal::TemporalProfile;

/// Health below this is flagged for re-engagement.
pub const LOW_HEALTH_SCORE: u8 = 40;

/// Health at or above this is called out as thriving.
pub const HIGH_HEALTH_SCORE: u8 = 80;

/// Participation below this rate is flagged as concentrated.
pub const LOW_PARTICIPATION_RATE: f32 = 20.0;

/// Batch sentiment below this is flagged as negative.
pub const NEGATIVE_SENTIMENT_SCORE: f32 = -0.2;

/// Reactions per record above this suggest lurker interest.
pub const HIGH_REACTION_RATIO: f32 = 0.5;

/// Emitted when no other rule fires.
pub const DEFAULT_RECOMMENDATION: &str =
    "Conversation looks healthy. Keep doing what you're doing.";

/// Evaluate the rule table in order and return the fired messages.
#[must_use]
pub fn generate(
    sentiment: &SentimentResult,
    temporal: &TemporalProfile,
    engagement: &EngagementProfile,
    health_score: u8,
) -> Vec<String> {
    // A zero-record batch has nothing to recommend against
    let total_records: u32 = temporal.hour_histogram.iter().sum();
    if total_records == 0 {
        return vec![DEFAULT_RECOMMENDATION.to_string()];
    }

    let mut recommendations: Vec<String> = Vec::new();
    let mut push = |message: &str| {
        if !recommendations.iter().any(|m| m == message) {
            recommendations.push(message.to_string());
        }
    };

    if health_score < LOW_HEALTH_SCORE {
        push("Conversation health is low. Re-engage the channel with a summary or a direct question.");
    }
    if health_score >= HIGH_HEALTH_SCORE {
        push("Conversation is thriving. Maintain the current cadence.");
    }
    if engagement.participation_rate < LOW_PARTICIPATION_RATE {
        push("Participation is concentrated in a few voices. Invite more members to weigh in.");
    }
    if temporal.momentum == Momentum::Decreasing {
        push("Activity is slowing down. A follow-up question could restart the discussion.");
    }
    if sentiment.score < NEGATIVE_SENTIMENT_SCORE {
        push("Sentiment is trending negative. Address concerns directly before they compound.");
    }
    if engagement.reactions_per_record > HIGH_REACTION_RATIO {
        push("Reactions are outpacing replies. Turn that interest into discussion with an open question.");
    }
    if engagement.unique_participants == 1 {
        push("Only one participant is active. Loop in the people who need to see this.");
    }
    if temporal.span_hours > health::STALE_SPAN_HOURS {
        push("This conversation has been open for over a week. Summarize outcomes and close it out.");
    }

    if recommendations.is_empty() {
        recommendations.push(DEFAULT_RECOMMENDATION.to_string());
    }

    recommendations
}
