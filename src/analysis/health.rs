//! Composite conversational-health scoring
//!
//! One ordered rule table over participation, reaction density, momentum,
//! and data sufficiency. Every weight is a named constant so the table is
//! independently testable.

use crate::analysis::engagement::EngagementProfile;
use crate::analysis::temporal::Momentum;
use crate::analysis::temporal::TemporalProfile;

pub const BASE_SCORE: i32 = 50;

pub const HIGH_PARTICIPATION_BONUS: i32 = 20;
pub const MODERATE_PARTICIPATION_BONUS: i32 = 10;
pub const HIGH_PARTICIPATION_RATE: f32 = 50.0;
pub const MODERATE_PARTICIPATION_RATE: f32 = 25.0;

pub const HIGH_REACTION_BONUS: i32 = 15;
pub const MODERATE_REACTION_BONUS: i32 = 8;
pub const HIGH_REACTION_RATIO: f32 = 0.3;
pub const MODERATE_REACTION_RATIO: f32 = 0.1;

pub const INCREASING_MOMENTUM_BONUS: i32 = 10;
pub const DECREASING_MOMENTUM_PENALTY: i32 = 10;

/// Batches below this size carry too little signal to assess.
pub const MIN_RECORDS_FOR_SIGNAL: usize = 2;
pub const SPARSE_DATA_PENALTY: i32 = 20;

/// Spans longer than one week mark a stale thread.
pub const STALE_SPAN_HOURS: f64 = 168.0;
pub const STALE_SPAN_PENALTY: i32 = 10;

/// Composite health score in [0, 100].
#[must_use]
pub fn score(
    engagement: &EngagementProfile,
    temporal: &TemporalProfile,
    total_records: usize,
) -> u8 {
    let mut score = BASE_SCORE;

    if engagement.participation_rate > HIGH_PARTICIPATION_RATE {
        score += HIGH_PARTICIPATION_BONUS;
    } else if engagement.participation_rate > MODERATE_PARTICIPATION_RATE {
        score += MODERATE_PARTICIPATION_BONUS;
    }

    if engagement.reactions_per_record > HIGH_REACTION_RATIO {
        score += HIGH_REACTION_BONUS;
    } else if engagement.reactions_per_record > MODERATE_REACTION_RATIO {
        score += MODERATE_REACTION_BONUS;
    }

    match temporal.momentum {
        Momentum::Increasing => score += INCREASING_MOMENTUM_BONUS,
        Momentum::Decreasing => score -= DECREASING_MOMENTUM_PENALTY,
        Momentum::Stable => {}
    }

    if total_records < MIN_RECORDS_FOR_SIGNAL {
        score -= SPARSE_DATA_PENALTY;
    }

    if temporal.span_hours > STALE_SPAN_HOURS {
        score -= STALE_SPAN_PENALTY;
    }

    score.clamp(0, 100) as u8
}
