//! Participation and reaction metrics
//!
//! Per-participant activity counts and batch-level diversity rates. The
//! most-active tie-break is first-seen order, never map iteration order.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::models::CanonicalRecord;

/// Engagement summary for one batch. Rates are expressed 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementProfile {
    pub unique_participants: usize,
    /// Unique participants relative to total records.
    pub participation_rate: f32,
    pub reactions_per_record: f32,
    /// Share of records that are thread replies.
    pub thread_participation_rate: f32,
    pub most_active_participant: Option<String>,
}

/// Build the engagement profile. Author identity comes only from
/// non-null `author_id` values; system events carry none.
#[must_use]
pub fn profile(records: &[CanonicalRecord]) -> EngagementProfile {
    let denominator = records.len().max(1) as f32;

    // (count, first-seen index) per author, in record order
    let mut activity: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        if let Some(author) = record.author_id.as_deref() {
            let entry = activity.entry(author).or_insert((0, index));
            entry.0 += 1;
        }
    }

    let most_active_participant = activity
        .iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(author, _)| (*author).to_string());

    let total_reactions: u32 = records.iter().map(CanonicalRecord::reaction_total).sum();
    let replies = records.iter().filter(|r| r.is_reply()).count();

    EngagementProfile {
        unique_participants: activity.len(),
        participation_rate: activity.len() as f32 / denominator * 100.0,
        reactions_per_record: total_reactions as f32 / denominator,
        thread_participation_rate: replies as f32 / denominator * 100.0,
        most_active_participant,
    }
}
