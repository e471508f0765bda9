//! Record normalization
//!
//! Converts loose wire-format entries into canonical records. Individual
//! malformed entries are dropped with a warning; only a batch that loses
//! every record is reported as an error.

use std::collections::HashSet;

use crate::models::CanonicalRecord;
use crate::models::NormalizationWarning;
use crate::models::RawRecord;
use crate::models::Reaction;
use crate::models::WarningKind;
use crate::ConvoPulseError;
use crate::Result;

/// Output of one normalization pass.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub records: Vec<CanonicalRecord>,
    pub warnings: Vec<NormalizationWarning>,
}

/// Normalize a raw batch.
///
/// Returns `ConvoPulseError::EmptyBatch` only when a non-empty input yields
/// zero valid records. An originally empty input is a valid empty batch.
pub fn normalize(raw: &[RawRecord]) -> Result<Normalized> {
    let mut records = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for entry in raw {
        let ts_string = entry.ts.as_ref().and_then(value_to_string);
        let id = entry.client_msg_id.clone().or_else(|| ts_string.clone());

        let Some(id) = id else {
            warnings.push(NormalizationWarning {
                kind: WarningKind::MalformedRecord,
                record_id: None,
                detail: "entry has neither an id nor a timestamp".to_string(),
            });
            continue;
        };

        let Some(timestamp) = entry.ts.as_ref().and_then(parse_timestamp) else {
            warnings.push(NormalizationWarning {
                kind: WarningKind::MissingTimestamp,
                record_id: Some(id),
                detail: "timestamp is absent or unparseable".to_string(),
            });
            continue;
        };

        if !seen_ids.insert(id.clone()) {
            warnings.push(NormalizationWarning {
                kind: WarningKind::DuplicateId,
                record_id: Some(id),
                detail: "duplicate id, keeping first occurrence".to_string(),
            });
            continue;
        }

        records.push(CanonicalRecord {
            id,
            timestamp,
            author_id: entry.user.clone(),
            text: entry.text.clone().unwrap_or_default(),
            channel_id: entry.channel.clone().unwrap_or_default(),
            // A thread parent carries its own timestamp as the thread root;
            // only true replies keep one
            thread_root: entry
                .thread_ts
                .as_ref()
                .and_then(parse_timestamp)
                .filter(|root| (root - timestamp).abs() > f64::EPSILON),
            reply_count: entry.reply_count.unwrap_or(0),
            reactions: normalize_reactions(entry),
            has_files: !entry.files.is_empty(),
            is_bot: entry.bot_id.is_some() || entry.subtype.as_deref() == Some("bot_message"),
            is_edited: entry.edited.is_some(),
        });
    }

    if records.is_empty() && !raw.is_empty() {
        return Err(ConvoPulseError::EmptyBatch {
            dropped: warnings.len(),
        });
    }

    if !warnings.is_empty() {
        tracing::warn!(
            "Normalized {} of {} records ({} warnings)",
            records.len(),
            raw.len(),
            warnings.len()
        );
    }

    Ok(Normalized { records, warnings })
}

/// Parse a wire timestamp into fractional Unix seconds.
fn parse_timestamp(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.filter(|ts| ts.is_finite())
}

fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reactor identities are authoritative for the count when present;
/// otherwise the wire count stands on its own.
fn normalize_reactions(entry: &RawRecord) -> Vec<Reaction> {
    entry
        .reactions
        .iter()
        .filter(|r| !r.name.is_empty())
        .map(|r| Reaction {
            emoji: r.name.clone(),
            count: if r.users.is_empty() {
                r.count.unwrap_or(0)
            } else {
                r.users.len() as u32
            },
            reactor_ids: r.users.clone(),
        })
        .collect()
}
