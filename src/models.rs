//! Wire-level and canonical record types
//!
//! `RawRecord` mirrors the loose JSON shape returned by chat platform APIs.
//! `CanonicalRecord` is the validated representation produced exclusively by
//! the normalizer; downstream analysis never touches raw wire data.

use serde::Deserialize;
use serde::Serialize;

/// One message entry as returned by the conversation fetch API.
///
/// Every field is optional because the wire format makes no guarantees;
/// the normalizer decides what is usable. Timestamps arrive either as
/// decimal strings (`"1712345678.000200"`) or as bare numbers, so they
/// are kept as raw JSON values until parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub client_msg_id: Option<String>,
    pub ts: Option<serde_json::Value>,
    pub user: Option<String>,
    pub bot_id: Option<String>,
    pub text: Option<String>,
    pub channel: Option<String>,
    pub thread_ts: Option<serde_json::Value>,
    pub reply_count: Option<u32>,
    pub reactions: Vec<RawReaction>,
    pub files: Vec<serde_json::Value>,
    pub edited: Option<serde_json::Value>,
    pub subtype: Option<String>,
}

/// One reaction group on a raw message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReaction {
    pub name: String,
    pub count: Option<u32>,
    pub users: Vec<String>,
}

/// A validated, uniquely-identified conversation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub id: String,
    /// Seconds since the Unix epoch, with sub-second fraction. Primary
    /// ordering key within a batch.
    pub timestamp: f64,
    /// Absent for system events.
    pub author_id: Option<String>,
    pub text: String,
    pub channel_id: String,
    /// Timestamp of the thread root when this record is a reply.
    pub thread_root: Option<f64>,
    pub reply_count: u32,
    pub reactions: Vec<Reaction>,
    pub has_files: bool,
    pub is_bot: bool,
    pub is_edited: bool,
}

impl CanonicalRecord {
    /// A record is a reply iff it carries a thread root. The normalizer
    /// strips a thread parent's self-referential root, so presence alone
    /// decides.
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.thread_root.is_some()
    }

    /// Total reaction count across all emoji on this record.
    #[must_use]
    pub fn reaction_total(&self) -> u32 {
        self.reactions.iter().map(|r| r.count).sum()
    }
}

/// A normalized reaction group. `count` is authoritative; `reactor_ids`
/// may be empty when the API did not supply reactor identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    pub count: u32,
    pub reactor_ids: Vec<String>,
}

/// Why a raw record was dropped or flagged during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    MalformedRecord,
    MissingTimestamp,
    DuplicateId,
}

/// Diagnostic emitted by the normalizer. A warning never aborts the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationWarning {
    pub kind: WarningKind,
    pub record_id: Option<String>,
    pub detail: String,
}
