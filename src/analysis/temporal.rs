//! Temporal activity patterns
//!
//! Buckets records by UTC hour-of-day and derives span, velocity, and
//! momentum. Momentum compares mean inter-record intervals between the
//! first and second halves of the batch.

use chrono::DateTime;
use chrono::Timelike;
use serde::Deserialize;
use serde::Serialize;

use crate::models::CanonicalRecord;

/// Second-half mean interval below this fraction of the first-half mean
/// means the conversation is accelerating.
pub const ACCELERATION_FACTOR: f64 = 0.7;

/// Second-half mean interval above this multiple of the first-half mean
/// means the conversation is slowing down.
pub const DECELERATION_FACTOR: f64 = 1.5;

/// Below this many records, momentum is always `Stable`.
pub const MIN_RECORDS_FOR_MOMENTUM: usize = 3;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Qualitative trend in how quickly records arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Momentum {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for Momentum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        };
        write!(f, "{label}")
    }
}

/// Temporal activity summary for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalProfile {
    /// Record counts per UTC hour of day, index 0-23.
    pub hour_histogram: [u32; 24],
    /// Hour with the most records; ties break toward the smaller hour.
    pub peak_hour: u8,
    pub velocity_per_hour: f64,
    pub momentum: Momentum,
    pub span_hours: f64,
}

/// Build the temporal profile. Records must already be sorted ascending
/// by timestamp.
#[must_use]
pub fn profile(records: &[CanonicalRecord]) -> TemporalProfile {
    let mut hour_histogram = [0_u32; 24];
    for record in records {
        hour_histogram[hour_of_day(record.timestamp)] += 1;
    }

    let mut peak_hour = 0_u8;
    let mut peak_count = 0_u32;
    for (hour, &count) in hour_histogram.iter().enumerate() {
        if count > peak_count {
            peak_count = count;
            peak_hour = hour as u8;
        }
    }

    let span_hours = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (last.timestamp - first.timestamp) / SECONDS_PER_HOUR,
        _ => 0.0,
    };

    let velocity_per_hour = if span_hours > 0.0 {
        records.len() as f64 / span_hours
    } else {
        0.0
    };

    TemporalProfile {
        hour_histogram,
        peak_hour,
        velocity_per_hour,
        momentum: momentum(records),
        span_hours,
    }
}

/// Compare mean inter-record intervals across batch halves.
fn momentum(records: &[CanonicalRecord]) -> Momentum {
    if records.len() < MIN_RECORDS_FOR_MOMENTUM {
        return Momentum::Stable;
    }

    let intervals: Vec<f64> = records
        .windows(2)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
        .collect();

    let mid = intervals.len() / 2;
    let first_mean = mean(&intervals[..mid]);
    let second_mean = mean(&intervals[mid..]);

    if second_mean < first_mean * ACCELERATION_FACTOR {
        Momentum::Increasing
    } else if second_mean > first_mean * DECELERATION_FACTOR {
        Momentum::Decreasing
    } else {
        Momentum::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// UTC hour-of-day for a fractional Unix timestamp. UTC keeps results
/// identical across hosts regardless of machine timezone.
fn hour_of_day(timestamp: f64) -> usize {
    DateTime::from_timestamp(timestamp.floor() as i64, 0)
        .map(|dt| dt.hour() as usize)
        .unwrap_or(0)
}
