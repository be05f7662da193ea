//! Core data models for the daily ranking snapshot
//!
//! This module contains the metrics payload served to callers and the dated
//! record shape persisted in the store, plus the upstream API client.

pub mod htb;

pub use htb::{FetchError, HtbClient};

use serde::{Deserialize, Serialize};

/// Ranking metrics for a single Hack The Box user
///
/// Every field is optional: the upstream profile may omit any of them, and a
/// cache-miss placeholder record carries none at all. Absent fields are
/// skipped during serialization, so a placeholder serializes to `{}`.
/// Field names on the wire match the stored-record attribute names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingMetrics {
    /// Number of machines owned at the system/root level
    #[serde(rename = "System_Owns", skip_serializing_if = "Option::is_none")]
    pub system_owns: Option<u32>,
    /// Number of machines owned at the user level
    #[serde(rename = "User_Owns", skip_serializing_if = "Option::is_none")]
    pub user_owns: Option<u32>,
    /// Number of first system owns
    #[serde(rename = "System_Bloods", skip_serializing_if = "Option::is_none")]
    pub system_bloods: Option<u32>,
    /// Number of first user owns
    #[serde(rename = "User_Bloods", skip_serializing_if = "Option::is_none")]
    pub user_bloods: Option<u32>,
    /// Rank label (e.g. "Hacker", "Pro Hacker")
    #[serde(rename = "Rank", skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    /// Position on the global leaderboard
    #[serde(rename = "User_Global_Rank", skip_serializing_if = "Option::is_none")]
    pub global_rank: Option<u32>,
    /// Position on the user's own country leaderboard; only present when the
    /// user was found in the country ranking list
    #[serde(rename = "Local_Rank", skip_serializing_if = "Option::is_none")]
    pub local_rank: Option<u32>,
}

/// A store record for one calendar day
///
/// `date` is the partition key (ISO 8601 calendar date, no time component);
/// the metrics are flattened beside it, so the stored JSON is the response
/// payload plus the key. At most one record exists per date and it is never
/// rewritten once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// ISO 8601 date the record was computed for
    pub date: String,
    /// The cached metrics; all absent for a placeholder
    #[serde(flatten)]
    pub metrics: RankingMetrics,
}

impl CacheRecord {
    /// Creates a record holding freshly fetched metrics for `date`
    pub fn new(date: String, metrics: RankingMetrics) -> Self {
        Self { date, metrics }
    }

    /// Creates a date-only record marking a day whose fetch already failed
    pub fn placeholder(date: String) -> Self {
        Self {
            date,
            metrics: RankingMetrics::default(),
        }
    }
}
