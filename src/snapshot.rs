//! Daily snapshot orchestration
//!
//! The read-through flow at the heart of the tool: look up today's record,
//! on a miss fetch fresh metrics from the upstream API, persist the result,
//! and shape the response payload. Degrades gracefully when either the
//! store or the upstream fails.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{RecordStore, StoreError};
use crate::config::ConfigError;
use crate::data::{CacheRecord, FetchError, HtbClient, RankingMetrics};

/// Errors surfaced by a snapshot invocation
///
/// Callers can branch on the variant; `into_response` flattens the enum to
/// the `{"error": message}` wire shape.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Store location missing from the environment
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store lookup itself failed (not a mere absent record)
    #[error("Database lookup failed")]
    StoreRead(#[source] StoreError),

    /// Fresh metrics could not be fetched from the upstream API
    #[error("Could not retrieve rankings")]
    Upstream(#[source] FetchError),
}

/// Runs the read-through snapshot flow for `today`
///
/// At most one store read and one store write happen per call, and the
/// upstream API is only contacted when the read finds no record for the
/// date key.
///
/// A failed fetch writes a date-only placeholder marking the day as already
/// attempted; later calls on the same date serve the (empty) placeholder
/// instead of retrying. A failed write never masks freshly fetched metrics.
pub async fn run_daily_snapshot<S: RecordStore>(
    today: NaiveDate,
    store: &S,
    client: &HtbClient,
) -> Result<RankingMetrics, SnapshotError> {
    let date_key = today.format("%Y-%m-%d").to_string();

    let cached = store.get(&date_key).map_err(SnapshotError::StoreRead)?;
    if let Some(record) = cached {
        debug!(date = %record.date, "serving cached record");
        return Ok(record.metrics);
    }

    debug!(date = %date_key, "cache miss, fetching fresh rankings");
    match client.fetch_rankings().await {
        Ok(metrics) => {
            let record = CacheRecord::new(date_key, metrics.clone());
            if let Err(err) = store.put(&record) {
                warn!(date = %record.date, error = %err, "failed to cache fetched metrics");
            }
            Ok(metrics)
        }
        Err(fetch_err) => {
            // Mark the day as attempted; this write is best-effort.
            let placeholder = CacheRecord::placeholder(date_key);
            if let Err(err) = store.put(&placeholder) {
                warn!(date = %placeholder.date, error = %err, "failed to write placeholder record");
            }
            Err(SnapshotError::Upstream(fetch_err))
        }
    }
}

/// Shapes an invocation result into the JSON payload printed to callers
///
/// Metrics serialize to their field mapping, which is an empty object when
/// a cached placeholder was served; errors collapse to `{"error": message}`.
pub fn into_response(result: Result<RankingMetrics, SnapshotError>) -> Value {
    match result {
        Ok(metrics) => serde_json::to_value(metrics)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new())),
        Err(err) => serde_json::json!({ "error": err.to_string() }),
    }
}
