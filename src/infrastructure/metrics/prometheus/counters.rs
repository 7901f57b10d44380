use crate::domain::CollectionOutcome;
use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};
use std::time::Instant;

const COLLECTIONS_TOTAL: &str = "spritmonitor_collections_total";
const COLLECTION_DURATION: &str = "spritmonitor_collection_duration_seconds";
const LAST_SUCCESS_TIMESTAMP: &str = "spritmonitor_last_success_timestamp_seconds";

/// Register descriptions for the self-metrics.
pub fn describe_collection_metrics() {
    describe_counter!(COLLECTIONS_TOTAL, "Collection cycles by outcome");
    describe_histogram!(COLLECTION_DURATION, Unit::Seconds, "Collection cycle duration");
    describe_gauge!(
        LAST_SUCCESS_TIMESTAMP,
        Unit::Seconds,
        "Unix time of the last successful collection"
    );
}

/// Count a finished (or skipped) collection cycle and track its latency.
pub fn track_collection(start: Instant, outcome: CollectionOutcome) {
    counter!(COLLECTIONS_TOTAL, "outcome" => outcome.as_str()).increment(1);

    if outcome == CollectionOutcome::Skipped {
        return;
    }
    histogram!(COLLECTION_DURATION).record(start.elapsed());

    if outcome == CollectionOutcome::Success {
        gauge!(LAST_SUCCESS_TIMESTAMP).set(chrono::Utc::now().timestamp() as f64);
    }
}
