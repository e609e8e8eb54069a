//! Aggregation and JSON emission.

use serde::Serialize;

use crate::error::{UpNextError, UpNextResult};
use crate::event::EventRecord;

/// Version tag of the output document shape.
pub const FORMAT_VERSION: f64 = 1.2;

/// The single JSON document a run produces.
#[derive(Serialize)]
pub struct Report {
    pub events: Vec<EventRecord>,
    pub version: f64,
}

impl Report {
    /// Assemble a report from collected records, ordered by start time.
    ///
    /// The sort is stable, so records sharing a start instant keep the
    /// order they were discovered in.
    pub fn new(mut events: Vec<EventRecord>) -> Self {
        events.sort_by_key(|record| record.start);

        Report {
            events,
            version: FORMAT_VERSION,
        }
    }

    /// Pretty-printed JSON for the whole report.
    pub fn to_json(&self) -> UpNextResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| UpNextError::Serialization(e.to_string()))
    }
}
