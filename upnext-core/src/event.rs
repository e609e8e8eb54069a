//! The output unit: one extracted calendar event.

use serde::Serialize;

/// A single upcoming event, normalized for the output document.
///
/// `start` and `end` are epoch seconds after conversion to the reference
/// timezone. `urls` preserves the order URLs appear in the description;
/// `zoom_url` is derived from it and never authoritative. `attendees` is
/// always a sequence, even when the source carries a single value.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    /// Source .ics file the event came from
    pub file: String,
    /// Title of the containing calendar, if known at time of parsing
    pub calendar: Option<String>,
    pub start: i64,
    pub end: i64,
    pub summary: String,
    /// STATUS value as given by the source (e.g. CONFIRMED), empty when absent
    pub status: String,
    /// Raw DESCRIPTION text, empty when absent
    pub desc: String,
    /// URL-like substrings found in `desc`, in order of appearance
    pub urls: Vec<String>,
    /// First entry of `urls` if it contains the meeting marker, else empty
    pub zoom_url: String,
    /// Attendee identifiers with any mail-scheme prefix stripped
    pub attendees: Vec<String>,
    /// X-APPLE-EWS-BUSYSTATUS value as given by the source, empty when absent
    pub busy: String,
}
