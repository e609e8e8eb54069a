//! Event extraction from calendar-data files.
//!
//! Decodes .ics content with the icalendar parser, keeps VEVENT components
//! whose start falls inside the scan window, and normalizes their fields
//! into `EventRecord`s.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use icalendar::{
    parser::{read_calendar, unfold, Component},
    CalendarDateTime, DatePerhapsTime,
};
use tracing::warn;

use crate::error::{UpNextError, UpNextResult};
use crate::event::EventRecord;
use crate::urls::{extract_urls, first_meeting_url};
use crate::window::ScanWindow;

/// Read one .ics file and append its in-window events to `events`.
pub fn extract_events_from_file(
    path: &Path,
    calendar: Option<&str>,
    window: &ScanWindow,
    zone: Tz,
    events: &mut Vec<EventRecord>,
) -> UpNextResult<()> {
    let content = std::fs::read_to_string(path)?;
    extract_events(&content, path, calendar, window, zone, events)
}

/// Decode raw ICS content and append its in-window events to `events`.
///
/// Non-event components (VTODO, VFREEBUSY, VTIMEZONE) are skipped. An event
/// whose DTSTART or DTEND cannot be resolved is skipped with a warning; the
/// rest of the file is still processed. Undecodable content fails the whole
/// file and emits no partial records.
pub fn extract_events(
    content: &str,
    path: &Path,
    calendar: Option<&str>,
    window: &ScanWindow,
    zone: Tz,
    events: &mut Vec<EventRecord>,
) -> UpNextResult<()> {
    let unfolded = unfold(content);
    let parsed = read_calendar(&unfolded).map_err(|e| UpNextError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    for component in &parsed.components {
        if component.name != "VEVENT" {
            continue;
        }

        match build_record(component, path, calendar, window, zone) {
            Ok(Some(record)) => events.push(record),
            Ok(None) => {} // outside the window
            Err(err) => warn!("skipping event in {}: {}", path.display(), err),
        }
    }

    Ok(())
}

/// Build the record for one VEVENT, or `None` when its start is outside the
/// window. The window check runs before any other field is touched, so an
/// out-of-window event can never surface partially.
fn build_record(
    vevent: &Component,
    path: &Path,
    calendar: Option<&str>,
    window: &ScanWindow,
    zone: Tz,
) -> UpNextResult<Option<EventRecord>> {
    let summary = prop_text(vevent, "SUMMARY");

    let start =
        resolve_instant(vevent, "DTSTART", zone).ok_or_else(|| UpNextError::FieldResolution {
            field: "DTSTART",
            summary: summary.clone(),
        })?;

    if !window.contains(start) {
        return Ok(None);
    }

    let end = resolve_instant(vevent, "DTEND", zone).ok_or_else(|| UpNextError::FieldResolution {
        field: "DTEND",
        summary: summary.clone(),
    })?;

    let desc = prop_text(vevent, "DESCRIPTION");
    let urls = extract_urls(&desc);
    let zoom_url = first_meeting_url(&urls);

    Ok(Some(EventRecord {
        file: path.display().to_string(),
        calendar: calendar.map(str::to_string),
        start,
        end,
        summary,
        status: prop_text(vevent, "STATUS"),
        desc,
        urls,
        zoom_url,
        attendees: attendee_list(vevent),
        busy: prop_text(vevent, "X-APPLE-EWS-BUSYSTATUS"),
    }))
}

fn prop_text(component: &Component, name: &str) -> String {
    component
        .find_prop(name)
        .map(|p| p.val.to_string())
        .unwrap_or_default()
}

/// Resolve a temporal property to epoch seconds.
///
/// Date-times convert to the reference zone directly; bare dates (all-day
/// events) count as midnight in the reference zone. Floating date-times are
/// interpreted in the reference zone, and an unrecognized TZID falls back to
/// it as well.
fn resolve_instant(vevent: &Component, name: &str, zone: Tz) -> Option<i64> {
    let prop = vevent.find_prop(name)?;
    let value = DatePerhapsTime::try_from(prop).ok()?;

    match value {
        DatePerhapsTime::Date(date) => local_midnight(date, zone),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Some(dt.timestamp()),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => epoch_in(naive, zone),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let event_zone = tzid.parse().unwrap_or(zone);
            epoch_in(date_time, event_zone)
        }
    }
}

fn local_midnight(date: NaiveDate, zone: Tz) -> Option<i64> {
    epoch_in(date.and_hms_opt(0, 0, 0)?, zone)
}

fn epoch_in(naive: NaiveDateTime, zone: Tz) -> Option<i64> {
    // earliest() resolves DST gaps/folds deterministically
    naive
        .and_local_timezone(zone)
        .earliest()
        .map(|dt| dt.timestamp())
}

/// Collect every ATTENDEE value, in order, with any mail scheme stripped.
/// A single attendee and a list of attendees both come out as a sequence.
fn attendee_list(vevent: &Component) -> Vec<String> {
    vevent
        .properties
        .iter()
        .filter(|p| p.name == "ATTENDEE")
        .map(|p| strip_mailto(p.val.as_ref()).to_string())
        .collect()
}

fn strip_mailto(value: &str) -> &str {
    match value.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("mailto:") => &value[7..],
        _ => value,
    }
}
