//! Directory traversal over calendar storage.

use std::path::Path;

use chrono_tz::Tz;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{UpNextError, UpNextResult};
use crate::event::EventRecord;
use crate::extract::extract_events_from_file;
use crate::title::read_calendar_title;
use crate::window::ScanWindow;

/// Extension of calendar-data files.
const DATA_EXTENSION: &str = ".ics";
/// Extension of calendar bundle directories.
const BUNDLE_EXTENSION: &str = ".calendar";
/// Title metadata filename inside a bundle.
const METADATA_FILENAME: &str = "Info.plist";

/// Traversal context threaded through the walk.
///
/// The current title applies to every data file encountered after the
/// metadata file that set it. Until a metadata file is seen it stays `None`
/// and events carry no calendar title.
struct ScanContext {
    calendar: Option<String>,
    events: Vec<EventRecord>,
}

/// Walk `root` and collect every in-window event record.
///
/// Entries are visited files-first within each directory, so a bundle's
/// Info.plist binds its title before the .ics files nested under it.
/// Per-file read and decode failures are logged and skipped; an unreadable
/// root aborts the scan.
pub fn scan_events(root: &Path, window: &ScanWindow, zone: Tz) -> UpNextResult<Vec<EventRecord>> {
    if !root.is_dir() {
        return Err(UpNextError::Traversal {
            path: root.to_path_buf(),
            message: "not a readable directory".to_string(),
        });
    }

    let mut context = ScanContext {
        calendar: None,
        events: Vec::new(),
    };

    let walker = WalkDir::new(root).sort_by(|a, b| {
        let a_dir = a.file_type().is_dir();
        let b_dir = b.file_type().is_dir();
        a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        visit_file(entry.path(), &mut context, window, zone);
    }

    Ok(context.events)
}

fn visit_file(path: &Path, context: &mut ScanContext, window: &ScanWindow, zone: Tz) {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };

    if name.ends_with(DATA_EXTENSION) {
        let calendar = context.calendar.as_deref();
        if let Err(err) = extract_events_from_file(path, calendar, window, zone, &mut context.events)
        {
            warn!("skipping {}: {}", path.display(), err);
        }
    } else if name == METADATA_FILENAME && in_calendar_bundle(path) {
        match read_calendar_title(path) {
            Ok(title) => context.calendar = Some(title),
            Err(err) => warn!("keeping previous calendar title: {}", err),
        }
    }
}

/// Whether the file sits directly inside a `.calendar` bundle directory.
fn in_calendar_bundle(path: &Path) -> bool {
    path.parent()
        .and_then(|dir| dir.file_name())
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(BUNDLE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::fs;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Title</key>
    <string>TITLE</string>
</dict>
</plist>"#;

    fn june_2030() -> ScanWindow {
        ScanWindow {
            now: Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap().timestamp(),
            cutoff: Utc
                .with_ymd_and_hms(2030, 6, 30, 0, 0, 0)
                .unwrap()
                .timestamp(),
        }
    }

    fn ics_with(summary: &str, day: u32) -> String {
        format!(
            "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nBEGIN:VEVENT\nUID:{summary}\nSUMMARY:{summary}\nDTSTART:203006{day:02}T100000Z\nDTEND:203006{day:02}T110000Z\nEND:VEVENT\nEND:VCALENDAR\n"
        )
    }

    fn write_bundle(root: &Path, name: &str, title: &str, events: &[(&str, u32)]) {
        let bundle = root.join(format!("{name}.calendar"));
        let event_dir = bundle.join("Events");
        fs::create_dir_all(&event_dir).unwrap();
        fs::write(bundle.join("Info.plist"), INFO_PLIST.replace("TITLE", title)).unwrap();
        for (summary, day) in events {
            fs::write(
                event_dir.join(format!("{summary}.ics")),
                ics_with(summary, *day),
            )
            .unwrap();
        }
    }

    #[test]
    fn bundle_title_is_bound_to_its_events() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "A", "Alpha", &[("retro", 10)]);
        write_bundle(dir.path(), "B", "Beta", &[("kickoff", 12)]);

        let mut events = scan_events(dir.path(), &june_2030(), chrono_tz::US::Pacific).unwrap();
        events.sort_by_key(|e| e.start);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "retro");
        assert_eq!(events[0].calendar.as_deref(), Some("Alpha"));
        assert_eq!(events[1].summary, "kickoff");
        assert_eq!(events[1].calendar.as_deref(), Some("Beta"));
    }

    #[test]
    fn data_file_before_any_metadata_has_no_calendar_title() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("loose.ics"), ics_with("loose", 15)).unwrap();

        let events = scan_events(dir.path(), &june_2030(), chrono_tz::US::Pacific).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].calendar, None);
    }

    #[test]
    fn broken_data_file_is_skipped_and_the_rest_survive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.ics"), "scrambled bytes").unwrap();
        fs::write(dir.path().join("good.ics"), ics_with("good", 20)).unwrap();

        let events = scan_events(dir.path(), &june_2030(), chrono_tz::US::Pacific).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "good");
    }

    #[test]
    fn malformed_metadata_keeps_the_previous_title() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "A", "Alpha", &[("planning", 10)]);

        let broken = dir.path().join("Z.calendar");
        let broken_events = broken.join("Events");
        fs::create_dir_all(&broken_events).unwrap();
        fs::write(broken.join("Info.plist"), "not a plist").unwrap();
        fs::write(broken_events.join("review.ics"), ics_with("review", 12)).unwrap();

        let mut events = scan_events(dir.path(), &june_2030(), chrono_tz::US::Pacific).unwrap();
        events.sort_by_key(|e| e.start);

        assert_eq!(events.len(), 2);
        // the broken bundle's event keeps the previously bound title
        assert_eq!(events[1].summary, "review");
        assert_eq!(events[1].calendar.as_deref(), Some("Alpha"));
    }

    #[test]
    fn metadata_outside_a_bundle_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Info.plist"),
            INFO_PLIST.replace("TITLE", "Stray"),
        )
        .unwrap();
        fs::write(dir.path().join("solo.ics"), ics_with("solo", 18)).unwrap();

        let events = scan_events(dir.path(), &june_2030(), chrono_tz::US::Pacific).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].calendar, None);
    }

    #[test]
    fn missing_root_is_a_traversal_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");

        assert!(matches!(
            scan_events(&gone, &june_2030(), chrono_tz::US::Pacific),
            Err(UpNextError::Traversal { .. })
        ));
    }

    #[test]
    fn same_tree_and_window_produce_an_identical_document() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "A", "Alpha", &[("retro", 10), ("kickoff", 12)]);

        let window = june_2030();
        let first = scan_events(dir.path(), &window, chrono_tz::US::Pacific).unwrap();
        let second = scan_events(dir.path(), &window, chrono_tz::US::Pacific).unwrap();

        let first_json = crate::report::Report::new(first).to_json().unwrap();
        let second_json = crate::report::Report::new(second).to_json().unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "remember the milk").unwrap();

        let events = scan_events(dir.path(), &june_2030(), chrono_tz::US::Pacific).unwrap();

        assert!(events.is_empty());
    }
}
