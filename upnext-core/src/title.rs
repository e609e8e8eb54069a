//! Calendar title lookup from bundle metadata.

use std::path::Path;

use crate::error::{UpNextError, UpNextResult};

/// Read a calendar's display title from its Info.plist.
///
/// The file is a binary or XML property list; the title sits under the
/// `Title` key. Anything else (unreadable file, missing key, non-string
/// value) is a metadata error and leaves the caller's current title alone.
pub fn read_calendar_title(path: &Path) -> UpNextResult<String> {
    let value = plist::Value::from_file(path).map_err(|e| UpNextError::Metadata {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    value
        .as_dictionary()
        .and_then(|dict| dict.get("Title"))
        .and_then(|title| title.as_string())
        .map(str::to_string)
        .ok_or_else(|| UpNextError::Metadata {
            path: path.to_path_buf(),
            message: "missing 'Title' key".to_string(),
        })
}
