//! Core logic for the upnext scanner.
//!
//! This crate provides everything behind the CLI:
//! - `scan` walks a calendar storage tree and collects event records
//! - `extract` decodes .ics files into `EventRecord`s
//! - `report` sorts the records and serializes the versioned output document

pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod report;
pub mod scan;
pub mod title;
pub mod urls;
pub mod window;

pub use config::UpNextConfig;
pub use error::{UpNextError, UpNextResult};
pub use event::EventRecord;
pub use report::Report;
pub use window::ScanWindow;
