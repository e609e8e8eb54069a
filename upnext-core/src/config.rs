//! Global upnext configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{UpNextError, UpNextResult};

static DEFAULT_CALENDAR_DIR: &str = "~/Library/Calendars";
static DEFAULT_TIMEZONE: &str = "US/Pacific";

const DEFAULT_FUTURE_DAYS: i64 = 3;
const DEFAULT_SKEW_HOURS: i64 = 8;

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_future_days() -> i64 {
    DEFAULT_FUTURE_DAYS
}

fn default_skew_hours() -> i64 {
    DEFAULT_SKEW_HOURS
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Global configuration at ~/.config/upnext/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct UpNextConfig {
    /// Root of the calendar storage tree to scan.
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// How many days ahead to report events for.
    #[serde(default = "default_future_days")]
    pub future_days: i64,

    /// Hours subtracted from the run start when forming the lower window
    /// bound, compensating for timezone skew.
    #[serde(default = "default_skew_hours")]
    pub skew_hours: i64,

    /// Reference timezone for epoch conversion (e.g. "US/Pacific").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for UpNextConfig {
    fn default() -> Self {
        UpNextConfig {
            calendar_dir: default_calendar_dir(),
            future_days: DEFAULT_FUTURE_DAYS,
            skew_hours: DEFAULT_SKEW_HOURS,
            timezone: default_timezone(),
        }
    }
}

impl UpNextConfig {
    pub fn config_path() -> UpNextResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| UpNextError::Config("Could not determine config directory".into()))?
            .join("upnext");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> UpNextResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: UpNextConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| UpNextError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| UpNextError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The scan root with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Parse the configured reference timezone.
    pub fn reference_zone(&self) -> UpNextResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| UpNextError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> UpNextResult<()> {
        let contents = format!(
            "\
# upnext configuration

# Where your calendar storage lives:
# calendar_dir = \"{}\"

# How many days ahead to report events for:
# future_days = {}

# Hours subtracted from the run start for the lower window bound:
# skew_hours = {}

# Reference timezone for epoch conversion:
# timezone = \"{}\"
",
            DEFAULT_CALENDAR_DIR, DEFAULT_FUTURE_DAYS, DEFAULT_SKEW_HOURS, DEFAULT_TIMEZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                UpNextError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| UpNextError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
