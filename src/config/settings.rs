//! User settings for the expense tracker
//!
//! Manages user preferences: the active user, default currency, and date
//! formatting.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::storage::file_io::{read_json_required, write_json_atomic};

fn default_schema_version() -> u32 {
    1
}

fn default_user() -> String {
    // Placeholder until real authentication exists
    "demo-user".to_string()
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The user all CLI operations act as
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Default currency code for new transactions
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_user: default_user(),
            default_currency: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, creating defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let path = paths.settings_file();
        if path.exists() {
            read_json_required(path)
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        write_json_atomic(paths.settings_file(), self)
    }
}
