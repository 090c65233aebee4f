//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default folder prefix inside the bucket.
fn default_folder_prefix() -> String {
    String::from("race-schedule")
}

/// Default fetch window in days when a caller gives no finish date.
const fn default_fetch_window_days() -> u32 {
    31
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Prefix under which all schedule blobs live
    /// (`{folder_prefix}/{race_type}/{file}.csv`).
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,

    /// Default fetch window in days.
    #[serde(default = "default_fetch_window_days")]
    pub fetch_window_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            folder_prefix: default_folder_prefix(),
            fetch_window_days: default_fetch_window_days(),
        }
    }
}
