//! Object-store configuration.

use serde::{Deserialize, Serialize};

/// Default bucket name.
fn default_bucket_name() -> String {
    String::from("raceday")
}

/// Default region for the schedule bucket.
fn default_region() -> String {
    String::from("ap-northeast-1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket holding the schedule blobs.
    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Access key ID.
    #[serde(default)]
    pub access_key_id: String,

    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: String,

    /// Custom endpoint URL for S3-compatible stores (e.g. MinIO in
    /// development). Empty means the real AWS endpoint for `region`.
    #[serde(default)]
    pub endpoint: String,

    /// Allow plain-HTTP endpoints. Only useful with a local `endpoint`.
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: default_bucket_name(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            endpoint: String::new(),
            allow_http: false,
        }
    }
}

impl StorageConfig {
    /// Check if the storage config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bucket_name.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
    }
}
