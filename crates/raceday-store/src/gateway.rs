//! Whole-blob CSV gateway over an object store.
//!
//! The repositories never issue partial reads or writes: a blob is read and
//! replaced in full, and a missing blob reads as an empty collection. There
//! is no listing and no locking; concurrent writers to the same blob race
//! and the last writer wins (callers serialize per race type).

use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use raceday_config::{GeneralConfig, StorageConfig};

use crate::error::StoreError;

/// Byte-level access to the schedule blobs under one bucket prefix.
///
/// Keys are `{folder_prefix}/{folder}/{file}`, one folder per race type.
#[derive(Clone)]
pub struct CsvBlobStore {
    store: Arc<dyn ObjectStore>,
    folder_prefix: String,
}

impl CsvBlobStore {
    /// Build an S3-backed store from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotConfigured`] when required credentials are
    /// missing, or [`StoreError::ObjectStore`] if the client cannot be built.
    pub fn from_config(
        storage: &StorageConfig,
        general: &GeneralConfig,
    ) -> Result<Self, StoreError> {
        if !storage.is_configured() {
            return Err(StoreError::NotConfigured(
                "bucket_name, access_key_id and secret_access_key are required".to_string(),
            ));
        }
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&storage.bucket_name)
            .with_region(&storage.region)
            .with_access_key_id(&storage.access_key_id)
            .with_secret_access_key(&storage.secret_access_key)
            .with_allow_http(storage.allow_http);
        if !storage.endpoint.is_empty() {
            builder = builder.with_endpoint(&storage.endpoint);
        }
        let store = builder.build()?;
        Ok(Self {
            store: Arc::new(store),
            folder_prefix: general.folder_prefix.clone(),
        })
    }

    /// Build an in-memory store (for tests).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            folder_prefix: GeneralConfig::default().folder_prefix,
        }
    }

    fn key(&self, folder: &str, file: &str) -> Path {
        Path::from(format!("{}/{folder}/{file}", self.folder_prefix))
    }

    /// Read a whole blob as text. A missing blob reads as an empty string;
    /// any other failure propagates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectStore`] on genuine I/O failures and
    /// [`StoreError::CorruptBlob`] on non-UTF-8 content.
    pub async fn fetch_csv(&self, folder: &str, file: &str) -> Result<String, StoreError> {
        let key = self.key(folder, file);
        match self.store.get(&key).await {
            Ok(result) => {
                let bytes = result.bytes().await?;
                String::from_utf8(bytes.to_vec()).map_err(|_| StoreError::CorruptBlob {
                    blob: key.to_string(),
                })
            }
            Err(object_store::Error::NotFound { .. }) => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite a whole blob with text content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectStore`] if the write fails.
    pub async fn upload_csv(
        &self,
        content: String,
        folder: &str,
        file: &str,
    ) -> Result<(), StoreError> {
        let key = self.key(folder, file);
        self.store
            .put(&key, PutPayload::from(content.into_bytes()))
            .await?;
        Ok(())
    }
}
