use chrono::Utc;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use std::env;
use std::fmt;
use uuid::Uuid;

use crate::models::events::{FeedbackEvent, GenerationEvent};

#[derive(Debug)]
pub enum AuditError {
    StorageUnavailable(String),
    EnvironmentError(String),
    Serialization(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            AuditError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            AuditError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for AuditError {}

/// Write-only durable blob store. One blob per event; the store never
/// reads its own writes.
pub trait BlobStore {
    async fn put_object(&self, bucket: &str, object: &str, data: Vec<u8>)
        -> Result<(), AuditError>;
}

/// Live Google Cloud Storage store.
pub struct GcsBlobStore {
    client: Client,
}

impl GcsBlobStore {
    pub async fn new() -> Result<Self, AuditError> {
        let config = ClientConfig::default().with_auth().await.map_err(|e| {
            AuditError::StorageUnavailable(format!("Failed to create GCS client: {}", e))
        })?;

        Ok(Self {
            client: Client::new(config),
        })
    }
}

impl BlobStore for GcsBlobStore {
    async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        data: Vec<u8>,
    ) -> Result<(), AuditError> {
        let upload_type = UploadType::Simple(Media::new(object.to_string()));
        let request = UploadObjectRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };

        self.client
            .upload_object(&request, data, &upload_type)
            .await
            .map_err(|e| AuditError::StorageUnavailable(format!("Failed to upload: {}", e)))?;

        Ok(())
    }
}

/// A second-resolution timestamp alone can collide under concurrent
/// generations, so a random suffix keeps ids unique while the prefix stays
/// sortable and human-readable.
pub fn unique_event_id() -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", timestamp, &suffix[..8])
}

/// Durably records generation and feedback events, one JSON blob each,
/// under the two logging buckets.
pub struct AuditLogger<S: BlobStore> {
    store: S,
    log_bucket: String,
    feedback_bucket: String,
}

impl AuditLogger<GcsBlobStore> {
    /// Wires the live store to the bucket names from the environment.
    pub async fn from_env() -> Result<Self, AuditError> {
        let log_bucket = env::var("BUCKET_NAME")
            .map_err(|_| AuditError::EnvironmentError("BUCKET_NAME not set".to_string()))?;
        let feedback_bucket = env::var("FEEDBACK_BUCKET_NAME").map_err(|_| {
            AuditError::EnvironmentError("FEEDBACK_BUCKET_NAME not set".to_string())
        })?;

        Ok(AuditLogger::new(
            GcsBlobStore::new().await?,
            log_bucket,
            feedback_bucket,
        ))
    }
}

impl<S: BlobStore> AuditLogger<S> {
    pub fn new(store: S, log_bucket: impl Into<String>, feedback_bucket: impl Into<String>) -> Self {
        Self {
            store,
            log_bucket: log_bucket.into(),
            feedback_bucket: feedback_bucket.into(),
        }
    }

    pub async fn log_generation(&self, event: &GenerationEvent) -> Result<(), AuditError> {
        self.put_event(&self.log_bucket, &event.id, event).await
    }

    pub async fn log_feedback(&self, event: &FeedbackEvent) -> Result<(), AuditError> {
        self.put_event(&self.feedback_bucket, &event.id, event).await
    }

    async fn put_event<T: serde::Serialize>(
        &self,
        bucket: &str,
        id: &str,
        event: &T,
    ) -> Result<(), AuditError> {
        let payload =
            serde_json::to_vec(event).map_err(|e| AuditError::Serialization(e.to_string()))?;
        let blob_name = format!("log_{}_json", id);

        self.store.put_object(bucket, &blob_name, payload).await?;
        log::info!("wrote audit blob {}/{}", bucket, blob_name);

        Ok(())
    }
}
