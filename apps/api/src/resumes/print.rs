//! Print handoff.
//!
//! The service never produces a PDF itself. A finished export document is
//! handed to a `PrintSink`; the default sink parks it in object storage and
//! returns a short-lived link the browser opens and prints to PDF.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PrintJob {
    pub resume_id: Uuid,
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrintReceipt {
    /// Where the export document was placed.
    pub location: String,
    /// Link the browser opens to print.
    pub print_url: String,
    pub expires_in_secs: u64,
}

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("could not store export document: {0}")]
    Upload(String),
    #[error("could not create print link: {0}")]
    Link(String),
}

/// Receives finished export documents. Carried in `AppState` as `Arc<dyn PrintSink>`.
#[async_trait]
pub trait PrintSink: Send + Sync {
    async fn submit(&self, job: PrintJob) -> Result<PrintReceipt, PrintError>;
}

pub struct S3PrintSink {
    client: aws_sdk_s3::Client,
    bucket: String,
    link_ttl: Duration,
}

impl S3PrintSink {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, link_ttl: Duration) -> Self {
        Self {
            client,
            bucket,
            link_ttl,
        }
    }
}

#[async_trait]
impl PrintSink for S3PrintSink {
    async fn submit(&self, job: PrintJob) -> Result<PrintReceipt, PrintError> {
        let key = export_key(job.resume_id, Utc::now());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(Bytes::from(job.html)))
            .content_type("text/html; charset=utf-8")
            .content_disposition(format!(
                "inline; filename=\"{}.html\"",
                file_stem(&job.title)
            ))
            .send()
            .await
            .map_err(|e| PrintError::Upload(e.to_string()))?;

        info!("Uploaded export for resume {} to s3://{}/{}", job.resume_id, self.bucket, key);

        let presign =
            PresigningConfig::expires_in(self.link_ttl).map_err(|e| PrintError::Link(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .response_content_type("text/html; charset=utf-8")
            .presigned(presign)
            .await
            .map_err(|e| PrintError::Link(e.to_string()))?;

        Ok(PrintReceipt {
            location: format!("s3://{}/{}", self.bucket, key),
            print_url: request.uri().to_string(),
            expires_in_secs: self.link_ttl.as_secs(),
        })
    }
}

/// Object key for one export of a resume; every export gets its own object.
pub fn export_key(resume_id: Uuid, at: DateTime<Utc>) -> String {
    format!(
        "exports/{}/{}.html",
        resume_id,
        at.format("%Y%m%dT%H%M%S%.3fZ")
    )
}

/// Title reduced to a header-safe file name; anything outside
/// `[A-Za-z0-9 ._-]` becomes `_`.
pub fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "resume".to_string()
    } else {
        stem
    }
}
