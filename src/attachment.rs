//! Email attachments and their normalization into base64 wire content.

use crate::{Error, Result, ValidationError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where an attachment's payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Content that is already base64 encoded. Sent unchanged.
    Base64(String),
    /// Raw bytes, encoded when the email is sent.
    Bytes(Vec<u8>),
    /// A file on disk, read and encoded when the email is sent.
    Path(PathBuf),
}

/// A file attached to an [`EmailMessage`](crate::EmailMessage).
///
/// # Examples
/// ```
/// use sendsculpt::Attachment;
///
/// let report = Attachment::from_bytes("report.csv", "text/csv", b"a,b\n1,2\n".to_vec());
/// let logo = Attachment::from_path("logo.png", "image/png", "assets/logo.png");
/// # let _ = (report, logo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    /// Payload source. `None` is rejected when the message is sent.
    pub source: Option<AttachmentSource>,
}

impl Attachment {
    /// Attachment with no content yet; set [`Attachment::source`] before sending.
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            source: None,
        }
    }

    /// Attachment whose content is already base64 encoded.
    pub fn from_base64(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(filename, mime_type).with_source(AttachmentSource::Base64(content.into()))
    }

    /// Attachment built from raw bytes.
    pub fn from_bytes(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(filename, mime_type).with_source(AttachmentSource::Bytes(bytes.into()))
    }

    /// Attachment read from `path` at send time.
    pub fn from_path(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(filename, mime_type).with_source(AttachmentSource::Path(path.into()))
    }

    /// Replace the payload source.
    pub fn with_source(mut self, source: AttachmentSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolve the payload into canonical base64 content.
    ///
    /// Empty sources count as missing. Files are read in full.
    pub(crate) async fn encode(&self) -> Result<EncodedAttachment<'_>> {
        let content = match &self.source {
            Some(AttachmentSource::Base64(text)) if !text.is_empty() => text.clone(),
            Some(AttachmentSource::Bytes(bytes)) if !bytes.is_empty() => encode_bytes(bytes),
            Some(AttachmentSource::Path(path)) if !path.as_os_str().is_empty() => {
                encode_bytes(&read_file(path).await?)
            }
            _ => return Err(ValidationError::AttachmentMissingContent.into()),
        };

        Ok(EncodedAttachment {
            filename: &self.filename,
            content,
            mime_type: &self.mime_type,
        })
    }
}

/// Attachment as it appears in the request body.
#[derive(Debug, Serialize)]
pub(crate) struct EncodedAttachment<'a> {
    pub filename: &'a str,
    pub content: String,
    pub mime_type: &'a str,
}

/// Standard, padded base64.
pub(crate) fn encode_bytes(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| Error::AttachmentRead {
            path: path.to_path_buf(),
            source,
        })
}
