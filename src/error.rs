//! Error types for SendSculpt operations.

use std::path::PathBuf;

/// Errors that can occur while building a client or sending an email.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The message failed a structural check before any network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An attachment's file could not be read from disk.
    #[error("failed to read attachment file {}: {source}", .path.display())]
    AttachmentRead {
        /// Path the attachment pointed at.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Connection, DNS, TLS or timeout failure while talking to the API.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status code of 400 or above.
    ///
    /// `body` is the raw response text, kept verbatim for diagnostics.
    #[error("SendSculpt API Error [{status}]: {body}")]
    Api { status: u16, body: String },

    /// A successful response did not have the expected `{message_id, status}` shape.
    #[error("failed to decode send response: {0}")]
    ResponseDecode(#[source] serde_json::Error),

    /// The client was built without a usable API key.
    #[error("API key cannot be empty")]
    MissingApiKey,

    /// The API key contains characters that cannot be sent in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
}

/// Structural problems with an [`EmailMessage`](crate::EmailMessage).
///
/// The display strings are stable and safe to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'To' field is required")]
    MissingTo,

    #[error("'Subject' field is required")]
    MissingSubject,

    #[error("'FromEmail' field is required")]
    MissingFromEmail,

    #[error("TemplateData and TemplateID must be provided together")]
    TemplateDataWithoutId,

    #[error("TemplateID and BodyHTML/BodyText cannot be provided together")]
    TemplateWithBody,

    #[error("Attachment must specify Content, ContentBytes, or FilePath")]
    AttachmentMissingContent,
}

impl Error {
    /// HTTP status code returned by the API, if this is an [`Error::Api`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The validation rule that was violated, if any.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            Error::Validation(rule) => Some(*rule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_embeds_status_and_body() {
        let err = Error::Api {
            status: 422,
            body: r#"{"detail":"bad"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"SendSculpt API Error [422]: {"detail":"bad"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.validation(), None);
    }

    #[test]
    fn validation_error_displays_rule_message_only() {
        let err = Error::from(ValidationError::MissingSubject);
        assert_eq!(err.to_string(), "'Subject' field is required");
        assert_eq!(err.validation(), Some(ValidationError::MissingSubject));
    }

    #[test]
    fn attachment_read_names_the_path() {
        let err = Error::AttachmentRead {
            path: PathBuf::from("/tmp/missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.pdf"), "{msg}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
