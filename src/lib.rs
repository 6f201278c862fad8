//! # SendSculpt Client
//! Asynchronous wrapper around the SendSculpt transactional email HTTP API. Build a [`Client`] (or configure one with [`ClientBuilder`]), describe the email as an [`EmailMessage`], and call [`Client::send_email`].
//!
//! ## Audience and uses
//! For Rust services that send receipts, password resets, notifications and similar one-off emails: compose inline HTML/text bodies or reference a stored template with variables, attach files from memory or disk ([`Attachment`]), and get back the message id assigned by SendSculpt ([`SendResult`]).
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest` with a fixed one minute timeout. Attachment files are read with `tokio::fs`.
//!
//! ## Environments
//! [`Environment::Live`] delivers mail. [`Environment::Sandbox`] uses the same endpoint and is marked as test traffic; the environment is sent with every request.
//!
//! ## Out of scope
//! No retries, rate-limit handling or streaming uploads. Attachments are loaded fully into memory before sending.
//!
//! ## Errors
//! Messages are validated and attachments encoded before anything goes over the wire, so a malformed request never reaches the API. Structural problems are [`Error::Validation`], unreadable attachment files are [`Error::AttachmentRead`], network failures are [`Error::Transport`], statuses of 400 and above are [`Error::Api`] with the raw body, and unexpected success bodies are [`Error::ResponseDecode`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! The crate emits `tracing` events at debug level. Install a subscriber in your application to see them; API keys and message content are never logged.
//!
//! ## Example
//! ```no_run
//! use sendsculpt::{Attachment, Client, EmailMessage, Environment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sendsculpt::Error> {
//!     let client = Client::with_environment("my-api-key", Environment::Sandbox)?;
//!
//!     let message = EmailMessage::new("noreply@example.com", ["user@example.com"], "Hello")
//!         .body_html("<p>Hello from Rust</p>")
//!         .attachment(Attachment::from_bytes("hello.txt", "text/plain", b"hello".to_vec()));
//!
//!     let result = client.send_email(&message).await?;
//!     println!("Sent {} ({})", result.message_id, result.status);
//!     Ok(())
//! }
//! ```

mod attachment;
mod client;
mod error;
mod models;

pub use attachment::{Attachment, AttachmentSource};
pub use client::{Client, ClientBuilder};
pub use error::{Error, ValidationError};
pub use models::{EmailMessage, Environment, SendResult};

/// Result type alias for SendSculpt operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
