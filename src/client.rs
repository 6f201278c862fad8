//! SendSculpt async client implementation.

use crate::attachment::EncodedAttachment;
use crate::{EmailMessage, Environment, Error, Result, SendResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.sendsculpt.com/api/v1";
const API_KEY_HEADER: &str = "x-sendsculpt-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT_VALUE: &str = concat!("sendsculpt-rust/", env!("CARGO_PKG_VERSION"));

/// Async client for the SendSculpt email API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] to pick an
/// environment, override the endpoint, or route through a proxy.
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Marked sensitive, so it never shows up in `Debug` output.
    api_key: HeaderValue,
    environment: Environment,
    base_url: String,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client for the live environment.
    ///
    /// No network request is made.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendsculpt::Client;
    /// # fn main() -> Result<(), sendsculpt::Error> {
    /// let client = Client::new("my-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Create a client for the given environment.
    pub fn with_environment(api_key: impl Into<String>, environment: Environment) -> Result<Self> {
        ClientBuilder::new(api_key).environment(environment).build()
    }

    /// API root requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Send an email.
    ///
    /// The message is validated and its attachments are encoded before any
    /// request is made; a problem with either aborts the whole send. The
    /// caller's message is left untouched.
    ///
    /// # Errors
    /// - [`Error::Validation`] if a required field is missing, template and body
    ///   fields conflict, or an attachment has no content.
    /// - [`Error::AttachmentRead`] if an attachment file cannot be read.
    /// - [`Error::Transport`] if the request could not be completed.
    /// - [`Error::Api`] if the API answers with status 400 or above.
    /// - [`Error::ResponseDecode`] if a successful response is not a send result.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendsculpt::{Attachment, Client, EmailMessage};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), sendsculpt::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let message = EmailMessage::new("noreply@example.com", ["user@example.com"], "Invoice")
    ///     .body_text("Your invoice is attached.")
    ///     .attachment(Attachment::from_path("invoice.pdf", "application/pdf", "invoice.pdf"));
    ///
    /// let result = client.send_email(&message).await?;
    /// println!("{} {}", result.message_id, result.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_email(&self, message: &EmailMessage) -> Result<SendResult> {
        message.validate()?;

        let mut attachments = Vec::with_capacity(message.attachments.len());
        for attachment in &message.attachments {
            attachments.push(attachment.encode().await?);
        }
        tracing::debug!(
            recipients = message.to.len(),
            attachments = attachments.len(),
            "email prepared"
        );

        let payload = SendPayload::new(message, attachments, self.environment);
        let endpoint = format!("{}/send", self.base_url);

        let response = self
            .http
            .post(&endpoint)
            .headers(self.headers())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), %endpoint, "send response received");

        if status.as_u16() >= 400 {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(Error::ResponseDecode)
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Request body for `POST /send`.
#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    to: &'a [String],
    subject: &'a str,
    from_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_text: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    cc: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    bcc: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_data: Option<&'a serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "is_empty")]
    reply_to: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<EncodedAttachment<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_name: Option<&'a str>,
    environment: Environment,
}

impl<'a> SendPayload<'a> {
    fn new(
        message: &'a EmailMessage,
        attachments: Vec<EncodedAttachment<'a>>,
        environment: Environment,
    ) -> Self {
        Self {
            to: &message.to,
            subject: &message.subject,
            from_email: &message.from_email,
            body_html: message.body_html.as_deref(),
            body_text: message.body_text.as_deref(),
            cc: &message.cc,
            bcc: &message.bcc,
            template_id: message.template_id.as_deref(),
            template_data: message.template_data.as_ref(),
            reply_to: &message.reply_to,
            attachments,
            sender_name: message.sender_name.as_deref(),
            environment,
        }
    }
}

fn is_empty(list: &&[String]) -> bool {
    list.is_empty()
}

/// Builder for configuring a SendSculpt client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: SecretString,
    environment: Environment,
    base_url: Option<String>,
    proxy: Option<String>,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Live environment
    /// - Default SendSculpt API endpoint
    /// - No proxy
    /// - `sendsculpt-rust/<version>` user agent
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            environment: Environment::Live,
            base_url: None,
            proxy: None,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Create a builder from process environment variables.
    ///
    /// Reads `SENDSCULPT_API_KEY` (required), `SENDSCULPT_ENVIRONMENT` and
    /// `SENDSCULPT_BASE_URL`. Empty values are treated as unset.
    pub fn from_env() -> Result<Self> {
        let api_key = match std::env::var("SENDSCULPT_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            Ok(_) | Err(std::env::VarError::NotPresent) => return Err(Error::MissingApiKey),
            Err(std::env::VarError::NotUnicode(_)) => return Err(Error::InvalidApiKey),
        };
        let mut builder = Self::new(api_key);

        if let Some(token) = non_empty_var("SENDSCULPT_ENVIRONMENT") {
            builder = builder.environment(Environment::from_token(&token));
        }
        if let Some(base_url) = non_empty_var("SENDSCULPT_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        Ok(builder)
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the API root URL.
    ///
    /// Useful for testing against a local server. Trailing slashes are removed.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:1080").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// [`Error::MissingApiKey`] for a blank key, [`Error::InvalidApiKey`] for a
    /// key that cannot be sent as a header, [`Error::Transport`] if the HTTP
    /// client cannot be created (for example an invalid proxy URL).
    pub fn build(self) -> Result<Client> {
        let raw_key = self.api_key.expose_secret();
        if raw_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        let mut api_key = HeaderValue::from_str(raw_key).map_err(|_| Error::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut builder = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(self.user_agent);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| default_base_url(self.environment).to_string());

        tracing::debug!(environment = %self.environment, %base_url, "sendsculpt client built");

        Ok(Client {
            http,
            api_key,
            environment: self.environment,
            base_url,
            proxy: self.proxy,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Default API root for an environment. The sandbox shares the live origin.
fn default_base_url(environment: Environment) -> &'static str {
    match environment {
        Environment::Live | Environment::Sandbox => DEFAULT_BASE_URL,
    }
}
