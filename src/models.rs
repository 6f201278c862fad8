//! Data models for SendSculpt requests and responses.

use crate::{Attachment, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment target selected when the client is built.
///
/// Both environments share the same API origin; the environment is sent with
/// every request in the `environment` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Live,
    Sandbox,
}

impl Environment {
    /// Resolve an environment token. Anything other than `sandbox` means [`Environment::Live`].
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("sandbox") {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }

    /// The token sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Live => "live",
            Environment::Sandbox => "sandbox",
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing email.
///
/// Either supply a body (`body_html` and/or `body_text`) or a stored template
/// (`template_id`, optionally with `template_data`), never both.
///
/// # Examples
/// ```
/// use sendsculpt::EmailMessage;
///
/// let message = EmailMessage::new("noreply@example.com", ["user@example.com"], "Welcome")
///     .body_html("<p>Hello!</p>")
///     .body_text("Hello!");
/// assert!(message.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub from_email: String,
    pub body_html: Option<String>,
    pub body_text: Option<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub reply_to: Vec<String>,
    pub template_id: Option<String>,
    /// Variables rendered into the template named by `template_id`.
    pub template_data: Option<serde_json::Map<String, serde_json::Value>>,
    /// Friendly display name shown alongside `from_email`.
    pub sender_name: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Create a message with the three required fields set.
    pub fn new<I, S>(from_email: impl Into<String>, to: I, subject: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            from_email: from_email.into(),
            ..Self::default()
        }
    }

    pub fn body_html(mut self, html: impl Into<String>) -> Self {
        self.body_html = Some(html.into());
        self
    }

    pub fn body_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = Some(text.into());
        self
    }

    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to.push(address.into());
        self
    }

    /// Use a stored template instead of an inline body.
    pub fn template(
        mut self,
        template_id: impl Into<String>,
        data: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Self {
        self.template_id = Some(template_id.into());
        self.template_data = data;
        self
    }

    pub fn sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Check the message structure.
    ///
    /// Rules are evaluated in a fixed order and the first violation is returned:
    /// recipients, subject, sender, template data without a template, then a
    /// template combined with an inline body.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.to.is_empty() {
            return Err(ValidationError::MissingTo);
        }
        if self.subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if self.from_email.is_empty() {
            return Err(ValidationError::MissingFromEmail);
        }
        if self.template_data.is_some() && self.template_id.is_none() {
            return Err(ValidationError::TemplateDataWithoutId);
        }
        if self.template_id.is_some() && (self.body_html.is_some() || self.body_text.is_some()) {
            return Err(ValidationError::TemplateWithBody);
        }
        Ok(())
    }
}

/// Successful response from the send endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendResult {
    /// Identifier assigned to the accepted message.
    pub message_id: String,
    /// Delivery status token, e.g. `sent` or `queued`.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> EmailMessage {
        EmailMessage::new("f@e.com", ["t@e.com"], "S")
    }

    fn data() -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("k".into(), json!("v"));
        map
    }

    #[test]
    fn environment_tokens() {
        assert_eq!(Environment::from_token("sandbox"), Environment::Sandbox);
        assert_eq!(Environment::from_token(" Sandbox "), Environment::Sandbox);
        assert_eq!(Environment::from_token("live"), Environment::Live);
        assert_eq!(Environment::from_token("staging"), Environment::Live);
        assert_eq!(Environment::from_token(""), Environment::Live);
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!(Environment::default(), Environment::Live);
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
        assert_eq!(serde_json::to_value(Environment::Live).unwrap(), json!("live"));
    }

    #[test]
    fn accepts_minimal_message() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn each_rule_has_its_own_error() {
        let cases = [
            (
                EmailMessage { to: vec![], ..valid() },
                ValidationError::MissingTo,
            ),
            (
                EmailMessage { subject: String::new(), ..valid() },
                ValidationError::MissingSubject,
            ),
            (
                EmailMessage { from_email: String::new(), ..valid() },
                ValidationError::MissingFromEmail,
            ),
            (
                EmailMessage { template_data: Some(data()), ..valid() },
                ValidationError::TemplateDataWithoutId,
            ),
            (
                valid().template("uuid", None).body_html("<p></p>"),
                ValidationError::TemplateWithBody,
            ),
            (
                valid().template("uuid", Some(data())).body_text("plain"),
                ValidationError::TemplateWithBody,
            ),
        ];

        for (message, expected) in cases {
            assert_eq!(message.validate(), Err(expected), "{message:?}");
        }
    }

    #[test]
    fn first_violated_rule_wins() {
        let message = EmailMessage::default();
        assert_eq!(message.validate(), Err(ValidationError::MissingTo));

        let message = EmailMessage {
            to: vec!["t@e.com".into()],
            template_data: Some(data()),
            ..EmailMessage::default()
        };
        assert_eq!(message.validate(), Err(ValidationError::MissingSubject));

        let message = EmailMessage {
            template_data: Some(data()),
            body_html: Some("<p></p>".into()),
            ..valid()
        };
        assert_eq!(message.validate(), Err(ValidationError::TemplateDataWithoutId));
    }

    #[test]
    fn template_with_data_is_valid() {
        assert_eq!(valid().template("uuid", Some(data())).validate(), Ok(()));
    }

    #[test]
    fn attachments_do_not_affect_structural_validation() {
        let message = valid().attachment(Attachment::new("a.txt", "text/plain"));
        assert_eq!(message.validate(), Ok(()));
    }

    #[test]
    fn decodes_send_result() {
        let result: SendResult =
            serde_json::from_str(r#"{"message_id":"test-msg-id","status":"sent"}"#).unwrap();
        assert_eq!(result.message_id, "test-msg-id");
        assert_eq!(result.status, "sent");
    }
}
