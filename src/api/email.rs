//! Email delivery seam.
//!
//! Issuing a token produces a login link; getting that link into the user's
//! inbox is the job of an `EmailSender`. Real transports (SMTP, provider APIs)
//! live outside this crate. `LogEmailSender` is the local-dev stand-in.

use anyhow::Result;
use secrecy::SecretString;
use tracing::info;

/// Template name for login link messages.
pub const LOGIN_TEMPLATE: &str = "email_token_login";

#[derive(Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub template: String,
    /// Login link; contains the plaintext token.
    pub link: SecretString,
}

/// Email delivery abstraction used by the request handler.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Logs the recipient instead of sending real email. The link is not logged.
#[derive(Clone, Debug, Default)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            template = %message.template,
            "email send stub"
        );
        Ok(())
    }
}
