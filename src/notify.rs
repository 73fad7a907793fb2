//! Outgoing e-mail notifications.
//!
//! The mailer is created by the process bootstrap and passed to the
//! operations that need it.

use crate::config::Config;
use crate::errors::AppResult;

pub trait Mailer {
    fn send_verification(&self, email: &str, name: &str) -> AppResult<()>;
    fn send_password_reset(&self, email: &str, name: &str) -> AppResult<()>;
}

/// Mailer used when no mail transport is configured: it logs what would be sent.
pub struct LogMailer {
    app_name: String,
    from_email: String,
    frontend_url: String,
}

impl LogMailer {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            app_name: cfg.app_name.clone(),
            from_email: cfg.from_email.clone(),
            frontend_url: cfg.frontend_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Mailer for LogMailer {
    fn send_verification(&self, email: &str, name: &str) -> AppResult<()> {
        log::info!(
            "would send verification mail from {} to {} <{}>: welcome to {}, verify at {}/verify-email",
            self.from_email,
            name,
            email,
            self.app_name,
            self.frontend_url
        );
        Ok(())
    }

    fn send_password_reset(&self, email: &str, name: &str) -> AppResult<()> {
        log::info!(
            "would send password reset mail from {} to {} <{}>: reset at {}/reset-password",
            self.from_email,
            name,
            email,
            self.frontend_url
        );
        Ok(())
    }
}
