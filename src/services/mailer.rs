// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound email.
//!
//! Production posts to an HTTP mail API. Without one configured, messages
//! land in an in-memory outbox (local development and tests).

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A plain-text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Email delivery collaborator.
#[derive(Clone)]
pub enum Mailer {
    Http(HttpMailer),
    Outbox(Outbox),
}

impl Mailer {
    /// HTTP mailer when `MAIL_API_URL` is set, outbox otherwise.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        match &config.mail_api_url {
            Some(url) => Ok(Mailer::Http(HttpMailer::new(
                url.clone(),
                config.mail_api_key.clone(),
            )?)),
            None => {
                tracing::warn!("MAIL_API_URL not set; outgoing mail goes to the in-memory outbox");
                Ok(Mailer::Outbox(Outbox::default()))
            }
        }
    }

    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError> {
        match self {
            Mailer::Http(mailer) => mailer.send(email).await,
            Mailer::Outbox(outbox) => {
                outbox.push(email.clone());
                Ok(())
            }
        }
    }
}

/// Posts JSON messages to a mail API with bearer auth.
#[derive(Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpMailer {
    pub fn new(url: String, api_key: Option<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, url, api_key })
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError> {
        let mut request = self.http.post(&self.url).json(email);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!("HTTP {}: {}", status, body)));
        }

        tracing::info!(subject = %email.subject, "Email handed to mail API");
        Ok(())
    }
}

/// In-memory message store shared by all clones.
#[derive(Clone, Default)]
pub struct Outbox {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl Outbox {
    fn push(&self, email: OutgoingEmail) {
        // Body is not logged: it may carry a reset code.
        tracing::info!(subject = %email.subject, "Email stored in outbox");
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email);
        }
    }

    /// Every message sent so far, oldest first.
    pub fn messages(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent message addressed to `to`.
    pub fn last_to(&self, to: &str) -> Option<OutgoingEmail> {
        self.messages().into_iter().rev().find(|email| email.to == to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str, text: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: "webmaster@fitflow.com".to_string(),
            to: to.to_string(),
            subject: "Hello".to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_outbox_keeps_messages() {
        let outbox = Outbox::default();
        let mailer = Mailer::Outbox(outbox.clone());

        mailer.send(&email("a@example.com", "one")).await.unwrap();
        mailer.send(&email("b@example.com", "two")).await.unwrap();
        mailer.send(&email("a@example.com", "three")).await.unwrap();

        assert_eq!(outbox.messages().len(), 3);
        assert_eq!(outbox.last_to("a@example.com").unwrap().text, "three");
        assert!(outbox.last_to("c@example.com").is_none());
    }

    #[test]
    fn test_from_config_without_url_uses_outbox() {
        let config = Config::test_default();
        assert!(matches!(
            Mailer::from_config(&config).unwrap(),
            Mailer::Outbox(_)
        ));
    }

    #[tokio::test]
    async fn test_http_mailer_unreachable_is_mail_error() {
        // Nothing listens on port 9 locally.
        let mailer = HttpMailer::new("http://127.0.0.1:9/send".to_string(), None).unwrap();
        let result = mailer.send(&email("a@example.com", "x")).await;
        assert!(matches!(result, Err(AppError::Mail(_))));
    }
}
