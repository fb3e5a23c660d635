// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Which record store backend to connect at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or its emulator).
    Firestore,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", raw.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Record store backend
    pub store_backend: StoreBackend,
    /// GCP project ID (Firestore backend only)
    pub gcp_project_id: String,
    /// Mail API endpoint. Messages go to the in-memory outbox when unset.
    pub mail_api_url: Option<String>,
    /// Bearer token for the mail API
    pub mail_api_key: Option<String>,
    /// Sender address for outgoing mail
    pub mail_from: String,
    /// PBKDF2 iteration count for new password hashes
    pub pbkdf2_iterations: u32,
}

const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            store_backend: StoreBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            mail_api_url: None,
            mail_api_key: None,
            mail_from: "webmaster@fitflow.com".to_string(),
            // Keep hashing cheap in tests.
            pbkdf2_iterations: 1_000,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let gcp_project_id = env::var("GCP_PROJECT_ID").ok();
        let store_backend = match env::var("STORE_BACKEND") {
            Ok(raw) => StoreBackend::parse(&raw)?,
            Err(_) if gcp_project_id.is_some() => StoreBackend::Firestore,
            Err(_) => StoreBackend::Memory,
        };

        if store_backend == StoreBackend::Firestore && gcp_project_id.is_none() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        let pbkdf2_iterations = match env::var("PBKDF2_ITERATIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("PBKDF2_ITERATIONS", raw))?,
            Err(_) => DEFAULT_PBKDF2_ITERATIONS,
        };

        let config = Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            store_backend,
            gcp_project_id: gcp_project_id.unwrap_or_else(|| "local-dev".to_string()),
            mail_api_url: env::var("MAIL_API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            mail_api_key: env::var("MAIL_API_KEY").ok().map(|v| v.trim().to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "webmaster@fitflow.com".to_string()),
            pbkdf2_iterations,
        };
        config.check_mail()?;
        Ok(config)
    }

    /// Firestore deployments must deliver mail through the HTTP API.
    fn check_mail(&self) -> Result<(), ConfigError> {
        if self.store_backend == StoreBackend::Firestore && self.mail_api_url.is_none() {
            return Err(ConfigError::Missing("MAIL_API_URL"));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
