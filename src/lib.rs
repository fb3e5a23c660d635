// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitFlow: personal health tracking
//!
//! This crate provides the backend API where users log water intake,
//! exercise, sleep and meals, set daily goals, and read back a dashboard
//! and weekly progress. Forgotten passwords are reset with an emailed code.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod random;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::{Credentials, Mailer};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub mailer: Mailer,
    pub credentials: Credentials,
}
