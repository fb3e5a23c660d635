// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily goals: one document per user, keyed by the user id.

use crate::db::{collections, Document};
use crate::models::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_WATER_ML: u32 = 3000;
const DEFAULT_SLEEP_HOURS: f64 = 8.0;
const DEFAULT_EXERCISE_MINUTES: u32 = 60;
const DEFAULT_MEAL_COUNT: u32 = 5;

/// Per-user daily targets. Display only; nothing enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Goal {
    /// Same as `user`.
    pub id: String,
    pub user: String,
    #[serde(rename = "meta_agua_ml")]
    pub water_ml: u32,
    #[serde(rename = "meta_sono_horas")]
    pub sleep_hours: f64,
    #[serde(rename = "meta_exercicio_min")]
    pub exercise_minutes: u32,
    #[serde(rename = "meta_refeicoes_qtd")]
    pub meal_count: u32,
}

impl Goal {
    /// Targets used until the user stores their own.
    pub fn defaults_for(owner: &str) -> Self {
        Self::create(owner.to_string(), owner, GoalInput::default(), Utc::now())
    }
}

/// Writable goal fields. Omitted fields take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GoalInput {
    #[serde(rename = "meta_agua_ml", default = "default_water_ml")]
    #[validate(range(min = 1, max = 20000))]
    pub water_ml: u32,
    #[serde(rename = "meta_sono_horas", default = "default_sleep_hours")]
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: f64,
    #[serde(rename = "meta_exercicio_min", default = "default_exercise_minutes")]
    #[validate(range(min = 0, max = 1440))]
    pub exercise_minutes: u32,
    #[serde(rename = "meta_refeicoes_qtd", default = "default_meal_count")]
    #[validate(range(min = 0, max = 20))]
    pub meal_count: u32,
}

fn default_water_ml() -> u32 {
    DEFAULT_WATER_ML
}
fn default_sleep_hours() -> f64 {
    DEFAULT_SLEEP_HOURS
}
fn default_exercise_minutes() -> u32 {
    DEFAULT_EXERCISE_MINUTES
}
fn default_meal_count() -> u32 {
    DEFAULT_MEAL_COUNT
}

impl Default for GoalInput {
    fn default() -> Self {
        Self {
            water_ml: DEFAULT_WATER_ML,
            sleep_hours: DEFAULT_SLEEP_HOURS,
            exercise_minutes: DEFAULT_EXERCISE_MINUTES,
            meal_count: DEFAULT_MEAL_COUNT,
        }
    }
}

impl Document for Goal {
    const COLLECTION: &'static str = collections::GOALS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Goal {
    type Input = GoalInput;

    fn owner(&self) -> &str {
        &self.user
    }

    /// Singleton per user: creating again overwrites the same document.
    fn fixed_id(owner: &str) -> Option<String> {
        Some(owner.to_string())
    }

    fn create(id: String, owner: &str, input: GoalInput, _now: DateTime<Utc>) -> Self {
        let mut goal = Self {
            id,
            user: owner.to_string(),
            water_ml: 0,
            sleep_hours: 0.0,
            exercise_minutes: 0,
            meal_count: 0,
        };
        goal.apply(input);
        goal
    }

    fn input(&self) -> GoalInput {
        GoalInput {
            water_ml: self.water_ml,
            sleep_hours: self.sleep_hours,
            exercise_minutes: self.exercise_minutes,
            meal_count: self.meal_count,
        }
    }

    fn apply(&mut self, input: GoalInput) {
        self.water_ml = input.water_ml;
        self.sleep_hours = input.sleep_hours;
        self.exercise_minutes = input.exercise_minutes;
        self.meal_count = input.meal_count;
    }

    fn newest_first(a: &Self, b: &Self) -> Ordering {
        a.id.cmp(&b.id)
    }
}
