// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Water, exercise, sleep and meal logs.
//!
//! Wire names match the mobile client (`quantidade_ml`, `data_criacao`, ...).
//! Timestamped logs also carry `dia`, the server-local day they were
//! created on, which is what the daily and weekly sums key on.

use crate::db::{collections, Document};
use crate::models::Record;
use crate::time_utils::local_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

// ─── Water ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WaterLog {
    pub id: String,
    pub user: String,
    #[serde(rename = "quantidade_ml")]
    pub volume_ml: u32,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "dia")]
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaterLogInput {
    #[serde(rename = "quantidade_ml")]
    #[validate(range(min = 1, max = 10000))]
    pub volume_ml: u32,
}

impl Document for WaterLog {
    const COLLECTION: &'static str = collections::WATER;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for WaterLog {
    type Input = WaterLogInput;

    fn owner(&self) -> &str {
        &self.user
    }

    fn create(id: String, owner: &str, input: WaterLogInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user: owner.to_string(),
            volume_ml: input.volume_ml,
            created_at: now,
            day: local_date(now),
        }
    }

    fn input(&self) -> WaterLogInput {
        WaterLogInput {
            volume_ml: self.volume_ml,
        }
    }

    fn apply(&mut self, input: WaterLogInput) {
        self.volume_ml = input.volume_ml;
    }

    fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

// ─── Exercise ───────────────────────────────────────────────

/// Activity category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityKind {
    #[serde(rename = "Caminhada")]
    Walk,
    #[serde(rename = "Corrida")]
    Run,
    #[serde(rename = "Musculação")]
    Strength,
    #[serde(rename = "Natação")]
    Swim,
    #[serde(rename = "Ciclismo")]
    Cycle,
    #[default]
    #[serde(rename = "Outro")]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Intensity {
    #[serde(rename = "Baixa")]
    Low,
    #[default]
    #[serde(rename = "Moderada")]
    Moderate,
    #[serde(rename = "Intensa")]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseLog {
    pub id: String,
    pub user: String,
    #[serde(rename = "tipo_atividade")]
    pub kind: ActivityKind,
    #[serde(rename = "duracao_minutos")]
    pub duration_minutes: u32,
    #[serde(rename = "intensidade")]
    pub intensity: Intensity,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "dia")]
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExerciseLogInput {
    #[serde(rename = "tipo_atividade", default)]
    pub kind: ActivityKind,
    #[serde(rename = "duracao_minutos")]
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: u32,
    #[serde(rename = "intensidade", default)]
    pub intensity: Intensity,
}

impl Document for ExerciseLog {
    const COLLECTION: &'static str = collections::EXERCISE;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ExerciseLog {
    type Input = ExerciseLogInput;

    fn owner(&self) -> &str {
        &self.user
    }

    fn create(id: String, owner: &str, input: ExerciseLogInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user: owner.to_string(),
            kind: input.kind,
            duration_minutes: input.duration_minutes,
            intensity: input.intensity,
            created_at: now,
            day: local_date(now),
        }
    }

    fn input(&self) -> ExerciseLogInput {
        ExerciseLogInput {
            kind: self.kind,
            duration_minutes: self.duration_minutes,
            intensity: self.intensity,
        }
    }

    fn apply(&mut self, input: ExerciseLogInput) {
        self.kind = input.kind;
        self.duration_minutes = input.duration_minutes;
        self.intensity = input.intensity;
    }

    fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

// ─── Sleep ──────────────────────────────────────────────────

/// One night of sleep. Conceptually one per day; not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SleepLog {
    pub id: String,
    pub user: String,
    #[serde(rename = "horas_sono")]
    pub hours: f64,
    #[serde(rename = "data_registro")]
    pub recorded_on: NaiveDate,
    /// Insertion time; "latest sleep" on the dashboard means latest inserted.
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SleepLogInput {
    #[serde(rename = "horas_sono")]
    #[validate(range(min = 0.0, max = 24.0))]
    pub hours: f64,
    /// Defaults to today on create, and to the stored date on update.
    #[serde(rename = "data_registro", default)]
    pub recorded_on: Option<NaiveDate>,
}

impl Document for SleepLog {
    const COLLECTION: &'static str = collections::SLEEP;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for SleepLog {
    type Input = SleepLogInput;

    fn owner(&self) -> &str {
        &self.user
    }

    fn create(id: String, owner: &str, input: SleepLogInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user: owner.to_string(),
            hours: input.hours,
            recorded_on: input.recorded_on.unwrap_or_else(|| local_date(now)),
            created_at: now,
        }
    }

    fn input(&self) -> SleepLogInput {
        SleepLogInput {
            hours: self.hours,
            recorded_on: Some(self.recorded_on),
        }
    }

    fn apply(&mut self, input: SleepLogInput) {
        self.hours = input.hours;
        if let Some(recorded_on) = input.recorded_on {
            self.recorded_on = recorded_on;
        }
    }

    fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.recorded_on
            .cmp(&a.recorded_on)
            .then_with(|| b.created_at.cmp(&a.created_at))
    }
}

// ─── Meals ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealKind {
    #[serde(rename = "Café da Manhã")]
    Breakfast,
    #[serde(rename = "Almoço")]
    Lunch,
    #[serde(rename = "Jantar")]
    Dinner,
    #[serde(rename = "Lanche")]
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealLog {
    pub id: String,
    pub user: String,
    #[serde(rename = "tipo_refeicao")]
    pub kind: MealKind,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "dia")]
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealLogInput {
    #[serde(rename = "tipo_refeicao")]
    pub kind: MealKind,
    #[serde(rename = "descricao", default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl Document for MealLog {
    const COLLECTION: &'static str = collections::MEALS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for MealLog {
    type Input = MealLogInput;

    fn owner(&self) -> &str {
        &self.user
    }

    fn create(id: String, owner: &str, input: MealLogInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user: owner.to_string(),
            kind: input.kind,
            description: input.description,
            created_at: now,
            day: local_date(now),
        }
    }

    fn input(&self) -> MealLogInput {
        MealLogInput {
            kind: self.kind,
            description: self.description.clone(),
        }
    }

    fn apply(&mut self, input: MealLogInput) {
        self.kind = input.kind;
        self.description = input.description;
    }

    fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}
