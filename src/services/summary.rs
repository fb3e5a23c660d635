// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard and weekly progress aggregation.
//!
//! The bucketing functions are pure and take "today" explicitly; the async
//! loaders fetch the owner's logs and hand them over.

use crate::error::Result;
use crate::models::{ExerciseLog, Goal, MealLog, Record, SleepLog, WaterLog};
use crate::services::records::{DailyRecord, OwnerScope};
use crate::time_utils::{day_label, week_ending, WEEK_DAYS};
use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of exercise logs listed in the progress history.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Today's totals for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSnapshot {
    #[serde(rename = "agua_hoje")]
    pub water_ml: u64,
    #[serde(rename = "exercicio_hoje")]
    pub exercise_minutes: u64,
    /// Hours from the most recently inserted sleep log, whatever its date.
    #[serde(rename = "sono_hoje")]
    pub sleep_hours: f64,
    #[serde(rename = "refeicoes_hoje")]
    pub meal_count: u64,
    /// Stored goal, or the defaults when the user has none.
    #[serde(rename = "metas")]
    pub goal: Goal,
}

/// Seven-day series, oldest first, plus recent activity history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyProgress {
    pub labels: Vec<String>,
    #[serde(rename = "agua_semanal")]
    pub water_ml: Vec<u64>,
    #[serde(rename = "exercicio_semanal")]
    pub exercise_minutes: Vec<u64>,
    #[serde(rename = "historico_atividades")]
    pub recent_activities: Vec<ExerciseLog>,
}

fn sum_on<R: DailyRecord>(logs: &[R], day: NaiveDate, amount: impl Fn(&R) -> u32) -> u64 {
    logs.iter()
        .filter(|log| log.day() == day)
        .map(|log| u64::from(amount(log)))
        .sum()
}

/// Build the dashboard for `today` from the owner's logs.
pub fn dashboard_snapshot(
    today: NaiveDate,
    water: &[WaterLog],
    exercise: &[ExerciseLog],
    sleep: &[SleepLog],
    meals: &[MealLog],
    goal: Goal,
) -> DashboardSnapshot {
    let latest_sleep = sleep.iter().max_by_key(|log| log.created_at);

    DashboardSnapshot {
        water_ml: sum_on(water, today, |log| log.volume_ml),
        exercise_minutes: sum_on(exercise, today, |log| log.duration_minutes),
        sleep_hours: latest_sleep.map_or(0.0, |log| log.hours),
        meal_count: meals.iter().filter(|log| log.day == today).count() as u64,
        goal,
    }
}

/// Build the 7-day series ending on `today`.
///
/// `exercise` may cover any date range; the history takes the
/// [`RECENT_ACTIVITY_LIMIT`] newest entries regardless of date.
pub fn weekly_progress(
    today: NaiveDate,
    water: &[WaterLog],
    exercise: &[ExerciseLog],
) -> WeeklyProgress {
    let days = week_ending(today);

    let mut recent_activities = exercise.to_vec();
    recent_activities.sort_by(ExerciseLog::newest_first);
    recent_activities.truncate(RECENT_ACTIVITY_LIMIT);

    let mut progress = WeeklyProgress {
        labels: Vec::with_capacity(WEEK_DAYS),
        water_ml: Vec::with_capacity(WEEK_DAYS),
        exercise_minutes: Vec::with_capacity(WEEK_DAYS),
        recent_activities,
    };

    for day in days {
        progress.labels.push(day_label(day));
        progress.water_ml.push(sum_on(water, day, |log| log.volume_ml));
        progress
            .exercise_minutes
            .push(sum_on(exercise, day, |log| log.duration_minutes));
    }

    progress
}

/// Load and aggregate the owner's dashboard.
pub async fn load_dashboard(scope: &OwnerScope<'_>, today: NaiveDate) -> Result<DashboardSnapshot> {
    let (water, exercise, meals, sleep, goal) = futures_util::try_join!(
        scope.list_since::<WaterLog>(today),
        scope.list_since::<ExerciseLog>(today),
        scope.list_since::<MealLog>(today),
        scope.list::<SleepLog>(),
        scope.find::<Goal>(scope.owner()),
    )?;

    let goal = goal.unwrap_or_else(|| Goal::defaults_for(scope.owner()));

    Ok(dashboard_snapshot(
        today, &water, &exercise, &sleep, &meals, goal,
    ))
}

/// Load and aggregate the owner's weekly progress.
pub async fn load_progress(scope: &OwnerScope<'_>, today: NaiveDate) -> Result<WeeklyProgress> {
    let window_start = week_ending(today)[0];

    let (water, exercise) = futures_util::try_join!(
        scope.list_since::<WaterLog>(window_start),
        scope.list::<ExerciseLog>(),
    )?;

    Ok(weekly_progress(today, &water, &exercise))
}
