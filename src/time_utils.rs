// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar days.
//!
//! Per-day aggregation is keyed by the server-local calendar date.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

/// Number of days in the progress window, today included.
pub const WEEK_DAYS: usize = 7;

/// Server-local calendar date of a UTC instant.
pub fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Today's server-local date.
pub fn local_today() -> NaiveDate {
    local_date(Utc::now())
}

/// The seven days ending on `today`, oldest first.
pub fn week_ending(today: NaiveDate) -> [NaiveDate; WEEK_DAYS] {
    let mut days = [today; WEEK_DAYS];
    for (offset, day) in days.iter_mut().rev().enumerate() {
        *day = today
            .checked_sub_days(Days::new(offset as u64))
            .unwrap_or(NaiveDate::MIN);
    }
    days
}

/// Chart label for a day, e.g. `22/11`.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%d/%m").to_string()
}
