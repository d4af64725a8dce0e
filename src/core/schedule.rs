//! Weekly schedule business logic.
//!
//! A user's schedule maps each weekday (0 = Sunday) to an ordered list of subjects.
//! Callers submit subject names; they are validated, resolved to subject IDs and stored
//! as ordered slots, replacing whatever the day held before.

use crate::{
    core::{
        subject::{find_by_name, get_subjects_for_user},
        validation::{DAYS_PER_WEEK, validate_schedule_day, weekday_name},
    },
    entities::{ScheduleSlot, Subject, schedule_slot, subject},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::info;

/// The subjects scheduled on one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Day index, 0 = Sunday
    pub weekday: u8,
    /// Day name, e.g. "Monday"
    pub day_name: &'static str,
    /// Scheduled subjects in order
    pub subjects: Vec<subject::Model>,
}

/// Schedule day index of a calendar date (0 = Sunday).
#[must_use]
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..7
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or_default()
}

/// Retrieves the ordered subjects scheduled on one weekday.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the schedule
/// * `weekday` - Day index, 0 (Sunday) to 6 (Saturday)
///
/// # Returns
/// The day's subjects in class order, empty for a free day
pub async fn get_day_schedule(
    db: &DatabaseConnection,
    user_id: &str,
    weekday: u8,
) -> Result<Vec<subject::Model>> {
    let slots = ScheduleSlot::find()
        .filter(schedule_slot::Column::UserId.eq(user_id))
        .filter(schedule_slot::Column::Weekday.eq(i32::from(weekday)))
        .order_by_asc(schedule_slot::Column::Position)
        .find_also_related(Subject)
        .all(db)
        .await?;

    Ok(slots.into_iter().filter_map(|(_, subject)| subject).collect())
}

/// Retrieves the full week, one entry per day from Sunday to Saturday.
pub async fn get_week_schedule(db: &DatabaseConnection, user_id: &str) -> Result<Vec<DaySchedule>> {
    let slots = ScheduleSlot::find()
        .filter(schedule_slot::Column::UserId.eq(user_id))
        .order_by_asc(schedule_slot::Column::Weekday)
        .order_by_asc(schedule_slot::Column::Position)
        .find_also_related(Subject)
        .all(db)
        .await?;

    let mut week: Vec<DaySchedule> = (0..DAYS_PER_WEEK)
        .map(|weekday| DaySchedule {
            weekday,
            day_name: weekday_name(weekday).unwrap_or_default(),
            subjects: Vec::new(),
        })
        .collect();

    for (slot, subject) in slots {
        let Some(subject) = subject else { continue };
        if let Some(day) = usize::try_from(slot.weekday)
            .ok()
            .and_then(|index| week.get_mut(index))
        {
            day.subjects.push(subject);
        }
    }

    Ok(week)
}

/// Replaces the subjects scheduled on one day.
///
/// The day and names are validated first; every name must then match one of the
/// user's subjects (ignoring case). An empty list clears the day.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the schedule
/// * `day` - Day index as given; anything outside 0..=6 is rejected
/// * `subject_names` - Subject names in class order
///
/// # Returns
/// The resolved subjects now scheduled on the day
///
/// # Errors
/// Returns [`Error::Validation`] for an invalid day, blank entries or duplicates, and
/// [`Error::SubjectNotFound`] for names that match no subject.
pub async fn set_day_schedule<S: AsRef<str>>(
    db: &DatabaseConnection,
    user_id: &str,
    day: i64,
    subject_names: &[S],
) -> Result<Vec<subject::Model>> {
    let (weekday, names) = validate_schedule_day(day, subject_names)?;

    let known = get_subjects_for_user(db, user_id).await?;
    let mut resolved = Vec::with_capacity(names.len());
    for name in &names {
        let subject = find_by_name(&known, name).ok_or_else(|| Error::SubjectNotFound {
            name: name.clone(),
        })?;
        resolved.push(subject.clone());
    }

    let txn = db.begin().await?;

    ScheduleSlot::delete_many()
        .filter(schedule_slot::Column::UserId.eq(user_id))
        .filter(schedule_slot::Column::Weekday.eq(i32::from(weekday)))
        .exec(&txn)
        .await?;

    for (position, subject) in (0..).zip(&resolved) {
        schedule_slot::ActiveModel {
            user_id: Set(user_id.to_string()),
            weekday: Set(i32::from(weekday)),
            position: Set(position),
            subject_id: Set(subject.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        user_id,
        weekday,
        subjects = resolved.len(),
        "Replaced day schedule"
    );
    Ok(resolved)
}
