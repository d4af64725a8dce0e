//! Subject business logic - Creating, renaming, recoloring and deleting subjects.
//!
//! Every write runs the subject validation rules first and enforces per-user,
//! case-insensitive name uniqueness. The lookup gives a friendly error early; the
//! unique index on `(user_id, name_key)` settles concurrent writers. Deleting a subject
//! also removes its schedule slots and attendance records in one transaction.

use crate::{
    core::validation::{SubjectInput, validate_subject_input},
    entities::{Attendance, ScheduleSlot, Subject, attendance, schedule_slot, subject},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Partial update for a subject; `None` fields keep their current value.
///
/// A blank `professor_name` clears the professor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectUpdate {
    /// New name
    pub name: Option<String>,
    /// New professor name, blank to clear
    pub professor_name: Option<String>,
    /// New color
    pub color: Option<String>,
}

impl SubjectUpdate {
    /// True when the update changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.professor_name.is_none() && self.color.is_none()
    }
}

/// Normalized form of a subject name used for uniqueness and lookups.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Retrieves all subjects of a user, ordered alphabetically by name.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner whose subjects are listed
///
/// # Returns
/// The user's subjects, empty when they have none
pub async fn get_subjects_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<subject::Model>> {
    Subject::find()
        .filter(subject::Column::UserId.eq(user_id))
        .order_by_asc(subject::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a subject by ID, returning None if it does not exist or belongs to another user.
pub async fn get_subject_by_id(
    db: &DatabaseConnection,
    user_id: &str,
    subject_id: i64,
) -> Result<Option<subject::Model>> {
    Subject::find_by_id(subject_id)
        .filter(subject::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a subject by name, ignoring case and surrounding whitespace.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the subject
/// * `name` - Name as typed by the user
///
/// # Returns
/// The matching subject, or None
pub async fn get_subject_by_name(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
) -> Result<Option<subject::Model>> {
    Subject::find()
        .filter(subject::Column::UserId.eq(user_id))
        .filter(subject::Column::NameKey.eq(name_key(name)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Picks the subject whose name matches `name`, ignoring case and surrounding whitespace.
#[must_use]
pub fn find_by_name<'a>(subjects: &'a [subject::Model], name: &str) -> Option<&'a subject::Model> {
    let wanted = name_key(name);
    subjects.iter().find(|s| s.name_key == wanted)
}

async fn ensure_name_available(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    except_id: Option<i64>,
) -> Result<()> {
    match get_subject_by_name(db, user_id, name).await? {
        Some(existing) if Some(existing.id) != except_id => Err(Error::SubjectAlreadyExists {
            name: existing.name,
        }),
        _ => Ok(()),
    }
}

/// Turns a violation of the `(user_id, name_key)` index into [`Error::SubjectAlreadyExists`].
fn map_name_conflict(err: DbErr, name: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::SubjectAlreadyExists {
            name: name.to_string(),
        },
        _ => err.into(),
    }
}

/// Creates a subject after validating its fields.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the new subject
/// * `input` - Raw name, professor and color
///
/// # Returns
/// The stored subject with its trimmed name and resolved color
///
/// # Errors
/// Returns [`Error::Validation`] for invalid names and [`Error::SubjectAlreadyExists`]
/// when the user already has a subject with this name.
pub async fn create_subject(
    db: &DatabaseConnection,
    user_id: &str,
    input: &SubjectInput,
) -> Result<subject::Model> {
    let validated = validate_subject_input(input)?;
    ensure_name_available(db, user_id, &validated.name, None).await?;

    let subject = subject::ActiveModel {
        user_id: Set(user_id.to_string()),
        name_key: Set(name_key(&validated.name)),
        name: Set(validated.name.clone()),
        professor_name: Set(validated.professor_name),
        color: Set(validated.color.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = subject
        .insert(db)
        .await
        .map_err(|e| map_name_conflict(e, &validated.name))?;
    info!(user_id, subject_id = result.id, name = %result.name, "Created subject");
    Ok(result)
}

/// Applies a partial update to a subject, re-validating the merged fields.
///
/// # Errors
/// Returns [`Error::SubjectNotFound`] if the subject does not exist for this user,
/// [`Error::Validation`] for invalid fields, and [`Error::SubjectAlreadyExists`] when
/// renaming onto another subject's name.
pub async fn update_subject(
    db: &DatabaseConnection,
    user_id: &str,
    subject_id: i64,
    update: &SubjectUpdate,
) -> Result<subject::Model> {
    let existing = get_subject_by_id(db, user_id, subject_id)
        .await?
        .ok_or_else(|| Error::SubjectNotFound {
            name: subject_id.to_string(),
        })?;

    let merged = SubjectInput {
        name: update.name.clone().unwrap_or_else(|| existing.name.clone()),
        professor_name: update
            .professor_name
            .clone()
            .or_else(|| existing.professor_name.clone()),
        color: Some(update.color.clone().unwrap_or_else(|| existing.color.clone())),
    };
    let validated = validate_subject_input(&merged)?;
    ensure_name_available(db, user_id, &validated.name, Some(subject_id)).await?;

    let mut active_model: subject::ActiveModel = existing.into();
    active_model.name_key = Set(name_key(&validated.name));
    active_model.name = Set(validated.name.clone());
    active_model.professor_name = Set(validated.professor_name);
    active_model.color = Set(validated.color.to_string());

    let updated = active_model
        .update(db)
        .await
        .map_err(|e| map_name_conflict(e, &validated.name))?;
    debug!(user_id, subject_id, "Updated subject");
    Ok(updated)
}

/// Deletes a subject together with its schedule slots and attendance records.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the subject
/// * `subject_id` - Subject to delete
///
/// # Errors
/// Returns [`Error::SubjectNotFound`] if the subject does not exist for this user.
pub async fn delete_subject(db: &DatabaseConnection, user_id: &str, subject_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let subject = Subject::find_by_id(subject_id)
        .filter(subject::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::SubjectNotFound {
            name: subject_id.to_string(),
        })?;

    let slots = ScheduleSlot::delete_many()
        .filter(schedule_slot::Column::SubjectId.eq(subject_id))
        .exec(&txn)
        .await?;
    let records = Attendance::delete_many()
        .filter(attendance::Column::SubjectId.eq(subject_id))
        .exec(&txn)
        .await?;
    let name = subject.name.clone();
    subject.delete(&txn).await?;

    txn.commit().await?;

    info!(
        user_id,
        subject_id,
        name = %name,
        slots_removed = slots.rows_affected,
        records_removed = records.rows_affected,
        "Deleted subject"
    );
    Ok(())
}
