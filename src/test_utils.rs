//! Shared test utilities for `AttendanceBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        attendance::{self, AttendanceStatus},
        subject,
        validation::SubjectInput,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// User every helper writes as
pub const TEST_USER: &str = "test_user";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database in the temp directory, for tests that need
/// several pooled connections writing at once. Returns the path for cleanup.
pub async fn setup_file_test_db(label: &str) -> Result<(DatabaseConnection, PathBuf)> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "attendance_buddy_{label}_{}_{nanos}.sqlite",
        std::process::id()
    ));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let db = crate::config::database::create_connection(&url).await?;
    crate::config::database::create_tables(&db).await?;
    Ok((db, path))
}

/// Removes a database created by [`setup_file_test_db`] along with its journal files.
pub fn remove_file_test_db(path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

/// Parses a `YYYY-MM-DD` date, panicking on malformed test input.
#[must_use]
pub fn test_date(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// Subject input with only a name set.
#[must_use]
pub fn subject_input(name: &str) -> SubjectInput {
    SubjectInput {
        name: name.to_string(),
        professor_name: None,
        color: None,
    }
}

/// Creates a test subject for [`TEST_USER`] with no professor and the default color.
pub async fn create_test_subject(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::subject::Model> {
    subject::create_subject(db, TEST_USER, &subject_input(name)).await
}

/// Creates a test subject with custom parameters.
pub async fn create_custom_subject(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    professor_name: Option<&str>,
    color: Option<&str>,
) -> Result<entities::subject::Model> {
    let input = SubjectInput {
        name: name.to_string(),
        professor_name: professor_name.map(str::to_string),
        color: color.map(str::to_string),
    };
    subject::create_subject(db, user_id, &input).await
}

/// Marks attendance for [`TEST_USER`] from string arguments, e.g. `("2024-09-02", "present")`.
pub async fn mark_test_attendance(
    db: &DatabaseConnection,
    subject_id: i64,
    date: &str,
    status: &str,
) -> Result<Option<entities::attendance::Model>> {
    let status: AttendanceStatus = status.parse()?;
    attendance::mark_attendance(db, TEST_USER, subject_id, test_date(date), status).await
}

/// Sets up a complete test environment with one subject named "Math".
/// Returns (db, subject) for common test scenarios.
pub async fn setup_with_subject() -> Result<(DatabaseConnection, entities::subject::Model)> {
    let db = setup_test_db().await?;
    let subject = create_test_subject(&db, "Math").await?;
    Ok((db, subject))
}
