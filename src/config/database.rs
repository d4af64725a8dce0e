//! Database configuration module for `AttendanceBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL. Creation uses
//! `IF NOT EXISTS` so restarting against an existing database file is harmless.

use crate::entities::{Attendance, ScheduleSlot, Subject, UserSettings, attendance, subject};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, sea_query::Index};
use std::path::Path;
use tracing::info;

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/attendance_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Returns the directory holding a file-backed `SQLite` database, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Establishes a connection to the given database URL.
///
/// For file-backed `SQLite` URLs the parent directory is created first.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }
    info!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet, from the entity definitions, plus the
/// unique indexes behind subject names and per-day attendance.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Subject),
        schema.create_table_from_entity(ScheduleSlot),
        schema.create_table_from_entity(Attendance),
        schema.create_table_from_entity(UserSettings),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    let indexes = [
        Index::create()
            .name("idx_subjects_user_name_key")
            .table(Subject)
            .col(subject::Column::UserId)
            .col(subject::Column::NameKey)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_attendance_user_subject_date")
            .table(Attendance)
            .col(attendance::Column::UserId)
            .col(attendance::Column::SubjectId)
            .col(attendance::Column::Date)
            .unique()
            .if_not_exists()
            .to_owned(),
    ];
    for index in &indexes {
        db.execute(builder.build(index)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{
        AttendanceModel, ScheduleSlotModel, SubjectModel, UserSettingsModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir(DEFAULT_DATABASE_URL),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://plain.sqlite"), None);
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<SubjectModel> = Subject::find().limit(1).all(&db).await?;
        let _: Vec<ScheduleSlotModel> = ScheduleSlot::find().limit(1).all(&db).await?;
        let _: Vec<AttendanceModel> = Attendance::find().limit(1).all(&db).await?;
        let _: Vec<UserSettingsModel> = UserSettings::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_unique_indexes_reject_duplicates() -> Result<()> {
        use sea_orm::{ActiveModelTrait, Set, SqlErr};

        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        let subject_row = |name: &str| subject::ActiveModel {
            user_id: Set("alice".to_string()),
            name: Set(name.to_string()),
            name_key: Set(name.to_lowercase()),
            professor_name: Set(None),
            color: Set("blue".to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        let math = subject_row("Math").insert(&db).await?;
        let err = subject_row("MATH").insert(&db).await.unwrap_err();
        assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));

        let date = chrono::NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let attendance_row = || attendance::ActiveModel {
            user_id: Set("alice".to_string()),
            subject_id: Set(math.id),
            date: Set(date),
            status: Set("present".to_string()),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        attendance_row().insert(&db).await?;
        let err = attendance_row().insert(&db).await.unwrap_err();
        assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
