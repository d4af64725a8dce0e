//! Attendance business logic - Marking days and counting them up.
//!
//! Each subject has at most one record per date. Marking a day upserts its record;
//! marking it [`AttendanceStatus::Unmarked`] removes the record. Days marked
//! [`AttendanceStatus::Off`] are kept but never count as present or absent.

use crate::{
    core::{
        engine::{AttendanceCounts, SubjectCounts},
        schedule::{get_day_schedule, weekday_index},
        subject::{get_subject_by_id, get_subjects_for_user},
    },
    entities::{Attendance, attendance, subject},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};
use tracing::debug;

/// Attendance status of one subject on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Attended
    Present,
    /// Missed
    Absent,
    /// No class held (holiday, cancellation); excluded from totals
    Off,
    /// Nothing recorded
    #[default]
    Unmarked,
}

impl AttendanceStatus {
    /// Lowercase name, as stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Off => "off",
            Self::Unmarked => "unmarked",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "off" => Ok(Self::Off),
            "unmarked" => Ok(Self::Unmarked),
            _ => Err(Error::CorruptValue {
                field: "attendance.status",
                value: s.to_string(),
            }),
        }
    }
}

/// Counted attendance of one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    /// The subject counted
    pub subject: subject::Model,
    /// Days marked present
    pub present_days: u32,
    /// Days marked absent
    pub absent_days: u32,
    /// Days marked off
    pub off_days: u32,
}

impl SubjectStats {
    /// Engine input for this subject
    #[must_use]
    pub const fn counts(&self) -> SubjectCounts {
        SubjectCounts {
            subject_id: self.subject.id,
            present_days: self.present_days,
            absent_days: self.absent_days,
        }
    }
}

impl AttendanceCounts for SubjectStats {
    fn present_days(&self) -> u32 {
        self.present_days
    }

    fn total_days(&self) -> u32 {
        self.present_days.saturating_add(self.absent_days)
    }
}

/// One scheduled subject and its status on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySheetEntry {
    /// Scheduled subject
    pub subject: subject::Model,
    /// Status on the date, unmarked when no record exists
    pub status: AttendanceStatus,
}

/// Sets the status of one subject on one date.
///
/// Writes go through a single `INSERT ... ON CONFLICT` on the
/// `(user_id, subject_id, date)` index, so a day never ends up with two records.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the subject
/// * `subject_id` - Subject being marked
/// * `date` - Calendar date of the class
/// * `status` - New status; `Unmarked` removes the record
///
/// # Returns
/// The stored record, or `None` when the record was removed
///
/// # Errors
/// Returns [`Error::SubjectNotFound`] if the subject does not belong to the user.
pub async fn mark_attendance(
    db: &DatabaseConnection,
    user_id: &str,
    subject_id: i64,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<Option<attendance::Model>> {
    if get_subject_by_id(db, user_id, subject_id).await?.is_none() {
        return Err(Error::SubjectNotFound {
            name: subject_id.to_string(),
        });
    }

    if status == AttendanceStatus::Unmarked {
        clear_attendance(db, user_id, subject_id, date).await?;
        return Ok(None);
    }

    let record = attendance::ActiveModel {
        user_id: Set(user_id.to_string()),
        subject_id: Set(subject_id),
        date: Set(date),
        status: Set(status.as_str().to_string()),
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    // Single statement so concurrent marks of the same day cannot both insert
    Attendance::insert(record)
        .on_conflict(
            OnConflict::columns([
                attendance::Column::UserId,
                attendance::Column::SubjectId,
                attendance::Column::Date,
            ])
            .update_columns([attendance::Column::Status, attendance::Column::UpdatedAt])
            .to_owned(),
        )
        .exec(db)
        .await?;

    let record = find_record(db, user_id, subject_id, date)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("attendance {subject_id} on {date}")))?;

    debug!(user_id, subject_id, %date, %status, "Marked attendance");
    Ok(Some(record))
}

async fn find_record(
    db: &DatabaseConnection,
    user_id: &str,
    subject_id: i64,
    date: NaiveDate,
) -> Result<Option<attendance::Model>> {
    Attendance::find()
        .filter(attendance::Column::UserId.eq(user_id))
        .filter(attendance::Column::SubjectId.eq(subject_id))
        .filter(attendance::Column::Date.eq(date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes the record for one subject on one date. Returns whether a record existed.
pub async fn clear_attendance(
    db: &DatabaseConnection,
    user_id: &str,
    subject_id: i64,
    date: NaiveDate,
) -> Result<bool> {
    let result = Attendance::delete_many()
        .filter(attendance::Column::UserId.eq(user_id))
        .filter(attendance::Column::SubjectId.eq(subject_id))
        .filter(attendance::Column::Date.eq(date))
        .exec(db)
        .await?;

    debug!(user_id, subject_id, %date, removed = result.rows_affected, "Cleared attendance");
    Ok(result.rows_affected > 0)
}

/// Status of one subject on one date.
pub async fn get_status(
    db: &DatabaseConnection,
    user_id: &str,
    subject_id: i64,
    date: NaiveDate,
) -> Result<AttendanceStatus> {
    let record = find_record(db, user_id, subject_id, date).await?;
    record.map_or(Ok(AttendanceStatus::Unmarked), |r| r.status.parse())
}

/// All records of a user on one date.
pub async fn get_attendance_for_date(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
) -> Result<Vec<attendance::Model>> {
    Attendance::find()
        .filter(attendance::Column::UserId.eq(user_id))
        .filter(attendance::Column::Date.eq(date))
        .order_by_asc(attendance::Column::SubjectId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The subjects scheduled on `date`'s weekday, each with its status that day.
///
/// Subjects that were marked on the date without being scheduled are appended after
/// the scheduled ones, so no recorded status is hidden.
pub async fn get_day_sheet(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
) -> Result<Vec<DaySheetEntry>> {
    let scheduled = get_day_schedule(db, user_id, weekday_index(date)).await?;
    let records = get_attendance_for_date(db, user_id, date).await?;

    let mut statuses: HashMap<i64, AttendanceStatus> = HashMap::with_capacity(records.len());
    for record in &records {
        statuses.insert(record.subject_id, record.status.parse()?);
    }

    let mut sheet: Vec<DaySheetEntry> = scheduled
        .into_iter()
        .map(|subject| DaySheetEntry {
            status: statuses.remove(&subject.id).unwrap_or_default(),
            subject,
        })
        .collect();

    if !statuses.is_empty() {
        for subject in get_subjects_for_user(db, user_id).await? {
            if let Some(status) = statuses.remove(&subject.id) {
                sheet.push(DaySheetEntry { subject, status });
            }
        }
    }

    Ok(sheet)
}

/// Counts present, absent and off days for every subject of a user.
///
/// Subjects without records appear with zero counts.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the subjects
///
/// # Returns
/// One entry per subject, ordered by subject name
pub async fn get_subject_stats(db: &DatabaseConnection, user_id: &str) -> Result<Vec<SubjectStats>> {
    let subjects = get_subjects_for_user(db, user_id).await?;
    let records = Attendance::find()
        .filter(attendance::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    let mut tallies: HashMap<i64, (u32, u32, u32)> = HashMap::new();
    for record in records {
        let tally = tallies.entry(record.subject_id).or_default();
        match record.status.parse::<AttendanceStatus>()? {
            AttendanceStatus::Present => tally.0 += 1,
            AttendanceStatus::Absent => tally.1 += 1,
            AttendanceStatus::Off => tally.2 += 1,
            AttendanceStatus::Unmarked => {}
        }
    }

    Ok(subjects
        .into_iter()
        .map(|subject| {
            let (present_days, absent_days, off_days) =
                tallies.get(&subject.id).copied().unwrap_or_default();
            SubjectStats {
                subject,
                present_days,
                absent_days,
                off_days,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::schedule::set_day_schedule;
    use crate::test_utils::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Off,
            AttendanceStatus::Unmarked,
        ] {
            assert_eq!(status.as_str().parse::<AttendanceStatus>().unwrap(), status);
        }
        assert_eq!(" Present ".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
        assert!("late".parse::<AttendanceStatus>().is_err());
    }

    #[tokio::test]
    async fn test_mark_attendance_upserts() -> Result<()> {
        let (db, math) = setup_with_subject().await?;
        let day = test_date("2024-09-02");

        let first = mark_attendance(&db, TEST_USER, math.id, day, AttendanceStatus::Absent)
            .await?
            .unwrap();
        let second = mark_attendance(&db, TEST_USER, math.id, day, AttendanceStatus::Present)
            .await?
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, "present");
        assert_eq!(Attendance::find().count(&db).await?, 1);
        assert_eq!(
            get_status(&db, TEST_USER, math.id, day).await?,
            AttendanceStatus::Present
        );

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_marks_keep_one_record() -> Result<()> {
        let (db, path) = setup_file_test_db("concurrent_marks").await?;
        let math = create_test_subject(&db, "Math").await?;
        let day = test_date("2024-09-02");

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                let status = if i % 2 == 0 {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };
                tokio::spawn(async move { mark_attendance(&db, TEST_USER, math.id, day, status).await })
            })
            .collect();

        let mut marked = 0;
        for task in tasks {
            if task.await.unwrap()?.is_some() {
                marked += 1;
            }
        }
        let records = Attendance::find().count(&db).await?;
        let status = get_status(&db, TEST_USER, math.id, day).await?;

        db.close().await?;
        remove_file_test_db(&path);

        assert_eq!(marked, 8);
        assert_eq!(records, 1);
        assert!(matches!(
            status,
            AttendanceStatus::Present | AttendanceStatus::Absent
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_unmarked_removes_record() -> Result<()> {
        let (db, math) = setup_with_subject().await?;
        let day = test_date("2024-09-02");

        mark_attendance(&db, TEST_USER, math.id, day, AttendanceStatus::Present).await?;
        let removed =
            mark_attendance(&db, TEST_USER, math.id, day, AttendanceStatus::Unmarked).await?;

        assert!(removed.is_none());
        assert_eq!(
            get_status(&db, TEST_USER, math.id, day).await?,
            AttendanceStatus::Unmarked
        );
        assert!(!clear_attendance(&db, TEST_USER, math.id, day).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_attendance_unknown_subject() -> Result<()> {
        let (db, math) = setup_with_subject().await?;
        let day = test_date("2024-09-02");

        let result = mark_attendance(&db, "intruder", math.id, day, AttendanceStatus::Present).await;
        assert!(matches!(result, Err(Error::SubjectNotFound { .. })));

        let result = mark_attendance(&db, TEST_USER, 999, day, AttendanceStatus::Present).await;
        assert!(matches!(result, Err(Error::SubjectNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_stats_exclude_off_days() -> Result<()> {
        let (db, math) = setup_with_subject().await?;
        let physics = create_test_subject(&db, "Physics").await?;

        mark_test_attendance(&db, math.id, "2024-09-02", "present").await?;
        mark_test_attendance(&db, math.id, "2024-09-03", "present").await?;
        mark_test_attendance(&db, math.id, "2024-09-04", "absent").await?;
        mark_test_attendance(&db, math.id, "2024-09-05", "off").await?;

        let stats = get_subject_stats(&db, TEST_USER).await?;
        assert_eq!(stats.len(), 2);

        let math_stats = stats.iter().find(|s| s.subject.id == math.id).unwrap();
        assert_eq!(math_stats.present_days, 2);
        assert_eq!(math_stats.absent_days, 1);
        assert_eq!(math_stats.off_days, 1);
        assert_eq!(math_stats.total_days(), 3);

        let physics_stats = stats.iter().find(|s| s.subject.id == physics.id).unwrap();
        assert_eq!(physics_stats.total_days(), 0);
        assert_eq!(physics_stats.counts().subject_id, physics.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_day_sheet_follows_schedule() -> Result<()> {
        let (db, math) = setup_with_subject().await?;
        let physics = create_test_subject(&db, "Physics").await?;
        let art =
            create_custom_subject(&db, TEST_USER, "Art", Some("Prof. Klee"), Some("orange"))
                .await?;

        // 2024-09-02 is a Monday
        set_day_schedule(&db, TEST_USER, 1, &["Physics", "Math"]).await?;
        mark_test_attendance(&db, math.id, "2024-09-02", "absent").await?;
        mark_test_attendance(&db, art.id, "2024-09-02", "off").await?;

        let sheet = get_day_sheet(&db, TEST_USER, test_date("2024-09-02")).await?;
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet[0].subject.id, physics.id);
        assert_eq!(sheet[0].status, AttendanceStatus::Unmarked);
        assert_eq!(sheet[1].subject.id, math.id);
        assert_eq!(sheet[1].status, AttendanceStatus::Absent);
        // Marked but unscheduled subjects come last
        assert_eq!(sheet[2].subject.id, art.id);
        assert_eq!(sheet[2].status, AttendanceStatus::Off);

        Ok(())
    }

    #[tokio::test]
    async fn test_attendance_for_date_scoped_to_user_and_day() -> Result<()> {
        let (db, math) = setup_with_subject().await?;
        mark_test_attendance(&db, math.id, "2024-09-02", "present").await?;
        mark_test_attendance(&db, math.id, "2024-09-03", "present").await?;

        let records = get_attendance_for_date(&db, TEST_USER, test_date("2024-09-02")).await?;
        assert_eq!(records.len(), 1);
        assert!(get_attendance_for_date(&db, "other_user", test_date("2024-09-02"))
            .await?
            .is_empty());

        Ok(())
    }
}
