//! Attendance entity - The status of one subject on one date.
//!
//! At most one row exists per `(user_id, subject_id, date)`, enforced by the
//! `idx_attendance_user_subject_date` unique index. A missing row means the
//! day is unmarked; `status` holds `"present"`, `"absent"` or `"off"`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Subject this record belongs to
    pub subject_id: i64,
    /// Calendar date of the class
    pub date: Date,
    /// `"present"`, `"absent"` or `"off"`
    pub status: String,
    /// When the status was last written
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Attendance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one subject
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
