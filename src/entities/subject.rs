//! Subject entity - A course the user attends.
//!
//! Subjects are owned by a single user and referenced by ID from schedule slots and
//! attendance records, so renaming a subject never breaks those references.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subject database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the subject
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Display name as entered, trimmed
    pub name: String,
    /// Trimmed, lowercased name; unique per user through `idx_subjects_user_name_key`
    #[serde(skip)]
    pub name_key: String,
    /// Optional professor or instructor name
    pub professor_name: Option<String>,
    /// Palette color name (see `SubjectColor`)
    pub color: String,
    /// When the subject was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Subject and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One subject appears in many schedule slots
    #[sea_orm(has_many = "super::schedule_slot::Entity")]
    ScheduleSlots,
    /// One subject has many attendance records
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::schedule_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleSlots.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
