//! Schedule slot entity - One subject at one position of one weekday.
//!
//! A user's schedule for a day is the ordered list of slots with that `weekday`,
//! sorted by `position`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Schedule slot database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_slots")]
pub struct Model {
    /// Unique identifier for the slot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Day of week, 0 = Sunday through 6 = Saturday
    pub weekday: i32,
    /// Order within the day, starting at 0
    pub position: i32,
    /// Scheduled subject
    pub subject_id: i64,
}

/// Defines relationships between `ScheduleSlot` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each slot refers to one subject
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
