//! User settings entity - Per-user preferences.
//!
//! Holds the minimum attendance threshold that drives every risk computation and the
//! display theme preference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User settings database model, keyed by user
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_settings")]
pub struct Model {
    /// Owning user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Minimum attendance percentage, 0 to 100
    pub min_percentage: i32,
    /// `"light"`, `"dark"` or `"system"`
    pub theme: String,
    /// When the settings were last modified
    pub updated_at: DateTimeUtc,
}

/// `UserSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
