//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance;
pub mod schedule_slot;
pub mod subject;
pub mod user_settings;

// Re-export specific types to avoid conflicts
pub use attendance::{
    Column as AttendanceColumn, Entity as Attendance, Model as AttendanceModel,
};
pub use schedule_slot::{
    Column as ScheduleSlotColumn, Entity as ScheduleSlot, Model as ScheduleSlotModel,
};
pub use subject::{Column as SubjectColumn, Entity as Subject, Model as SubjectModel};
pub use user_settings::{
    Column as UserSettingsColumn, Entity as UserSettings, Model as UserSettingsModel,
};
