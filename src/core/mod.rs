//! Core business logic - framework-agnostic attendance, schedule and reporting operations.
//!
//! The bot and the HTTP API are thin layers over these modules.

pub mod attendance;
pub mod engine;
pub mod policy;
pub mod report;
pub mod schedule;
pub mod settings;
pub mod subject;
pub mod validation;
