//! Subject and schedule seeding from config.toml
//!
//! The seed file describes a starting set of subjects and a weekly schedule for one
//! user. It is applied on start-up only while that user has no subjects, so edits made
//! afterwards through the bot or the API are never overwritten.

use crate::{
    core::{schedule::set_day_schedule, subject, validation::SubjectInput},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// User the seed data is created for
    pub seed_user: String,
    /// Subjects to create
    #[serde(default)]
    pub subjects: Vec<SubjectSeed>,
    /// Days to schedule, by subject name
    #[serde(default)]
    pub schedule: Vec<ScheduleSeed>,
}

/// Configuration for a single subject
#[derive(Debug, Deserialize, Clone)]
pub struct SubjectSeed {
    /// Subject name
    pub name: String,
    /// Professor teaching the subject
    pub professor_name: Option<String>,
    /// Palette color name
    pub color: Option<String>,
}

/// Subjects scheduled on one weekday
#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleSeed {
    /// Day index, 0 = Sunday
    pub day: i64,
    /// Subject names in class order
    pub subjects: Vec<String>,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read, the TOML syntax is invalid or
/// required fields are missing.
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Creates the seed subjects and schedule unless the seed user already has subjects.
///
/// Returns the number of subjects created. Every entry goes through the normal
/// validation rules, so a bad seed file fails the same way bad user input does.
pub async fn seed_user_data(db: &DatabaseConnection, config: &SeedConfig) -> Result<usize> {
    let user_id = config.seed_user.as_str();

    if !subject::get_subjects_for_user(db, user_id).await?.is_empty() {
        info!(user_id, "Seed user already has subjects, skipping seed");
        return Ok(0);
    }

    for seed in &config.subjects {
        let input = SubjectInput {
            name: seed.name.clone(),
            professor_name: seed.professor_name.clone(),
            color: seed.color.clone(),
        };
        subject::create_subject(db, user_id, &input).await?;
    }

    for day in &config.schedule {
        set_day_schedule(db, user_id, day.day, &day.subjects).await?;
    }

    info!(
        user_id,
        subjects = config.subjects.len(),
        days = config.schedule.len(),
        "Seeded subjects and schedule"
    );
    Ok(config.subjects.len())
}
