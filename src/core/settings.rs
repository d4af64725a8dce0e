//! User settings business logic.
//!
//! Users without a stored row get the configured default threshold and the
//! `system` theme. Thresholds pass through [`validate_threshold`] before they are stored.

use crate::{
    core::policy::{clamp_threshold, validate_threshold},
    entities::{UserSettings, user_settings},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the client
    #[default]
    System,
}

impl Theme {
    /// Lowercase name, as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parses a theme name, ignoring case. Anything unrecognized becomes `System`.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective settings of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Minimum attendance percentage
    pub min_percentage: u8,
    /// Theme preference
    pub theme: Theme,
}

/// Partial settings change; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    /// New threshold, clamped into `[0, 100]`
    pub min_percentage: Option<f64>,
    /// New theme name
    pub theme: Option<String>,
}

impl Settings {
    fn from_model(model: &user_settings::Model) -> Self {
        Self {
            min_percentage: clamp_threshold(i64::from(model.min_percentage)),
            theme: Theme::from_input(&model.theme),
        }
    }
}

/// Reads a user's settings, falling back to `default_min` and the system theme.
pub async fn get_settings(
    db: &DatabaseConnection,
    user_id: &str,
    default_min: u8,
) -> Result<Settings> {
    let stored = UserSettings::find_by_id(user_id.to_string()).one(db).await?;
    Ok(stored.as_ref().map_or(
        Settings {
            min_percentage: default_min,
            theme: Theme::System,
        },
        Settings::from_model,
    ))
}

/// Applies a partial update and returns the resulting settings.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - User whose settings change
/// * `update` - Fields to change; `None` keeps the stored value
/// * `default_min` - Threshold used when the user has no row yet
///
/// # Returns
/// The settings as stored after the update
///
/// # Errors
/// Returns [`crate::errors::Error::Validation`] when the threshold is NaN or infinite.
pub async fn update_settings(
    db: &DatabaseConnection,
    user_id: &str,
    update: &SettingsUpdate,
    default_min: u8,
) -> Result<Settings> {
    let min_percentage = update.min_percentage.map(validate_threshold).transpose()?;
    let theme = update.theme.as_deref().map(Theme::from_input);

    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let existing = UserSettings::find_by_id(user_id.to_string()).one(&txn).await?;
    let saved = if let Some(model) = existing {
        let current = Settings::from_model(&model);
        let mut active_model: user_settings::ActiveModel = model.into();
        active_model.min_percentage =
            Set(i32::from(min_percentage.unwrap_or(current.min_percentage)));
        active_model.theme = Set(theme.unwrap_or(current.theme).as_str().to_string());
        active_model.updated_at = Set(now);
        active_model.update(&txn).await?
    } else {
        user_settings::ActiveModel {
            user_id: Set(user_id.to_string()),
            min_percentage: Set(i32::from(min_percentage.unwrap_or(default_min))),
            theme: Set(theme.unwrap_or_default().as_str().to_string()),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?
    };

    txn.commit().await?;

    let settings = Settings::from_model(&saved);
    info!(
        user_id,
        min_percentage = settings.min_percentage,
        theme = %settings.theme,
        "Updated settings"
    );
    Ok(settings)
}

/// Stores a new threshold, clamped into `[0, 100]`, and returns the stored value.
pub async fn set_min_percentage(
    db: &DatabaseConnection,
    user_id: &str,
    value: f64,
    default_min: u8,
) -> Result<u8> {
    let update = SettingsUpdate {
        min_percentage: Some(value),
        theme: None,
    };
    Ok(update_settings(db, user_id, &update, default_min)
        .await?
        .min_percentage)
}

/// Stores a new theme preference.
pub async fn set_theme(
    db: &DatabaseConnection,
    user_id: &str,
    theme: Theme,
    default_min: u8,
) -> Result<Settings> {
    let update = SettingsUpdate {
        min_percentage: None,
        theme: Some(theme.as_str().to_string()),
    };
    update_settings(db, user_id, &update, default_min).await
}
