//! Autocomplete handlers for Discord slash command parameters.
//!
//! Subject names come from the invoking user's own subjects. Weekdays, colors and
//! threshold presets come from fixed lists.

use crate::{
    bot::BotData,
    core::{
        policy::threshold_presets,
        subject,
        validation::{SubjectColor, WEEKDAY_NAMES},
    },
    errors::Error,
};
use poise::serenity_prelude as serenity;

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

fn filter_matching<'a, I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let partial_lower = partial.trim().to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .map(ToString::to_string)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Provides autocomplete suggestions for the caller's subject names.
///
/// Looks up the subjects owned by the invoking user and keeps up to 25 whose
/// name contains the typed text. A failed lookup yields no suggestions.
///
/// # Arguments
/// * `ctx` - The poise context containing the database connection
/// * `partial` - The partial string the user has typed so far
///
/// # Returns
/// Subject names matching the partial input, in alphabetical order
pub async fn autocomplete_subject_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let user_id = ctx.author().id.to_string();

    let Ok(subjects) = subject::get_subjects_for_user(db, &user_id).await else {
        return Vec::new();
    };

    // Already sorted by name
    filter_matching(subjects.iter().map(|s| s.name.as_str()), partial)
}

/// Provides autocomplete suggestions for weekday names.
///
/// # Arguments
/// * `_ctx` - The poise context (unused)
/// * `partial` - The partial string the user has typed so far
///
/// # Returns
/// Day names from Sunday to Saturday that match the partial input
pub async fn autocomplete_weekday(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_matching(WEEKDAY_NAMES, partial)
}

/// Provides autocomplete suggestions for palette colors.
pub async fn autocomplete_color(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_matching(SubjectColor::ALL.iter().map(|c| c.as_str()), partial)
}

/// Provides the preset thresholds (50, 55, ..., 100) matching the typed digits.
///
/// Choices carry numeric values since the threshold parameter is a number.
pub async fn autocomplete_threshold(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let typed = partial.trim();
    threshold_presets()
        .filter(|preset| preset.to_string().starts_with(typed))
        .map(|preset| serenity::AutocompleteChoice::new(format!("{preset}%"), preset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matching_ignores_case() {
        let matches = filter_matching(["Monday", "Tuesday", "Sunday"], "DAY");
        assert_eq!(matches.len(), 3);
        let matches = filter_matching(["Monday", "Tuesday", "Sunday"], "su");
        assert_eq!(matches, vec!["Tuesday", "Sunday"]);
    }

    #[test]
    fn test_filter_matching_caps_suggestions() {
        let names: Vec<String> = (0..40).map(|i| format!("Subject {i}")).collect();
        let matches = filter_matching(names.iter().map(String::as_str), "");
        assert_eq!(matches.len(), MAX_SUGGESTIONS);
    }
}
