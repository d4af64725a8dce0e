//! Schedule Discord commands - showing the week and setting one day.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, user_error_reply},
        core::{
            schedule::{get_week_schedule, set_day_schedule},
            validation::{ValidationError, parse_weekday, weekday_name},
        },
        entities::subject,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Splits a comma separated list, keeping blank entries so validation can report them.
    pub(crate) fn split_subject_list(input: &str) -> Vec<String> {
        if input.trim().is_empty() {
            return Vec::new();
        }
        input.split(',').map(|s| s.trim().to_string()).collect()
    }

    /// Reply for a finished `/set_schedule`, naming the day the way `/schedule` does.
    pub(crate) fn schedule_reply(
        day_index: u8,
        result: Result<Vec<subject::Model>>,
    ) -> Result<String> {
        let day_name = weekday_name(day_index).unwrap_or_default();
        Ok(match result {
            Ok(scheduled) if scheduled.is_empty() => {
                format!("✅ Cleared the schedule for {day_name}.")
            }
            Ok(scheduled) => {
                let listed: Vec<&str> = scheduled.iter().map(|s| s.name.as_str()).collect();
                format!("✅ **{day_name}:** {}", listed.join(", "))
            }
            Err(e) => user_error_reply(e)?,
        })
    }

    /// Shows your weekly class schedule.
    #[poise::command(slash_command, prefix_command)]
    pub async fn schedule(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let week = get_week_schedule(db, &user_id).await?;

        let mut response = String::from("🗓️ **Weekly Schedule**\n\n");
        for day in &week {
            if day.subjects.is_empty() {
                writeln!(&mut response, "**{}:** _no classes_", day.day_name)?;
            } else {
                let names: Vec<&str> = day.subjects.iter().map(|s| s.name.as_str()).collect();
                writeln!(&mut response, "**{}:** {}", day.day_name, names.join(", "))?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Sets the classes for one day of the week, replacing what was there.
    #[poise::command(slash_command, prefix_command)]
    pub async fn set_schedule(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Day of the week"]
        #[autocomplete = "autocomplete::autocomplete_weekday"]
        day: String,
        #[description = "Subjects in class order, comma separated (leave empty to clear)"]
        subjects: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let names = split_subject_list(subjects.as_deref().unwrap_or_default());
        let reply = match parse_weekday(&day) {
            Some(day_index) => {
                let result = set_day_schedule(db, &user_id, i64::from(day_index), &names).await;
                schedule_reply(day_index, result)?
            }
            None => user_error_reply(
                ValidationError::InvalidDay {
                    day: day.trim().to_string(),
                }
                .into(),
            )?,
        };

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
