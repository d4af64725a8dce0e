//! Settings Discord command - viewing and changing the minimum attendance percentage.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, user_error_reply},
        core::settings,
        errors::{Error, Result},
    };

    /// Shows or sets your minimum attendance percentage (values outside 0-100 are clamped).
    #[poise::command(slash_command, prefix_command)]
    pub async fn threshold(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "New minimum percentage"]
        #[autocomplete = "autocomplete::autocomplete_threshold"]
        value: Option<f64>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;
        let user_id = ctx.author().id.to_string();

        let Some(value) = value else {
            let current = settings::get_settings(db, &user_id, data.default_min_percentage).await?;
            ctx.say(format!(
                "🎯 Your minimum attendance is **{}%**.",
                current.min_percentage
            ))
            .await?;
            return Ok(());
        };

        let reply =
            match settings::set_min_percentage(db, &user_id, value, data.default_min_percentage)
                .await
            {
                Ok(stored) => format!("✅ Minimum attendance set to **{stored}%**."),
                Err(e) => user_error_reply(e)?,
            };

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
