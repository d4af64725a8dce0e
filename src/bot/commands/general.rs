//! General Discord commands - ping and help.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**AttendanceBuddy Help**\n\
        Track your class attendance and see how many classes you can skip.\n\n\
        **Subjects**\n\
        • `/subjects` - Lists your subjects.\n\
        • `/add_subject <name> [professor] [color]` - Adds a subject.\n\
        • `/edit_subject <subject> [name] [professor] [color]` - Renames or recolors a subject.\n\
        • `/delete_subject <subject>` - Deletes a subject with its schedule and records.\n\n\
        **Schedule**\n\
        • `/schedule` - Shows your weekly schedule.\n\
        • `/set_schedule <day> <subjects>` - Sets a day's classes (comma separated, empty to clear).\n\n\
        **Attendance**\n\
        • `/today [date]` - Shows the classes scheduled for a day and their status.\n\
        • `/mark <subject> <status> [date]` - Marks a class present, absent or off.\n\
        • `/unmark <subject> [date]` - Removes a mark.\n\n\
        **Statistics**\n\
        • `/stats` - Shows your attendance per subject.\n\
        • `/at_risk` - Lists subjects below your minimum.\n\
        • `/threshold [value]` - Shows or sets your minimum attendance percentage.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
