//! Subject Discord commands - listing, adding, editing and deleting subjects.
//!
//! Subjects are always the invoking user's own. Input problems are answered with a
//! message instead of an error so the user can retry.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, user_error_reply},
        core::{
            subject::{self, SubjectUpdate},
            validation::SubjectInput,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Lists all of your subjects.
    #[poise::command(slash_command, prefix_command)]
    pub async fn subjects(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let all_subjects = subject::get_subjects_for_user(db, &user_id).await?;

        if all_subjects.is_empty() {
            ctx.say("📚 No subjects yet. Add one with `/add_subject` to get started!")
                .await?;
            return Ok(());
        }

        let mut response = String::from("📚 **Your Subjects**\n\n");
        for s in &all_subjects {
            write!(&mut response, "• **{}** ({})", s.name, s.color)?;
            if let Some(professor) = &s.professor_name {
                write!(&mut response, " - {professor}")?;
            }
            writeln!(&mut response)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Adds a new subject.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_subject(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject name (2-100 characters)"] name: String,
        #[description = "Professor name"] professor: Option<String>,
        #[description = "Display color (default: blue)"]
        #[autocomplete = "autocomplete::autocomplete_color"]
        color: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let input = SubjectInput {
            name,
            professor_name: professor,
            color,
        };

        let reply = match subject::create_subject(db, &user_id, &input).await {
            Ok(created) => format!("✅ Added **{}** ({}).", created.name, created.color),
            Err(e) => user_error_reply(e)?,
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Renames a subject or changes its professor or color.
    #[poise::command(slash_command, prefix_command)]
    pub async fn edit_subject(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject to edit"]
        #[autocomplete = "autocomplete::autocomplete_subject_name"]
        subject_name: String,
        #[description = "New name"] name: Option<String>,
        #[description = "New professor name (blank to clear)"] professor: Option<String>,
        #[description = "New color"]
        #[autocomplete = "autocomplete::autocomplete_color"]
        color: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let update = SubjectUpdate {
            name,
            professor_name: professor,
            color,
        };
        if update.is_empty() {
            ctx.say("ℹ️ Nothing to change. Pass a new name, professor or color.")
                .await?;
            return Ok(());
        }

        let Some(existing) = subject::get_subject_by_name(db, &user_id, &subject_name).await?
        else {
            ctx.say(user_error_reply(Error::SubjectNotFound { name: subject_name })?)
                .await?;
            return Ok(());
        };

        let reply = match subject::update_subject(db, &user_id, existing.id, &update).await {
            Ok(updated) => format!("✅ Updated **{}**.", updated.name),
            Err(e) => user_error_reply(e)?,
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Deletes a subject along with its schedule entries and attendance records.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_subject(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject to delete"]
        #[autocomplete = "autocomplete::autocomplete_subject_name"]
        subject_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let Some(existing) = subject::get_subject_by_name(db, &user_id, &subject_name).await?
        else {
            ctx.say(user_error_reply(Error::SubjectNotFound { name: subject_name })?)
                .await?;
            return Ok(());
        };

        subject::delete_subject(db, &user_id, existing.id).await?;

        ctx.say(format!(
            "🗑️ Deleted **{}** with its schedule entries and attendance records.",
            existing.name
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
