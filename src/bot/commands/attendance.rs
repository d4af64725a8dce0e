//! Attendance Discord commands - the day sheet, marking and unmarking classes.
//!
//! Dates are given as `YYYY-MM-DD` and default to today in the bot's local time zone.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, user_error_reply},
        core::{
            attendance::{self, AttendanceStatus},
            subject,
        },
        errors::{Error, Result},
    };
    use chrono::NaiveDate;
    use std::fmt::Write;

    /// Status choices offered by `/mark`
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum MarkStatus {
        #[name = "present"]
        Present,
        #[name = "absent"]
        Absent,
        #[name = "off (no class held)"]
        Off,
    }

    impl From<MarkStatus> for AttendanceStatus {
        fn from(value: MarkStatus) -> Self {
            match value {
                MarkStatus::Present => Self::Present,
                MarkStatus::Absent => Self::Absent,
                MarkStatus::Off => Self::Off,
            }
        }
    }

    /// Parses an optional `YYYY-MM-DD` argument, defaulting to today.
    pub(crate) fn parse_date_arg(input: Option<&str>) -> Option<NaiveDate> {
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
            None => Some(chrono::Local::now().date_naive()),
        }
    }

    pub(crate) const fn status_marker(status: AttendanceStatus) -> &'static str {
        match status {
            AttendanceStatus::Present => "✅",
            AttendanceStatus::Absent => "❌",
            AttendanceStatus::Off => "💤",
            AttendanceStatus::Unmarked => "⬜",
        }
    }

    /// Shows the classes scheduled on a day and how each is marked.
    #[poise::command(slash_command, prefix_command)]
    pub async fn today(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Date as YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let Some(day) = parse_date_arg(date.as_deref()) else {
            ctx.say("❌ Invalid date. Use the format YYYY-MM-DD.").await?;
            return Ok(());
        };

        let sheet = attendance::get_day_sheet(db, &user_id, day).await?;
        if sheet.is_empty() {
            ctx.say(format!(
                "📅 No classes scheduled on {}. Use `/set_schedule` to add some.",
                day.format("%A, %Y-%m-%d")
            ))
            .await?;
            return Ok(());
        }

        let mut response = format!("📅 **{}**\n\n", day.format("%A, %Y-%m-%d"));
        for entry in &sheet {
            writeln!(
                &mut response,
                "{} **{}** - {}",
                status_marker(entry.status),
                entry.subject.name,
                entry.status
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Marks a class as present, absent or off.
    #[poise::command(slash_command, prefix_command)]
    pub async fn mark(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject_name"]
        subject_name: String,
        #[description = "Attendance status"] status: MarkStatus,
        #[description = "Date as YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let Some(day) = parse_date_arg(date.as_deref()) else {
            ctx.say("❌ Invalid date. Use the format YYYY-MM-DD.").await?;
            return Ok(());
        };

        let Some(found) = subject::get_subject_by_name(db, &user_id, &subject_name).await? else {
            ctx.say(user_error_reply(Error::SubjectNotFound { name: subject_name })?)
                .await?;
            return Ok(());
        };

        let status = AttendanceStatus::from(status);
        let reply = match attendance::mark_attendance(db, &user_id, found.id, day, status).await
        {
            Ok(_) => format!(
                "{} Marked **{}** as {status} on {day}.",
                status_marker(status),
                found.name
            ),
            Err(e) => user_error_reply(e)?,
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Removes the mark for a class.
    #[poise::command(slash_command, prefix_command)]
    pub async fn unmark(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subject"]
        #[autocomplete = "autocomplete::autocomplete_subject_name"]
        subject_name: String,
        #[description = "Date as YYYY-MM-DD (default: today)"] date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let Some(day) = parse_date_arg(date.as_deref()) else {
            ctx.say("❌ Invalid date. Use the format YYYY-MM-DD.").await?;
            return Ok(());
        };

        let Some(found) = subject::get_subject_by_name(db, &user_id, &subject_name).await? else {
            ctx.say(user_error_reply(Error::SubjectNotFound { name: subject_name })?)
                .await?;
            return Ok(());
        };

        let reply = if attendance::clear_attendance(db, &user_id, found.id, day).await? {
            format!("⬜ Removed the mark for **{}** on {day}.", found.name)
        } else {
            format!("ℹ️ **{}** was not marked on {day}.", found.name)
        };

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
