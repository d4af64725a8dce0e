//! Statistics Discord commands - the per-subject report and the at-risk list.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::report::{self, format_requirement, format_subject_line},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Shows your attendance per subject against your minimum percentage.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stats(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let user_report =
            report::generate_user_report(&data.database, &user_id, data.default_min_percentage)
                .await?;

        if user_report.subjects.is_empty() {
            ctx.say("📊 No subjects yet. Add one with `/add_subject` to get started!")
                .await?;
            return Ok(());
        }

        let mut description = String::new();
        for line in &user_report.subjects {
            writeln!(&mut description, "{}", format_subject_line(line))?;
        }

        let overall = &user_report.overall;
        let embed = serenity::CreateEmbed::default()
            .title("📊 Attendance Report")
            .description(description)
            .field(
                "Overall",
                format!(
                    "{} ({}/{} classes)",
                    report::format_progress_bar(overall.percentage, Some(15)),
                    overall.present_days,
                    overall.total_days
                ),
                false,
            )
            .color(if user_report.at_risk.is_empty() {
                0x002E_CC71 // Green
            } else {
                0x00E7_4C3C // Red
            })
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Minimum: {}% | {} subject{} at risk",
                user_report.min_percentage,
                user_report.at_risk.len(),
                if user_report.at_risk.len() == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists the subjects below your minimum percentage and what it takes to recover.
    #[poise::command(slash_command, prefix_command)]
    pub async fn at_risk(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let user_report =
            report::generate_user_report(&data.database, &user_id, data.default_min_percentage)
                .await?;

        if user_report.at_risk.is_empty() {
            ctx.say(format!(
                "🎉 Every subject is at or above your {}% minimum.",
                user_report.min_percentage
            ))
            .await?;
            return Ok(());
        }

        let mut response = format!(
            "⚠️ **Subjects below {}%**\n\n",
            user_report.min_percentage
        );
        for line in user_report.at_risk_subjects() {
            writeln!(
                &mut response,
                "• **{}** at {}% - {}",
                line.subject.name,
                line.classification.percentage,
                format_requirement(&line.requirement)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
