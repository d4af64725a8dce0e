//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the AttendanceBuddy application,
//! including all slash commands, autocomplete handlers, and bot context management.
//! Every command acts on the invoking Discord user's own subjects and records.

/// Discord command implementations (subjects, schedule, attendance, stats, settings)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Threshold for users who never ran `/threshold`
    pub default_min_percentage: u8,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection, default_min_percentage: u8) -> Self {
        Self {
            database,
            default_min_percentage,
        }
    }
}

/// Turns an error caused by the user's input into a reply, passing other errors through.
///
/// # Errors
/// Returns `error` unchanged when it is not the user's fault (database, I/O, ...).
pub fn user_error_reply(error: Error) -> Result<String> {
    match error {
        Error::Validation(_) => {
            let lines: Vec<String> = error.messages().iter().map(|m| format!("• {m}")).collect();
            Ok(format!("❌ Please fix the following:\n{}", lines.join("\n")))
        }
        Error::SubjectNotFound { name } => Ok(format!(
            "❌ Subject '{name}' not found. Use `/subjects` to see your subjects."
        )),
        Error::SubjectAlreadyExists { name } => Ok(format!(
            "❌ You already have a subject named '{name}'."
        )),
        other => Err(other),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// All slash commands the bot registers
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::subjects(),
        commands::add_subject(),
        commands::edit_subject(),
        commands::delete_subject(),
        commands::schedule(),
        commands::set_schedule(),
        commands::today(),
        commands::mark(),
        commands::unmark(),
        commands::stats(),
        commands::at_risk(),
        commands::threshold(),
    ]
}

/// Connects to Discord and runs the bot until the gateway connection ends.
///
/// # Errors
/// Returns [`Error::Framework`] when the client cannot be built or the connection fails.
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
