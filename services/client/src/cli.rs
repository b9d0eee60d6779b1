//! services/client/src/cli.rs
//!
//! Command-line surface of the client. Each subcommand opens one screen, the
//! same two routes the web client offers, and drives it to a final state.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use tracing::info;
use wastewise_core::{
    domain::{InsightsState, LoadStatus, SubmissionState},
    ports::WastewiseApi,
    screens::{InsightsScreen, SaveEntryScreen},
};

use crate::error::ClientError;
use crate::view;

#[derive(Parser, Debug)]
#[command(
    name = "wastewise",
    version,
    about = "Log household waste and read your monthly AI insights"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a free-text waste-log entry
    #[command(name = "save-entry", alias = "submit")]
    SaveEntry {
        /// Entry text; prompted for when omitted
        text: Option<String>,
    },
    /// Show the insights generated for this month
    #[command(name = "monthly-insights", alias = "insights")]
    MonthlyInsights {
        /// Retry this many times after a failed load
        #[arg(long, default_value_t = 0)]
        retries: u32,
        /// Ask before each retry instead of using --retries
        #[arg(short, long)]
        interactive: bool,
    },
}

impl Cli {
    /// The chosen subcommand; the save-entry screen is the landing screen.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::SaveEntry { text: None })
    }
}

/// Runs one subcommand to completion and reports whether it ended in success.
pub async fn run(api: Arc<dyn WastewiseApi>, command: Command) -> Result<LoadStatus, ClientError> {
    match command {
        Command::SaveEntry { text } => Ok(run_save_entry(api, text).await?.status),
        Command::MonthlyInsights {
            retries,
            interactive,
        } => Ok(run_monthly_insights(api, retries, interactive).await?.status()),
    }
}

pub async fn run_save_entry(
    api: Arc<dyn WastewiseApi>,
    text: Option<String>,
) -> Result<SubmissionState, ClientError> {
    let text = match text {
        Some(text) => text,
        None => Input::<String>::new()
            .with_prompt("What did you throw away?")
            .allow_empty(true)
            .interact_text()?,
    };

    let mut screen = SaveEntryScreen::new(api);
    screen.set_input(text);
    screen.submit().await;
    println!("{}", view::render_submission(screen.state()));
    Ok(screen.state().clone())
}

pub async fn run_monthly_insights(
    api: Arc<dyn WastewiseApi>,
    retries: u32,
    interactive: bool,
) -> Result<InsightsState, ClientError> {
    let mut screen = InsightsScreen::new(api);
    println!("{}", view::render_insights(screen.state()));

    let mut status = screen.open().await;
    let mut attempts = 0;
    loop {
        println!("{}", view::render_insights(screen.state()));
        if status != LoadStatus::Failed {
            break;
        }
        let again = if interactive {
            Confirm::new()
                .with_prompt("Retry?")
                .default(true)
                .interact()?
        } else {
            attempts < retries
        };
        if !again {
            break;
        }
        attempts += 1;
        info!(attempt = attempts, "Retrying after failed load");
        status = screen.retry().await;
    }
    Ok(screen.state().clone())
}
