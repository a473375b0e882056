//! `hb warm-up`: record relationship-building actions.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use huntboard_core::model::{DEFAULT_IMPACT_SCORE, WarmUpAction, WarmUpActionType};
use serde::Serialize;
use std::io::Write;
use uuid::Uuid;

use crate::output::{OutputMode, render, report};
use crate::resolve::parse_when;
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct WarmUpArgs {
    #[command(subcommand)]
    pub command: WarmUpCommand,
}

#[derive(Subcommand, Debug)]
pub enum WarmUpCommand {
    #[command(about = "Record a warm-up action and raise the warm-up score")]
    Add(WarmUpAddArgs),
}

#[derive(Args, Debug)]
pub struct WarmUpAddArgs {
    /// Target id.
    pub id: String,

    /// Action: follow-linkedin, engage-post, comment, join-community,
    /// attend-event, read-content or share-content.
    #[arg(long = "type")]
    pub kind: WarmUpActionType,

    /// What you did (up to 500 characters).
    pub description: String,

    /// Person the action was aimed at.
    #[arg(long)]
    pub person: Option<String>,

    /// Score contribution (0-100).
    #[arg(long, default_value_t = DEFAULT_IMPACT_SCORE)]
    pub impact: u8,

    #[arg(long, value_parser = parse_when, default_value = "now")]
    pub on: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct WarmUpOutput {
    target_id: String,
    id: Uuid,
    warm_up_score: u8,
}

pub fn run_warm_up(args: WarmUpArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let WarmUpCommand::Add(args) = args.command;

    let mut board = session.board();
    let target_id = require_target(&board, &args.id, output)?.id.clone();

    let mut action = WarmUpAction::new(args.kind, args.on, args.description.trim().to_string());
    action.target_person = args.person;
    action.impact_score = args.impact;

    let id = board
        .add_warm_up_action(&target_id, action)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;

    let result = WarmUpOutput {
        warm_up_score: board.find(&target_id).map_or(0, |t| t.warm_up_score),
        target_id,
        id,
    };
    render(output, &result, |r, w| {
        writeln!(w, "Warm-up score for {} is now {}", r.target_id, r.warm_up_score)
    })
}
