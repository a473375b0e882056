//! `hb follow-up`: schedule and complete follow-ups on a card.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use huntboard_core::HuntError;
use huntboard_core::model::FollowUp;
use serde::Serialize;
use std::io::Write;
use uuid::Uuid;

use super::fmt_date;
use crate::output::{OutputMode, render, render_success, report};
use crate::resolve::{parse_when, resolve_record_id};
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct FollowUpArgs {
    #[command(subcommand)]
    pub command: FollowUpCommand,
}

#[derive(Subcommand, Debug)]
pub enum FollowUpCommand {
    #[command(about = "Schedule a follow-up")]
    Add(FollowUpAddArgs),

    #[command(about = "Mark a follow-up as done")]
    Done(FollowUpDoneArgs),
}

#[derive(Args, Debug)]
pub struct FollowUpAddArgs {
    /// Target id.
    pub id: String,

    /// What to do (1-500 characters).
    pub action: String,

    /// When: YYYY-MM-DD, RFC 3339, today, tomorrow or +N[h|d|w].
    #[arg(long, value_parser = parse_when, default_value = "+3d")]
    pub on: DateTime<Utc>,
}

#[derive(Args, Debug)]
pub struct FollowUpDoneArgs {
    /// Target id.
    pub id: String,

    /// Follow-up id, or a unique prefix of it.
    pub follow_up: String,

    /// Notes on how it went.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct FollowUpAddOutput {
    target_id: String,
    id: Uuid,
    scheduled_date: DateTime<Utc>,
    next_follow_up_date: Option<DateTime<Utc>>,
}

pub fn run_follow_up(
    args: FollowUpArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    match args.command {
        FollowUpCommand::Add(add) => run_add(add, output, session),
        FollowUpCommand::Done(done) => run_done(done, output, session),
    }
}

fn run_add(args: FollowUpAddArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let target_id = require_target(&board, &args.id, output)?.id.clone();

    let follow_up = FollowUp::new(args.on, args.action.trim().to_string());
    let id = board
        .add_follow_up(&target_id, follow_up)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;

    let result = FollowUpAddOutput {
        next_follow_up_date: board.find(&target_id).and_then(|t| t.next_follow_up_date),
        target_id,
        id,
        scheduled_date: args.on,
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "Scheduled follow-up {} on {} for {}",
            r.id,
            fmt_date(r.scheduled_date),
            r.target_id
        )
    })
}

fn run_done(args: FollowUpDoneArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let target = require_target(&board, &args.id, output)?;
    let target_id = target.id.clone();

    let Some(follow_up_id) =
        resolve_record_id(target.follow_ups.iter().map(|f| f.id), &args.follow_up)
    else {
        return Err(report(
            output,
            HuntError::FollowUpNotFound {
                target_id,
                id: args.follow_up,
            },
        ));
    };

    board
        .complete_follow_up(&target_id, follow_up_id, args.notes)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;
    render_success(output, &format!("Completed follow-up {follow_up_id}"))
}
