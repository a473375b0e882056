//! `hb add`: create a job target card.

use clap::Args;
use huntboard_core::model::{ColumnId, NewTargetDraft, Priority};
use serde::Serialize;
use std::io::Write;

use crate::output::{OutputMode, pretty_kv, render_mode, report};
use crate::session::{Session, commit};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Company name (1-100 characters).
    pub company: String,

    /// Role or position title.
    #[arg(short, long)]
    pub role: Option<String>,

    /// Column to place the card in.
    #[arg(short, long, default_value = "targets-identified")]
    pub column: ColumnId,

    /// Priority: low, medium or high.
    #[arg(short, long, default_value = "medium")]
    pub priority: Priority,

    /// Why this company is worth targeting.
    #[arg(long)]
    pub reason: Option<String>,

    /// Where the lead came from.
    #[arg(long)]
    pub source: Option<String>,

    /// Tag label (repeatable).
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddOutput {
    id: String,
    company: String,
    column_id: ColumnId,
    priority: Priority,
}

pub fn run_add(args: AddArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();

    let draft = NewTargetDraft {
        company: args.company.trim().to_string(),
        role: args.role,
        target_reason: args.reason,
        source: args.source,
        column_id: args.column,
        priority: args.priority,
        tags: args.tags,
    };
    let company = draft.company.clone();

    let id = board
        .add_job_target_with(draft)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;

    let result = AddOutput {
        id,
        company,
        column_id: args.column,
        priority: args.priority,
    };
    render_mode(
        output,
        &result,
        |r, w| writeln!(w, "{}\t{}\t{}", r.id, r.column_id, r.company),
        |r, w| {
            writeln!(w, "✓ Added {}", r.company)?;
            pretty_kv(w, "id", &r.id)?;
            pretty_kv(w, "column", r.column_id.as_str())?;
            pretty_kv(w, "priority", r.priority.as_str())
        },
    )
}
