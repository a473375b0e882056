//! `hb move`: drop a card into another column.

use clap::Args;
use huntboard_core::HuntError;
use huntboard_core::model::ColumnId;
use serde::Serialize;
use std::io::Write;

use crate::output::{OutputMode, render, report};
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Target id (full, without `jt_`, or a unique prefix/suffix).
    pub id: String,

    /// Destination column, e.g. outreach-initiated.
    pub column: ColumnId,
}

#[derive(Debug, Serialize)]
struct MoveOutput {
    id: String,
    from: ColumnId,
    to: ColumnId,
}

pub fn run_move(args: &MoveArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let target = require_target(&board, &args.id, output)?;
    let id = target.id.clone();
    let from = target.column_id;

    if !board.move_job_target(&id, args.column) {
        return Err(report(output, HuntError::TargetNotFound { id }));
    }
    commit(&mut board, output)?;

    let result = MoveOutput {
        id,
        from,
        to: args.column,
    };
    render(output, &result, |r, w| {
        writeln!(w, "Moved {} from {} to {}", r.id, r.from, r.to)
    })
}
