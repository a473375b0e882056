//! `hb archive`: hide a card from default views, or bring it back.

use clap::Args;

use crate::output::{OutputMode, render_success, report};
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Target id (full, without `jt_`, or a unique prefix/suffix).
    pub id: String,

    /// Unarchive instead.
    #[arg(long)]
    pub undo: bool,
}

pub fn run_archive(
    args: &ArchiveArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    let mut board = session.board();
    let id = require_target(&board, &args.id, output)?.id.clone();

    board
        .set_archived(&id, !args.undo)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;

    let verb = if args.undo { "Unarchived" } else { "Archived" };
    render_success(output, &format!("{verb} {id}"))
}
