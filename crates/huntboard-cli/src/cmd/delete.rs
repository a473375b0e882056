//! `hb delete`: remove a card permanently.

use clap::Args;
use huntboard_core::HuntError;

use crate::output::{OutputMode, render_success, report};
use crate::session::{Session, commit, require_target};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Target id (full, without `jt_`, or a unique prefix/suffix).
    pub id: String,
}

pub fn run_delete(args: &DeleteArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let target = require_target(&board, &args.id, output)?;
    let id = target.id.clone();
    let company = target.company.clone();

    if !board.delete_job_target(&id) {
        return Err(report(output, HuntError::TargetNotFound { id }));
    }
    commit(&mut board, output)?;
    render_success(output, &format!("Deleted {id} ({company})"))
}
