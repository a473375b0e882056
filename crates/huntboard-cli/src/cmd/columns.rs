//! `hb columns`: the fixed pipeline stages.

use clap::Args;
use huntboard_core::model::Column;
use std::io::Write;

use crate::output::{OutputMode, pretty_section, render_mode};
use crate::session::Session;

#[derive(Args, Debug)]
pub struct ColumnsArgs {}

pub fn run_columns(
    _args: &ColumnsArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    let board = session.board();
    let mut columns: Vec<Column> = board.columns().to_vec();
    columns.sort_by_key(|c| c.order);

    render_mode(
        output,
        &columns,
        |columns, w| {
            for c in columns {
                writeln!(w, "{}\t{}\t{}", c.order, c.id, c.title)?;
            }
            Ok(())
        },
        |columns, w| {
            pretty_section(w, "Columns")?;
            for c in columns {
                writeln!(w, "{}. {:<22} {}", c.order + 1, c.id.as_str(), c.title)?;
                writeln!(w, "   {}", c.description)?;
            }
            Ok(())
        },
    )
}
