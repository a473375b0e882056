//! `hb board`: every column with its cards, in column order.

use clap::Args;
use huntboard_core::model::ColumnId;
use serde::Serialize;
use std::io::Write;

use super::CardSummary;
use crate::output::{OutputMode, pretty_rule, render_mode};
use crate::session::Session;

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Include archived cards.
    #[arg(long)]
    pub archived: bool,

    /// Show collapsed columns expanded.
    #[arg(long)]
    pub expand: bool,
}

#[derive(Debug, Serialize)]
struct ColumnView {
    id: ColumnId,
    title: String,
    collapsed: bool,
    count: usize,
    targets: Vec<CardSummary>,
}

#[derive(Debug, Serialize)]
struct BoardOutput {
    columns: Vec<ColumnView>,
}

pub fn run_board(args: &BoardArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let board = session.board();
    let collapsed = session.preferences().collapsed_columns;

    let mut columns: Vec<_> = board.columns().iter().collect();
    columns.sort_by_key(|c| c.order);

    let result = BoardOutput {
        columns: columns
            .into_iter()
            .map(|column| {
                let targets: Vec<CardSummary> = board
                    .get_targets_by_column(column.id)
                    .into_iter()
                    .filter(|t| args.archived || !t.archived)
                    .map(CardSummary::from)
                    .collect();
                ColumnView {
                    id: column.id,
                    title: column.title.clone(),
                    collapsed: !args.expand && collapsed.contains(&column.id),
                    count: targets.len(),
                    targets,
                }
            })
            .collect(),
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for column in &r.columns {
                for card in &column.targets {
                    writeln!(w, "{}\t{}\t{}", column.id, card.id, card.title())?;
                }
            }
            Ok(())
        },
        |r, w| {
            for column in &r.columns {
                writeln!(w, "{} ({})", column.title, column.count)?;
                pretty_rule(w)?;
                if column.collapsed {
                    writeln!(w, "  (collapsed)")?;
                } else if column.targets.is_empty() {
                    writeln!(w, "  (empty)")?;
                } else {
                    for card in &column.targets {
                        writeln!(
                            w,
                            "  {:<24} {:<6} {}",
                            card.id,
                            card.priority.as_str(),
                            card.title()
                        )?;
                    }
                }
                writeln!(w)?;
            }
            Ok(())
        },
    )
}
