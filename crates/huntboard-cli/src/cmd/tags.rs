//! `hb tags`: manage the tag catalogue.

use clap::{Args, Subcommand};
use huntboard_core::model::Tag;
use serde::Serialize;
use std::io::Write;

use crate::output::{OutputMode, pretty_section, render, render_mode, render_success, report};
use crate::session::{Session, commit};

#[derive(Args, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: Option<TagsCommand>,
}

#[derive(Subcommand, Debug)]
pub enum TagsCommand {
    #[command(about = "List tags with usage counts (default)")]
    List,

    #[command(about = "Add a tag to the catalogue")]
    Create(TagCreateArgs),

    #[command(about = "Remove a tag from the catalogue and from every card")]
    Delete(TagDeleteArgs),
}

#[derive(Args, Debug)]
pub struct TagCreateArgs {
    /// Tag label (1-30 characters).
    pub label: String,

    /// Color as `#RRGGBB`.
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args, Debug)]
pub struct TagDeleteArgs {
    /// Tag label.
    pub label: String,
}

#[derive(Debug, Serialize)]
struct TagRow {
    label: String,
    color: String,
    count: usize,
}

pub fn run_tags(args: TagsArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    match args.command.unwrap_or(TagsCommand::List) {
        TagsCommand::List => run_list(output, session),
        TagsCommand::Create(create) => run_create(&create, output, session),
        TagsCommand::Delete(delete) => run_delete(&delete, output, session),
    }
}

fn run_list(output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let board = session.board();
    let rows: Vec<TagRow> = board
        .tags()
        .iter()
        .map(|tag| TagRow {
            label: tag.label.clone(),
            color: tag.color.clone(),
            count: board
                .targets()
                .iter()
                .filter(|t| t.tags.contains(&tag.label))
                .count(),
        })
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(w, "{}\t{}\t{}", row.label, row.color, row.count)?;
            }
            Ok(())
        },
        |rows, w| {
            pretty_section(w, &format!("Tags ({})", rows.len()))?;
            if rows.is_empty() {
                return writeln!(w, "No tags yet. Create one with `hb tags create <label>`.");
            }
            for row in rows {
                writeln!(w, "{:<30} {}  {} card(s)", row.label, row.color, row.count)?;
            }
            Ok(())
        },
    )
}

fn run_create(args: &TagCreateArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let tag: Tag = board
        .create_tag(&args.label, args.color.as_deref())
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;
    render(output, &tag, |t, w| {
        writeln!(w, "Created tag {} ({})", t.label, t.color)
    })
}

fn run_delete(args: &TagDeleteArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let mut board = session.board();
    let tag = board
        .delete_tag(&args.label)
        .map_err(|err| report(output, err))?;
    commit(&mut board, output)?;
    render_success(output, &format!("Deleted tag {}", tag.label))
}
