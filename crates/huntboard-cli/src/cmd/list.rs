//! `hb list`: filtered, sorted card listing.

use clap::Args;
use huntboard_core::filter::{CardFilters, active_filter_count, filter_cards, sort_cards};
use huntboard_core::model::{ColumnId, Priority, SortBy, SortDirection};
use serde::Serialize;
use std::io::Write;

use super::{CardSummary, fmt_date};
use crate::output::{OutputMode, pretty_section, render_mode};
use crate::session::Session;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive substring of company or role.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only these priorities (repeatable).
    #[arg(short, long = "priority")]
    pub priorities: Vec<Priority>,

    /// Cards carrying any of these tags (repeatable).
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Only these columns (repeatable).
    #[arg(short, long = "column")]
    pub columns: Vec<ColumnId>,

    /// Only cards with a scheduled follow-up.
    #[arg(long)]
    pub has_follow_up: bool,

    /// Include archived cards.
    #[arg(long)]
    pub archived: bool,

    /// Sort key: created, updated, priority or company.
    #[arg(long)]
    pub sort: Option<SortBy>,

    /// Sort ascending.
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Start from the saved search, filters and sort order.
    #[arg(long)]
    pub use_prefs: bool,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    active_filters: usize,
    total: usize,
    targets: Vec<CardSummary>,
}

impl ListArgs {
    /// Combine saved preferences (when requested) with the flags given.
    /// Flags replace the saved value of the dimension they set.
    fn resolve(self, session: &Session) -> (CardFilters, SortBy, SortDirection, bool) {
        let (mut filters, mut sort_by, mut direction) = if self.use_prefs {
            let prefs = session.preferences();
            (
                CardFilters::from_preferences(&prefs),
                prefs.sort_by,
                prefs.sort_direction,
            )
        } else {
            (CardFilters::default(), SortBy::default(), SortDirection::default())
        };

        if let Some(search) = self.search {
            filters.search_query = search;
        }
        if !self.priorities.is_empty() {
            filters.priorities = self.priorities;
        }
        if !self.tags.is_empty() {
            filters.tags = self.tags;
        }
        if !self.columns.is_empty() {
            filters.columns = self.columns;
        }
        if self.has_follow_up {
            filters.has_follow_up = true;
        }
        if let Some(sort) = self.sort {
            sort_by = sort;
        }
        if self.asc {
            direction = SortDirection::Asc;
        } else if self.desc {
            direction = SortDirection::Desc;
        }
        (filters, sort_by, direction, self.archived)
    }
}

pub fn run_list(args: ListArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let (filters, sort_by, direction, include_archived) = args.resolve(session);
    let board = session.board();

    let mut cards = filter_cards(board.targets(), &filters);
    if !include_archived {
        cards.retain(|t| !t.archived);
    }
    sort_cards(&mut cards, sort_by, direction);

    let result = ListOutput {
        active_filters: active_filter_count(&filters),
        total: cards.len(),
        targets: cards.into_iter().map(CardSummary::from).collect(),
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for card in &r.targets {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}",
                    card.id,
                    card.column_id,
                    card.priority,
                    card.title()
                )?;
            }
            Ok(())
        },
        |r, w| {
            let heading = if r.active_filters == 0 {
                format!("Job targets ({})", r.total)
            } else {
                format!(
                    "Job targets ({}, {} filter{} active)",
                    r.total,
                    r.active_filters,
                    if r.active_filters == 1 { "" } else { "s" }
                )
            };
            pretty_section(w, &heading)?;
            if r.targets.is_empty() {
                return writeln!(w, "No job targets match.");
            }
            for card in &r.targets {
                let follow_up = card
                    .next_follow_up_date
                    .map_or_else(String::new, |d| format!("  follow up {}", fmt_date(d)));
                let archived = if card.archived { "  [archived]" } else { "" };
                writeln!(
                    w,
                    "{:<24} {:<6} {:<22} {}{follow_up}{archived}",
                    card.id,
                    card.priority.as_str(),
                    card.column_id.as_str(),
                    card.title()
                )?;
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use huntboard_core::model::UserPreferences;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::open(Some(dir.path())).unwrap()
    }

    #[test]
    fn flags_without_prefs_start_from_defaults() {
        let dir = TempDir::new().unwrap();
        let args = ListArgs {
            search: Some("acme".into()),
            asc: true,
            ..ListArgs::default()
        };
        let (filters, sort_by, direction, archived) = args.resolve(&session(&dir));
        assert_eq!(filters.search_query, "acme");
        assert_eq!(sort_by, SortBy::Updated);
        assert_eq!(direction, SortDirection::Asc);
        assert!(!archived);
    }

    #[test]
    fn flags_override_saved_dimensions() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        let mut prefs = UserPreferences::default();
        prefs.search_query = "saved".into();
        prefs.filters.priorities = vec![Priority::High];
        prefs.sort_by = SortBy::Company;
        s.save_preferences(&prefs).unwrap();

        let args = ListArgs {
            priorities: vec![Priority::Low],
            use_prefs: true,
            ..ListArgs::default()
        };
        let (filters, sort_by, _, _) = args.resolve(&s);
        assert_eq!(filters.search_query, "saved");
        assert_eq!(filters.priorities, vec![Priority::Low]);
        assert_eq!(sort_by, SortBy::Company);
    }
}
