//! `hb prefs`: saved search, filters, sort order and collapsed columns.

use clap::{Args, Subcommand};
use huntboard_core::model::{
    ColumnId, Priority, SavedFilters, SortBy, SortDirection, UserPreferences,
};
use std::io::Write;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode, render_success, report};
use crate::session::Session;

#[derive(Args, Debug)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: Option<PrefsCommand>,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    #[command(about = "Show saved preferences (default)")]
    Show,

    #[command(about = "Change saved preferences")]
    Set(PrefsSetArgs),

    #[command(about = "Restore default preferences")]
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct PrefsSetArgs {
    /// Saved search query (up to 200 characters). Pass "" to clear.
    #[arg(long)]
    pub search: Option<String>,

    /// Replace the saved priority filter (repeatable).
    #[arg(long = "priority")]
    pub priorities: Vec<Priority>,

    /// Replace the saved tag filter (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Replace the saved column filter (repeatable).
    #[arg(long = "column")]
    pub columns: Vec<ColumnId>,

    /// Only show cards with a scheduled follow-up.
    #[arg(long)]
    pub has_follow_up: Option<bool>,

    /// Clear every saved filter before applying the flags above.
    #[arg(long)]
    pub clear_filters: bool,

    #[arg(long)]
    pub sort: Option<SortBy>,

    #[arg(long)]
    pub direction: Option<SortDirection>,

    /// Collapse a column on the board view (repeatable).
    #[arg(long = "collapse")]
    pub collapse: Vec<ColumnId>,

    /// Expand a previously collapsed column (repeatable).
    #[arg(long = "expand")]
    pub expand: Vec<ColumnId>,
}

pub fn run_prefs(args: PrefsArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    match args.command.unwrap_or(PrefsCommand::Show) {
        PrefsCommand::Show => show(&session.preferences(), output),
        PrefsCommand::Set(set) => {
            let prefs = set.apply(session.preferences());
            session
                .save_preferences(&prefs)
                .map_err(|err| report(output, err))?;
            show(&prefs, output)
        }
        PrefsCommand::Reset => {
            session
                .reset_preferences()
                .map_err(|err| report(output, err))?;
            render_success(output, "Preferences reset to defaults")
        }
    }
}

impl PrefsSetArgs {
    fn apply(self, mut prefs: UserPreferences) -> UserPreferences {
        if self.clear_filters {
            prefs.filters = SavedFilters::default();
        }
        if let Some(search) = self.search {
            prefs.search_query = search;
        }
        if !self.priorities.is_empty() {
            prefs.filters.priorities = self.priorities;
        }
        if !self.tags.is_empty() {
            prefs.filters.tags = self.tags;
        }
        if !self.columns.is_empty() {
            prefs.filters.columns = self.columns;
        }
        if self.has_follow_up.is_some() {
            prefs.filters.has_follow_up = self.has_follow_up;
        }
        if let Some(sort) = self.sort {
            prefs.sort_by = sort;
        }
        if let Some(direction) = self.direction {
            prefs.sort_direction = direction;
        }
        for column in self.collapse {
            if !prefs.collapsed_columns.contains(&column) {
                prefs.collapsed_columns.push(column);
            }
        }
        prefs.collapsed_columns.retain(|c| !self.expand.contains(c));
        prefs
    }
}

fn show(prefs: &UserPreferences, output: OutputMode) -> anyhow::Result<()> {
    render_mode(
        output,
        prefs,
        |p, w| {
            writeln!(w, "search\t{}", p.search_query)?;
            writeln!(w, "priorities\t{}", join(&p.filters.priorities))?;
            writeln!(w, "tags\t{}", p.filters.tags.join(","))?;
            writeln!(w, "columns\t{}", join(&p.filters.columns))?;
            writeln!(
                w,
                "has_follow_up\t{}",
                p.filters.has_follow_up.map_or_else(String::new, |v| v.to_string())
            )?;
            writeln!(w, "sort\t{} {}", p.sort_by, p.sort_direction)?;
            writeln!(w, "collapsed\t{}", join(&p.collapsed_columns))
        },
        |p, w| {
            pretty_section(w, "Preferences")?;
            pretty_kv(w, "search", dash_if_empty(p.search_query.clone()))?;
            pretty_kv(w, "priorities", dash_if_empty(join(&p.filters.priorities)))?;
            pretty_kv(w, "tags", dash_if_empty(p.filters.tags.join(",")))?;
            pretty_kv(w, "columns", dash_if_empty(join(&p.filters.columns)))?;
            pretty_kv(
                w,
                "follow-up",
                p.filters.has_follow_up.map_or_else(|| "-".to_string(), |v| v.to_string()),
            )?;
            pretty_kv(w, "sort", format!("{} {}", p.sort_by, p.sort_direction))?;
            pretty_kv(w, "collapsed", dash_if_empty(join(&p.collapsed_columns)))
        },
    )
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn dash_if_empty(s: String) -> String {
    if s.is_empty() { "-".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_only_given_dimensions() {
        let mut prefs = UserPreferences::default();
        prefs.filters.tags = vec!["remote".into()];
        prefs.search_query = "acme".into();

        let args = PrefsSetArgs {
            priorities: vec![Priority::High],
            sort: Some(SortBy::Priority),
            ..PrefsSetArgs::default()
        };
        let updated = args.apply(prefs);
        assert_eq!(updated.filters.priorities, vec![Priority::High]);
        assert_eq!(updated.filters.tags, vec!["remote".to_string()]);
        assert_eq!(updated.search_query, "acme");
        assert_eq!(updated.sort_by, SortBy::Priority);
    }

    #[test]
    fn clear_filters_then_apply() {
        let mut prefs = UserPreferences::default();
        prefs.filters.tags = vec!["remote".into()];
        let args = PrefsSetArgs {
            clear_filters: true,
            columns: vec![ColumnId::WarmUpPhase],
            ..PrefsSetArgs::default()
        };
        let updated = args.apply(prefs);
        assert!(updated.filters.tags.is_empty());
        assert_eq!(updated.filters.columns, vec![ColumnId::WarmUpPhase]);
    }

    #[test]
    fn collapse_and_expand_columns() {
        let prefs = UserPreferences::default();
        let collapsed = PrefsSetArgs {
            collapse: vec![ColumnId::StalledCold, ColumnId::StalledCold, ColumnId::OfferSuccess],
            ..PrefsSetArgs::default()
        }
        .apply(prefs);
        assert_eq!(
            collapsed.collapsed_columns,
            vec![ColumnId::StalledCold, ColumnId::OfferSuccess]
        );

        let expanded = PrefsSetArgs {
            expand: vec![ColumnId::StalledCold],
            ..PrefsSetArgs::default()
        }
        .apply(collapsed);
        assert_eq!(expanded.collapsed_columns, vec![ColumnId::OfferSuccess]);
    }
}
