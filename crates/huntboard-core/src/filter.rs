//! Card filtering and sorting for board views.
//!
//! Dimensions combine with AND; within the tag dimension any selected tag
//! matches. An empty or unset dimension does not restrict anything.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::debounce::Debouncer;
use crate::model::{ColumnId, JobTarget, Priority, SortBy, SortDirection, UserPreferences};

/// Keystroke quiet period before a typed search query takes effect.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilters {
    /// Case-insensitive substring matched against company or role.
    pub search_query: String,
    pub priorities: Vec<Priority>,
    /// A card matches when it carries at least one of these.
    pub tags: Vec<String>,
    /// Only cards with a scheduled next follow-up and at least one
    /// follow-up record.
    pub has_follow_up: bool,
    pub columns: Vec<ColumnId>,
}

impl CardFilters {
    /// Filters saved in user preferences.
    #[must_use]
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        Self {
            search_query: prefs.search_query.clone(),
            priorities: prefs.filters.priorities.clone(),
            tags: prefs.filters.tags.clone(),
            has_follow_up: prefs.filters.has_follow_up.unwrap_or(false),
            columns: prefs.filters.columns.clone(),
        }
    }

    /// Number of filter-bar dimensions currently restricting the result
    /// (search, priorities, tags, follow-up), one per dimension however many
    /// values it holds. The column selection is a board view setting and is
    /// not counted.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.search_query.is_empty(),
            !self.priorities.is_empty(),
            !self.tags.is_empty(),
            self.has_follow_up,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether no dimension, columns included, restricts anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0 && self.columns.is_empty()
    }

    /// Reset every dimension.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn matches(&self, card: &JobTarget) -> bool {
        if !self.search_query.is_empty() && !card.matches_text(&self.search_query.to_lowercase()) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&card.priority) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| card.tags.contains(tag)) {
            return false;
        }
        if self.has_follow_up && (card.next_follow_up_date.is_none() || card.follow_ups.is_empty())
        {
            return false;
        }
        if !self.columns.is_empty() && !self.columns.contains(&card.column_id) {
            return false;
        }
        true
    }
}

/// Cards satisfying every active dimension of `filters`, in input order.
#[must_use]
pub fn filter_cards<'a>(cards: &'a [JobTarget], filters: &CardFilters) -> Vec<&'a JobTarget> {
    cards.iter().filter(|card| filters.matches(card)).collect()
}

#[must_use]
pub fn active_filter_count(filters: &CardFilters) -> usize {
    filters.active_count()
}

/// Stable sort of `cards` by `sort_by`. Company names compare ignoring case;
/// priority sorts low < medium < high before `direction` applies.
pub fn sort_cards(cards: &mut [&JobTarget], sort_by: SortBy, direction: SortDirection) {
    cards.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &JobTarget, b: &JobTarget, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Created => a.created_at.cmp(&b.created_at),
        SortBy::Updated => a.updated_at.cmp(&b.updated_at),
        SortBy::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortBy::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
    }
}

/// Debounced search box state.
///
/// Keystrokes update the pending text immediately; the committed query that
/// filtering uses only catches up once typing pauses for the quiet period.
#[derive(Debug, Clone)]
pub struct SearchInput {
    pending: String,
    committed: String,
    debouncer: Debouncer,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchInput {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            pending: String::new(),
            committed: String::new(),
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Replace the typed text at `now`.
    pub fn type_query(&mut self, query: impl Into<String>, now: DateTime<Utc>) {
        self.pending = query.into();
        self.debouncer.schedule(now);
    }

    /// Commit the pending text if typing has paused. Returns `true` when the
    /// committed query changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.debouncer.take_due(now) {
            return self.commit_pending();
        }
        false
    }

    /// Commit immediately, skipping the quiet period.
    pub fn commit_now(&mut self) -> bool {
        self.debouncer.cancel();
        self.commit_pending()
    }

    fn commit_pending(&mut self) -> bool {
        if self.pending == self.committed {
            return false;
        }
        self.committed.clone_from(&self.pending);
        true
    }

    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }
}
