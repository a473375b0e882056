pub mod add;
pub mod archive;
pub mod board;
pub mod columns;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod follow_up;
pub mod list;
pub mod move_cmd;
pub mod outreach;
pub mod prefs;
pub mod show;
pub mod tags;
pub mod warm_up;

use chrono::{DateTime, Utc};
use huntboard_core::model::{ColumnId, JobTarget, Priority};
use serde::Serialize;

/// Compact card projection shared by `list` and `board`.
#[derive(Debug, Serialize)]
pub struct CardSummary {
    pub id: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub column_id: ColumnId,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub warm_up_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up_date: Option<DateTime<Utc>>,
    pub archived: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobTarget> for CardSummary {
    fn from(t: &JobTarget) -> Self {
        Self {
            id: t.id.clone(),
            company: t.company.clone(),
            role: t.role.clone(),
            column_id: t.column_id,
            priority: t.priority,
            tags: t.tags.clone(),
            warm_up_score: t.warm_up_score,
            next_follow_up_date: t.next_follow_up_date,
            archived: t.archived,
            updated_at: t.updated_at,
        }
    }
}

impl CardSummary {
    /// `company` or `company / role`.
    pub fn title(&self) -> String {
        match &self.role {
            Some(role) => format!("{} / {role}", self.company),
            None => self.company.clone(),
        }
    }
}

pub fn fmt_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn fmt_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// `-` for unset optional values in human output.
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
