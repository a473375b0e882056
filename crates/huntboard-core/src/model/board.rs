use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::column::{Column, default_columns};
use super::enums::ColumnId;
use super::job_target::JobTarget;
use super::tag::Tag;
use crate::validate::{Validate, Validator};

pub const SCHEMA_VERSION: &str = "v1.0.0";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// The whole persisted board: every job target plus column and tag
/// configuration. Exactly one lives under each board storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub job_targets: Vec<JobTarget>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub last_updated: DateTime<Utc>,
}

impl BoardState {
    /// Empty board with the nine default columns.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            schema_version: default_schema_version(),
            job_targets: Vec::new(),
            columns: default_columns(),
            tags: Vec::new(),
            last_updated: now,
        }
    }

    #[must_use]
    pub fn target(&self, id: &str) -> Option<&JobTarget> {
        self.job_targets.iter().find(|t| t.id == id)
    }

    pub fn target_mut(&mut self, id: &str) -> Option<&mut JobTarget> {
        self.job_targets.iter_mut().find(|t| t.id == id)
    }

    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn tag(&self, label: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.label == label)
    }
}

impl Validate for BoardState {
    fn validate_into(&self, v: &mut Validator) {
        v.text("schemaVersion", &self.schema_version, 1, 20);

        v.each("jobTargets", &self.job_targets);
        let ids: Vec<&str> = self.job_targets.iter().map(|t| t.id.as_str()).collect();
        v.unique("jobTargets", &ids);

        v.each("columns", &self.columns);
        let column_ids: Vec<ColumnId> = self.columns.iter().map(|c| c.id).collect();
        v.unique("columns", &column_ids);

        v.each("tags", &self.tags);
        let labels: Vec<&str> = self.tags.iter().map(|t| t.label.as_str()).collect();
        v.unique("tags", &labels);
    }
}
