use serde::{Deserialize, Serialize};

use super::enums::{ColumnId, Priority, SortBy, SortDirection};
use crate::validate::{Validate, Validator};

/// Saved filter selections. Empty lists mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedFilters {
    pub priorities: Vec<Priority>,
    pub tags: Vec<String>,
    pub columns: Vec<ColumnId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_follow_up: Option<bool>,
}

/// Per-user view preferences. Missing fields take defaults on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub search_query: String,
    pub filters: SavedFilters,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
    pub collapsed_columns: Vec<ColumnId>,
}

impl Validate for UserPreferences {
    fn validate_into(&self, v: &mut Validator) {
        v.text("searchQuery", &self.search_query, 0, 200);
        v.nested("filters", |v| {
            v.unique("priorities", &self.filters.priorities);
            v.unique("tags", &self.filters.tags);
            v.unique("columns", &self.filters.columns);
        });
        v.unique("collapsedColumns", &self.collapsed_columns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::parse_str;

    #[test]
    fn empty_object_reads_as_defaults() {
        let prefs: UserPreferences = parse_str("{}").unwrap();
        assert_eq!(prefs, UserPreferences::default());
        assert_eq!(prefs.sort_by, SortBy::Updated);
        assert_eq!(prefs.sort_direction, SortDirection::Desc);
        assert!(prefs.search_query.is_empty());
    }

    #[test]
    fn partial_document_keeps_present_fields() {
        let prefs: UserPreferences =
            parse_str(r#"{"sortBy":"company","filters":{"priorities":["high"]}}"#).unwrap();
        assert_eq!(prefs.sort_by, SortBy::Company);
        assert_eq!(prefs.filters.priorities, vec![Priority::High]);
        assert_eq!(prefs.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn search_query_ceiling_is_two_hundred() {
        let prefs = UserPreferences {
            search_query: "q".repeat(201),
            ..UserPreferences::default()
        };
        assert!(prefs.validate().unwrap_err().has_path("searchQuery"));
    }

    #[test]
    fn serializes_camel_case() {
        let prefs = UserPreferences {
            collapsed_columns: vec![ColumnId::StalledCold],
            ..UserPreferences::default()
        };
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["sortDirection"], "desc");
        assert_eq!(value["collapsedColumns"][0], "stalled-cold");
        assert!(value["filters"].get("hasFollowUp").is_none());
    }
}
