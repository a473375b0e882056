use serde::{Deserialize, Serialize};

use super::enums::ColumnId;
use crate::validate::{Validate, Validator};

/// Display configuration for one of the nine fixed columns.
///
/// Columns are configuration, not user data: the board always carries the
/// nine from [`default_columns`] and no command edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub description: String,
    /// Display position, 0-8.
    pub order: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    /// Header accent color, `#RRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Validate for Column {
    fn validate_into(&self, v: &mut Validator) {
        v.text("title", &self.title, 1, 50);
        v.text("description", &self.description, 0, 200);
        v.range("order", i64::from(self.order), 0, 8);
        if let Some(color) = &self.color {
            v.hex_color("color", color);
        }
    }
}

fn column(id: ColumnId, title: &str, description: &str, order: u8, color: &str) -> Column {
    Column {
        id,
        title: title.to_string(),
        description: description.to_string(),
        order,
        icon_name: None,
        color: Some(color.to_string()),
    }
}

/// The nine hunting-oriented columns in board order.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    vec![
        column(
            ColumnId::TargetsIdentified,
            "Targets Identified",
            "Jobs, companies, or teams that look interesting but need research",
            0,
            "#9E9E9E",
        ),
        column(
            ColumnId::IntelGathering,
            "Intel Gathering",
            "Research phase before any outreach",
            1,
            "#2196F3",
        ),
        column(
            ColumnId::WarmUpPhase,
            "Warm-Up Phase",
            "Building relationships before outreach",
            2,
            "#FF9800",
        ),
        column(
            ColumnId::OutreachInitiated,
            "Outreach Initiated",
            "First contact made",
            3,
            "#4CAF50",
        ),
        column(
            ColumnId::FollowUpRequired,
            "Follow-Up Required",
            "Cards needing follow-up action",
            4,
            "#F44336",
        ),
        column(
            ColumnId::ConversationStarted,
            "Conversation Started",
            "Active engagement with company",
            5,
            "#9C27B0",
        ),
        column(
            ColumnId::InterviewPipeline,
            "Interview Pipeline",
            "Formal interview process",
            6,
            "#3F51B5",
        ),
        column(
            ColumnId::StalledCold,
            "Stalled / Cold",
            "Trail went cold",
            7,
            "#607D8B",
        ),
        column(
            ColumnId::OfferSuccess,
            "Offer / Success",
            "Offers received or strong leads",
            8,
            "#4CAF50",
        ),
    ]
}
