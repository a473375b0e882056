use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{Validate, Validator};

pub const DEFAULT_TAG_COLOR: &str = "#9E9E9E";

/// A catalogued tag with a display color.
///
/// Job targets reference tags by label in their `tags` list; the catalogue
/// only adds colors and does not constrain which labels a target may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub label: String,
    pub color: String,
}

impl Tag {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            color: color.unwrap_or(DEFAULT_TAG_COLOR).to_string(),
        }
    }
}

impl Validate for Tag {
    fn validate_into(&self, v: &mut Validator) {
        v.text("label", &self.label, 1, 30);
        v.hex_color("color", &self.color);
    }
}
