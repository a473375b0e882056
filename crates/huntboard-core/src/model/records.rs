//! Detail records attached to a job target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AttachmentType, OutreachType, SignalType, WarmUpActionType};
use crate::validate::{Validate, Validator};

/// Impact score given to a warm-up action when none is supplied.
pub const DEFAULT_IMPACT_SCORE: u8 = 10;

/// Relationship-building action taken before outreach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmUpAction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: WarmUpActionType,
    pub action_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_person: Option<String>,
    pub description: String,
    /// Contribution to the target's warm-up score, 0-100.
    pub impact_score: u8,
}

impl WarmUpAction {
    #[must_use]
    pub fn new(kind: WarmUpActionType, action_date: DateTime<Utc>, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            action_date,
            target_person: None,
            description,
            impact_score: DEFAULT_IMPACT_SCORE,
        }
    }
}

impl Validate for WarmUpAction {
    fn validate_into(&self, v: &mut Validator) {
        v.opt_text("targetPerson", self.target_person.as_deref(), 100);
        v.text("description", &self.description, 0, 500);
        v.range("impactScore", i64::from(self.impact_score), 0, 100);
    }
}

/// One outreach attempt to the company or a hiring manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: OutreachType,
    pub sent_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    pub has_referral: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer_name: Option<String>,
    pub response_received: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OutreachRecord {
    #[must_use]
    pub fn new(kind: OutreachType, sent_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            sent_date,
            contact_person: None,
            message_template: None,
            has_referral: false,
            referrer_name: None,
            response_received: false,
            response_date: None,
            notes: None,
        }
    }
}

impl Validate for OutreachRecord {
    fn validate_into(&self, v: &mut Validator) {
        v.opt_text("contactPerson", self.contact_person.as_deref(), 100);
        v.opt_text("messageTemplate", self.message_template.as_deref(), 50);
        v.opt_text("referrerName", self.referrer_name.as_deref(), 100);
        v.opt_text("notes", self.notes.as_deref(), 1000);
    }
}

/// A scheduled follow-up action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub action: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FollowUp {
    #[must_use]
    pub fn new(scheduled_date: DateTime<Utc>, action: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            scheduled_date,
            action,
            completed: false,
            completed_at: None,
            notes: None,
        }
    }
}

impl Validate for FollowUp {
    fn validate_into(&self, v: &mut Validator) {
        v.text("action", &self.action, 1, 500);
        v.opt_text("notes", self.notes.as_deref(), 1000);
    }
}

/// Someone worth knowing at the target company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPerson {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for KeyPerson {
    fn validate_into(&self, v: &mut Validator) {
        v.text("name", &self.name, 0, 100);
        v.opt_text("role", self.role.as_deref(), 100);
        if let Some(url) = &self.linked_in_url {
            v.url("linkedInUrl", url);
        }
        v.opt_text("notes", self.notes.as_deref(), 500);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for Signal {
    fn validate_into(&self, v: &mut Validator) {
        v.opt_text("description", self.description.as_deref(), 200);
    }
}

/// A file or link kept with a job target. `url` may be a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Validate for Attachment {
    fn validate_into(&self, v: &mut Validator) {
        v.text("name", &self.name, 0, 100);
        v.text("url", &self.url, 0, 500);
    }
}
