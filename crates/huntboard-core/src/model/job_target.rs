use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enums::{ColumnId, InterviewStage, Priority, StateReason};
use super::records::{Attachment, FollowUp, KeyPerson, OutreachRecord, Signal, WarmUpAction};
use crate::validate::{IssueKind, Validate, Validator};

/// Prefix shared by every job target id.
pub const TARGET_ID_PREFIX: &str = "jt_";

const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh id of the form `jt_<unix-millis>_<7 base36 chars>`.
#[must_use]
pub fn generate_target_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    format!("{TARGET_ID_PREFIX}{}_{suffix}", now.timestamp_millis())
}

/// Whether `id` has the job target id shape: `jt_` then `[A-Za-z0-9_]+`.
#[must_use]
pub fn is_valid_target_id(id: &str) -> bool {
    id.strip_prefix(TARGET_ID_PREFIX).is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// One tracked opportunity on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTarget {
    pub id: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub column_id: ColumnId,
    pub priority: Priority,
    pub tags: Vec<String>,

    pub warm_up_score: u8,
    pub warm_up_actions: Vec<WarmUpAction>,
    pub outreach_records: Vec<OutreachRecord>,
    pub follow_ups: Vec<FollowUp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_stage: Option<InterviewStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_notes: Option<String>,
    pub key_people: Vec<KeyPerson>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub signals: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<StateReason>,
    pub attachments: Vec<Attachment>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived: bool,
}

impl JobTarget {
    /// Factory: a new target in `column_id` with every default filled in.
    #[must_use]
    pub fn new(company: impl Into<String>, column_id: ColumnId, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_target_id(now),
            company: company.into(),
            role: None,
            target_reason: None,
            source: None,
            column_id,
            priority: Priority::default(),
            tags: Vec::new(),
            warm_up_score: 0,
            warm_up_actions: Vec::new(),
            outreach_records: Vec::new(),
            follow_ups: Vec::new(),
            next_follow_up_date: None,
            interview_stage: None,
            interview_notes: None,
            key_people: Vec::new(),
            notes: None,
            signals: Vec::new(),
            state_reason: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
            archived: false,
        }
    }

    /// Earliest scheduled date among follow-ups not yet completed.
    #[must_use]
    pub fn earliest_open_follow_up(&self) -> Option<DateTime<Utc>> {
        self.follow_ups
            .iter()
            .filter(|f| !f.completed)
            .map(|f| f.scheduled_date)
            .min()
    }

    /// Sum of warm-up impact scores, capped at 100.
    #[must_use]
    pub fn computed_warm_up_score(&self) -> u8 {
        let total: u32 = self
            .warm_up_actions
            .iter()
            .map(|a| u32::from(a.impact_score))
            .sum();
        u8::try_from(total.min(100)).unwrap_or(100)
    }

    /// Whether `needle_lower` (already lowercased) occurs in the company or role,
    /// ignoring case.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.company.to_lowercase().contains(needle_lower)
            || self
                .role
                .as_deref()
                .is_some_and(|role| role.to_lowercase().contains(needle_lower))
    }
}

impl Validate for JobTarget {
    fn validate_into(&self, v: &mut Validator) {
        if !is_valid_target_id(&self.id) {
            v.issue(
                "id",
                IssueKind::InvalidFormat,
                format!("'{}' does not match jt_[A-Za-z0-9_]+", self.id),
            );
        }
        v.text("company", &self.company, 1, 100);
        v.opt_text("role", self.role.as_deref(), 100);
        v.opt_text("targetReason", self.target_reason.as_deref(), 500);
        v.opt_text("source", self.source.as_deref(), 200);
        v.unique("tags", &self.tags);
        v.range("warmUpScore", i64::from(self.warm_up_score), 0, 100);
        v.each("warmUpActions", &self.warm_up_actions);
        v.each("outreachRecords", &self.outreach_records);
        v.each("followUps", &self.follow_ups);
        v.opt_text("interviewNotes", self.interview_notes.as_deref(), 2000);
        v.each("keyPeople", &self.key_people);
        v.opt_text("notes", self.notes.as_deref(), 5000);
        v.each("signals", &self.signals);
        v.each("attachments", &self.attachments);
        if self.updated_at < self.created_at {
            v.issue(
                "updatedAt",
                IssueKind::Inconsistent,
                "must not be earlier than createdAt",
            );
        }
    }
}

/// Fields collected by the create form. Everything else takes factory
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTargetDraft {
    pub company: String,
    pub role: Option<String>,
    pub target_reason: Option<String>,
    pub source: Option<String>,
    pub column_id: ColumnId,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl NewTargetDraft {
    #[must_use]
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            ..Self::default()
        }
    }

    /// Build the target this draft describes, stamped with `now`.
    #[must_use]
    pub fn into_target(self, now: DateTime<Utc>) -> JobTarget {
        let mut target = JobTarget::new(self.company, self.column_id, now);
        target.role = self.role;
        target.target_reason = self.target_reason;
        target.source = self.source;
        target.priority = self.priority;
        target.tags = self.tags;
        target
    }
}

/// Partial update for a job target.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears
/// the value. `id`, `createdAt` and `updatedAt` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTargetPatch {
    pub company: Option<String>,
    pub role: Option<Option<String>>,
    pub target_reason: Option<Option<String>>,
    pub source: Option<Option<String>>,
    pub column_id: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub warm_up_score: Option<u8>,
    pub next_follow_up_date: Option<Option<DateTime<Utc>>>,
    pub interview_stage: Option<Option<InterviewStage>>,
    pub interview_notes: Option<Option<String>>,
    pub key_people: Option<Vec<KeyPerson>>,
    pub notes: Option<Option<String>>,
    pub signals: Option<Vec<Signal>>,
    pub state_reason: Option<Option<StateReason>>,
    pub attachments: Option<Vec<Attachment>>,
    pub archived: Option<bool>,
}

impl JobTargetPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge every present field into `target`. Does not touch `updatedAt`.
    pub fn apply_to(self, target: &mut JobTarget) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut target.company, self.company);
        set(&mut target.role, self.role);
        set(&mut target.target_reason, self.target_reason);
        set(&mut target.source, self.source);
        set(&mut target.column_id, self.column_id);
        set(&mut target.priority, self.priority);
        set(&mut target.tags, self.tags);
        set(&mut target.warm_up_score, self.warm_up_score);
        set(&mut target.next_follow_up_date, self.next_follow_up_date);
        set(&mut target.interview_stage, self.interview_stage);
        set(&mut target.interview_notes, self.interview_notes);
        set(&mut target.key_people, self.key_people);
        set(&mut target.notes, self.notes);
        set(&mut target.signals, self.signals);
        set(&mut target.state_reason, self.state_reason);
        set(&mut target.attachments, self.attachments);
        set(&mut target.archived, self.archived);
    }
}
