//! Typed board documents and their validation rules.

pub mod board;
pub mod column;
pub mod enums;
pub mod job_target;
pub mod prefs;
pub mod records;
pub mod tag;

pub use board::{BoardState, SCHEMA_VERSION};
pub use column::{Column, default_columns};
pub use enums::{
    AttachmentType, ColumnId, InterviewStage, OutreachType, ParseEnumError, Priority,
    SignalType, SortBy, SortDirection, StateReason, WarmUpActionType,
};
pub use job_target::{
    JobTarget, JobTargetPatch, NewTargetDraft, generate_target_id, is_valid_target_id,
};
pub use prefs::{SavedFilters, UserPreferences};
pub use records::{
    Attachment, DEFAULT_IMPACT_SCORE, FollowUp, KeyPerson, OutreachRecord, Signal, WarmUpAction,
};
pub use tag::{DEFAULT_TAG_COLOR, Tag};
