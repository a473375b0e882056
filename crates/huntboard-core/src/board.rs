//! In-memory board state with debounced persistence.
//!
//! [`Board`] owns the single [`BoardState`] document for one storage key.
//! Every mutation applies synchronously to memory, refreshes `lastUpdated`
//! and (re)schedules a write `persist_debounce` in the future. Callers drive
//! persistence with [`Board::poll`] from their loop or force it with
//! [`Board::flush`]; dropping the board flushes whatever is still pending.
//!
//! Concurrent writers are last-write-wins. Before each write the stored
//! `lastUpdated` is compared with the one this board last saw; if another
//! process changed it in between, a warning is logged and the write
//! proceeds.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::debounce::{Clock, Debouncer};
use crate::error::HuntError;
use crate::model::{
    BoardState, Column, ColumnId, FollowUp, JobTarget, JobTargetPatch, NewTargetDraft,
    OutreachRecord, Tag, WarmUpAction, generate_target_id,
};
use crate::storage::{BOARD_STATE_KEY, KeyValueStore, LoadOutcome, load_with_outcome, save};
use crate::validate::{IssueKind, Validate, ValidationErrors};

/// Quiet period between the last mutation and the write.
pub const DEFAULT_PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct BoardOptions {
    pub key: String,
    pub persist_debounce: Duration,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            key: BOARD_STATE_KEY.to_string(),
            persist_debounce: DEFAULT_PERSIST_DEBOUNCE,
        }
    }
}

/// Just enough of the stored document to detect a foreign write.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStamp {
    last_updated: DateTime<Utc>,
}

pub struct Board<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    key: String,
    state: BoardState,
    load_outcome: LoadOutcome,
    /// `lastUpdated` of the stored document as of our last load or write.
    observed: Option<DateTime<Utc>>,
    debouncer: Debouncer,
}

impl<S: KeyValueStore, C: Clock> Board<S, C> {
    /// Load the board under `options.key`, or start an empty one.
    pub fn open(store: S, clock: C, options: BoardOptions) -> Self {
        let (state, load_outcome) =
            load_with_outcome(&store, &options.key, BoardState::new(clock.now()));
        let observed = match load_outcome {
            LoadOutcome::Loaded => Some(state.last_updated),
            LoadOutcome::Missing | LoadOutcome::Recovered { .. } => None,
        };
        debug!(
            key = %options.key,
            targets = state.job_targets.len(),
            outcome = ?load_outcome,
            "opened board"
        );
        Self {
            store,
            clock,
            key: options.key,
            state,
            load_outcome,
            observed,
            debouncer: Debouncer::new(options.persist_debounce),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    #[must_use]
    pub const fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn targets(&self) -> &[JobTarget] {
        &self.state.job_targets
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.state.columns
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.state.tags
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&JobTarget> {
        self.state.target(id)
    }

    /// Targets in `column_id`, in board order.
    #[must_use]
    pub fn get_targets_by_column(&self, column_id: ColumnId) -> Vec<&JobTarget> {
        self.state
            .job_targets
            .iter()
            .filter(|t| t.column_id == column_id)
            .collect()
    }

    /// Create a target with factory defaults and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::Validation`] when `company` is empty or longer
    /// than 100 characters; the board is left untouched.
    pub fn add_job_target(
        &mut self,
        company: impl Into<String>,
        column_id: ColumnId,
    ) -> Result<String, HuntError> {
        let mut draft = NewTargetDraft::new(company);
        draft.column_id = column_id;
        self.add_job_target_with(draft)
    }

    /// Create a target from a full create-form draft and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::Validation`] when any draft field breaks a
    /// constraint; the board is left untouched.
    pub fn add_job_target_with(&mut self, draft: NewTargetDraft) -> Result<String, HuntError> {
        let now = self.clock.now();
        let mut target = draft.into_target(now);
        target.validate()?;
        while self.state.target(&target.id).is_some() {
            target.id = generate_target_id(now);
        }

        let id = target.id.clone();
        debug!(id = %id, company = %target.company, column = %target.column_id, "added job target");
        self.state.job_targets.push(target);
        self.touch(now);
        Ok(id)
    }

    /// Merge `patch` into the target with `id`, bumping `updatedAt`.
    ///
    /// Returns `Ok(false)` without changing anything when no target has
    /// that id.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::Validation`] when the merged target would break
    /// a constraint. The stored target is left as it was.
    pub fn update_job_target(
        &mut self,
        id: &str,
        patch: JobTargetPatch,
    ) -> Result<bool, HuntError> {
        let now = self.clock.now();
        let Some(current) = self.state.target(id) else {
            debug!(id, "update ignored: no such job target");
            return Ok(false);
        };

        let mut merged = current.clone();
        patch.apply_to(&mut merged);
        merged.updated_at = now;
        merged.validate()?;

        if let Some(slot) = self.state.target_mut(id) {
            *slot = merged;
        }
        debug!(id, "updated job target");
        self.touch(now);
        Ok(true)
    }

    /// Remove the target with `id`. Returns whether one was removed.
    pub fn delete_job_target(&mut self, id: &str) -> bool {
        let before = self.state.job_targets.len();
        self.state.job_targets.retain(|t| t.id != id);
        if self.state.job_targets.len() == before {
            debug!(id, "delete ignored: no such job target");
            return false;
        }
        debug!(id, "deleted job target");
        self.touch(self.clock.now());
        true
    }

    /// Put the target with `id` into `column_id`. Moving into the column it
    /// already occupies still bumps `updatedAt`.
    pub fn move_job_target(&mut self, id: &str, column_id: ColumnId) -> bool {
        let now = self.clock.now();
        let Some(target) = self.state.target_mut(id) else {
            debug!(id, "move ignored: no such job target");
            return false;
        };
        let from = target.column_id;
        target.column_id = column_id;
        target.updated_at = now;
        debug!(id, %from, to = %column_id, "moved job target");
        self.touch(now);
        true
    }

    /// Set or clear the archived flag.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TargetNotFound`] when no target has `id`.
    pub fn set_archived(&mut self, id: &str, archived: bool) -> Result<(), HuntError> {
        self.edit_target(id, |target, _| {
            target.archived = archived;
            Ok(())
        })
    }

    /// Attach a follow-up and recompute `nextFollowUpDate`.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TargetNotFound`] for an unknown target or
    /// [`HuntError::Validation`] for an invalid record.
    pub fn add_follow_up(
        &mut self,
        target_id: &str,
        follow_up: FollowUp,
    ) -> Result<Uuid, HuntError> {
        let id = follow_up.id;
        self.edit_target(target_id, |target, _| {
            target.follow_ups.push(follow_up);
            target.next_follow_up_date = target.earliest_open_follow_up();
            Ok(())
        })?;
        Ok(id)
    }

    /// Mark a follow-up done and recompute `nextFollowUpDate`.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TargetNotFound`] or [`HuntError::FollowUpNotFound`]
    /// when either id is unknown.
    pub fn complete_follow_up(
        &mut self,
        target_id: &str,
        follow_up_id: Uuid,
        notes: Option<String>,
    ) -> Result<(), HuntError> {
        self.edit_target(target_id, |target, now| {
            let follow_up = target
                .follow_ups
                .iter_mut()
                .find(|f| f.id == follow_up_id)
                .ok_or_else(|| HuntError::FollowUpNotFound {
                    target_id: target.id.clone(),
                    id: follow_up_id.to_string(),
                })?;
            follow_up.completed = true;
            follow_up.completed_at = Some(now);
            if notes.is_some() {
                follow_up.notes = notes;
            }
            target.next_follow_up_date = target.earliest_open_follow_up();
            Ok(())
        })
    }

    /// Record an outreach attempt.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TargetNotFound`] for an unknown target or
    /// [`HuntError::Validation`] for an invalid record.
    pub fn log_outreach(
        &mut self,
        target_id: &str,
        record: OutreachRecord,
    ) -> Result<Uuid, HuntError> {
        let id = record.id;
        self.edit_target(target_id, |target, _| {
            target.outreach_records.push(record);
            Ok(())
        })?;
        Ok(id)
    }

    /// Mark an outreach attempt as answered, at `response_date` or now.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TargetNotFound`] or [`HuntError::OutreachNotFound`]
    /// when either id is unknown.
    pub fn record_outreach_response(
        &mut self,
        target_id: &str,
        outreach_id: Uuid,
        response_date: Option<DateTime<Utc>>,
    ) -> Result<(), HuntError> {
        self.edit_target(target_id, |target, now| {
            let record = target
                .outreach_records
                .iter_mut()
                .find(|r| r.id == outreach_id)
                .ok_or_else(|| HuntError::OutreachNotFound {
                    target_id: target.id.clone(),
                    id: outreach_id.to_string(),
                })?;
            record.response_received = true;
            record.response_date = Some(response_date.unwrap_or(now));
            Ok(())
        })
    }

    /// Record a warm-up action; `warmUpScore` becomes the capped sum of all
    /// impact scores on the target.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TargetNotFound`] for an unknown target or
    /// [`HuntError::Validation`] for an invalid action.
    pub fn add_warm_up_action(
        &mut self,
        target_id: &str,
        action: WarmUpAction,
    ) -> Result<Uuid, HuntError> {
        let id = action.id;
        self.edit_target(target_id, |target, _| {
            target.warm_up_actions.push(action);
            target.warm_up_score = target.computed_warm_up_score();
            Ok(())
        })?;
        Ok(id)
    }

    /// Add a tag to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::Validation`] for a bad label or color, or when a
    /// tag with the same label already exists.
    pub fn create_tag(&mut self, label: &str, color: Option<&str>) -> Result<Tag, HuntError> {
        let tag = Tag::new(label.trim(), color);
        tag.validate()?;
        if self.state.tag(&tag.label).is_some() {
            return Err(ValidationErrors::single(
                "label",
                IssueKind::Duplicate,
                format!("tag '{}' already exists", tag.label),
            )
            .into());
        }
        debug!(label = %tag.label, color = %tag.color, "created tag");
        self.state.tags.push(tag.clone());
        self.touch(self.clock.now());
        Ok(tag)
    }

    /// Remove a tag from the catalogue and from every target carrying it.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::TagNotFound`] when no tag has `label`.
    pub fn delete_tag(&mut self, label: &str) -> Result<Tag, HuntError> {
        let idx = self
            .state
            .tags
            .iter()
            .position(|t| t.label == label)
            .ok_or_else(|| HuntError::TagNotFound {
                label: label.to_string(),
            })?;
        let now = self.clock.now();
        let removed = self.state.tags.remove(idx);
        let mut stripped = 0_usize;
        for target in &mut self.state.job_targets {
            let before = target.tags.len();
            target.tags.retain(|t| t != label);
            if target.tags.len() != before {
                target.updated_at = now;
                stripped += 1;
            }
        }
        debug!(label, stripped, "deleted tag");
        self.touch(now);
        Ok(removed)
    }

    /// Write now if the debounce deadline has passed. Returns whether a
    /// write happened.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the write stays pending and is retried on
    /// the next poll or flush.
    pub fn poll(&mut self) -> Result<bool, HuntError> {
        if !self.debouncer.due(self.clock.now()) {
            return Ok(false);
        }
        self.write_now()?;
        Ok(true)
    }

    /// Write any pending change immediately.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the write stays pending.
    pub fn flush(&mut self) -> Result<(), HuntError> {
        if self.debouncer.is_pending() {
            self.write_now()?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn has_pending_write(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run `edit` on a clone of the target, validate the result, then swap it
    /// in with a fresh `updatedAt`.
    fn edit_target<F>(&mut self, id: &str, edit: F) -> Result<(), HuntError>
    where
        F: FnOnce(&mut JobTarget, DateTime<Utc>) -> Result<(), HuntError>,
    {
        let now = self.clock.now();
        let current = self
            .state
            .target(id)
            .ok_or_else(|| HuntError::TargetNotFound { id: id.to_string() })?;

        let mut edited = current.clone();
        edit(&mut edited, now)?;
        edited.updated_at = now;
        edited.validate()?;

        if let Some(slot) = self.state.target_mut(id) {
            *slot = edited;
        }
        debug!(id, "edited job target");
        self.touch(now);
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.state.last_updated = now;
        self.debouncer.schedule(now);
    }

    fn write_now(&mut self) -> Result<(), HuntError> {
        self.warn_if_overwriting();
        save(&mut self.store, &self.key, &self.state)?;
        self.debouncer.cancel();
        self.observed = Some(self.state.last_updated);
        info!(
            key = %self.key,
            targets = self.state.job_targets.len(),
            "persisted board"
        );
        Ok(())
    }

    fn warn_if_overwriting(&self) {
        let stored = match self.store.get(&self.key) {
            Ok(Some(raw)) => serde_json::from_str::<StoredStamp>(&raw)
                .ok()
                .map(|stamp| stamp.last_updated),
            Ok(None) | Err(_) => None,
        };
        if let Some(stored) = stored
            && self.observed != Some(stored)
        {
            warn!(
                key = %self.key,
                stored = %stored.to_rfc3339(),
                "board changed on disk since it was loaded; overwriting (last write wins)"
            );
        }
    }
}

impl<S: KeyValueStore, C: Clock> Drop for Board<S, C> {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            warn!(key = %self.key, error = %err, "failed to flush board on drop");
        }
    }
}
