use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::KeyValueStore;
use crate::error::HuntError;
use crate::validate::{Validate, parse_str};

/// How [`load_with_outcome`] arrived at its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored document parsed and validated.
    Loaded,
    /// Nothing was stored under the key.
    Missing,
    /// Something was stored but could not be used; the default was returned.
    Recovered { reason: String },
}

/// Read and validate the document under `key`, falling back to `default`.
///
/// Never fails: unreadable, malformed or invalid documents are logged at
/// `warn` and replaced by `default`.
pub fn load<S, T>(store: &S, key: &str, default: T) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Validate,
{
    load_with_outcome(store, key, default).0
}

/// [`load`], also reporting whether the default was used and why.
pub fn load_with_outcome<S, T>(store: &S, key: &str, default: T) -> (T, LoadOutcome)
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Validate,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (default, LoadOutcome::Missing),
        Err(err) => {
            warn!(key, error = %err, "could not read stored document; using defaults");
            return (
                default,
                LoadOutcome::Recovered {
                    reason: err.to_string(),
                },
            );
        }
    };

    match parse_str::<T>(&raw) {
        Ok(value) => (value, LoadOutcome::Loaded),
        Err(errors) => {
            for issue in errors.issues() {
                warn!(key, path = %issue.path, "stored document rejected: {}", issue.message);
            }
            (
                default,
                LoadOutcome::Recovered {
                    reason: errors.to_string(),
                },
            )
        }
    }
}

/// Validate `value` and write it under `key`.
///
/// # Errors
///
/// Returns [`HuntError::Validation`] without writing anything when `value`
/// breaks a constraint, [`HuntError::Serialize`] if it cannot be encoded, or
/// [`HuntError::Storage`] when the backend write fails.
pub fn save<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), HuntError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + Validate,
{
    value.validate()?;
    let encoded = serde_json::to_string_pretty(value).map_err(|source| HuntError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &encoded)?;
    info!(key, bytes = encoded.len(), "saved document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardState, ColumnId, JobTarget, UserPreferences};
    use crate::storage::{BOARD_STATE_KEY, MemoryStore, USER_PREFS_KEY};
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        "2026-02-19T16:00:00.000Z".parse().unwrap()
    }

    #[test]
    fn missing_key_returns_default() {
        let store = MemoryStore::new();
        let (board, outcome) = load_with_outcome(&store, BOARD_STATE_KEY, BoardState::new(now()));
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(board.columns.len(), 9);
    }

    #[test]
    fn malformed_json_recovers_to_default() {
        let mut store = MemoryStore::new();
        store.set(BOARD_STATE_KEY, "{not json").unwrap();
        let (board, outcome) = load_with_outcome(&store, BOARD_STATE_KEY, BoardState::new(now()));
        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
        assert_eq!(board.columns.len(), 9);
        assert!(board.job_targets.is_empty());
    }

    #[test]
    fn schema_violation_recovers_to_default() {
        let mut board = BoardState::new(now());
        let mut target = JobTarget::new("Acme", ColumnId::default(), now());
        target.company = "x".repeat(101);
        board.job_targets.push(target);

        let mut store = MemoryStore::new();
        store
            .set(BOARD_STATE_KEY, &serde_json::to_string(&board).unwrap())
            .unwrap();

        let (loaded, outcome) = load_with_outcome(&store, BOARD_STATE_KEY, BoardState::new(now()));
        match outcome {
            LoadOutcome::Recovered { reason } => assert!(reason.contains("jobTargets.0.company")),
            other => panic!("expected recovery, got {other:?}"),
        }
        assert!(loaded.job_targets.is_empty());
    }

    #[test]
    fn board_without_tags_key_keeps_its_targets() {
        let mut board = BoardState::new(now());
        board
            .job_targets
            .push(JobTarget::new("Acme", ColumnId::default(), now()));
        let mut raw = serde_json::to_value(&board).unwrap();
        raw.as_object_mut().unwrap().remove("tags");

        let mut store = MemoryStore::new();
        store.set(BOARD_STATE_KEY, &raw.to_string()).unwrap();

        let (loaded, outcome) = load_with_outcome(&store, BOARD_STATE_KEY, BoardState::new(now()));
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(loaded.job_targets.len(), 1);
        assert!(loaded.tags.is_empty());
    }

    #[test]
    fn long_card_tag_entries_still_load() {
        let mut board = BoardState::new(now());
        let mut target = JobTarget::new("Acme", ColumnId::default(), now());
        target.tags = vec![
            "3f2a7c1e-8b4d-4e6f-9a0b-1c2d3e4f5a6b".to_string(),
            "t".repeat(31),
        ];
        board.job_targets.push(target);

        let mut store = MemoryStore::new();
        store
            .set(BOARD_STATE_KEY, &serde_json::to_string(&board).unwrap())
            .unwrap();

        let (loaded, outcome) = load_with_outcome(&store, BOARD_STATE_KEY, BoardState::new(now()));
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(loaded, board);
    }

    #[test]
    fn unknown_enum_value_reports_its_field_path() {
        let mut board = BoardState::new(now());
        board
            .job_targets
            .push(JobTarget::new("Acme", ColumnId::default(), now()));
        let mut raw = serde_json::to_value(&board).unwrap();
        raw["jobTargets"][0]["priority"] = serde_json::json!("urgent");

        let mut store = MemoryStore::new();
        store.set(BOARD_STATE_KEY, &raw.to_string()).unwrap();

        let (_, outcome) = load_with_outcome(&store, BOARD_STATE_KEY, BoardState::new(now()));
        match outcome {
            LoadOutcome::Recovered { reason } => {
                assert!(reason.contains("jobTargets.0.priority"), "{reason}");
            }
            other => panic!("expected recovery, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut board = BoardState::new(now());
        board
            .job_targets
            .push(JobTarget::new("Acme", ColumnId::WarmUpPhase, now()));

        let mut store = MemoryStore::new();
        save(&mut store, BOARD_STATE_KEY, &board).unwrap();
        let loaded = load(&store, BOARD_STATE_KEY, BoardState::new(now()));
        assert_eq!(loaded, board);
    }

    #[test]
    fn invalid_value_is_not_written() {
        let prefs = UserPreferences {
            search_query: "q".repeat(201),
            ..UserPreferences::default()
        };
        let mut store = MemoryStore::new();
        let err = save(&mut store, USER_PREFS_KEY, &prefs).unwrap_err();
        assert!(matches!(err, HuntError::Validation(_)));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get(USER_PREFS_KEY).unwrap(), None);
    }
}
