use anyhow::{Context, Result};
use huntboard_core::board::{Board, BoardOptions};
use huntboard_core::config::{HuntConfig, load_config, resolve_data_dir};
use huntboard_core::debounce::SystemClock;
use huntboard_core::model::{JobTarget, UserPreferences};
use huntboard_core::prefs::{load_preferences, reset_preferences, save_preferences};
use huntboard_core::storage::{FileStore, LoadOutcome};
use huntboard_core::HuntError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::output::{OutputMode, report};

pub type FileBoard = Board<FileStore, SystemClock>;

/// Resolved data directory and its config, shared by every command.
#[derive(Debug, Clone)]
pub struct Session {
    pub data_dir: PathBuf,
    pub config: HuntConfig,
}

impl Session {
    pub fn open(data_dir_flag: Option<&Path>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_flag)?;
        let config = load_config(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;
        debug!(data_dir = %data_dir.display(), "session opened");
        Ok(Self { data_dir, config })
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    pub fn board(&self) -> FileBoard {
        let options = BoardOptions {
            key: self.config.storage.board_key.clone(),
            persist_debounce: self.config.storage.persist_debounce(),
        };
        let board = Board::open(self.store(), SystemClock, options);
        if let LoadOutcome::Recovered { reason } = board.load_outcome() {
            warn!("board data could not be loaded and was reset to defaults: {reason}");
        }
        board
    }

    pub fn preferences(&self) -> UserPreferences {
        load_preferences(&self.store(), &self.config.storage.prefs_key)
    }

    pub fn save_preferences(&self, prefs: &UserPreferences) -> Result<(), HuntError> {
        save_preferences(&mut self.store(), &self.config.storage.prefs_key, prefs)
    }

    pub fn reset_preferences(&self) -> Result<(), HuntError> {
        reset_preferences(&mut self.store(), &self.config.storage.prefs_key)
    }
}

/// Persist the board now, rendering any failure.
pub fn commit(board: &mut FileBoard, output: OutputMode) -> Result<()> {
    board.flush().map_err(|err| report(output, err))
}

/// Resolve a possibly partial id to a target, rendering not-found.
pub fn require_target<'a>(
    board: &'a FileBoard,
    input: &str,
    output: OutputMode,
) -> Result<&'a JobTarget> {
    crate::resolve::resolve_target(board.targets(), input).ok_or_else(|| {
        report(
            output,
            HuntError::TargetNotFound {
                id: input.to_string(),
            },
        )
    })
}
