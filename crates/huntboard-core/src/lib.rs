//! huntboard-core library.
//!
//! # Conventions
//!
//! - **Errors**: library operations return [`error::HuntError`]; config
//!   loading uses `anyhow::Result`.
//! - **Logging**: `tracing` macros only (`debug!` on mutations, `info!` on
//!   writes, `warn!` on recovery). Installing a subscriber is the caller's
//!   job.

pub mod board;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod model;
pub mod prefs;
pub mod storage;
pub mod validate;

pub use board::{Board, BoardOptions};
pub use error::{ErrorCode, HuntError};
