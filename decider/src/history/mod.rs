//! Decision history.
//!
//! - [`log`]: Bounded most-recent-first log of decisions
//! - [`store`]: Loading and saving the log (JSON file or in-memory)
//! - [`stats`]: Summary statistics derived from the log

pub mod log;
pub mod stats;
pub mod store;

pub use log::{HistoryLog, SharedHistory, DEFAULT_HISTORY_LIMIT};
pub use stats::{ItemCount, Statistics};
pub use store::{HistoryError, HistoryStore, JsonFileStore, MemoryStore};
