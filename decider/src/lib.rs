//! Decider - pick one item from a shared list.
//!
//! This crate turns a blob of text (a shopping list, a set of dinner options,
//! a Markdown checklist) into a list of candidate items and picks one of them
//! uniformly at random.
//!
//! # Overview
//!
//! Plain text is split into one item per non-blank line. If any line looks
//! like a checkbox (`[ ] Bread`, `[x] Milk`), only unchecked checkbox lines
//! become items and a heading line directly above the checklist becomes the
//! list title. At least two items are needed before a pick is offered.
//!
//! ```
//! use decider::{parse_list, Selector};
//!
//! let list = parse_list("Shopping List\n[x] Milk\n[ ] Bread\n[ ] Eggs");
//! let decision = Selector::new().decide(&list).unwrap();
//!
//! assert!(["Bread", "Eggs"].contains(&decision.selected_item.as_str()));
//! assert_eq!(decision.title.as_deref(), Some("Shopping List"));
//! ```
//!
//! # Modules
//!
//! - [`types`]: Parsed list and decision records
//! - [`parser`]: Shared-text list parsing
//! - [`selector`]: Uniform random selection
//! - [`spin`]: Spin reel timing
//! - [`history`]: Bounded decision history, persistence and statistics
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for Decider operations

pub mod config;
pub mod error;
pub mod history;
pub mod parser;
pub mod selector;
pub mod spin;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::{DeciderError, Result};
pub use history::{
    HistoryError, HistoryLog, HistoryStore, JsonFileStore, MemoryStore, SharedHistory, Statistics,
};
pub use parser::{classify_line, is_checkbox_line, parse_list, LineKind};
pub use selector::{pick, SelectionError, Selector};
pub use spin::{SpinFrame, SpinReel, SpinSchedule};
pub use types::{Decision, ParsedList, ValidationError, MIN_ITEMS_FOR_DECISION};
