//! Incremental filter and inline-completion engine for a streaming item
//! picker.
//!
//! Candidates arrive as raw byte chunks and are split into items; the user
//! narrows them with typed text, gets inline completion against the visible
//! set, and the final query text is the session's result. The crate is
//! UI-agnostic: a host supplies the event loop, feeds input and edits in, and
//! implements [`TimerHost`] so the engine can debounce its filter passes.
//!
//! The entry point is [`PickerEngine`]; the leaf pieces (token matching, the
//! item store, the ingestion pipeline, the merge and completion rules) are
//! exposed as modules for hosts that need finer-grained access.

pub mod complete;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod matcher;
pub mod merge;
pub mod query;
pub mod store;
pub mod timer;

pub use config::EngineConfig;
pub use engine::{PickerEngine, SessionOutcome};
pub use error::IngestError;
pub use query::Query;
pub use store::{ItemId, ItemStore};
pub use timer::{ManualTimers, TimerHost, TimerToken};
