//! TUI Rhythm (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `tui_rhythm::{core,engine,input,term,types}`; the implementation lives in
//! the dedicated crates under `crates/`.

pub use tui_rhythm_core as core;
pub use tui_rhythm_engine as engine;
pub use tui_rhythm_input as input;
pub use tui_rhythm_term as term;
pub use tui_rhythm_types as types;
