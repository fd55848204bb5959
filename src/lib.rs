//! TUI Fifteen (workspace facade crate).
//!
//! This package keeps the `tui_fifteen::{core,levels,input,term,types}`
//! public API in one place while the implementation lives in dedicated
//! crates under `crates/`.

pub use tui_fifteen_core as core;
pub use tui_fifteen_input as input;
pub use tui_fifteen_levels as levels;
pub use tui_fifteen_term as term;
pub use tui_fifteen_types as types;
