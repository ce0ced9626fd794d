//! Terminal UI for the watch-rerun binary
//!
//! - `views` - Renders watch events as human-readable lines
//! - `blocks` / `primitives` - Header, error block, icons, colored text
//! - `context` / `terminal` - Color and unicode decisions
//! - `json` - NDJSON output
//! - `error` / `output` - Error and config-warning reporting

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
