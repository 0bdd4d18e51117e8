//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, add, list, status) and shared utilities (open_db)
//! - `export` - Export commands (report CSV/text, flat expense CSV)
//! - `reports` - Report generation commands and period resolution
//! - `sync` - Simulated sync and sync log commands

pub mod core;
pub mod export;
pub mod reports;
pub mod sync;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use reports::*;
pub use sync::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
///
/// Counts chars, not bytes, so multi-byte titles never split mid-codepoint.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
