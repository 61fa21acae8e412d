//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod classify;
mod completions;
mod resolve;

pub use classify::handle_classify;
pub use completions::handle_completions;
pub use resolve::handle_resolve;
