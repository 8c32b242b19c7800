//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod default;
mod list;
mod tree;
mod utils;
mod validate;

pub use default::handle_default;
pub use list::handle_list;
pub use tree::handle_tree;
pub use validate::handle_validate;
