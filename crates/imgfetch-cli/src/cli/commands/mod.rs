//! CLI command handlers. Each command is in its own file.

mod config;
mod fetch;
mod prompt;

pub use config::run_show_config;
pub use fetch::run_fetch;
pub use prompt::run_prompt;
