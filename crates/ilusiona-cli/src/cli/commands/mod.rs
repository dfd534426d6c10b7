//! CLI command handlers. Each command is in its own file.

mod check;
mod download;
mod fetch;
mod generate;

pub use check::run_check;
pub use fetch::run_fetch;
pub use generate::run_generate;
