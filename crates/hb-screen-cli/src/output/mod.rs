//! Output formatting for CLI.

mod json;
mod progress;
mod text;

pub use json::JsonOutput;
pub use progress::ProgressSpinner;
pub use text::TextOutput;
