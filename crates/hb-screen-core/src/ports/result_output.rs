//! Presentation port for finished screening results.

use crate::domain::AnalysisResult;

/// Port for presenting a screening result to the user.
pub trait ResultOutput: Send + Sync {
    /// Renders a result (JSON document, text report, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be rendered or written.
    fn present(&self, result: &AnalysisResult) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
