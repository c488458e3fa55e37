//! Human-readable report output.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use hb_screen_core::{AnalysisResult, ResultOutput, Status};

/// Writes a plain-text screening report.
pub struct TextOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextOutput {
    /// Creates a text output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }
}

/// Renders the report for one result.
#[must_use]
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let subject = &result.subject;

    let _ = writeln!(out, "Hemoglobin screening: {}", result.source);
    if let Some(name) = &subject.name {
        let _ = writeln!(out, "  Name:       {name}");
    }
    if let Some(age) = subject.age {
        let _ = writeln!(out, "  Age:        {age}");
    }
    let _ = writeln!(out, "  Sex:        {}", subject.sex);
    let _ = writeln!(out, "  Tested:     {}", result.timestamp);
    let _ = writeln!(
        out,
        "  Hemoglobin: {} g/dL{}",
        result.hemoglobin.value(),
        if result.hemoglobin.is_fallback() {
            " (placeholder, model unavailable)"
        } else {
            ""
        }
    );
    let _ = writeln!(out, "  Threshold:  {} g/dL", result.threshold);
    let _ = writeln!(out, "  Status:     {}", result.status);
    out.push('\n');

    let heading = match result.status {
        Status::Anemic => "Iron-rich food suggestions:",
        Status::Normal => "General health tips:",
    };
    let _ = writeln!(out, "{heading}");
    for advice in &result.advice {
        let _ = writeln!(out, "  - {}", advice.text);
    }

    if let Some(clinics) = &result.clinics {
        out.push('\n');
        let _ = writeln!(out, "Clinics near {}:", clinics.location);
        let _ = writeln!(out, "  {}", clinics.map_url);
    } else if result.prompt_for_location {
        out.push('\n');
        let _ = writeln!(out, "Enter your location to view nearby clinics.");
    }

    out
}

impl ResultOutput for TextOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn present(&self, result: &AnalysisResult) -> Result<()> {
        let report = render(result);
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
