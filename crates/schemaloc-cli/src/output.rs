//! Output formatting and writing utilities
//!
//! Schema text goes to stdout (or `--save-to`) untouched in human mode so it
//! can be piped; status lines go to stderr.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use schemaloc_core::{Diagnostic, PrefixKind, Resolution};
use serde::Serialize;
use std::io::{self, Write};

/// JSON shape of a resolve run
#[derive(Debug, Serialize)]
pub struct ResolveReport<'a> {
    pub locator: &'a str,
    #[serde(flatten)]
    pub resolution: &'a Resolution,
    #[serde(skip_serializing_if = "no_diagnostics")]
    pub diagnostics: &'a [Diagnostic],
}

fn no_diagnostics(diagnostics: &&[Diagnostic]) -> bool {
    diagnostics.is_empty()
}

/// JSON shape of a classify run
#[derive(Debug, Serialize)]
pub struct ClassifyReport<'a> {
    pub locator: &'a str,
    pub kind: PrefixKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writers(
            format,
            use_color,
            quiet,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    /// Create an output writer with custom destinations
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        status: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
            status,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a serializable value in the configured JSON flavor
    pub fn json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
            _ => serde_json::to_string(value)?,
        };
        writeln!(self.writer, "{}", rendered)?;
        Ok(())
    }

    /// Write schema text as resolved, ending it with a newline if it lacks one
    pub fn schema(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Write a plain line to the main output
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Write an informational status line, suppressed when quiet
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            writeln!(self.status, "{} {}", "info:".blue().bold(), message)?;
        } else {
            writeln!(self.status, "info: {}", message)?;
        }
        Ok(())
    }

    /// Write a warning status line; shown even when quiet
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            writeln!(self.status, "{} {}", "warning:".yellow().bold(), message)?;
        } else {
            writeln!(self.status, "warning: {}", message)?;
        }
        Ok(())
    }

    /// Human label for a prefix kind
    pub fn kind_label(&self, kind: PrefixKind) -> String {
        let label = match kind {
            PrefixKind::Literal => "inline JSON literal",
            PrefixKind::BundledResource => "bundled resource",
            PrefixKind::FilesystemFile => "filesystem file",
            PrefixKind::PropertyIndirection => "property indirection",
            PrefixKind::Unrecognized => "unrecognized",
        };
        if self.use_color {
            match kind {
                PrefixKind::Unrecognized => label.red().to_string(),
                _ => label.green().to_string(),
            }
        } else {
            label.to_string()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Shared buffer so tests can inspect what the writer produced
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let status = SharedBuffer::default();
        let writer = OutputWriter::with_writers(
            format,
            false,
            quiet,
            Box::new(out.clone()),
            Box::new(status.clone()),
        );
        (writer, out, status)
    }

    #[test]
    fn test_schema_output_adds_single_newline() {
        let (mut output, out, _) = writer(OutputFormat::Human, false);
        output.schema("{\"a\":1}").unwrap();
        output.schema("{}\n").unwrap();
        assert_eq!(out.contents(), "{\"a\":1}\n{}\n");
    }

    #[test]
    fn test_resolve_report_json() {
        let (mut output, out, _) = writer(OutputFormat::Json, false);
        let resolution = Resolution {
            kind: PrefixKind::PropertyIndirection,
            source_kind: PrefixKind::FilesystemFile,
            property: Some("SCHEMA".to_string()),
            text: "{}".to_string(),
            fallback: true,
        };
        output
            .json(&ResolveReport {
                locator: "${SCHEMA}",
                resolution: &resolution,
                diagnostics: &[],
            })
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(value["locator"], "${SCHEMA}");
        assert_eq!(value["kind"], "property_indirection");
        assert_eq!(value["source_kind"], "filesystem_file");
        assert_eq!(value["property"], "SCHEMA");
        assert_eq!(value["fallback"], true);
        assert_eq!(value["text"], "{}");
        assert!(value.get("diagnostics").is_none());
    }

    #[test]
    fn test_quiet_suppresses_info_but_not_warnings() {
        let (mut output, _, status) = writer(OutputFormat::Human, true);
        output.info("resolving").unwrap();
        output.warning("fell back").unwrap();
        assert_eq!(status.contents(), "warning: fell back\n");
    }
}
