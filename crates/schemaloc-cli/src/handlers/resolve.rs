//! Resolve command handler

use crate::cli::{OutputFormat, ResolveArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{OutputWriter, ResolveReport};
use schemaloc_core::{DiagnosticSink, MemorySink, SchemaLoader, TracingSink};
use std::fs;
use std::sync::Arc;

/// Handle the resolve command
pub fn handle_resolve(args: ResolveArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    if let Some(path) = &args.save_to {
        if path.is_dir() {
            return Err(Error::invalid_args(format!(
                "--save-to expects a file path, but {} is a directory",
                path.display()
            )));
        }
    }

    let resources = config.resources_for(&args);
    tracing::info!(roots = ?resources.roots(), "Using bundled resource directories");

    let env = config.properties_for(&args)?;
    let sink = Arc::new(MemorySink::new());
    let loader = SchemaLoader::with_resources(Arc::new(resources)).with_sink(sink.clone());

    output.info(&format!("Resolving {}", args.locator))?;
    let resolution = loader.resolve(&args.locator, env.as_ref())?;

    let diagnostics = sink.take();
    for diagnostic in &diagnostics {
        TracingSink.warn(diagnostic.clone());
    }

    if let Some(path) = &args.save_to {
        fs::write(path, &resolution.text)?;
        output.info(&format!("Schema written to {}", path.display()))?;
    }

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => output.json(&ResolveReport {
            locator: &args.locator,
            resolution: &resolution,
            diagnostics: &diagnostics,
        })?,
        OutputFormat::Human => {
            if resolution.fallback {
                output.warning("Locator could not be resolved; using the empty schema {}")?;
            } else {
                let label = output.kind_label(resolution.source_kind);
                match &resolution.property {
                    Some(key) => {
                        output.info(&format!("Resolved via property '{}' to {}", key, label))?
                    }
                    None => output.info(&format!("Resolved as {}", label))?,
                }
            }

            if args.save_to.is_none() {
                output.schema(&resolution.text)?;
            }
        }
    }

    if args.strict && resolution.fallback {
        return Err(Error::Fallback {
            locator: args.locator,
        });
    }
    Ok(())
}
