//! Classify command handler

use crate::cli::{ClassifyArgs, OutputFormat};
use crate::error::Result;
use crate::output::{ClassifyReport, OutputWriter};
use schemaloc_core::{classify, property_key, PrefixKind};

/// Handle the classify command
pub fn handle_classify(args: ClassifyArgs, output: &mut OutputWriter) -> Result<()> {
    let kind = classify(&args.locator, !args.no_env);
    let property = (kind == PrefixKind::PropertyIndirection).then(|| property_key(&args.locator));

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => output.json(&ClassifyReport {
            locator: &args.locator,
            kind,
            property,
        }),
        OutputFormat::Human => {
            let label = output.kind_label(kind);
            match property {
                Some(key) => output.line(&format!("{} (property '{}')", label, key)),
                None => output.line(&label),
            }
        }
    }
}
