//! Parser option resolution: config file first, then command-line flags.

use anyhow::{Context, Result, bail};
use kestrel_parser::ParserOptions;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::args::CliArgs;

/// Parse parser options from JSON text.
///
/// Keys are the camelCase field names of [`ParserOptions`]; missing keys keep
/// their defaults. Unknown keys are rejected so that typos do not silently
/// fall back to a default.
pub fn parse_options(text: &str) -> Result<ParserOptions> {
    let value: Value = serde_json::from_str(text).context("config is not valid JSON")?;
    let Value::Object(map) = &value else {
        bail!("config must be a JSON object");
    };

    let known = serde_json::to_value(ParserOptions::default())?;
    let unknown: Vec<&str> = map
        .keys()
        .filter(|key| known.get(key.as_str()).is_none())
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        bail!("unknown parser option(s): {}", unknown.join(", "));
    }

    serde_json::from_value(value).context("invalid parser option value")
}

/// Read and parse a config file.
pub fn load_options(path: &Path) -> Result<ParserOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_options(&text).with_context(|| format!("in config {}", path.display()))
}

/// Options shared by every file of a run.
pub fn resolve_options(args: &CliArgs) -> Result<ParserOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None if args.es5 => ParserOptions::es5(),
        None => ParserOptions::default(),
    };

    if args.module {
        options.module_mode = true;
    }
    if args.strict {
        options.strict_mode = true;
    }
    if args.allow_return_outside_function {
        options.allow_return_outside_function = true;
    }

    debug!(?options, "resolved parser options");
    Ok(options)
}

/// Adjust shared options for one file. `.mjs` files are always modules and
/// `.cjs` files always scripts.
pub fn options_for_file(path: &Path, base: ParserOptions) -> ParserOptions {
    let mut options = base;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("mjs") => options.module_mode = true,
        Some("cjs") => options.module_mode = false,
        _ => {}
    }
    options
}
