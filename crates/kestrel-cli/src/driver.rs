//! Reads, tokenizes and parses the files named on the command line.

use anyhow::{Context, Result};
use kestrel_common::Diagnostic;
use kestrel_parser::printer::to_sexpr;
use kestrel_parser::{ParseResult, ParserOptions, parse_with_file_name};
use kestrel_scanner::{Token, tokenize};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use crate::args::{CliArgs, DiagnosticFormat, Emit};
use crate::config::{options_for_file, resolve_options};
use crate::reporter::{Reporter, summary};

/// Process exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

/// Worker stack size. Parsing recurses once per nesting level.
const PARSE_STACK_SIZE: usize = 32 * 1024 * 1024;

/// One processed file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Name attached to diagnostics.
    pub file_name: String,
    pub source: String,
    pub options: ParserOptions,
    pub result: ParseResult,
    /// Filled only for `--emit tokens`.
    pub tokens: Vec<Token>,
}

impl FileOutcome {
    /// Errors and (optionally) warnings in source order.
    pub fn diagnostics(&self, include_warnings: bool) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> =
            self.result.errors.iter().map(Diagnostic::from).collect();
        if include_warnings {
            diagnostics.extend(self.result.warnings.iter().map(Diagnostic::from));
        }
        diagnostics.sort_by_key(|diagnostic| diagnostic.span.start.offset);
        diagnostics
    }
}

/// Everything a run produced, in command-line order.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub files: Vec<FileOutcome>,
}

impl RunOutcome {
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|file| file.result.errors.len()).sum()
    }

    pub fn files_with_errors(&self) -> usize {
        self.files.iter().filter(|file| file.result.has_errors()).count()
    }

    pub fn exit_code(&self) -> i32 {
        if self.error_count() > 0 {
            EXIT_DIAGNOSTICS
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Read and parse every input. I/O and configuration problems are errors;
/// syntax problems are data in the outcome.
pub fn run(args: &CliArgs) -> Result<RunOutcome> {
    let base = resolve_options(args)?;
    let want_tokens = args.emit == Emit::Tokens;

    let sources = args
        .files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
                .map(|source| (path.clone(), source))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(PARSE_STACK_SIZE);
    if let Some(jobs) = args.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder
        .build()
        .context("failed to start the parser thread pool")?;

    let files = pool.install(|| {
        sources
            .into_par_iter()
            .map(|(path, source)| process_file(path, source, base, want_tokens))
            .collect::<Vec<_>>()
    });

    let outcome = RunOutcome { files };
    debug!(
        files = outcome.files.len(),
        errors = outcome.error_count(),
        "run finished"
    );
    Ok(outcome)
}

fn process_file(
    path: PathBuf,
    source: String,
    base: ParserOptions,
    want_tokens: bool,
) -> FileOutcome {
    let file_name = path.display().to_string();
    let _span = info_span!("file", name = %file_name).entered();
    let options = options_for_file(&path, base);
    let tokens = if want_tokens {
        tokenize(&source).0
    } else {
        Vec::new()
    };
    let result = parse_with_file_name(&file_name, &source, options);
    FileOutcome {
        path,
        file_name,
        source,
        options,
        result,
        tokens,
    }
}

/// The `--emit` output for every file.
pub fn render_emit(outcome: &RunOutcome, args: &CliArgs) -> Result<String> {
    let mut out = String::new();
    let with_headers = outcome.files.len() > 1;
    for file in &outcome.files {
        match args.emit {
            Emit::Nothing => {}
            Emit::Tokens => {
                write_header(&mut out, with_headers, &file.path);
                for token in &file.tokens {
                    let _ = writeln!(
                        out,
                        "{}:{}\t{:?}\t{:?}",
                        token.span.start.line, token.span.start.column, token.kind, token.text
                    );
                }
            }
            Emit::Sexpr => {
                write_header(&mut out, with_headers, &file.path);
                out.push_str(&to_sexpr(&file.result.program));
                out.push('\n');
            }
            Emit::Ast => {
                out.push_str(&to_json(&file.result.program, args.pretty)?);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

fn write_header(out: &mut String, enabled: bool, path: &Path) {
    if enabled {
        let _ = writeln!(out, "==> {} <==", path.display());
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("failed to serialize output")
}

/// Diagnostics for every file, as text or JSON.
pub fn render_diagnostics(outcome: &RunOutcome, args: &CliArgs, color: bool) -> Result<String> {
    let include_warnings = !args.no_warnings;
    match args.format {
        DiagnosticFormat::Json => {
            let diagnostics: Vec<Diagnostic> = outcome
                .files
                .iter()
                .flat_map(|file| file.diagnostics(include_warnings))
                .collect();
            let mut out = to_json(&diagnostics, args.pretty)?;
            out.push('\n');
            Ok(out)
        }
        DiagnosticFormat::Text => {
            let mut reporter = Reporter::new(color);
            let mut out = String::new();
            for file in &outcome.files {
                let diagnostics = file.diagnostics(include_warnings);
                if diagnostics.is_empty() {
                    continue;
                }
                reporter.add_source(file.file_name.clone(), file.source.clone());
                out.push_str(&reporter.render(&diagnostics));
            }
            let summary = summary(outcome.error_count(), outcome.files_with_errors());
            if !summary.is_empty() {
                out.push('\n');
                out.push_str(&summary);
                out.push('\n');
            }
            Ok(out)
        }
    }
}
