use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the kestrel binary.
#[derive(Parser, Debug)]
#[command(
    name = "kestrel",
    version,
    about = "Tokenize and parse ECMAScript files, reporting syntax diagnostics"
)]
pub struct CliArgs {
    /// Source files to process.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    // ==================== Output ====================
    /// What to print for each file besides diagnostics.
    #[arg(long, value_enum, default_value_t = Emit::Nothing)]
    pub emit: Emit,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = DiagnosticFormat::Text)]
    pub format: DiagnosticFormat,

    /// Disable colored diagnostics even on a terminal.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not report warnings.
    #[arg(long = "no-warnings")]
    pub no_warnings: bool,

    // ==================== Parser Options ====================
    /// JSON file with parser options (camelCase keys, e.g. `moduleMode`).
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Parse every file as an ES module.
    #[arg(short = 'm', long)]
    pub module: bool,

    /// Parse scripts in strict mode.
    #[arg(long)]
    pub strict: bool,

    /// Accept `return` outside of functions.
    #[arg(long = "allow-return-outside-function")]
    pub allow_return_outside_function: bool,

    /// Start from the ES5 feature set instead of the latest one.
    #[arg(long)]
    pub es5: bool,

    // ==================== Execution ====================
    /// Number of worker threads (defaults to the number of CPUs).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Per-file output selected with `--emit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// One line per token: position, kind and text.
    Tokens,
    /// The syntax tree as JSON.
    Ast,
    /// The syntax tree as an s-expression.
    Sexpr,
    /// Diagnostics only.
    #[value(name = "none")]
    Nothing,
}

/// How diagnostics are written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DiagnosticFormat {
    Text,
    Json,
}
