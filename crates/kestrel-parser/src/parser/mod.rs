//! Recursive-descent parser over a scanned token buffer.
//!
//! `ParserState` owns the cursor, the context flags and the diagnostics.
//! The grammar is split by area across the `state_*` modules, each adding
//! methods to `ParserState`.

mod diagnostics;
mod options;
mod state;
mod state_declarations;
mod state_expressions;
mod state_modules;
mod state_statements;

pub use diagnostics::{ParseError, ParseWarning};
pub use options::ParserOptions;
pub use state::{ContextFlags, ParserState};

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;

#[cfg(test)]
#[path = "tests/recovery_tests.rs"]
mod recovery_tests;
