//! Common types and utilities for the kestrel ECMAScript front end.
//!
//! This crate provides foundational types used across all kestrel crates:
//! - Source positions (`Position`, `Span`, `SourceLocation`, `LineMap`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`) and the message table
//! - Parser limits and thresholds

// Position/Span types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, SourceLocation, Span};

// Diagnostic types and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
