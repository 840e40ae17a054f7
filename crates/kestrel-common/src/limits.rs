//! Centralized limits and thresholds for the scanner and parser.
//!
//! Keeping these in one place prevents drifting duplicate definitions and
//! makes it easy to tune limits for constrained environments.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for parser recursion.
///
/// Every nested statement and every assignment-level expression increases
/// the parser's depth counter. One level of expression nesting costs a
/// chain of about ten native frames (assignment down to primary), so the
/// limit is kept low enough for a 2 MiB thread stack in debug builds. Past
/// it the parser emits `MAX_NESTING_DEPTH_EXCEEDED` and returns an error
/// placeholder instead of overflowing the native stack.
///
/// # Example
///
/// ```javascript
/// // thousands of nested parentheses / arrays / calls:
/// const x = ((((((((((((((((((((((((((((((((((((((1))))))))))))))))))))))))))))))))))))));
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;

// =============================================================================
// Diagnostic Limits
// =============================================================================

/// Maximum number of diagnostics recorded for a single file.
///
/// Pathological input (for example a binary blob fed to the parser) can
/// otherwise produce one diagnostic per byte. Once the limit is hit the
/// parser records a single `TOO_MANY_DIAGNOSTICS` entry and drops the rest,
/// while still producing a complete tree.
pub const MAX_DIAGNOSTICS_PER_FILE: usize = 1_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Bytes of source per pre-allocated token slot.
///
/// Typical JavaScript averages one token every four to six bytes; the
/// scanner reserves `source.len() / INITIAL_TOKEN_CAPACITY_DIVISOR` slots up
/// front, capped by `MAX_INITIAL_TOKEN_CAPACITY`.
pub const INITIAL_TOKEN_CAPACITY_DIVISOR: usize = 4;

/// Upper bound on the up-front token buffer reservation.
pub const MAX_INITIAL_TOKEN_CAPACITY: usize = 1 << 20;

/// Pre-allocation size for statement lists in blocks and programs.
pub const INITIAL_STATEMENT_CAPACITY: usize = 16;

// =============================================================================
// Source Size Limits
// =============================================================================

/// Largest byte offset a `Position` can carry.
///
/// Offsets are stored as `u32`, so sources are addressed up to 4 GiB. Past
/// that the scanner still runs to the end of the input without panicking,
/// but every position saturates at this offset and token text there is not
/// reliable. Lines and columns stay exact.
pub const MAX_SOURCE_OFFSET: u32 = u32::MAX;
