//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Options fixed for the lifetime of one parse.
///
/// Deserializes from camelCase JSON; every field is optional. ECMAScript
/// feature toggles default to enabled. Syntax guarded by a disabled toggle
/// is still parsed but reported as `FEATURE_DISABLED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Parse as if the source began with `"use strict"`.
    pub strict_mode: bool,
    /// Parse as an ES module (implies strict mode, enables import/export).
    pub module_mode: bool,
    /// JSX syntax. Not supported; reported as a warning when set.
    pub jsx_mode: bool,
    /// TypeScript syntax. Not supported; reported as a warning when set.
    pub typescript_mode: bool,
    /// Accept `return` at the top level (CommonJS wrappers, REPLs).
    pub allow_return_outside_function: bool,

    pub optional_chaining: bool,
    pub nullish_coalescing: bool,
    pub exponent_operator: bool,
    pub bigint: bool,
    pub dynamic_import: bool,
    pub import_meta: bool,
    pub top_level_await: bool,
    pub class_fields: bool,
    pub private_fields: bool,
    pub static_blocks: bool,
    pub async_functions: bool,
    pub generators: bool,
    pub template_literals: bool,
    pub arrow_functions: bool,
    pub destructuring: bool,
    pub spread: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            strict_mode: false,
            module_mode: false,
            jsx_mode: false,
            typescript_mode: false,
            allow_return_outside_function: false,
            optional_chaining: true,
            nullish_coalescing: true,
            exponent_operator: true,
            bigint: true,
            dynamic_import: true,
            import_meta: true,
            top_level_await: true,
            class_fields: true,
            private_fields: true,
            static_blocks: true,
            async_functions: true,
            generators: true,
            template_literals: true,
            arrow_functions: true,
            destructuring: true,
            spread: true,
        }
    }
}

impl ParserOptions {
    /// Default options in module mode.
    pub fn module() -> Self {
        ParserOptions {
            module_mode: true,
            ..ParserOptions::default()
        }
    }

    /// Default options with only the ES5 grammar enabled.
    pub fn es5() -> Self {
        ParserOptions {
            optional_chaining: false,
            nullish_coalescing: false,
            exponent_operator: false,
            bigint: false,
            dynamic_import: false,
            import_meta: false,
            top_level_await: false,
            class_fields: false,
            private_fields: false,
            static_blocks: false,
            async_functions: false,
            generators: false,
            template_literals: false,
            arrow_functions: false,
            destructuring: false,
            spread: false,
            ..ParserOptions::default()
        }
    }

    /// Strict from the first token.
    pub fn is_strict(&self) -> bool {
        self.strict_mode || self.module_mode
    }
}
