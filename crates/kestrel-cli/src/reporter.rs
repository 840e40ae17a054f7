use colored::Colorize;
use kestrel_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Renders diagnostics as `file:line:col - error K1005: message` followed
/// by the offending source line with a `~` underline.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register source text so snippets do not need to re-read the file.
    pub fn add_source(&mut self, file: impl Into<String>, source: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, source.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        if diagnostic.file.is_empty() {
            output.push_str("<unknown>");
        } else {
            output.push_str(&format!(
                "{}:{}:{}",
                diagnostic.file, diagnostic.span.start.line, diagnostic.span.start.column
            ));
        }

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) = self.format_snippet(diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    /// Example:
    ///     2   let x = ;
    ///                 ~
    fn format_snippet(&mut self, diagnostic: &Diagnostic) -> Option<String> {
        let file = &*diagnostic.file;
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let map = LineMap::build(self.sources.get(file)?);
            self.line_maps.insert(file.to_string(), map);
        }
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;

        let start = diagnostic.span.start;
        let end = diagnostic.span.end;
        let line_start = line_map.line_start(start.line)? as usize;
        let line_end = line_map
            .line_start(start.line + 1)
            .map_or(source.len(), |next| next as usize);
        let line_text = source
            .get(line_start..line_end)?
            .trim_end_matches(['\n', '\r']);

        // Columns are 1-based and count characters. A span running past the
        // end of the line is underlined to the line end.
        let first = start.column.saturating_sub(1) as usize;
        let last = if end.line == start.line {
            (end.column.saturating_sub(1) as usize).max(first + 1)
        } else {
            usize::MAX
        };

        let mut underline = String::new();
        for (index, ch) in line_text.chars().enumerate() {
            if index >= last {
                break;
            }
            let width = if ch == '\t' { 4 } else { 1 };
            let mark = if index < first { ' ' } else { '~' };
            for _ in 0..width {
                underline.push(mark);
            }
        }
        // End-of-line and end-of-file diagnostics point just past the text.
        if !underline.contains('~') {
            underline.push('~');
        }

        let display_line = line_text.replace('\t', "    ");
        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {:>3}   {}\n        {}", start.line, display_line, underline))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if file.is_empty() {
            return None;
        }
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("K{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

/// `Found 3 errors in 2 files.` style summary; empty when nothing failed.
pub fn summary(error_count: usize, file_count: usize) -> String {
    match (error_count, file_count) {
        (0, _) => String::new(),
        (1, _) => "Found 1 error.".to_string(),
        (n, 1) => format!("Found {n} errors."),
        (n, files) => format!("Found {n} errors in {files} files."),
    }
}
