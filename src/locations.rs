//! Source locations of schema statements
//!
//! Compiled statements remember where they were declared so that
//! data model errors can point back at the module text.

use std::fmt;

/// Position of a statement inside a module source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    /// File name, if the statement came from a file
    pub file: Option<String>,
    /// Line number (1-based)
    pub line: usize,
    /// Character position within the line (0-based)
    pub column: usize,
}

impl SourceLocation {
    /// Create a location inside a named file
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    /// Create a location for an in-memory source
    pub fn anonymous(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(
                f,
                "in {} at line {}, column {}",
                file, self.line, self.column
            ),
            None => write!(f, "at line {}, column {}", self.line, self.column),
        }
    }
}
