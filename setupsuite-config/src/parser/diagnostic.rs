//! Parser diagnostics
//!
//! The parser never rejects a document. Everything it had to skip, guess or
//! drop is reported here instead.

use crate::parser::lexer::Location;
use std::fmt;

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A block name no sub-parser is registered for
    UnknownBlock,
    /// A key the enclosing block does not define
    UnknownKey,
    /// A block that already appeared; the later one wins
    DuplicateBlock,
    /// End of input before the block's `}`
    UnterminatedBlock,
    /// End of the enclosing block or input before the array's `]`
    UnterminatedArray,
    /// A non-numeric value in an integer field
    InvalidInteger,
    /// A line with no meaning where it appears
    UnexpectedLine,
    /// An array where a scalar was expected
    TypeMismatch,
}

impl DiagnosticKind {
    /// Stable short name
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownBlock => "unknown-block",
            DiagnosticKind::UnknownKey => "unknown-key",
            DiagnosticKind::DuplicateBlock => "duplicate-block",
            DiagnosticKind::UnterminatedBlock => "unterminated-block",
            DiagnosticKind::UnterminatedArray => "unterminated-array",
            DiagnosticKind::InvalidInteger => "invalid-integer",
            DiagnosticKind::UnexpectedLine => "unexpected-line",
            DiagnosticKind::TypeMismatch => "type-mismatch",
        }
    }
}

/// A non-fatal finding tied to a source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]",
            self.location,
            self.message,
            self.kind.code()
        )
    }
}
