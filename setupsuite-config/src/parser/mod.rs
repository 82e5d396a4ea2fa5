//! Parser module for `.sscfg` documents
//!
//! This module provides the line classifier, value normalizer, block registry
//! and recursive-descent parser.

pub mod diagnostic;
pub mod field;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod schema;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use field::{Field, FieldValue};
pub use lexer::{classify, Line, LineKind, Lines, Location, Spanned, Token};
pub use normalize::{normalize, normalize_int, ConversionError};
pub use parser::{parse, parse_with_diagnostics, Parsed, Parser};
pub use registry::{BlockBody, BlockHandler, BlockRegistry};
