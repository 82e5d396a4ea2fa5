//! `.sscfg` Parser
//!
//! Recursive descent over classified lines. Each block sub-parser consumes its
//! own closer, so a `}` always closes the nearest open block.

use crate::parser::diagnostic::{Diagnostic, DiagnosticKind};
use crate::parser::field::{Field, FieldValue};
use crate::parser::lexer::{classify, Line, LineKind, Location, Spanned};
use crate::parser::registry::{BlockBody, BlockRegistry};
use crate::parser::schema;
use setupsuite_core::ConfigTree;

/// Result of a parse: the tree plus everything the parser tolerated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub tree: ConfigTree,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parser state
pub struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    blocks: BlockRegistry<ConfigTree>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a parser for `source` with the standard top-level blocks
    pub fn new(source: &'a str) -> Self {
        Self::with_blocks(source, schema::top_level_blocks())
    }

    /// Create a parser with a custom set of top-level blocks
    pub fn with_blocks(source: &'a str, blocks: BlockRegistry<ConfigTree>) -> Self {
        Self {
            lines: classify(source).significant().collect(),
            pos: 0,
            blocks,
            diagnostics: Vec::new(),
        }
    }

    /// Parse the entire document
    pub fn parse(mut self) -> Parsed {
        let mut tree = ConfigTree::default();

        while let Some(line) = self.peek().cloned() {
            match line.kind {
                LineKind::BlockOpen { name } => match self.blocks.get(name) {
                    Some(handler) => handler(&mut self, &mut tree),
                    None => self.skip_unknown_block(name),
                },
                LineKind::BlockClose => {
                    self.report(
                        DiagnosticKind::UnexpectedLine,
                        line.span,
                        "'}' without a matching block opener",
                    );
                    self.bump();
                }
                _ => {
                    self.report(
                        DiagnosticKind::UnexpectedLine,
                        line.span,
                        format!("'{}' outside of any block ignored", line.text),
                    );
                    self.bump();
                }
            }
        }

        Parsed {
            tree,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================
    // Blocks
    // ========================================

    /// Parse the block under the cursor into `slot`, replacing a previous one.
    pub fn parse_into<T: BlockBody>(&mut self, slot: &mut Option<T>) {
        if slot.is_some() {
            let (name, location) = self.opener();
            self.report(
                DiagnosticKind::DuplicateBlock,
                location,
                format!("repeated .{}{{}} block replaces the earlier one", name),
            );
        }
        *slot = Some(self.parse_block());
    }

    /// Parse the block under the cursor into a fresh `T`.
    pub fn parse_block<T: BlockBody>(&mut self) -> T {
        let (name, opener) = self.opener();
        self.bump();

        let mut block = T::default();
        let nested = T::nested();

        loop {
            let Some(line) = self.peek().cloned() else {
                self.report(
                    DiagnosticKind::UnterminatedBlock,
                    opener,
                    format!(".{}{{ is never closed; closed at end of input", name),
                );
                break;
            };

            match line.kind {
                LineKind::BlockClose => {
                    self.bump();
                    break;
                }
                LineKind::BlockOpen { name: child } => match nested.get(child) {
                    Some(handler) => handler(self, &mut block),
                    None => self.skip_unknown_block(child),
                },
                LineKind::KeyValue { key, value } => {
                    self.bump();
                    let value = if value.is_empty() && self.at_array_bracket() {
                        FieldValue::Array(self.parse_array(key, line.span))
                    } else {
                        FieldValue::Scalar(value)
                    };
                    self.assign(&mut block, key, value, line.span);
                }
                LineKind::ArrayOpen { key } => {
                    self.bump();
                    let items = self.parse_array(key, line.span);
                    self.assign(&mut block, key, FieldValue::Array(items), line.span);
                }
                LineKind::InlineArray { key, items } => {
                    self.bump();
                    self.assign(&mut block, key, FieldValue::Array(items), line.span);
                }
                _ => {
                    self.report(
                        DiagnosticKind::UnexpectedLine,
                        line.span,
                        format!("'{}' ignored in .{}{{}}", line.text, name),
                    );
                    self.bump();
                }
            }
        }

        block
    }

    fn assign<T: BlockBody>(
        &mut self,
        block: &mut T,
        key: &'a str,
        value: FieldValue<'a>,
        location: Location,
    ) {
        let field = Field {
            key,
            value,
            location,
        };
        block.assign(field, &mut self.diagnostics);
    }

    /// Skip a block nobody registered for, nested blocks included, so that
    /// its closers never close the enclosing block.
    fn skip_unknown_block(&mut self, name: &str) {
        let (_, location) = self.opener();
        self.report(
            DiagnosticKind::UnknownBlock,
            location,
            format!("unknown block .{}{{}} skipped", name),
        );
        self.skip_block();
    }

    fn skip_block(&mut self) {
        let (name, opener) = self.opener();
        self.bump();

        loop {
            match self.peek().map(|line| &line.kind) {
                None => {
                    self.report(
                        DiagnosticKind::UnterminatedBlock,
                        opener,
                        format!(".{}{{ is never closed; closed at end of input", name),
                    );
                    return;
                }
                Some(LineKind::BlockClose) => {
                    self.bump();
                    return;
                }
                Some(LineKind::BlockOpen { .. }) => self.skip_block(),
                Some(_) => self.bump(),
            }
        }
    }

    // ========================================
    // Arrays
    // ========================================

    /// Collect array items up to `]`. The cursor is on the line after `key: [`
    /// (or after `key:`, with a lone `[` next).
    fn parse_array(&mut self, key: &str, opener: Location) -> Vec<Spanned<&'a str>> {
        let mut items = Vec::new();

        loop {
            let Some(line) = self.peek() else {
                self.report(
                    DiagnosticKind::UnterminatedArray,
                    opener,
                    format!("array '{}' is never closed; closed at end of input", key),
                );
                break;
            };

            match line.kind {
                LineKind::ArrayClose => {
                    self.bump();
                    break;
                }
                LineKind::ArrayBracket => self.bump(),
                // Leave the closer to the enclosing block
                LineKind::BlockClose => {
                    self.report(
                        DiagnosticKind::UnterminatedArray,
                        opener,
                        format!("array '{}' is never closed; closed by the enclosing block", key),
                    );
                    break;
                }
                _ => {
                    items.push(Spanned::new(line.text, line.span));
                    self.bump();
                }
            }
        }

        items
    }

    fn at_array_bracket(&self) -> bool {
        matches!(self.peek().map(|line| &line.kind), Some(LineKind::ArrayBracket))
    }

    // ========================================
    // Cursor
    // ========================================

    fn peek(&self) -> Option<&Line<'a>> {
        self.lines.get(self.pos)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Name and location of the block opener under the cursor
    fn opener(&self) -> (&'a str, Location) {
        match self.peek() {
            Some(Line {
                kind: LineKind::BlockOpen { name },
                span,
                ..
            }) => (*name, *span),
            Some(line) => ("", line.span),
            None => ("", Location::default()),
        }
    }

    fn report(&mut self, kind: DiagnosticKind, location: Location, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(kind, location, message));
    }
}

/// Parse a `.sscfg` source string, keeping diagnostics
pub fn parse_with_diagnostics(source: &str) -> Parsed {
    Parser::new(source).parse()
}

/// Parse a `.sscfg` source string
pub fn parse(source: &str) -> ConfigTree {
    parse_with_diagnostics(source).tree
}
