//! Line classifier for `.sscfg` documents
//!
//! The language is line oriented: every trimmed line is one record whose kind
//! is decided by its shape.
//!
//! Key features:
//! - Blank lines and `#` comment lines are trivia (filtered by [`Lines::significant`])
//! - `.name{` opens a block, `}` / `},` closes it
//! - `key: [` opens an array, `]` / `],` closes it, `key: [a, b]` is a one-line array
//! - `key: value` splits on the first colon outside a quoted string
//! - Anything else is plain [`LineKind::Text`]; classification never fails

use logos::{Logos, Span};
use std::fmt;

/// Source location for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// 1-based line number
    pub line: usize,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Location {
    pub fn new(line: usize, span: Span) -> Self {
        Self {
            line,
            start: span.start,
            end: span.end,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

/// A value with its location in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Location,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Location) -> Self {
        Self { value, span }
    }
}

/// Tokens inside a single line.
///
/// Only used to find structural colons and commas: the ones inside a quoted
/// string are part of the value.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f\r]+")]
pub enum Token {
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    /// Quoted string literal: "..."
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    /// Bare word (unquoted value, number, path, key...)
    #[regex(r#"[^ \t\r\n\f{}\[\]:,"]+"#)]
    Word,
}

/// What a line is, judged from its trimmed text alone
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// `.name{`
    BlockOpen { name: &'a str },
    /// `}` or `},`
    BlockClose,
    /// `key: [` with the items on the following lines
    ArrayOpen { key: &'a str },
    /// A lone `[`, continuing a preceding `key:` line
    ArrayBracket,
    /// `]` or `],`
    ArrayClose,
    /// `key: [a, "b",]` on one line
    InlineArray {
        key: &'a str,
        items: Vec<Spanned<&'a str>>,
    },
    /// `key: value`; the value is raw (quotes and commas still attached)
    KeyValue { key: &'a str, value: &'a str },
    /// Any other shape; also what array items usually look like
    Text,
}

/// One classified line
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// Trimmed text
    pub text: &'a str,
    /// Location of the trimmed text
    pub span: Location,
    pub kind: LineKind<'a>,
}

impl Line<'_> {
    /// Blank and comment lines carry nothing for the parser.
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, LineKind::Blank | LineKind::Comment)
    }

    pub fn is_significant(&self) -> bool {
        !self.is_trivia()
    }
}

/// Lazy iterator over the classified lines of a document.
///
/// Cloning it restarts nothing but yields an independent cursor; call
/// [`classify`] again to start over.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> Lines<'a> {
    /// Only the lines the parser cares about.
    pub fn significant(self) -> impl Iterator<Item = Line<'a>> + Clone {
        self.filter(Line::is_significant)
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.source.len() {
            return None;
        }

        let rest = &self.source[self.offset..];
        let (raw, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        let start = self.offset + (raw.len() - raw.trim_start().len());
        self.offset += consumed;
        self.line += 1;

        let text = raw.trim();
        let span = Location {
            line: self.line,
            start,
            end: start + text.len(),
        };
        Some(Line {
            text,
            span,
            kind: classify_line(text, span),
        })
    }
}

/// Classify every line of `source`.
///
/// A leading byte order mark is skipped; spans stay relative to `source`.
pub fn classify(source: &str) -> Lines<'_> {
    let offset = if source.starts_with(BOM) { BOM.len_utf8() } else { 0 };
    Lines {
        source,
        offset,
        line: 0,
    }
}

const BOM: char = '\u{feff}';

/// Classify one trimmed line located at `span`.
pub fn classify_line(text: &str, span: Location) -> LineKind<'_> {
    if text.is_empty() {
        return LineKind::Blank;
    }
    if text.starts_with('#') {
        return LineKind::Comment;
    }
    if text.starts_with('.') && text.ends_with('{') {
        return LineKind::BlockOpen {
            name: text[1..text.len() - 1].trim(),
        };
    }
    match text {
        "}" | "}," => return LineKind::BlockClose,
        "]" | "]," => return LineKind::ArrayClose,
        "[" => return LineKind::ArrayBracket,
        _ => {}
    }
    if text.starts_with('.') {
        return LineKind::Text;
    }

    let Some(colon) = first_colon(text) else {
        return LineKind::Text;
    };
    let key = text[..colon.start].trim();
    if key.is_empty() {
        return LineKind::Text;
    }

    let after = &text[colon.end..];
    let value = after.trim();
    let value_start = span.start + colon.end + (after.len() - after.trim_start().len());

    if value == "[" {
        return LineKind::ArrayOpen { key };
    }
    if value.starts_with('[') && (value.ends_with(']') || value.ends_with("],")) {
        return LineKind::InlineArray {
            key,
            items: inline_items(value, value_start, span.line),
        };
    }
    LineKind::KeyValue { key, value }
}

/// Span of the first colon that is not inside a quoted string.
fn first_colon(text: &str) -> Option<Span> {
    Token::lexer(text)
        .spanned()
        .find(|(token, _)| matches!(token, Ok(Token::Colon)))
        .map(|(_, span)| span)
}

/// Split `[a, "b", c,]` into its raw items.
///
/// Items are the text between commas outside quoted strings; empty items
/// (trailing commas) are dropped. `base` is the absolute offset of `value`.
fn inline_items(value: &str, base: usize, line: usize) -> Vec<Spanned<&str>> {
    let mut items = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    let mut flush = |current: &mut Option<(usize, usize)>| {
        if let Some((start, end)) = current.take() {
            items.push(Spanned::new(
                &value[start..end],
                Location::new(line, base + start..base + end),
            ));
        }
    };

    for (token, span) in Token::lexer(value).spanned() {
        match token {
            Ok(Token::BracketOpen) if span.start == 0 => {}
            Ok(Token::Comma) => flush(&mut current),
            Ok(Token::BracketClose) => {
                flush(&mut current);
                break;
            }
            _ => {
                let start = current.map_or(span.start, |(start, _)| start);
                current = Some((start, span.end));
            }
        }
    }
    flush(&mut current);

    items
}
