//! Fields handed from the parser to a block

use crate::parser::diagnostic::{Diagnostic, DiagnosticKind};
use crate::parser::lexer::{Location, Spanned};
use crate::parser::normalize::{normalize, normalize_int};
use std::num::ParseIntError;
use std::str::FromStr;

/// Raw value of a field, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// `key: value`
    Scalar(&'a str),
    /// `key: [ ... ]`, one entry per item
    Array(Vec<Spanned<&'a str>>),
}

/// One `key: value` or `key: [...]` entry of a block body
#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: FieldValue<'a>,
    /// Location of the line holding the key
    pub location: Location,
}

impl Field<'_> {
    /// Normalized scalar. Arrays are reported and ignored.
    pub fn string(&self, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
        match &self.value {
            FieldValue::Scalar(raw) => Some(normalize(raw)),
            FieldValue::Array(_) => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::TypeMismatch,
                    self.location,
                    format!("'{}' expects a single value, not an array", self.key),
                ));
                None
            }
        }
    }

    /// Normalized integer scalar; `None` (and a diagnostic) when it does not convert.
    pub fn integer<T>(&self, diagnostics: &mut Vec<Diagnostic>) -> Option<T>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let FieldValue::Scalar(raw) = &self.value else {
            self.string(diagnostics);
            return None;
        };
        match normalize_int(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidInteger,
                    self.location,
                    format!("'{}' left unset: {}", self.key, err),
                ));
                None
            }
        }
    }

    /// Normalized items, empty ones dropped. A scalar counts as a one-item array.
    pub fn strings(&self) -> Vec<String> {
        self.raw_items()
            .map(normalize)
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Items converted to integers; items that do not convert are reported and skipped.
    pub fn integers<T>(&self, diagnostics: &mut Vec<Diagnostic>) -> Vec<T>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let items: Vec<(&str, Location)> = match &self.value {
            FieldValue::Scalar(raw) => vec![(*raw, self.location)],
            FieldValue::Array(items) => items.iter().map(|item| (item.value, item.span)).collect(),
        };

        let mut values = Vec::with_capacity(items.len());
        for (raw, location) in items {
            if normalize(raw).is_empty() {
                continue;
            }
            match normalize_int(raw) {
                Ok(value) => values.push(value),
                Err(err) => diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidInteger,
                    location,
                    format!("'{}' item skipped: {}", self.key, err),
                )),
            }
        }
        values
    }

    /// The value as one string; array items are joined with `,`.
    pub fn joined(&self) -> String {
        match &self.value {
            FieldValue::Scalar(raw) => normalize(raw),
            FieldValue::Array(_) => self.strings().join(","),
        }
    }

    /// Report this field as not belonging to `block`.
    pub fn unknown(&self, block: &str, diagnostics: &mut Vec<Diagnostic>) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnknownKey,
            self.location,
            format!("unknown key '{}' in .{}{{}} ignored", self.key, block),
        ));
    }

    fn raw_items(&self) -> impl Iterator<Item = &str> + '_ {
        let items: Vec<&str> = match &self.value {
            FieldValue::Scalar(raw) => vec![*raw],
            FieldValue::Array(items) => items.iter().map(|item| item.value).collect(),
        };
        items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array<'a>(items: &[&'a str]) -> Field<'a> {
        Field {
            key: "open_ports",
            value: FieldValue::Array(
                items
                    .iter()
                    .map(|item| Spanned::new(*item, Location::default()))
                    .collect(),
            ),
            location: Location::default(),
        }
    }

    #[test]
    fn test_scalar_as_array() {
        let field = Field {
            key: "tools",
            value: FieldValue::Scalar(r#""git","#),
            location: Location::default(),
        };
        assert_eq!(field.strings(), vec!["git"]);
    }

    #[test]
    fn test_array_as_scalar_is_reported() {
        let mut diagnostics = Vec::new();
        assert_eq!(array(&["1"]).string(&mut diagnostics), None);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::TypeMismatch);
    }

    #[test]
    fn test_integers_skip_bad_items() {
        let mut diagnostics = Vec::new();
        let ports: Vec<u16> = array(&["80,", "http,", "", "443"]).integers(&mut diagnostics);
        assert_eq!(ports, vec![80, 443]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidInteger);
    }

    #[test]
    fn test_joined() {
        assert_eq!(array(&[r#""a","#, "b"]).joined(), "a,b");
    }
}
