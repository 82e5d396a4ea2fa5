//! Block registry
//!
//! Maps block names to the sub-parsers that understand them, so a new block
//! kind is one `register` call away instead of another branch in the parser.

use crate::parser::diagnostic::Diagnostic;
use crate::parser::field::Field;
use crate::parser::parser::Parser;
use std::collections::HashMap;
use std::fmt;

/// Sub-parser for a block nested in `T`.
///
/// Called with the cursor on the block's opener; must leave it on the first
/// line after the block's closer.
pub type BlockHandler<T> = fn(&mut Parser<'_>, &mut T);

/// Block name to sub-parser lookup
pub struct BlockRegistry<T> {
    handlers: HashMap<String, BlockHandler<T>>,
}

impl<T> BlockRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, replacing any previous one for `name`
    pub fn register(&mut self, name: impl Into<String>, handler: BlockHandler<T>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, handler: BlockHandler<T>) -> Self {
        self.register(name, handler);
        self
    }

    /// Get the handler for a block name
    pub fn get(&self, name: &str) -> Option<BlockHandler<T>> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered block names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T> Default for BlockRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BlockRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<T> fmt::Debug for BlockRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("blocks", &self.names())
            .finish()
    }
}

/// A block's payload type: how to start one, which blocks may nest inside it
/// and how to record its fields.
pub trait BlockBody: Default {
    /// Sub-parsers for blocks nested directly inside this one
    fn nested() -> BlockRegistry<Self> {
        BlockRegistry::new()
    }

    /// Record one `key: value` or `key: [...]` field
    fn assign(&mut self, field: Field<'_>, diagnostics: &mut Vec<Diagnostic>);
}
