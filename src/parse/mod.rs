//! Formspec front ends: the tag stream and the JSON document.
//!
//! Both produce an [`ElementTree`] below a synthetic root that covers the
//! whole viewport. Structural problems are fatal ([`ParseError`]); everything
//! else is recovered locally, logged, and collected as a [`ParseWarning`].

pub mod document;
pub mod tags;
pub mod tokenizer;

use std::rc::Rc;

use tracing::warn;

use crate::assets::{LocationError, TextureSource};
use crate::dom::{ElementTree, PromoteError};
use crate::style::{PropertyError, StyleSpec};

pub use document::parse_document;
pub use tags::parse_tags;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal parse errors. The menu drops the tree when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("endrect[] without a matching beginrect[]")]
    UnmatchedEndRect,
    #[error("{depth} beginrect[] left unclosed")]
    UnclosedRect { depth: usize },
    #[error("formspec defines no elements")]
    EmptyTree,
    #[error("formspec document must be a JSON object")]
    InvalidRoot,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recoverable problems. The offending tag or field is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    #[error("unknown element: {0}")]
    UnknownTag(String),
    #[error("malformed element: '{0}'")]
    MalformedTag(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("{tag}[] takes {expected} arguments, got {found}")]
    ArgumentCount { tag: &'static str, expected: &'static str, found: usize },
    #[error("{tag}[]: invalid number '{value}'")]
    BadNumber { tag: &'static str, value: String },
    #[error("invalid color '{0}'")]
    BadColor(String),
    #[error("texture '{0}' not found")]
    MissingTexture(String),
    #[error("aspect ratio with zero height")]
    ZeroAspect,
    #[error("inventory grid needs at least one column and row, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("attempt to create more than one modifier: {0}")]
    DuplicateModifier(#[from] PromoteError),
    #[error("field '{field}' must be {expected}")]
    WrongType { field: String, expected: &'static str },
    #[error("field '{field}' ignored on a {kind}")]
    IgnoredField { field: String, kind: &'static str },
    #[error("unknown element type '{0}'")]
    UnknownKind(String),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Style(#[from] PropertyError),
}

// ---------------------------------------------------------------------------
// Context and output
// ---------------------------------------------------------------------------

/// Collaborators a parse needs.
pub struct ParseContext<'a> {
    pub textures: &'a dyn TextureSource,
    /// Style of the synthetic root, inherited by every element.
    pub default_style: Rc<StyleSpec>,
}

impl<'a> ParseContext<'a> {
    pub fn new(textures: &'a dyn TextureSource, default_style: Rc<StyleSpec>) -> Self {
        Self { textures, default_style }
    }
}

/// A successfully parsed formspec.
#[derive(Debug)]
pub struct Parsed {
    pub tree: ElementTree,
    /// Problems recovered from, in source order.
    pub warnings: Vec<ParseWarning>,
}

/// Parse a formspec, picking the front end by its first non-blank character:
/// `{` selects the JSON document, anything else the tag stream.
pub fn parse(source: &str, ctx: &ParseContext<'_>) -> Result<Parsed, ParseError> {
    if source.trim_start().starts_with('{') {
        parse_document(source, ctx)
    } else {
        parse_tags(source, ctx)
    }
}

/// Warning sink shared by both front ends.
#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<ParseWarning>);

impl Warnings {
    pub(crate) fn push(&mut self, warning: impl Into<ParseWarning>) {
        let warning = warning.into();
        warn!(%warning, "formspec");
        self.0.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<ParseWarning> {
        self.0
    }
}

/// Root must have gained at least one child.
pub(crate) fn finish(tree: ElementTree, warnings: Warnings) -> Result<Parsed, ParseError> {
    if tree.is_empty() {
        return Err(ParseError::EmptyTree);
    }
    Ok(Parsed { tree, warnings: warnings.into_vec() })
}
