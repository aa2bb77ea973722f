//! Markup dialects understood by the patch engine.

use std::path::Path;

use wire::LayoutPatch;

use crate::ast::{Document, Element};
use crate::error::ParseError;
use crate::style::{self, Edit, StyleMap, StyleSite};
use crate::{html, jsx};

/// Parse, read and write capabilities for one source language.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parse `source` into a span-annotated element list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when `source` is not well-formed.
    fn parse<'s>(&self, source: &'s str) -> Result<Document<'s>, ParseError>;

    /// The element's current style declarations and where they live.
    fn read_style(&self, document: &Document<'_>, element: &Element) -> StyleMap {
        style::read(document.source, element, document.case_insensitive_names)
    }

    /// Edits that merge `patch` into `map`. Empty when nothing changes.
    fn write_style(&self, source: &str, map: &StyleMap, patch: &LayoutPatch) -> Vec<Edit>;
}

/// JSX and TSX modules. Style is a JS object: `style={{ top: "4px" }}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jsx;

impl Dialect for Jsx {
    fn name(&self) -> &'static str {
        "jsx"
    }

    fn parse<'s>(&self, source: &'s str) -> Result<Document<'s>, ParseError> {
        jsx::parse(source)
    }

    fn write_style(&self, source: &str, map: &StyleMap, patch: &LayoutPatch) -> Vec<Edit> {
        if patch.is_empty() {
            return Vec::new();
        }
        match map.site {
            StyleSite::Missing { insert_at } => {
                vec![Edit::insert(insert_at, format!(" {}", style::jsx_attribute(patch)))]
            }
            StyleSite::Valueless { attribute } => {
                vec![Edit::replace(attribute, style::jsx_attribute(patch))]
            }
            StyleSite::ObjectLiteral { body } => style::write_object(source, map, body, patch),
            StyleSite::Declarations { .. } => style::write_declarations(source, map, patch),
            StyleSite::Opaque { expression } => {
                style::write_opaque(source, expression, patch).into_iter().collect()
            }
        }
    }
}

/// HTML documents. Style is a CSS declaration list: `style="top: 4px"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

impl Dialect for Html {
    fn name(&self) -> &'static str {
        "html"
    }

    fn parse<'s>(&self, source: &'s str) -> Result<Document<'s>, ParseError> {
        html::parse(source)
    }

    fn write_style(&self, source: &str, map: &StyleMap, patch: &LayoutPatch) -> Vec<Edit> {
        if patch.is_empty() {
            return Vec::new();
        }
        match map.site {
            StyleSite::Missing { insert_at } => {
                vec![Edit::insert(insert_at, format!(" {}", style::html_attribute(patch)))]
            }
            StyleSite::Valueless { attribute } => {
                vec![Edit::replace(attribute, style::html_attribute(patch))]
            }
            StyleSite::Declarations { .. } => style::write_declarations(source, map, patch),
            // Not produced by the HTML scanner.
            StyleSite::ObjectLiteral { .. } | StyleSite::Opaque { .. } => Vec::new(),
        }
    }
}

/// Dialect selector, resolvable from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectKind {
    #[default]
    Jsx,
    Html,
}

impl DialectKind {
    /// `.html` and `.htm` are HTML; everything else is treated as JSX.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
        if is_html { Self::Html } else { Self::Jsx }
    }

    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Jsx => &Jsx,
            Self::Html => &Html,
        }
    }
}
