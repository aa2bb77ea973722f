//! Structural patch engine: merge layout changes into an element's inline
//! style inside a markup source file.
//!
//! DESIGN
//! ======
//! The source is scanned into a span-annotated element list (`ast`), the
//! target is located by a unique identifier attribute, its style is read
//! into a `StyleMap`, and the patch is merged by splicing the minimal set of
//! edits into the original text. Everything outside the touched spans is
//! copied byte-for-byte, so formatting, comments and unrelated code survive.
//!
//! The crate is pure: no I/O, no clocks, no global state.
//!
//! ERROR HANDLING
//! ==============
//! All failures are detected before any output exists and are reported as
//! [`PatchError`]. There is no partial output.

pub mod ast;
mod cursor;
pub mod dialect;
pub mod error;
pub mod html;
pub mod jsx;
pub mod style;

use wire::{ElementSummary, LayoutPatch};

pub use ast::{Document, Element, Span};
pub use dialect::{Dialect, DialectKind, Html, Jsx};
pub use error::{ParseError, PatchError};
pub use style::{Edit, StyleMap};

/// Attribute carrying stable element identifiers when none is configured.
pub const DEFAULT_ID_ATTRIBUTE: &str = "data-enigma-id";

/// Patch engine bound to one dialect and identifier attribute.
#[derive(Clone, Copy)]
pub struct Surgeon<'a> {
    dialect: &'a dyn Dialect,
    id_attribute: &'a str,
}

impl std::fmt::Debug for Surgeon<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surgeon")
            .field("dialect", &self.dialect.name())
            .field("id_attribute", &self.id_attribute)
            .finish()
    }
}

impl Default for Surgeon<'static> {
    fn default() -> Self {
        Self::new(&Jsx)
    }
}

impl<'a> Surgeon<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect, id_attribute: DEFAULT_ID_ATTRIBUTE }
    }

    #[must_use]
    pub fn with_id_attribute(mut self, id_attribute: &'a str) -> Self {
        self.id_attribute = id_attribute;
        self
    }

    #[must_use]
    pub fn id_attribute(&self) -> &str {
        self.id_attribute
    }

    /// Parse `source` and find the single element tagged `id`.
    ///
    /// # Errors
    ///
    /// [`PatchError::Parse`], [`PatchError::NotFound`] or
    /// [`PatchError::AmbiguousTarget`].
    pub fn locate<'s>(&self, source: &'s str, id: &str) -> Result<(Document<'s>, usize), PatchError> {
        let document = self.dialect.parse(source)?;
        let index = locate_in(&document, self.id_attribute, id)?;
        Ok((document, index))
    }

    /// Merge `patch` into the style of the element tagged `id`.
    ///
    /// Keys absent from the patch are untouched; keys present overwrite.
    /// Returns `source` unchanged when the patch is empty or already applied.
    ///
    /// # Errors
    ///
    /// See [`Surgeon::locate`].
    pub fn apply(&self, source: &str, id: &str, patch: &LayoutPatch) -> Result<String, PatchError> {
        let (document, index) = self.locate(source, id)?;
        if patch.is_empty() {
            return Ok(source.to_owned());
        }
        let Some(element) = document.elements.get(index) else {
            return Err(self.not_found(id));
        };
        let map = self.dialect.read_style(&document, element);
        let edits = self.dialect.write_style(source, &map, patch);
        Ok(style::splice(source, &edits))
    }

    /// Every element that carries the identifier attribute, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::Parse`] when `source` is not well-formed.
    pub fn inspect(&self, source: &str) -> Result<Vec<ElementSummary>, PatchError> {
        let document = self.dialect.parse(source)?;
        let summaries = document
            .elements
            .iter()
            .filter_map(|element| {
                let id = element
                    .attribute(self.id_attribute, document.case_insensitive_names)?
                    .value
                    .as_ref()?
                    .literal(source)?;
                let style = self.dialect.read_style(&document, element).values();
                Some(ElementSummary { id, tag: element.tag.clone(), style })
            })
            .collect();
        Ok(summaries)
    }

    fn not_found(&self, id: &str) -> PatchError {
        PatchError::NotFound { attribute: self.id_attribute.to_owned(), id: id.to_owned() }
    }
}

fn locate_in(document: &Document<'_>, attribute: &str, id: &str) -> Result<usize, PatchError> {
    let matches: Vec<usize> = document
        .elements
        .iter()
        .enumerate()
        .filter(|(_, el)| {
            el.attribute(attribute, document.case_insensitive_names)
                .and_then(|a| a.value.as_ref())
                .and_then(|v| v.literal(document.source))
                .is_some_and(|literal| literal == id)
        })
        .map(|(index, _)| index)
        .collect();

    match matches.as_slice() {
        [index] => Ok(*index),
        [] => Err(PatchError::NotFound { attribute: attribute.to_owned(), id: id.to_owned() }),
        many => Err(PatchError::AmbiguousTarget {
            attribute: attribute.to_owned(),
            id: id.to_owned(),
            count: many.len(),
        }),
    }
}

/// Apply `patch` to a JSX source using the default identifier attribute.
///
/// # Errors
///
/// See [`Surgeon::apply`].
pub fn apply_patch(source: &str, id: &str, patch: &LayoutPatch) -> Result<String, PatchError> {
    Surgeon::default().apply(source, id, patch)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
