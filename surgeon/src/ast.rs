//! Span-annotated element tree produced by the dialect scanners.
//!
//! The tree is flat: every element is recorded with its byte span and the
//! spans of its attributes, in document order. Nothing in here owns text;
//! all slices are resolved against the original source so edits can be
//! spliced without regenerating untouched bytes.

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span used as an insertion point.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text covered by this span, or `""` if it falls outside `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or_default()
    }
}

/// How an attribute value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `"..."` or `'...'`; carries the quote character.
    Quoted(char),
    /// `{...}` embedded expression (JSX only).
    Expression,
    /// Unquoted value (HTML only).
    Bare,
}

/// Attribute value with the span of the whole value and of its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValue {
    pub kind: ValueKind,
    /// Including quotes or braces.
    pub span: Span,
    /// Excluding quotes or braces.
    pub inner: Span,
}

impl AttrValue {
    /// The value as a plain string if it is one.
    ///
    /// Quoted and bare values are returned verbatim. An expression is only a
    /// literal when its whole body is a single string literal, as in
    /// `data-id={"card"}`.
    #[must_use]
    pub fn literal(&self, source: &str) -> Option<String> {
        let inner = self.inner.slice(source);
        match self.kind {
            ValueKind::Quoted(_) | ValueKind::Bare => Some(inner.to_owned()),
            ValueKind::Expression => crate::style::decode_js_string(inner.trim()),
        }
    }
}

/// One attribute on an opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// From the first byte of the name to the last byte of the value.
    pub span: Span,
    pub value: Option<AttrValue>,
}

/// An opening tag and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Opening tag only, `<` through `>`.
    pub span: Span,
    pub name_span: Span,
    pub attributes: Vec<Attribute>,
    /// Nesting depth, 0 for top-level elements.
    pub depth: usize,
    pub self_closing: bool,
}

impl Element {
    /// First attribute named `name`.
    #[must_use]
    pub fn attribute(&self, name: &str, case_insensitive: bool) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| names_match(&attr.name, name, case_insensitive))
    }
}

/// Parsed view over a source text.
#[derive(Debug, Clone)]
pub struct Document<'s> {
    pub source: &'s str,
    /// Elements ordered by their opening tag's start offset.
    pub elements: Vec<Element>,
    /// HTML attribute and tag names compare case-insensitively.
    pub case_insensitive_names: bool,
}

impl<'s> Document<'s> {
    #[must_use]
    pub fn new(source: &'s str, mut elements: Vec<Element>, case_insensitive_names: bool) -> Self {
        elements.sort_by_key(|el| el.span.start);
        Self { source, elements, case_insensitive_names }
    }

    /// Every element whose `name` attribute has the literal value `value`.
    #[must_use]
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|el| {
                el.attribute(name, self.case_insensitive_names)
                    .and_then(|attr| attr.value.as_ref())
                    .and_then(|v| v.literal(self.source))
                    .is_some_and(|literal| literal == value)
            })
            .collect()
    }
}

fn names_match(a: &str, b: &str, case_insensitive: bool) -> bool {
    if case_insensitive { a.eq_ignore_ascii_case(b) } else { a == b }
}
