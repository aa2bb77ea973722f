//! Reading and rewriting an element's inline style.
//!
//! DESIGN
//! ======
//! A style attribute is read into a [`StyleMap`]: where the declarations live
//! in the source ([`StyleSite`]) and one [`StyleEntry`] per declaration with
//! the spans of its key and value. Writers never re-print a map. They emit
//! [`Edit`]s that replace the value span of a changed key, or append new
//! keys after the last declaration in the list's own quoting, separator and
//! indentation. Unchanged keys produce no edit, so applying a patch that is
//! already reflected in the source returns the source byte-for-byte.

use std::collections::BTreeMap;

use wire::LayoutPatch;

use crate::ast::{Element, Span, ValueKind};

const DEFAULT_QUOTE: char = '"';

/// One replacement of `span` by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub text: String,
}

impl Edit {
    #[must_use]
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self { span, text: text.into() }
    }

    #[must_use]
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self { span: Span::at(at), text: text.into() }
    }
}

/// Apply non-overlapping edits to `source`. Bytes outside the edits are
/// copied unchanged.
#[must_use]
pub fn splice(source: &str, edits: &[Edit]) -> String {
    splice_within(source, Span::new(0, source.len()), edits)
}

/// [`splice`] restricted to `range`; edits outside it are ignored.
fn splice_within(source: &str, range: Span, edits: &[Edit]) -> String {
    let mut ordered: Vec<&Edit> = edits
        .iter()
        .filter(|e| e.span.start >= range.start && e.span.end <= range.end)
        .collect();
    ordered.sort_by_key(|e| (e.span.start, e.span.end));

    let mut out = String::with_capacity(range.len() + 64);
    let mut cursor = range.start;
    for edit in ordered {
        if edit.span.start < cursor {
            continue;
        }
        out.push_str(Span::new(cursor, edit.span.start).slice(source));
        out.push_str(&edit.text);
        cursor = edit.span.end;
    }
    out.push_str(Span::new(cursor, range.end).slice(source));
    out
}

/// Where an element's style declarations live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSite {
    /// No style attribute; a new one goes at `insert_at` (right after the tag name).
    Missing { insert_at: usize },
    /// `style` with no value at all.
    Valueless { attribute: Span },
    /// `style={{ ... }}`; `body` is between the object braces.
    ObjectLiteral { body: Span },
    /// `style="a: b; c: d"`; `quote` is `None` for an unquoted HTML value.
    Declarations { body: Span, quote: Option<char>, value: Span },
    /// `style={expr}` where `expr` is not an object literal.
    Opaque { expression: Span },
}

/// A single declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    /// Decoded key. CSS keys are lower-cased.
    pub key: String,
    pub key_quote: Option<char>,
    /// Decoded value when it is a plain string or number literal.
    pub value: Option<String>,
    pub value_quote: Option<char>,
    pub value_span: Span,
    /// Key through value.
    pub span: Span,
    /// `{ top }` object shorthand.
    pub shorthand: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMap {
    pub site: StyleSite,
    pub entries: Vec<StyleEntry>,
    /// Last non-empty declaration, including spreads and computed keys.
    pub last: Option<Span>,
}

impl StyleMap {
    fn empty(site: StyleSite) -> Self {
        Self { site, entries: Vec::new(), last: None }
    }

    /// The entry that wins for `key`: the last one, as in both JS and CSS.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleEntry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }

    /// Literal declarations, later entries overriding earlier ones.
    #[must_use]
    pub fn values(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter_map(|e| e.value.as_ref().map(|v| (e.key.clone(), v.clone())))
            .collect()
    }
}

// =============================================================================
// READ
// =============================================================================

/// Read the effective style attribute of `element`.
#[must_use]
pub fn read(source: &str, element: &Element, case_insensitive: bool) -> StyleMap {
    let attr = element.attributes.iter().rev().find(|a| {
        if case_insensitive { a.name.eq_ignore_ascii_case("style") } else { a.name == "style" }
    });
    let Some(attr) = attr else {
        return StyleMap::empty(StyleSite::Missing { insert_at: element.name_span.end });
    };
    let Some(value) = &attr.value else {
        return StyleMap::empty(StyleSite::Valueless { attribute: attr.span });
    };

    match value.kind {
        ValueKind::Quoted(quote) => read_declarations(source, value.inner, Some(quote), value.span),
        ValueKind::Bare => read_declarations(source, value.inner, None, value.span),
        ValueKind::Expression => match object_body(source, value.inner) {
            Some(body) => read_object(source, body),
            None => StyleMap::empty(StyleSite::Opaque { expression: trim(source, value.inner) }),
        },
    }
}

/// If `expression` is exactly one object literal, the span between its braces.
fn object_body(source: &str, expression: Span) -> Option<Span> {
    let expression = trim(source, expression);
    let text = expression.slice(source);
    if !text.starts_with('{') {
        return None;
    }
    let mut close = None;
    walk(text, Syntax::Script, |i, b, depth| {
        if b == b'}' && depth == 1 {
            close = Some(i);
            false
        } else {
            true
        }
    });
    (close == Some(text.len() - 1))
        .then(|| Span::new(expression.start + 1, expression.end - 1))
}

fn read_object(source: &str, body: Span) -> StyleMap {
    let mut map = StyleMap::empty(StyleSite::ObjectLiteral { body });
    for segment in split_top_level(source, body, b',', Syntax::Script) {
        let Some(segment) = trim_trivia(source, segment) else {
            continue;
        };
        let text = segment.slice(source);
        map.last = Some(segment);
        if text.starts_with("...") {
            continue;
        }

        let Some(colon) = find_top_level(source, segment, b':', Syntax::Script) else {
            if is_identifier(text) {
                map.entries.push(StyleEntry {
                    key: text.to_owned(),
                    key_quote: None,
                    value: None,
                    value_quote: None,
                    value_span: segment,
                    span: segment,
                    shorthand: true,
                });
            }
            continue;
        };
        if colon >= segment.end {
            continue;
        }

        let Some(key_span) = trim_trivia(source, Span::new(segment.start, colon)) else {
            continue;
        };
        let key_raw = key_span.slice(source);
        let (key, key_quote) = if let Some(decoded) = decode_js_string(key_raw) {
            (decoded, key_raw.chars().next())
        } else if is_identifier(key_raw) || key_raw.parse::<f64>().is_ok() {
            (key_raw.to_owned(), None)
        } else {
            continue;
        };

        let value_span = trim_trivia(source, Span::new(colon + 1, segment.end)).unwrap_or(Span::at(colon + 1));
        let value_raw = value_span.slice(source);
        let (value, value_quote) = if let Some(decoded) = decode_js_string(value_raw) {
            (Some(decoded), value_raw.chars().next())
        } else if value_raw.parse::<f64>().is_ok() {
            (Some(value_raw.to_owned()), None)
        } else {
            (None, None)
        };

        map.entries.push(StyleEntry {
            key,
            key_quote,
            value,
            value_quote,
            value_span,
            span: segment,
            shorthand: false,
        });
    }
    map
}

fn read_declarations(source: &str, body: Span, quote: Option<char>, value: Span) -> StyleMap {
    let mut map = StyleMap::empty(StyleSite::Declarations { body, quote, value });
    for segment in split_top_level(source, body, b';', Syntax::Css) {
        let segment = trim(source, segment);
        if segment.is_empty() {
            continue;
        }
        map.last = Some(segment);
        let Some(colon) = find_top_level(source, segment, b':', Syntax::Css) else {
            continue;
        };
        if colon >= segment.end {
            continue;
        }
        let key = trim(source, Span::new(segment.start, colon)).slice(source).to_ascii_lowercase();
        let value_span = trim(source, Span::new(colon + 1, segment.end));
        map.entries.push(StyleEntry {
            key,
            key_quote: None,
            value: Some(value_span.slice(source).to_owned()),
            value_quote: None,
            value_span,
            span: segment,
            shorthand: false,
        });
    }
    map
}

// =============================================================================
// WRITE
// =============================================================================

/// Edits that merge `patch` into a JS object literal style.
#[must_use]
pub fn write_object(source: &str, map: &StyleMap, body: Span, patch: &LayoutPatch) -> Vec<Edit> {
    let value_quote =
        map.entries.iter().find_map(|e| e.value_quote.filter(|q| *q != '`')).unwrap_or(DEFAULT_QUOTE);
    let key_quote = if let Some(q) = map.entries.iter().find_map(|e| e.key_quote) {
        Some(q)
    } else if map.entries.is_empty() {
        Some(DEFAULT_QUOTE)
    } else {
        None
    };

    let mut edits = Vec::new();
    let mut appended = Vec::new();
    for (key, value) in patch.fields() {
        match map.get(key) {
            Some(entry) if entry.value.as_deref() == Some(value) => {}
            Some(entry) if entry.shorthand => {
                edits.push(Edit::replace(
                    entry.span,
                    format!("{}: {}", entry.key, quote_js(value, value_quote)),
                ));
            }
            Some(entry) => {
                let quote = entry.value_quote.filter(|q| *q != '`').unwrap_or(value_quote);
                edits.push(Edit::replace(entry.value_span, quote_js(value, quote)));
            }
            None => appended.push(format!("{}: {}", js_key(key, key_quote), quote_js(value, value_quote))),
        }
    }

    if !appended.is_empty() {
        edits.push(append(source, body, map.last, &appended, ","));
    }
    edits
}

/// Edit that wraps a non-literal style expression so the patch applies on top of it.
#[must_use]
pub fn write_opaque(source: &str, expression: Span, patch: &LayoutPatch) -> Option<Edit> {
    if patch.is_empty() {
        return None;
    }
    let mut parts = vec![format!("...{}", expression.slice(source))];
    parts.extend(patch.fields().map(|(k, v)| {
        format!("{}: {}", quote_js(k, DEFAULT_QUOTE), quote_js(v, DEFAULT_QUOTE))
    }));
    Some(Edit::replace(expression, format!("{{ {} }}", parts.join(", "))))
}

/// `style={{ "width": "50px", ... }}` for an element that has no style yet.
#[must_use]
pub fn jsx_attribute(patch: &LayoutPatch) -> String {
    let body = patch
        .fields()
        .map(|(k, v)| format!("{}: {}", quote_js(k, DEFAULT_QUOTE), quote_js(v, DEFAULT_QUOTE)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("style={{{{ {body} }}}}")
}

/// `style="width: 50px; ..."` for an element that has no style yet.
#[must_use]
pub fn html_attribute(patch: &LayoutPatch) -> String {
    format!("style=\"{}\"", escape_attr(&css_declarations(patch), '"'))
}

/// Edits that merge `patch` into a CSS declaration list.
#[must_use]
pub fn write_declarations(source: &str, map: &StyleMap, patch: &LayoutPatch) -> Vec<Edit> {
    let StyleSite::Declarations { body, quote, value } = map.site else {
        return Vec::new();
    };
    let escape_quote = quote.unwrap_or(DEFAULT_QUOTE);

    let mut edits = Vec::new();
    let mut appended = Vec::new();
    for (key, new_value) in patch.fields() {
        match map.get(key) {
            Some(entry) if entry.value.as_deref() == Some(new_value) => {}
            Some(entry) => {
                edits.push(Edit::replace(entry.value_span, escape_attr(new_value, escape_quote)));
            }
            None => appended.push(format!("{key}: {}", escape_attr(new_value, escape_quote))),
        }
    }
    if !appended.is_empty() {
        edits.push(append(source, body, map.last, &appended, ";"));
    }

    if quote.is_none() && !edits.is_empty() {
        let rewritten = splice_within(source, body, &edits);
        return vec![Edit::replace(value, format!("\"{rewritten}\""))];
    }
    edits
}

fn css_declarations(patch: &LayoutPatch) -> String {
    patch.fields().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>().join("; ")
}

/// Insert `items` after `last`, or fill an empty `body`.
fn append(source: &str, body: Span, last: Option<Span>, items: &[String], separator: &str) -> Edit {
    let Some(last) = last else {
        let text = if separator == "," {
            format!(" {} ", items.join(", "))
        } else {
            items.join("; ")
        };
        return Edit::replace(body, text);
    };

    let text = if body.slice(source).contains('\n') {
        let indent = line_indent(source, last.start);
        items.iter().map(|item| format!("{separator}\n{indent}{item}")).collect::<String>()
    } else {
        items.iter().map(|item| format!("{separator} {item}")).collect::<String>()
    };
    Edit::insert(last.end, text)
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source.get(..offset).and_then(|s| s.rfind('\n')).map_or(0, |i| i + 1);
    let line = source.get(line_start..).unwrap_or_default();
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    line.get(..width).unwrap_or_default()
}

// =============================================================================
// LEXICAL HELPERS
// =============================================================================

/// Comment rules of the text being scanned. CSS has no `//` comments, so
/// `url(http://…)` must stay code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Script,
    Css,
}

/// Index just past the comment opening at `i`, if one does.
fn skip_comment(text: &str, i: usize, syntax: Syntax) -> Option<usize> {
    let rest = text.get(i..)?;
    if let Some(body) = rest.strip_prefix("/*") {
        return Some(body.find("*/").map_or(text.len(), |found| i + 2 + found + 2));
    }
    if syntax == Syntax::Script && rest.starts_with("//") {
        return Some(rest.find('\n').map_or(text.len(), |found| i + found));
    }
    None
}

/// Visit every byte outside string literals and comments with the bracket
/// depth in effect before it. Stops when `visit` returns `false`.
fn walk(text: &str, syntax: Syntax, mut visit: impl FnMut(usize, u8, usize) -> bool) {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while let Some(&b) = bytes.get(i) {
        if matches!(b, b'"' | b'\'' | b'`') {
            i = skip_quoted(bytes, i);
            continue;
        }
        if let Some(next) = skip_comment(text, i, syntax) {
            i = next;
            continue;
        }
        if !visit(i, b, depth) {
            return;
        }
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
}

/// Index just past the literal opened at `start`.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes.get(start).copied();
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        if b == b'\\' {
            i += 2;
            continue;
        }
        i += 1;
        if Some(b) == quote {
            break;
        }
    }
    i.min(bytes.len())
}

/// Split `span` on `sep` at bracket depth zero. Returned spans are absolute.
fn split_top_level(source: &str, span: Span, sep: u8, syntax: Syntax) -> Vec<Span> {
    let mut parts = Vec::new();
    let mut start = 0;
    walk(span.slice(source), syntax, |i, b, depth| {
        if b == sep && depth == 0 {
            parts.push(Span::new(span.start + start, span.start + i));
            start = i + 1;
        }
        true
    });
    parts.push(Span::new(span.start + start, span.end));
    parts
}

/// Offset of the first `sep` at bracket depth zero.
fn find_top_level(source: &str, span: Span, sep: u8, syntax: Syntax) -> Option<usize> {
    let mut found = None;
    walk(span.slice(source), syntax, |i, b, depth| {
        if b == sep && depth == 0 {
            found = Some(span.start + i);
            false
        } else {
            true
        }
    });
    found
}

/// Narrow a script segment to its code, dropping surrounding whitespace and
/// comments. `None` when nothing but trivia remains.
fn trim_trivia(source: &str, span: Span) -> Option<Span> {
    let text = span.slice(source);
    let bytes = text.as_bytes();
    let mut code: Option<(usize, usize)> = None;
    let mut i = 0;
    while let Some(&b) = bytes.get(i) {
        let next = if matches!(b, b'"' | b'\'' | b'`') {
            skip_quoted(bytes, i)
        } else if let Some(next) = skip_comment(text, i, Syntax::Script) {
            i = next;
            continue;
        } else if b.is_ascii_whitespace() {
            i += 1;
            continue;
        } else {
            i + 1
        };
        code = Some((code.map_or(i, |(start, _)| start), next));
        i = next;
    }
    code.map(|(start, end)| Span::new(span.start + start, span.start + end))
}

fn trim(source: &str, span: Span) -> Span {
    let text = span.slice(source);
    let start = span.start + (text.len() - text.trim_start().len());
    let end = span.end - (text.len() - text.trim_end().len());
    Span::new(start, end.max(start))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn js_key(key: &str, quote: Option<char>) -> String {
    match quote {
        Some(q) => quote_js(key, q),
        None if is_identifier(key) => key.to_owned(),
        None => quote_js(key, DEFAULT_QUOTE),
    }
}

/// Decode a complete JS string literal. Returns `None` for anything else,
/// including template literals with substitutions.
#[must_use]
pub fn decode_js_string(raw: &str) -> Option<String> {
    let quote = raw.chars().next().filter(|q| matches!(q, '"' | '\'' | '`'))?;
    if raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let body = raw.get(1..raw.len() - 1)?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'v' => out.push('\u{b}'),
                '0' => out.push('\0'),
                '\n' => {}
                'x' => {
                    let hex: String = chars.by_ref().take(2).collect();
                    out.push(char::from_u32(u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD))?);
                }
                'u' => {
                    let hex: String = if chars.peek() == Some(&'{') {
                        chars.next();
                        chars.by_ref().take_while(|c| *c != '}').collect()
                    } else {
                        chars.by_ref().take(4).collect()
                    };
                    out.push(char::from_u32(u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD))?);
                }
                other => out.push(other),
            },
            c if c == quote => return None,
            '$' if quote == '`' && chars.peek() == Some(&'{') => return None,
            '\n' if quote != '`' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

/// Encode `value` as a JS string literal using `quote`.
#[must_use]
pub fn quote_js(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn escape_attr(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if quote == '"' => out.push_str("&quot;"),
            '\'' if quote == '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;
