//! HTML scanner.
//!
//! Tolerant in the way browsers are: unknown closing tags are ignored and
//! unclosed elements are closed at end of input. Only lexical problems
//! (unterminated comments, tags, attribute values or raw-text elements) are
//! reported as errors.

use crate::ast::{AttrValue, Attribute, Document, Element, Span, ValueKind};
use crate::cursor::Cursor;
use crate::error::ParseError;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Parse an HTML document into its element list.
///
/// # Errors
///
/// Returns [`ParseError`] on lexical errors.
pub fn parse(source: &str) -> Result<Document<'_>, ParseError> {
    let mut cur = Cursor::new(source);
    let mut elements = Vec::new();
    let mut open: Vec<String> = Vec::new();

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            cur.bump();
            continue;
        }
        let start = cur.pos;
        if cur.starts_with("<!--") {
            cur.pos += 4;
            if !cur.skip_past("-->") {
                return Err(cur.error(start, "unterminated comment"));
            }
        } else if cur.starts_with("<!") || cur.starts_with("<?") {
            if !cur.skip_past(">") {
                return Err(cur.error(start, "unterminated declaration"));
            }
        } else if cur.starts_with("</") {
            cur.pos += 2;
            let name = cur.take_while(is_name_byte).to_ascii_lowercase();
            if !cur.skip_past(">") {
                return Err(cur.error(start, "unterminated closing tag"));
            }
            if let Some(index) = open.iter().rposition(|n| *n == name) {
                open.truncate(index);
            }
        } else if cur.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let element = open_tag(&mut cur, open.len())?;
            let name = element.tag.to_ascii_lowercase();
            let self_closing = element.self_closing;
            elements.push(element);

            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) && !self_closing {
                skip_raw_text(&mut cur, &name, start)?;
            } else if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                open.push(name);
            }
        } else {
            cur.bump();
        }
    }

    Ok(Document::new(source, elements, true))
}

fn open_tag(cur: &mut Cursor<'_>, depth: usize) -> Result<Element, ParseError> {
    let start = cur.pos;
    cur.bump();
    let name_start = cur.pos;
    let tag = cur.take_while(is_name_byte).to_owned();
    let name_span = Span::new(name_start, cur.pos);

    let mut attributes = Vec::new();
    let self_closing = loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => return Err(cur.error(start, format!("unterminated tag <{tag}>"))),
            Some(b'>') => {
                cur.bump();
                break false;
            }
            Some(b'/') if cur.starts_with("/>") => {
                cur.pos += 2;
                break true;
            }
            Some(b'/') => {
                cur.bump();
            }
            Some(_) => attributes.push(attribute(cur)?),
        }
    };

    Ok(Element {
        tag,
        span: Span::new(start, cur.pos),
        name_span,
        attributes,
        depth,
        self_closing,
    })
}

fn attribute(cur: &mut Cursor<'_>) -> Result<Attribute, ParseError> {
    let name_start = cur.pos;
    let name = cur
        .take_while(|b| !(b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/')))
        .to_owned();
    let name_end = cur.pos;

    let checkpoint = cur.pos;
    cur.skip_whitespace();
    if !cur.eat("=") {
        cur.pos = checkpoint;
        return Ok(Attribute { name, span: Span::new(name_start, name_end), value: None });
    }
    cur.skip_whitespace();

    let value_start = cur.pos;
    let value = match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.bump();
            let inner_start = cur.pos;
            while cur.peek().is_some_and(|b| b != quote) {
                cur.bump();
            }
            if cur.bump().is_none() {
                return Err(cur.error(value_start, "unterminated attribute value"));
            }
            AttrValue {
                kind: ValueKind::Quoted(quote as char),
                span: Span::new(value_start, cur.pos),
                inner: Span::new(inner_start, cur.pos - 1),
            }
        }
        _ => {
            cur.take_while(|b| !(b.is_ascii_whitespace() || b == b'>'));
            let span = Span::new(value_start, cur.pos);
            AttrValue { kind: ValueKind::Bare, span, inner: span }
        }
    };

    Ok(Attribute { name, span: Span::new(name_start, value.span.end), value: Some(value) })
}

fn skip_raw_text(cur: &mut Cursor<'_>, name: &str, open: usize) -> Result<(), ParseError> {
    let closing = format!("</{name}");
    while !cur.eof() {
        if cur.starts_with_ignore_case(&closing) {
            return Ok(());
        }
        cur.bump();
    }
    Err(cur.error(open, format!("unterminated <{name}> element")))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':' || b == b'_'
}

#[cfg(test)]
#[path = "html_test.rs"]
mod html_test;
