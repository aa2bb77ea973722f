//! JSX/TSX scanner.
//!
//! DESIGN
//! ======
//! This is not a JavaScript parser. It walks the script just far enough to
//! know when a `<` opens an element: strings, template literals, comments and
//! regular expressions are skipped, brackets are balanced, and the previous
//! significant token decides whether an expression may start. Inside an
//! element the scanner records tag names, attributes and their spans, then
//! descends into children until the matching closing tag.
//!
//! ERROR HANDLING
//! ==============
//! Unbalanced brackets, unterminated literals and mismatched closing tags are
//! all reported as [`ParseError`] with the offending offset.

use crate::ast::{AttrValue, Attribute, Document, Element, Span, ValueKind};
use crate::cursor::{Cursor, is_ident_continue, is_ident_start};
use crate::error::ParseError;

/// Identifiers after which an expression (and therefore JSX) may begin.
const EXPRESSION_KEYWORDS: [&str; 15] = [
    "return", "yield", "await", "typeof", "case", "default", "in", "of", "else", "do", "void",
    "delete", "new", "throw", "instanceof",
];

/// Parse a JSX or TSX module into its element list.
///
/// # Errors
///
/// Returns [`ParseError`] when the source is not well-formed.
pub fn parse(source: &str) -> Result<Document<'_>, ParseError> {
    let mut scanner = Scanner { cur: Cursor::new(source), elements: Vec::new(), depth: 0 };
    scanner.script(None)?;
    Ok(Document::new(source, scanner.elements, false))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    /// Start of input, or after punctuation or a keyword.
    Operator,
    /// After an identifier, literal or closing bracket.
    Operand,
}

struct Scanner<'s> {
    cur: Cursor<'s>,
    elements: Vec<Element>,
    depth: usize,
}

impl Scanner<'_> {
    // =========================================================================
    // SCRIPT
    // =========================================================================

    /// Scan script text. With `closer` set, stop after the unmatched `}`.
    fn script(&mut self, closer: Option<u8>) -> Result<(), ParseError> {
        let entry = self.cur.pos;
        let mut stack: Vec<u8> = Vec::new();
        let mut prev = Prev::Operator;

        loop {
            self.cur.skip_whitespace();
            let Some(b) = self.cur.peek() else {
                if closer.is_some() {
                    return Err(self.cur.error(entry, "unexpected end of input; expected `}`"));
                }
                if let Some(&open) = stack.last() {
                    return Err(self.cur.error(self.cur.pos, format!("unclosed `{}`", open as char)));
                }
                return Ok(());
            };

            match b {
                b'/' if self.cur.starts_with("//") => {
                    self.cur.skip_past("\n");
                }
                b'/' if self.cur.starts_with("/*") => {
                    self.block_comment()?;
                }
                b'/' => {
                    if prev == Prev::Operator {
                        self.regex()?;
                        prev = Prev::Operand;
                    } else {
                        self.cur.bump();
                        prev = Prev::Operator;
                    }
                }
                b'\'' | b'"' => {
                    self.string(b)?;
                    prev = Prev::Operand;
                }
                b'`' => {
                    self.template()?;
                    prev = Prev::Operand;
                }
                b'<' if prev == Prev::Operator && self.opens_type_parameters() => {
                    self.type_parameters()?;
                    prev = Prev::Operator;
                }
                b'<' if prev == Prev::Operator && self.opens_element() => {
                    self.element()?;
                    prev = Prev::Operand;
                }
                b'(' | b'[' | b'{' => {
                    stack.push(b);
                    self.cur.bump();
                    prev = Prev::Operator;
                }
                b')' | b']' | b'}' => {
                    let expected = match b {
                        b')' => b'(',
                        b']' => b'[',
                        _ => b'{',
                    };
                    match stack.pop() {
                        Some(open) if open == expected => {
                            self.cur.bump();
                            prev = if b == b'}' { Prev::Operator } else { Prev::Operand };
                        }
                        None if b == b'}' && closer == Some(b'}') => {
                            self.cur.bump();
                            return Ok(());
                        }
                        _ => {
                            return Err(self
                                .cur
                                .error(self.cur.pos, format!("unexpected `{}`", b as char)));
                        }
                    }
                }
                b'=' if self.cur.starts_with("=>") => {
                    self.cur.pos += 2;
                    prev = Prev::Operator;
                }
                b if is_ident_start(b) => {
                    let word = self.cur.take_while(is_ident_continue);
                    prev = if EXPRESSION_KEYWORDS.contains(&word) {
                        Prev::Operator
                    } else {
                        Prev::Operand
                    };
                }
                b if b.is_ascii_digit() => {
                    self.cur.take_while(|c| c.is_ascii_alphanumeric() || c == b'.' || c == b'_');
                    prev = Prev::Operand;
                }
                _ => {
                    self.cur.bump();
                    prev = Prev::Operator;
                }
            }
        }
    }

    /// `<` followed by a tag name or `>` (fragment).
    fn opens_element(&self) -> bool {
        self.cur.peek_at(1).is_some_and(|b| is_ident_start(b) || b == b'>')
    }

    /// `<T,>` or `<T extends U>`: type parameters of a generic arrow function.
    fn opens_type_parameters(&self) -> bool {
        let rest = self.cur.source.get(self.cur.pos + 1..).unwrap_or_default().trim_start();
        if !rest.bytes().next().is_some_and(is_ident_start) {
            return false;
        }
        let name_len = rest.bytes().take_while(|&b| is_ident_continue(b)).count();
        let after = rest.get(name_len..).unwrap_or_default().trim_start();
        if after.starts_with(',') {
            return true;
        }
        after.strip_prefix("extends").is_some_and(|tail| {
            tail.starts_with(|c: char| c.is_ascii_whitespace())
                && !tail.trim_start().starts_with(['=', '/', '>'])
                && !tail.trim_start().is_empty()
        })
    }

    /// Skip a type parameter list from `<` to its matching `>`.
    fn type_parameters(&mut self) -> Result<(), ParseError> {
        let start = self.cur.pos;
        let mut depth = 0usize;
        loop {
            match self.cur.peek() {
                None => return Err(self.cur.error(start, "unterminated type parameter list")),
                Some(b'=') if self.cur.starts_with("=>") => self.cur.pos += 2,
                Some(quote @ (b'\'' | b'"')) => self.string(quote)?,
                Some(b'<') => {
                    depth += 1;
                    self.cur.bump();
                }
                Some(b'>') => {
                    self.cur.bump();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.cur.bump();
                }
            }
        }
    }

    fn block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.cur.pos;
        self.cur.pos += 2;
        if self.cur.skip_past("*/") {
            Ok(())
        } else {
            Err(self.cur.error(start, "unterminated comment"))
        }
    }

    fn string(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.cur.pos;
        self.cur.bump();
        loop {
            match self.cur.bump() {
                None | Some(b'\n') => return Err(self.cur.error(start, "unterminated string")),
                Some(b'\\') => {
                    self.cur.bump();
                }
                Some(b) if b == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn template(&mut self) -> Result<(), ParseError> {
        let start = self.cur.pos;
        self.cur.bump();
        loop {
            if self.cur.eat("${") {
                self.script(Some(b'}'))?;
                continue;
            }
            match self.cur.bump() {
                None => return Err(self.cur.error(start, "unterminated template literal")),
                Some(b'\\') => {
                    self.cur.bump();
                }
                Some(b'`') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn regex(&mut self) -> Result<(), ParseError> {
        let start = self.cur.pos;
        self.cur.bump();
        let mut in_class = false;
        loop {
            match self.cur.bump() {
                None | Some(b'\n') => {
                    return Err(self.cur.error(start, "unterminated regular expression"));
                }
                Some(b'\\') => {
                    self.cur.bump();
                }
                Some(b'[') => in_class = true,
                Some(b']') => in_class = false,
                Some(b'/') if !in_class => break,
                Some(_) => {}
            }
        }
        self.cur.take_while(is_ident_continue);
        Ok(())
    }

    // =========================================================================
    // ELEMENTS
    // =========================================================================

    /// Scan an element or fragment starting at `<`, including its children.
    fn element(&mut self) -> Result<(), ParseError> {
        let start = self.cur.pos;
        self.cur.bump();
        self.cur.skip_whitespace();

        if self.cur.eat(">") {
            return self.children(start, "");
        }

        let name_start = self.cur.pos;
        let tag = self.cur.take_while(is_tag_byte).to_owned();
        if tag.is_empty() {
            return Err(self.cur.error(name_start, "expected a tag name"));
        }
        let name_span = Span::new(name_start, self.cur.pos);

        let mut attributes = Vec::new();
        let self_closing = loop {
            self.skip_tag_trivia()?;
            match self.cur.peek() {
                None => return Err(self.cur.error(start, format!("unterminated tag <{tag}>"))),
                Some(b'/') if self.cur.starts_with("/>") => {
                    self.cur.pos += 2;
                    break true;
                }
                Some(b'>') => {
                    self.cur.bump();
                    break false;
                }
                Some(b'{') => {
                    // Spread attribute; not addressable.
                    self.cur.bump();
                    self.script(Some(b'}'))?;
                }
                Some(b) if is_ident_start(b) => attributes.push(self.attribute()?),
                Some(b) => {
                    return Err(self.cur.error(
                        self.cur.pos,
                        format!("unexpected `{}` in <{tag}>", b as char),
                    ));
                }
            }
        };

        self.elements.push(Element {
            tag: tag.clone(),
            span: Span::new(start, self.cur.pos),
            name_span,
            attributes,
            depth: self.depth,
            self_closing,
        });

        if self_closing {
            return Ok(());
        }
        self.depth += 1;
        let result = self.children(start, &tag);
        self.depth -= 1;
        result
    }

    fn attribute(&mut self) -> Result<Attribute, ParseError> {
        let name_start = self.cur.pos;
        let name = self.cur.take_while(|b| is_ident_continue(b) || b == b'-' || b == b':');
        let name = name.to_owned();
        let name_end = self.cur.pos;

        self.cur.skip_whitespace();
        if !self.cur.eat("=") {
            return Ok(Attribute { name, span: Span::new(name_start, name_end), value: None });
        }
        self.cur.skip_whitespace();

        let value_start = self.cur.pos;
        let value = match self.cur.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.cur.bump();
                let inner_start = self.cur.pos;
                while self.cur.peek().is_some_and(|b| b != quote) {
                    self.cur.bump();
                }
                if self.cur.eat(if quote == b'"' { "\"" } else { "'" }) {
                    AttrValue {
                        kind: ValueKind::Quoted(quote as char),
                        span: Span::new(value_start, self.cur.pos),
                        inner: Span::new(inner_start, self.cur.pos - 1),
                    }
                } else {
                    return Err(self.cur.error(value_start, "unterminated attribute value"));
                }
            }
            Some(b'{') => {
                self.cur.bump();
                self.script(Some(b'}'))?;
                AttrValue {
                    kind: ValueKind::Expression,
                    span: Span::new(value_start, self.cur.pos),
                    inner: Span::new(value_start + 1, self.cur.pos - 1),
                }
            }
            Some(b'<') if self.opens_element() => {
                self.element()?;
                AttrValue {
                    kind: ValueKind::Expression,
                    span: Span::new(value_start, self.cur.pos),
                    inner: Span::new(value_start, self.cur.pos),
                }
            }
            _ => return Err(self.cur.error(value_start, format!("expected a value for `{name}`"))),
        };

        Ok(Attribute { name, span: Span::new(name_start, value.span.end), value: Some(value) })
    }

    /// Whitespace and JS comments between attributes.
    fn skip_tag_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            self.cur.skip_whitespace();
            if self.cur.starts_with("//") {
                self.cur.skip_past("\n");
            } else if self.cur.starts_with("/*") {
                self.block_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    /// Scan children until `</tag>`. An empty `tag` closes a fragment.
    fn children(&mut self, open: usize, tag: &str) -> Result<(), ParseError> {
        loop {
            match self.cur.peek() {
                None => {
                    let shown = if tag.is_empty() { "<>" } else { tag };
                    return Err(self.cur.error(open, format!("unclosed element {shown}")));
                }
                Some(b'{') => {
                    self.cur.bump();
                    self.script(Some(b'}'))?;
                }
                Some(b'<') if self.cur.peek_at(1) == Some(b'/') => {
                    return self.closing_tag(tag);
                }
                Some(b'<') if self.opens_element() => self.element()?,
                Some(b'<') => {
                    return Err(self.cur.error(self.cur.pos, "unexpected `<` in element text"));
                }
                Some(_) => {
                    self.cur.bump();
                }
            }
        }
    }

    fn closing_tag(&mut self, expected: &str) -> Result<(), ParseError> {
        let start = self.cur.pos;
        self.cur.pos += 2;
        self.cur.skip_whitespace();
        let found = self.cur.take_while(is_tag_byte);
        self.cur.skip_whitespace();
        if !self.cur.eat(">") {
            return Err(self.cur.error(self.cur.pos, "expected `>` to end the closing tag"));
        }
        if found == expected {
            Ok(())
        } else {
            Err(self.cur.error(start, format!("expected </{expected}> but found </{found}>")))
        }
    }
}

fn is_tag_byte(b: u8) -> bool {
    is_ident_continue(b) || b == b'.' || b == b':' || b == b'-'
}

#[cfg(test)]
#[path = "jsx_test.rs"]
mod jsx_test;
