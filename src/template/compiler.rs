//! Micro-template compiler
//!
//! Template text is literal markup with `{{= path }}` interpolation spans.
//! Compiling splits the text into a token sequence once; rendering walks the
//! tokens against a JSON data object. No code is generated, so literal text
//! (quotes, backslashes, newlines, stray `}}`) passes through untouched and
//! interpolated values are never re-interpreted as template syntax.

use crate::utils::error::{AutotubeError, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Mutex;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One segment of a dotted path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Interpolate(Vec<PathSegment>),
}

/// A compiled template. Cheap to render repeatedly.
pub struct CompiledTemplate {
    tokens: Vec<Token>,
    tag: Mutex<Option<String>>,
}

impl CompiledTemplate {
    /// Render the template against `data`.
    ///
    /// Strings are inserted verbatim, numbers and booleans in their JSON
    /// form, arrays comma-joined, objects as JSON. Missing paths and `null`
    /// render as nothing.
    pub fn render(&self, data: &Value) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Interpolate(path) => {
                    if let Some(value) = lookup(data, path) {
                        push_value(&mut out, value);
                    }
                }
            }
        }
        out
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Attach a caller-defined marker to this instance
    pub fn set_tag(&self, tag: impl Into<String>) {
        *self.tag.lock().unwrap_or_else(|e| e.into_inner()) = Some(tag.into());
    }

    pub fn tag(&self) -> Option<String> {
        self.tag.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

/// Compile template text into a renderer.
///
/// Errors name the template by an excerpt of its text.
pub fn compile(text: &str) -> Result<CompiledTemplate> {
    let tokens = tokenize(text).map_err(|e| e.in_template(excerpt(text)))?;
    Ok(CompiledTemplate {
        tokens,
        tag: Mutex::new(None),
    })
}

const EXCERPT_CHARS: usize = 40;

fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            tokens.push(Token::Literal(rest[..start].to_string()));
        }

        let span_offset = offset + start;
        let inner = &rest[start + OPEN.len()..];
        let Some(expr) = inner.strip_prefix('=') else {
            return Err(AutotubeError::compile(
                span_offset,
                "only `{{= path }}` interpolation is supported",
            ));
        };
        let Some(end) = expr.find(CLOSE) else {
            return Err(AutotubeError::compile(span_offset, "unclosed `{{=`"));
        };

        tokens.push(Token::Interpolate(parse_path(&expr[..end], span_offset)?));

        let consumed = start + OPEN.len() + 1 + end + CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }

    if !rest.is_empty() {
        tokens.push(Token::Literal(rest.to_string()));
    }

    Ok(tokens)
}

fn parse_path(expr: &str, offset: usize) -> Result<Vec<PathSegment>> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(AutotubeError::compile(offset, "empty expression"));
    }

    expr.split('.')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                return segment
                    .parse()
                    .map(PathSegment::Index)
                    .map_err(|_| AutotubeError::compile(offset, "index out of range"));
            }
            if is_identifier(segment) {
                Ok(PathSegment::Key(segment.to_string()))
            } else {
                Err(AutotubeError::compile(
                    offset,
                    format!("invalid path segment `{segment}` in `{expr}`"),
                ))
            }
        })
        .collect()
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '-')
}

fn lookup<'a>(data: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(data, |current, segment| match segment {
        PathSegment::Key(key) => current.get(key.as_str()),
        PathSegment::Index(i) => current.get(*i),
    })
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_value(out, item);
            }
        }
        Value::Object(_) => out.push_str(&value.to_string()),
    }
}
