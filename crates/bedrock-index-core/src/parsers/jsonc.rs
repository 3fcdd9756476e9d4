//! JSON-with-comments parser that keeps byte spans
//!
//! Bedrock add-on files are JSON with `//` and `/* */` comments and the
//! occasional trailing comma. The tree produced here records where every
//! value and every property key sits in the source text, so extracted
//! identifiers can be turned into navigable ranges.

use serde_json::{Number, Value};
use thiserror::Error;

/// Maximum nesting depth before the input is rejected
pub const MAX_DEPTH: usize = 256;

/// Malformed source text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct ParseFailure {
    pub message: String,
    pub offset: usize,
}

/// Half-open byte range into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Object(Vec<Property>),
    Array(Vec<Node>),
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

/// One `"key": value` pair of an object, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub key_span: Span,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    /// Property value by key. Duplicate keys resolve to the last one.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.properties()
            .iter()
            .rev()
            .find(|p| p.key == key)
            .map(|p| &p.value)
    }

    /// Follow a chain of object keys from this node
    pub fn pointer(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Object properties; empty for anything that is not an object
    pub fn properties(&self) -> &[Property] {
        match &self.kind {
            NodeKind::Object(properties) => properties,
            _ => &[],
        }
    }

    /// Array elements; empty for anything that is not an array
    pub fn elements(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Array(elements) => elements,
            _ => &[],
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::String(s) => Some(s),
            _ => None,
        }
    }

    /// Plain JSON value of this subtree
    #[cfg(test)]
    pub fn to_value(&self) -> Value {
        match &self.kind {
            NodeKind::Object(properties) => {
                let mut map = serde_json::Map::new();
                for property in properties {
                    map.insert(property.key.clone(), property.value.to_value());
                }
                Value::Object(map)
            }
            NodeKind::Array(elements) => Value::Array(elements.iter().map(Node::to_value).collect()),
            NodeKind::String(s) => Value::String(s.clone()),
            NodeKind::Number(n) => Value::Number(n.clone()),
            NodeKind::Bool(b) => Value::Bool(*b),
            NodeKind::Null => Value::Null,
        }
    }
}

/// Parse JSON-with-comments text into a span-carrying tree
pub fn parse(text: &str) -> Result<Node, ParseFailure> {
    let mut parser = Parser {
        src: text,
        bytes: text.as_bytes(),
        pos: 0,
        depth: 0,
    };
    if text.starts_with('\u{feff}') {
        parser.pos = '\u{feff}'.len_utf8();
    }

    let root = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < parser.bytes.len() {
        return Err(parser.fail("unexpected content after the root value"));
    }
    Ok(root)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn fail(&self, message: &str) -> ParseFailure {
        fail_at(message, self.pos)
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), ParseFailure> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.pos += 1,
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        self.pos += 2;
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    Some(b'*') => {
                        let start = self.pos;
                        self.pos += 2;
                        loop {
                            match self.peek() {
                                None => return Err(fail_at("unterminated block comment", start)),
                                Some(b'*') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                                    self.pos += 2;
                                    break;
                                }
                                Some(_) => self.pos += 1,
                            }
                        }
                    }
                    _ => return Err(self.fail("unexpected '/'")),
                },
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Node, ParseFailure> {
        self.skip_trivia()?;
        let start = self.pos;
        match self.peek() {
            None => Err(self.fail("unexpected end of input")),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => {
                let s = self.parse_string()?;
                Ok(self.node(NodeKind::String(s), start))
            }
            Some(b't') => self.parse_literal("true", NodeKind::Bool(true)),
            Some(b'f') => self.parse_literal("false", NodeKind::Bool(false)),
            Some(b'n') => self.parse_literal("null", NodeKind::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.fail("unexpected character")),
        }
    }

    fn node(&self, kind: NodeKind, start: usize) -> Node {
        Node {
            kind,
            span: Span {
                start,
                end: self.pos,
            },
        }
    }

    fn enter(&mut self) -> Result<(), ParseFailure> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.fail("nesting too deep"));
        }
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Node, ParseFailure> {
        let start = self.pos;
        self.enter()?;
        self.pos += 1;

        let mut properties = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b'"') => {}
                None => return Err(fail_at("unterminated object", start)),
                Some(_) => return Err(self.fail("expected property name")),
            }

            let key_start = self.pos;
            let key = self.parse_string()?;
            let key_span = Span {
                start: key_start,
                end: self.pos,
            };

            self.skip_trivia()?;
            if self.peek() != Some(b':') {
                return Err(self.fail("expected ':'"));
            }
            self.pos += 1;

            let value = self.parse_value()?;
            properties.push(Property {
                key,
                key_span,
                value,
            });

            // A ',' directly followed by '}' is accepted as a trailing comma
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(fail_at("unterminated object", start)),
                Some(_) => return Err(self.fail("expected ',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(self.node(NodeKind::Object(properties), start))
    }

    fn parse_array(&mut self) -> Result<Node, ParseFailure> {
        let start = self.pos;
        self.enter()?;
        self.pos += 1;

        let mut elements = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(fail_at("unterminated array", start)),
                Some(_) => {}
            }

            elements.push(self.parse_value()?);

            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(fail_at("unterminated array", start)),
                Some(_) => return Err(self.fail("expected ',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(self.node(NodeKind::Array(elements), start))
    }

    /// Parse a string literal starting at the opening quote
    fn parse_string(&mut self) -> Result<String, ParseFailure> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None => return Err(fail_at("unterminated string", start)),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => self.pos += 2,
                Some(b) if b < 0x20 => return Err(self.fail("control character in string")),
                Some(_) => self.pos += 1,
            }
        }

        // Quotes are ASCII, so both ends sit on char boundaries
        serde_json::from_str::<String>(&self.src[start..self.pos])
            .map_err(|e| fail_at(&format!("invalid string: {}", e), start))
    }

    fn parse_number(&mut self) -> Result<Node, ParseFailure> {
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') = self.peek() {
            self.pos += 1;
        }

        match serde_json::from_str::<Value>(&self.src[start..self.pos]) {
            Ok(Value::Number(n)) => Ok(self.node(NodeKind::Number(n), start)),
            _ => Err(fail_at("invalid number", start)),
        }
    }

    fn parse_literal(&mut self, literal: &str, kind: NodeKind) -> Result<Node, ParseFailure> {
        let start = self.pos;
        if self.bytes[self.pos..].starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            Ok(self.node(kind, start))
        } else {
            Err(self.fail("unexpected character"))
        }
    }
}

fn fail_at(message: &str, offset: usize) -> ParseFailure {
    ParseFailure {
        message: message.to_string(),
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_json() {
        let node = parse(r#"{"a": [1, 2.5, true, null], "b": "x"}"#).unwrap();
        assert_eq!(node.to_value(), json!({"a": [1, 2.5, true, null], "b": "x"}));
    }

    #[test]
    fn test_comments_are_skipped() {
        let text = r#"{
  // line comment
  "a": 1, /* block
  comment */ "b": "// not a comment"
}"#;
        let node = parse(text).unwrap();
        assert_eq!(node.to_value(), json!({"a": 1, "b": "// not a comment"}));
    }

    #[test]
    fn test_trailing_commas_are_accepted() {
        let node = parse(r#"{"a": [1, 2,], "b": {},}"#).unwrap();
        assert_eq!(node.to_value(), json!({"a": [1, 2], "b": {}}));
    }

    #[test]
    fn test_leading_comma_is_rejected() {
        assert!(parse("{,}").is_err());
        assert!(parse("[,]").is_err());
    }

    #[test]
    fn test_key_and_value_spans() {
        let text = r#"{"animations": {"animation.walk": {}}}"#;
        let node = parse(text).unwrap();
        let animations = node.get("animations").unwrap();
        let property = &animations.properties()[0];

        assert_eq!(&text[property.key_span.start..property.key_span.end], "\"animation.walk\"");
        assert_eq!(&text[property.value.span.start..property.value.span.end], "{}");
    }

    #[test]
    fn test_pointer_follows_keys() {
        let node = parse(r#"{"minecraft:entity": {"description": {"identifier": "x:y"}}}"#).unwrap();
        let id = node
            .pointer(&["minecraft:entity", "description", "identifier"])
            .and_then(Node::as_str);
        assert_eq!(id, Some("x:y"));
        assert!(node.pointer(&["minecraft:entity", "missing"]).is_none());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let node = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(node.get("a").unwrap().to_value(), json!(2));
        assert_eq!(node.to_value(), json!({"a": 2}));
    }

    #[test]
    fn test_escaped_strings() {
        let node = parse(r#"{"k": "quote \" and é"}"#).unwrap();
        assert_eq!(node.get("k").and_then(Node::as_str), Some("quote \" and é"));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let node = parse("\u{feff}{\"a\": 1}").unwrap();
        assert_eq!(node.to_value(), json!({"a": 1}));
    }

    #[test]
    fn test_malformed_inputs_fail_without_panicking() {
        for text in [
            "",
            "{",
            "{\"a\" 1}",
            "{\"a\": }",
            "[1 2]",
            "\"unterminated",
            "{\"a\": 1} extra",
            "/* never closed",
            "{\"a\": tru}",
            "{\"a\": -}",
            "{\"a\": \"line\nbreak\"}",
            "/ {}",
        ] {
            assert!(parse(text).is_err(), "expected failure for {:?}", text);
        }
    }

    #[test]
    fn test_failure_reports_offset() {
        let failure = parse("{\"a\": 1,\n \"b\" 2}").unwrap_err();
        assert_eq!(failure.offset, 14);
        assert_eq!(failure.message, "expected ':'");
    }

    #[test]
    fn test_nesting_limit() {
        let deep = "[".repeat(MAX_DEPTH + 1) + &"]".repeat(MAX_DEPTH + 1);
        let failure = parse(&deep).unwrap_err();
        assert_eq!(failure.message, "nesting too deep");

        let ok = "[".repeat(MAX_DEPTH) + &"]".repeat(MAX_DEPTH);
        assert!(parse(&ok).is_ok());
    }
}
