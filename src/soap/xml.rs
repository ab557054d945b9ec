//! Just enough XML to read and write SOAP 1.1 envelopes: the five predefined
//! entities, namespace-prefix resolution, and a tree of elements. Attributes
//! other than `xmlns` declarations carry no routing information and are
//! dropped. Document type declarations are rejected outright (XXE).

use crate::utils::error::{Result, ServiceError};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub namespace: String,
    pub local: String,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn child(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.namespace == namespace && c.local == local)
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn unescape(s: &str) -> Result<String> {
    if !s.contains('&') {
        return Ok(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let end = after
            .find(';')
            .ok_or_else(|| xml_error("unterminated entity reference"))?;
        let entity = &after[..end];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => out.push(parse_char_reference(entity)?),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn parse_char_reference(entity: &str) -> Result<char> {
    let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok()
    } else {
        return Err(xml_error(format!("unknown entity reference: &{};", entity)));
    };

    code.and_then(char::from_u32)
        .ok_or_else(|| xml_error(format!("invalid character reference: &{};", entity)))
}

/// Parse a standalone XML document into its root element.
pub fn parse(input: &str) -> Result<Element> {
    let input = input.trim_start_matches('\u{feff}');
    let mut reader = Reader::new(input);
    reader.skip_misc()?;
    if reader.at_end() {
        return Err(xml_error("empty document"));
    }

    let mut scope = NamespaceScope::new();
    let root = reader.parse_element(&mut scope)?;

    reader.skip_misc()?;
    if !reader.at_end() {
        return Err(xml_error("trailing content after document element"));
    }
    Ok(root)
}

fn xml_error(message: impl Into<String>) -> ServiceError {
    ServiceError::XmlError {
        message: message.into(),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ':' | '_' | '-' | '.')
}

struct NamespaceScope {
    frames: Vec<HashMap<String, String>>,
}

impl NamespaceScope {
    fn new() -> Self {
        Self { frames: Vec::new() }
    }

    fn push(&mut self, declarations: HashMap<String, String>) {
        self.frames.push(declarations);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(prefix))
            .map(String::as_str)
    }
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn expect(&mut self, s: &str) -> Result<()> {
        if self.starts_with(s) {
            self.advance(s.len());
            Ok(())
        } else {
            Err(xml_error(format!("expected '{}' at offset {}", s, self.pos)))
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self
            .rest()
            .trim_start_matches(|c: char| c.is_ascii_whitespace());
        self.pos = self.input.len() - trimmed.len();
    }

    /// Consume up to and including `marker`, returning the content before it.
    fn skip_until(&mut self, marker: &str, what: &str) -> Result<&'a str> {
        match self.rest().find(marker) {
            Some(idx) => {
                let content = &self.rest()[..idx];
                self.advance(idx + marker.len());
                Ok(content)
            }
            None => Err(xml_error(format!("unterminated {}", what))),
        }
    }

    fn read_name(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if end == 0 {
            return Err(xml_error(format!("expected a name at offset {}", self.pos)));
        }
        let name = &rest[..end];
        self.advance(end);
        Ok(name)
    }

    /// Skip whitespace, comments and processing instructions between markup.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.advance(2);
                self.skip_until("?>", "processing instruction")?;
            } else if self.starts_with("<!--") {
                self.advance(4);
                self.skip_until("-->", "comment")?;
            } else if self.starts_with("<!DOCTYPE") {
                return Err(xml_error("document type declarations are not accepted"));
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self, scope: &mut NamespaceScope) -> Result<Element> {
        self.expect("<")?;
        let raw_name = self.read_name()?;
        let mut declarations = HashMap::new();

        loop {
            self.skip_whitespace();
            if self.starts_with("/>") || self.starts_with(">") {
                break;
            }
            let attr_name = self.read_name()?;
            self.skip_whitespace();
            self.expect("=")?;
            self.skip_whitespace();
            let quote = if self.starts_with("\"") {
                "\""
            } else if self.starts_with("'") {
                "'"
            } else {
                return Err(xml_error(format!(
                    "attribute {} is missing a quoted value",
                    attr_name
                )));
            };
            self.advance(1);
            let raw_value = self.skip_until(quote, "attribute value")?;
            if attr_name == "xmlns" {
                declarations.insert(String::new(), unescape(raw_value)?);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                declarations.insert(prefix.to_string(), unescape(raw_value)?);
            }
        }

        scope.push(declarations);
        let result = self.parse_element_content(scope, raw_name);
        scope.pop();
        result
    }

    fn parse_element_content(
        &mut self,
        scope: &mut NamespaceScope,
        raw_name: &'a str,
    ) -> Result<Element> {
        let (prefix, local) = match raw_name.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", raw_name),
        };
        let namespace = match scope.resolve(prefix) {
            Some(uri) => uri.to_string(),
            None if prefix.is_empty() => String::new(),
            None => {
                return Err(xml_error(format!("unbound namespace prefix '{}'", prefix)));
            }
        };

        let mut element = Element {
            namespace,
            local: local.to_string(),
            children: Vec::new(),
            text: String::new(),
        };

        if self.starts_with("/>") {
            self.advance(2);
            return Ok(element);
        }
        self.expect(">")?;

        loop {
            if self.at_end() {
                return Err(xml_error(format!(
                    "unexpected end of input inside <{}>",
                    raw_name
                )));
            }
            if self.starts_with("</") {
                self.advance(2);
                let end_name = self.read_name()?;
                if end_name != raw_name {
                    return Err(xml_error(format!(
                        "mismatched end tag: expected </{}>, found </{}>",
                        raw_name, end_name
                    )));
                }
                self.skip_whitespace();
                self.expect(">")?;
                return Ok(element);
            } else if self.starts_with("<!--") {
                self.advance(4);
                self.skip_until("-->", "comment")?;
            } else if self.starts_with("<![CDATA[") {
                self.advance(9);
                let content = self.skip_until("]]>", "CDATA section")?;
                element.text.push_str(content);
            } else if self.starts_with("<") {
                let child = self.parse_element(scope)?;
                element.children.push(child);
            } else {
                let rest = self.rest();
                let end = rest.find('<').unwrap_or(rest.len());
                element.text.push_str(&unescape(&rest[..end])?);
                self.advance(end);
            }
        }
    }
}
