//! The CSS selector subset understood by gallery options.
//!
//! `imagesSelector` and `galleryElementSelector` are parsed once when a
//! [`Gallery`](crate::gallery::Gallery) is constructed, so a typo surfaces as a
//! configuration error instead of an empty query.
//!
//! Supported grammar:
//!
//! ```text
//! selector  := compound ( combinator compound )*
//! combinator:= whitespace (descendant) | ">" (child)
//! compound  := "*" | tag? ( "#id" | ".class" | "[attr]" | "[attr=value]" )*
//! ```
//!
//! Selector lists (`a, b`), pseudo-classes and sibling combinators are
//! rejected.

use crate::dom::Host;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported character {found:?} at offset {offset} in `{selector}`")]
    Unsupported {
        selector: String,
        found: char,
        offset: usize,
    },
    #[error("expected a name at offset {offset} in `{selector}`")]
    ExpectedName { selector: String, offset: usize },
    #[error("dangling combinator in `{0}`")]
    DanglingCombinator(String),
    #[error("unterminated attribute selector in `{0}`")]
    UnterminatedAttribute(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector: everything between two combinators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches<H: Host>(&self, host: &H, node: H::Node) -> bool {
        if let Some(tag) = &self.tag {
            if !host.tag_name(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if host.attribute(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| host.has_class(node, c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, host.attribute(node, &a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(want), Some(have)) => *want == have,
        })
    }
}

/// A parsed selector. Keeps its source text so hosts backed by a real
/// rendering engine can hand it straight to the native query API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse()
    }

    /// A bare tag selector such as `img`.
    pub fn tag(name: &str) -> Self {
        Self {
            source: name.to_string(),
            compounds: vec![Compound {
                tag: Some(name.to_ascii_lowercase()),
                ..Compound::default()
            }],
            combinators: Vec::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The id when the selector is exactly `#id`.
    pub fn simple_id(&self) -> Option<&str> {
        match self.compounds.as_slice() {
            [
                Compound {
                    tag: None,
                    id: Some(id),
                    classes,
                    attrs,
                },
            ] if classes.is_empty() && attrs.is_empty() => Some(id.as_str()),
            _ => None,
        }
    }

    /// Test `node` against the selector, walking ancestors right to left.
    pub fn matches<H: Host>(&self, host: &H, node: H::Node) -> bool {
        self.matches_at(host, node, self.compounds.len() - 1)
    }

    fn matches_at<H: Host>(&self, host: &H, node: H::Node, idx: usize) -> bool {
        if !self.compounds[idx].matches(host, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => host
                .parent(node)
                .is_some_and(|p| self.matches_at(host, p, idx - 1)),
            Combinator::Descendant => {
                let mut current = host.parent(node);
                while let Some(ancestor) = current {
                    if self.matches_at(host, ancestor, idx - 1) {
                        return true;
                    }
                    current = host.parent(ancestor);
                }
                false
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.trim().char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(o, _)| o)
            .unwrap_or_else(|| self.source.trim().len())
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn name(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(SelectorError::ExpectedName {
                selector: self.source.to_string(),
                offset: self.offset(),
            });
        }
        Ok(self.chars[start..self.pos].iter().map(|&(_, c)| c).collect())
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        if self.chars.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        while self.pos < self.chars.len() {
            let had_space = self.skip_whitespace();
            let combinator = if self.peek() == Some('>') {
                self.pos += 1;
                self.skip_whitespace();
                Combinator::Child
            } else if had_space {
                Combinator::Descendant
            } else {
                return Err(self.unsupported());
            };
            if self.pos >= self.chars.len() {
                return Err(SelectorError::DanglingCombinator(self.source.to_string()));
            }
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Ok(Selector {
            source: self.source.trim().to_string(),
            compounds,
            combinators,
        })
    }

    fn unsupported(&self) -> SelectorError {
        SelectorError::Unsupported {
            selector: self.source.to_string(),
            found: self.peek().unwrap_or(' '),
            offset: self.offset(),
        }
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let start = self.pos;

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_name_char(c) => compound.tag = Some(self.name()?.to_ascii_lowercase()),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.name()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.name()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attribute()?);
                }
                Some(c) if c.is_whitespace() || c == '>' => break,
                None => break,
                Some(_) => return Err(self.unsupported()),
            }
        }

        if self.pos == start {
            return Err(self.unsupported());
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.name()?;
        self.skip_whitespace();
        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                Some(self.attribute_value()?)
            }
            None => return Err(SelectorError::UnterminatedAttribute(self.source.to_string())),
            Some(_) => return Err(self.unsupported()),
        };
        self.skip_whitespace();
        if self.peek() != Some(']') {
            return Err(SelectorError::UnterminatedAttribute(self.source.to_string()));
        }
        self.pos += 1;
        Ok(AttrMatch { name, value })
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(SelectorError::UnterminatedAttribute(self.source.to_string()));
                }
                let value = self.chars[start..self.pos].iter().map(|&(_, c)| c).collect();
                self.pos += 1;
                Ok(value)
            }
            _ => self.name(),
        }
    }
}
