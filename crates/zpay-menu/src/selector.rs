//! Parser for the CSS selector subset understood by the in-memory document.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! (bare or quoted value), compound steps, the descendant and child
//! combinators, and comma-separated groups.

use crate::error::SelectorError;

/// Comma-separated selector groups; an element matches if any group does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList {
    pub(crate) groups: Vec<ComplexSelector>,
}

/// Chain of compound steps joined by combinators, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComplexSelector {
    pub(crate) parts: Vec<SelectorPart>,
}

/// One compound step plus the combinator linking it to the previous step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) combinator: Option<Combinator>,
    pub(crate) compound: CompoundSelector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CompoundSelector {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<AttributeCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttributeCondition {
    Exists { name: String },
    Equals { name: String, value: String },
}

/// Parse `input` into a selector list.
pub(crate) fn parse(input: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser {
        source: input,
        chars: input.chars().collect(),
        pos: 0,
    };
    let mut groups = Vec::new();
    loop {
        groups.push(parser.complex()?);
        match parser.peek() {
            Some(',') => parser.pos += 1,
            None => break,
            Some(_) => return Err(parser.unsupported("unexpected character")),
        }
    }
    Ok(SelectorList { groups })
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unsupported(&self, reason: &'static str) -> SelectorError {
        SelectorError::unsupported(self.source, reason)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut parts: Vec<SelectorPart> = Vec::new();
        let mut pending: Option<Combinator> = None;
        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    if parts.is_empty() || pending == Some(Combinator::Child) {
                        return Err(self.unsupported("dangling child combinator"));
                    }
                    self.pos += 1;
                    pending = Some(Combinator::Child);
                }
                Some('+' | '~') => {
                    return Err(self.unsupported("sibling combinators are not supported"));
                }
                Some(_) => {
                    let combinator = if parts.is_empty() {
                        None
                    } else {
                        Some(pending.take().unwrap_or(Combinator::Descendant))
                    };
                    let compound = self.compound()?;
                    parts.push(SelectorPart {
                        combinator,
                        compound,
                    });
                }
            }
        }
        if pending.is_some() {
            return Err(self.unsupported("dangling child combinator"));
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(ComplexSelector { parts })
    }

    fn compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut compound = CompoundSelector::default();
        let mut universal = false;
        let start = self.pos;
        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    if compound.id.is_some() {
                        return Err(self.unsupported("multiple ids in one step"));
                    }
                    compound.id = Some(self.identifier()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.identifier()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                Some('*') if self.pos == start => {
                    self.pos += 1;
                    universal = true;
                }
                Some(c) if self.pos == start && is_identifier_char(c) => {
                    compound.tag = Some(self.identifier()?.to_ascii_lowercase());
                }
                None | Some(',' | '>') => break,
                Some(c) if c.is_whitespace() => break,
                Some(':') => return Err(self.unsupported("pseudo-classes are not supported")),
                Some(_) => return Err(self.unsupported("unexpected character")),
            }
        }
        let empty = compound.tag.is_none()
            && compound.id.is_none()
            && compound.classes.is_empty()
            && compound.attributes.is_empty();
        if empty && !universal {
            return Err(SelectorError::Empty);
        }
        Ok(compound)
    }

    fn identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unsupported("expected a name"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<AttributeCondition, SelectorError> {
        self.skip_whitespace();
        let name = self.identifier()?.to_ascii_lowercase();
        self.skip_whitespace();
        let condition = match self.peek() {
            Some(']') => AttributeCondition::Exists { name },
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = self.attribute_value()?;
                self.skip_whitespace();
                AttributeCondition::Equals { name, value }
            }
            Some('~' | '|' | '^' | '$' | '*') => {
                return Err(self.unsupported("attribute operators other than '=' are not supported"));
            }
            _ => return Err(self.unsupported("unterminated attribute selector")),
        };
        if self.peek() != Some(']') {
            return Err(self.unsupported("unterminated attribute selector"));
        }
        self.pos += 1;
        Ok(condition)
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
                    return Err(self.unsupported("unterminated quoted value"));
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                Ok(value)
            }
            _ => self.identifier(),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
