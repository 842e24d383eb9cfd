//! Structural paths into a settings tree.
//!
//! A path names one node inside an extension's settings tree by the descent
//! taken from the root object:
//! - Object members are addressed by key, joined with `.`
//! - Array elements are addressed by position, written `[n]`
//!
//! The encoded form (`hotkeys[2].key`) is what selections store and what the
//! CLI prints. Parsing is pure string work with no tree access, so paths
//! recorded against an older settings shape still parse; whether they lead
//! anywhere is decided later, by [`SettingPath::resolve`].

use serde_json::Value;
use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use thiserror::Error;

/// One step of a descent: an object member or an array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member access by key.
    Key(String),
    /// Array element access by position.
    Index(usize),
}

/// Why an encoded path failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,
    #[error("path starts with a separator")]
    LeadingSeparator,
    #[error("'.' must be followed by a member key")]
    EmptyKey,
    #[error("'[' without matching ']'")]
    UnclosedBracket,
    #[error("'{0}' is not an array index")]
    InvalidIndex(String),
    #[error("expected '.' or '[' after an index")]
    MissingSeparator,
}

/// A parsed structural path, relative to an extension's root object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingPath {
    segments: Vec<Segment>,
}

impl SettingPath {
    /// Build a path from segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The descent steps, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Extend the path by one segment, returning the longer path.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Follow the path through `tree`, returning the addressed node.
    ///
    /// Returns `None` when any step fails: a missing key, an index past the
    /// end of an array, or a descent into a value that has no children of
    /// the required shape.
    pub fn resolve<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        let mut node = tree;
        for segment in &self.segments {
            node = match segment {
                Segment::Key(key) => node.as_object()?.get(key)?,
                Segment::Index(index) => node.as_array()?.get(*index)?,
            };
        }
        Some(node)
    }
}

impl fmt::Display for SettingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for SettingPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }
        let mut segments = Vec::new();
        let mut chars = s.chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                '.' => {
                    if segments.is_empty() {
                        return Err(PathParseError::LeadingSeparator);
                    }
                    chars.next();
                    let key = take_key(&mut chars);
                    if key.is_empty() {
                        return Err(PathParseError::EmptyKey);
                    }
                    segments.push(Segment::Key(key));
                }
                '[' => {
                    chars.next();
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) => digits.push(d),
                            None => return Err(PathParseError::UnclosedBracket),
                        }
                    }
                    // Bare decimal digits only; rejects "", "-1", "+1", "1.5"
                    if digits.is_empty() || !digits.chars().all(|d| d.is_ascii_digit()) {
                        return Err(PathParseError::InvalidIndex(digits));
                    }
                    let index: usize = digits
                        .parse()
                        .map_err(|_| PathParseError::InvalidIndex(digits.clone()))?;
                    segments.push(Segment::Index(index));
                }
                _ => {
                    // A bare key is only legal as the very first segment;
                    // later keys must be introduced by '.'
                    if !segments.is_empty() {
                        return Err(PathParseError::MissingSeparator);
                    }
                    segments.push(Segment::Key(take_key(&mut chars)));
                }
            }
        }

        Ok(Self { segments })
    }
}

/// Consume characters up to the next separator. Keys may contain anything
/// except `.` and `[`; the encoded form has no escaping.
fn take_key(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut key = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' || c == '[' {
            break;
        }
        key.push(c);
        chars.next();
    }
    key
}
