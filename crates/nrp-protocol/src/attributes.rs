//! Attributes stream: per-scope attribute values.
//!
//! Scope is the participant's tracker id; attribute is a fixed numeric slot
//! (e.g. the hero short code). Access goes through [`AttributeEvents::value`],
//! which fails with a named error instead of panicking on a missing key.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeValue {
    pub namespace: u32,
    pub attrid: u32,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeError {
    MissingScope { scope: u32 },
    MissingAttribute { scope: u32, attribute: u32 },
    /// The slot exists but holds no value entries.
    EmptyValue { scope: u32, attribute: u32 },
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingScope { scope } => write!(f, "attributes have no scope {scope}"),
            Self::MissingAttribute { scope, attribute } => {
                write!(f, "attribute {attribute} missing in scope {scope}")
            }
            Self::EmptyValue { scope, attribute } => {
                write!(f, "attribute {attribute} in scope {scope} has no value")
            }
        }
    }
}

impl std::error::Error for AttributeError {}

/// Two-level mapping: scope -> attribute id -> values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeEvents {
    scopes: BTreeMap<u32, BTreeMap<u32, Vec<AttributeValue>>>,
}

impl AttributeEvents {
    pub fn new(scopes: BTreeMap<u32, BTreeMap<u32, Vec<AttributeValue>>>) -> Self {
        Self { scopes }
    }

    pub fn insert(&mut self, scope: u32, value: AttributeValue) {
        self.scopes
            .entry(scope)
            .or_default()
            .entry(value.attrid)
            .or_default()
            .push(value);
    }

    pub fn scopes(&self) -> impl Iterator<Item = u32> + '_ {
        self.scopes.keys().copied()
    }

    /// First value of `attribute` in `scope`, with NUL padding and
    /// surrounding whitespace stripped.
    pub fn value(&self, scope: u32, attribute: u32) -> Result<&str, AttributeError> {
        let attrs = self
            .scopes
            .get(&scope)
            .ok_or(AttributeError::MissingScope { scope })?;
        let values = attrs
            .get(&attribute)
            .ok_or(AttributeError::MissingAttribute { scope, attribute })?;
        let first = values
            .first()
            .ok_or(AttributeError::EmptyValue { scope, attribute })?;
        Ok(first
            .value
            .trim_matches(|c: char| c == '\0' || c.is_whitespace()))
    }
}
