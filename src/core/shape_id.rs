//! Absolute shape identifiers (`namespace#Name` or `namespace#Name$member`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An absolute shape identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId {
    namespace: String,
    name: String,
    member: Option<String>,
}

impl ShapeId {
    /// Create a shape id from a namespace and a name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ShapeId {
            namespace: namespace.into(),
            name: name.into(),
            member: None,
        }
    }

    /// Get the namespace (the part before `#`).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the shape name, without namespace or member.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the member name, if this id points at a member.
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Get the id of the containing shape (drops the member).
    pub fn without_member(&self) -> ShapeId {
        ShapeId::new(self.namespace.clone(), self.name.clone())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)?;
        if let Some(member) = &self.member {
            write!(f, "${}", member)?;
        }
        Ok(())
    }
}

impl FromStr for ShapeId {
    type Err = ShapeIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ShapeIdParseError(s.to_string());

        let (namespace, rest) = s.split_once('#').ok_or_else(err)?;
        let (name, member) = match rest.split_once('$') {
            Some((name, member)) => (name, Some(member)),
            None => (rest, None),
        };

        let valid_namespace = !namespace.is_empty() && namespace.split('.').all(is_identifier);
        if !valid_namespace || !is_identifier(name) || !member.map_or(true, is_identifier) {
            return Err(err());
        }

        Ok(ShapeId {
            namespace: namespace.to_string(),
            name: name.to_string(),
            member: member.map(str::to_string),
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Error returned when parsing an invalid shape id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeIdParseError(pub String);

impl fmt::Display for ShapeIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape id '{}', expected `namespace#Name` or `namespace#Name$member`",
            self.0
        )
    }
}

impl std::error::Error for ShapeIdParseError {}

impl Serialize for ShapeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShapeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
