//! Terms of the graph: URIs, literals, and triples.
//!
//! A triple is a `(subject, predicate, object)` fact. Subjects and
//! predicates are always URIs; objects are either URIs or literals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A namespace-qualified identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace-local portion: everything after the last `#`,
    /// or after the last `/` or `:` when there is no fragment marker.
    pub fn fragment(&self) -> &str {
        match self.0.rfind('#') {
            Some(idx) => &self.0[idx + 1..],
            None => match self.0.rfind(['/', ':']) {
                Some(idx) => &self.0[idx + 1..],
                None => &self.0,
            },
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Sanitize a human-readable name into a URI fragment.
///
/// Every character outside `[A-Za-z0-9_-]` is replaced with `_`. Distinct
/// names can collapse to the same fragment; callers that mint fragments
/// from user data are expected to watch for collisions.
pub fn sanitize_fragment(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A literal value carried by a triple object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The lexical form, without quoting.
    pub fn lexical(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::Int(i64::from(value))
    }
}

impl From<u8> for Literal {
    fn from(value: u8) -> Self {
        Literal::Int(i64::from(value))
    }
}

/// Object position of a triple: a URI or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Uri(Uri),
    Literal(Literal),
}

impl Term {
    pub fn uri(value: impl Into<Uri>) -> Self {
        Term::Uri(value.into())
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Term::Literal(value.into())
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Term::Uri(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Uri(u) => write!(f, "{u}"),
            Term::Literal(l) => write!(f, "{l}"),
        }
    }
}

impl From<Uri> for Term {
    fn from(value: Uri) -> Self {
        Term::Uri(value)
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::Literal(value)
    }
}

/// A single `(subject, predicate, object)` fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Uri,
    pub predicate: Uri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Uri>, predicate: impl Into<Uri>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_clean_names_through() {
        assert_eq!(sanitize_fragment("ietf-interfaces"), "ietf-interfaces");
        assert_eq!(sanitize_fragment("eth0"), "eth0");
    }

    #[test]
    fn sanitize_replaces_everything_else() {
        assert_eq!(sanitize_fragment("GigabitEthernet0/0/1"), "GigabitEthernet0_0_1");
        assert_eq!(sanitize_fragment("a b:c"), "a_b_c");
    }

    #[test]
    fn sanitize_can_collide() {
        assert_eq!(sanitize_fragment("eth 0"), sanitize_fragment("eth/0"));
    }

    #[test]
    fn uri_fragment() {
        assert_eq!(Uri::new("http://example.org/yang#Leaf").fragment(), "Leaf");
        assert_eq!(Uri::new("urn:ietf:params").fragment(), "params");
    }

    #[test]
    fn literal_accessors() {
        assert_eq!(Literal::from(true).as_bool(), Some(true));
        assert_eq!(Literal::from(24u8).as_int(), Some(24));
        assert_eq!(Literal::from("up").as_str(), Some("up"));
        assert_eq!(Literal::from(42i64).as_bool(), None);
    }
}
