use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a taxonomy term.
///
/// Sources emit either numeric or string ids; both compare and hash by
/// value, so a term list may mix the two as long as each id is stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TermId {
    Int(i64),
    Str(String),
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermId::Int(n) => write!(f, "{}", n),
            TermId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl TermId {
    /// Parse an id out of a raw exclude-list entry. Numeric entries become
    /// integer ids so they match terms with numeric ids; anything else is
    /// kept as a string and compared as-is (and so never matches an
    /// integer id).
    pub fn parse(raw: &str) -> TermId {
        match raw.trim().parse::<i64>() {
            Ok(n) => TermId::Int(n),
            Err(_) => TermId::Str(raw.trim().to_string()),
        }
    }
}

/// One taxonomy entry from the flat source list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Term {
    pub id: TermId,
    /// Parent term id; absent, `null`, `0`, or `""` marks a top-level term.
    #[serde(default, alias = "parentId")]
    pub parent: Option<TermId>,
    /// URL-safe path segment.
    pub slug: String,
    /// Display label. Treated as untrusted and escaped at emission.
    pub name: String,
    /// Record source this term belongs to. Only upstream filtering looks at
    /// this; the renderer never does.
    #[serde(default)]
    pub taxonomy: Option<String>,
    /// Number of attached objects, when the source reports one.
    #[serde(default)]
    pub count: Option<u64>,
}

impl Term {
    /// The parent id to group under, or `None` for top-level terms.
    pub fn parent_key(&self) -> Option<&TermId> {
        match &self.parent {
            None | Some(TermId::Int(0)) => None,
            Some(TermId::Str(s)) if s.is_empty() => None,
            Some(other) => Some(other),
        }
    }
}
