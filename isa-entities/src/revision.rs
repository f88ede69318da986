use std::fmt;

pub type RevisionValue = u64;

/// Identifier of the page version created by an edit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RevisionId(RevisionValue);

impl From<RevisionId> for RevisionValue {
    fn from(from: RevisionId) -> Self {
        from.0
    }
}

impl From<RevisionValue> for RevisionId {
    fn from(from: RevisionValue) -> Self {
        Self(from)
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
