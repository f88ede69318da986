use crate::id::UserId;

/// A contributor as known from the wiki login.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id            : UserId,
    pub username      : String,
    pub pref_lang     : String,
    /// Number of recorded contributions over all campaigns.
    pub contributions : u64,
}
