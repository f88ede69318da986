//! Access to the MediaWiki action API.
//!
//! The request and response structures mirror the subset of the
//! API that is actually used. Unknown fields are ignored.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::entities::RevisionId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authorization failed: {0}")]
    Auth(String),
    #[error("Edit failed (HTTP status {status}): {body}")]
    EditFailed { status: u16, body: String },
    #[error("The edit response did not contain a revision id")]
    EditIncomplete,
    #[error("Query failed: {0}")]
    Query(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An OAuth 1.0a key and its secret.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
    pub key: String,
    pub secret: String,
}

impl OAuthToken {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthToken")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

/// Everything needed to sign requests on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// Registered application
    pub consumer: OAuthToken,
    /// Access token granted by the user at login
    pub access: OAuthToken,
}

/// One-time CSRF token that authorizes a state-changing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditToken(String);

impl EditToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Form encoded parameters of an edit request.
pub type EditFormParams = Vec<(&'static str, String)>;

pub trait WikiEditGateway {
    fn fetch_csrf_token(&self, credentials: &OAuthCredentials) -> Result<EditToken, Error>;

    /// Posts a signed edit request.
    ///
    /// Returns the id of the new revision if the response contained one.
    fn post_edit(
        &self,
        credentials: &OAuthCredentials,
        params: &EditFormParams,
    ) -> Result<Option<RevisionId>, Error>;
}

pub trait CategoryMembersGateway {
    /// Lists a single page of the members of a category.
    fn category_members(
        &self,
        category_title: &str,
        continue_from: Option<&str>,
    ) -> Result<CategoryMembersResponse, Error>;
}

// ---- action=query&meta=tokens ---- //

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub query: TokenQuery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenQuery {
    pub tokens: Tokens,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tokens {
    pub csrftoken: String,
}

// ---- edit actions ---- //

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditResponse {
    #[serde(default)]
    pub pageinfo: Option<PageInfo>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub lastrevid: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl EditResponse {
    pub fn last_revision_id(&self) -> Option<RevisionId> {
        self.pageinfo
            .as_ref()
            .and_then(|info| info.lastrevid)
            .filter(|id| *id > 0)
            .map(RevisionId::from)
    }
}

// ---- list=categorymembers ---- //

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryMembersResponse {
    #[serde(default)]
    pub query: CategoryMembersQuery,
    #[serde(rename = "continue", default)]
    pub continuation: Option<CategoryMembersContinue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryMembersQuery {
    #[serde(default)]
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMember {
    pub title: String,
    #[serde(rename = "type", default)]
    pub member_type: Option<CategoryMemberType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMemberType {
    File,
    Subcat,
    Page,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryMembersContinue {
    #[serde(default)]
    pub cmcontinue: Option<String>,
}

impl CategoryMembersResponse {
    pub fn continue_from(&self) -> Option<&str> {
        self.continuation
            .as_ref()
            .and_then(|c| c.cmcontinue.as_deref())
            .filter(|c| !c.is_empty())
    }
}
