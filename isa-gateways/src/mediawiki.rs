use std::time::Duration;

use anyhow::Result as Fallible;
use isa_core::{entities::RevisionId, gateways::wiki::*};
use reqwest::{blocking::Client, header::AUTHORIZATION, StatusCode, Url};
use serde::Deserialize;

use crate::oauth1::{self, Method};

/// The anonymous CSRF token that is returned if the
/// request was not authenticated.
const ANONYMOUS_TOKEN: &str = "+\\";

const USER_AGENT: &str = concat!("isa/", env!("CARGO_PKG_VERSION"));

/// A client of the MediaWiki action API, e.g. of Wikimedia Commons.
#[derive(Debug, Clone)]
pub struct MediaWiki {
    api_url: Url,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiError>,
}

impl MediaWiki {
    pub fn new(api_url: &str, request_timeout: Duration) -> Fallible<Self> {
        let api_url = Url::parse(api_url)?;
        if api_url.query().is_some() {
            anyhow::bail!("The API URL must not contain a query: {api_url}");
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { api_url, client })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

fn token_query() -> [(&'static str, &'static str); 3] {
    [("action", "query"), ("meta", "tokens"), ("format", "json")]
}

fn category_members_query<'a>(
    category_title: &'a str,
    continue_from: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![
        ("action", "query"),
        ("format", "json"),
        ("list", "categorymembers"),
        ("cmlimit", "max"),
        // File and Category
        ("cmnamespace", "6|14"),
        ("cmprop", "title|type"),
        ("cmtitle", category_title),
    ];
    if let Some(continue_from) = continue_from {
        query.push(("cmcontinue", continue_from));
    }
    query
}

fn api_error(body: &str) -> Option<ApiError> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
}

fn csrf_token_from_response(status: StatusCode, body: &str) -> Result<EditToken, Error> {
    if !status.is_success() {
        return Err(Error::Auth(format!("HTTP status {status}")));
    }
    if let Some(ApiError { code, info }) = api_error(body) {
        return Err(Error::Auth(format!("{code}: {info}")));
    }
    let response: TokenResponse = serde_json::from_str(body)
        .map_err(|err| Error::Auth(format!("Unexpected token response: {err}")))?;
    let token = response.query.tokens.csrftoken;
    if token == ANONYMOUS_TOKEN {
        return Err(Error::Auth("The request was not authenticated".into()));
    }
    Ok(EditToken::new(token))
}

fn revision_from_edit_response(status: StatusCode, body: String) -> Result<Option<RevisionId>, Error> {
    if status != StatusCode::OK {
        return Err(Error::EditFailed {
            status: status.as_u16(),
            body,
        });
    }
    let response: EditResponse = match serde_json::from_str(&body) {
        Ok(response) => response,
        Err(err) => {
            log::warn!("Unexpected edit response: {err}");
            return Err(Error::EditFailed {
                status: status.as_u16(),
                body,
            });
        }
    };
    if let Some(ApiError { code, info }) = response.error {
        return Err(Error::EditFailed {
            status: status.as_u16(),
            body: format!("{code}: {info}"),
        });
    }
    Ok(response.last_revision_id())
}

fn category_members_from_response(
    status: StatusCode,
    body: &str,
) -> Result<CategoryMembersResponse, Error> {
    if !status.is_success() {
        return Err(Error::Query(format!("HTTP status {status}")));
    }
    if let Some(ApiError { code, info }) = api_error(body) {
        return Err(Error::Query(format!("{code}: {info}")));
    }
    serde_json::from_str(body).map_err(|err| Error::Query(err.to_string()))
}

impl WikiEditGateway for MediaWiki {
    fn fetch_csrf_token(&self, credentials: &OAuthCredentials) -> Result<EditToken, Error> {
        let query = token_query();
        let authorization =
            oauth1::authorization_header(Method::Get, &self.api_url, &query, credentials);
        log::debug!("Requesting CSRF token from {}", self.api_url);
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&query)
            .header(AUTHORIZATION, authorization)
            .send()
            .map_err(|err| {
                log::warn!("Failed to request CSRF token: {err}");
                Error::Auth(err.to_string())
            })?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| Error::Auth(err.to_string()))?;
        csrf_token_from_response(status, &body).inspect_err(|err| {
            log::warn!("Failed to obtain CSRF token: {err}");
        })
    }

    fn post_edit(
        &self,
        credentials: &OAuthCredentials,
        params: &EditFormParams,
    ) -> Result<Option<RevisionId>, Error> {
        let form: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let authorization =
            oauth1::authorization_header(Method::Post, &self.api_url, &form, credentials);
        log::debug!("Posting edit to {}", self.api_url);
        let response = self
            .client
            .post(self.api_url.clone())
            .form(&form)
            .header(AUTHORIZATION, authorization)
            .send()
            .map_err(|err| {
                log::warn!("Failed to post edit: {err}");
                Error::EditFailed {
                    status: err.status().map(|s| s.as_u16()).unwrap_or_default(),
                    body: err.to_string(),
                }
            })?;
        let status = response.status();
        let body = response.text().map_err(|err| Error::EditFailed {
            status: status.as_u16(),
            body: err.to_string(),
        })?;
        revision_from_edit_response(status, body).inspect_err(|err| {
            log::warn!("Edit failed: {err}");
        })
    }
}

impl CategoryMembersGateway for MediaWiki {
    fn category_members(
        &self,
        category_title: &str,
        continue_from: Option<&str>,
    ) -> Result<CategoryMembersResponse, Error> {
        let query = category_members_query(category_title, continue_from);
        log::debug!("Listing members of {category_title}");
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&query)
            .send()
            .map_err(|err| Error::Query(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| Error::Query(err.to_string()))?;
        category_members_from_response(status, &body).inspect_err(|err| {
            log::warn!("Failed to list members of {category_title}: {err}");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_client() {
        let wiki = MediaWiki::new(
            "https://commons.wikimedia.org/w/api.php",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!("commons.wikimedia.org", wiki.api_url().host_str().unwrap());
        assert!(MediaWiki::new("not a url", Duration::from_secs(5)).is_err());
        assert!(MediaWiki::new(
            "https://commons.wikimedia.org/w/api.php?format=json",
            Duration::from_secs(5)
        )
        .is_err());
    }

    #[test]
    fn read_csrf_token() {
        let token = csrf_token_from_response(
            StatusCode::OK,
            r#"{"batchcomplete":"","query":{"tokens":{"csrftoken":"d41d8cd98f00b204e9800998ecf8427e+\\"}}}"#,
        )
        .unwrap();
        assert_eq!("d41d8cd98f00b204e9800998ecf8427e+\\", token.as_str());
    }

    #[test]
    fn token_failures_are_auth_errors() {
        assert!(matches!(
            csrf_token_from_response(StatusCode::UNAUTHORIZED, ""),
            Err(Error::Auth(_))
        ));
        assert!(matches!(
            csrf_token_from_response(
                StatusCode::OK,
                r#"{"error":{"code":"mwoauth-invalid-authorization","info":"Nonce already used"}}"#
            ),
            Err(Error::Auth(msg)) if msg.contains("Nonce already used")
        ));
        assert!(matches!(
            csrf_token_from_response(
                StatusCode::OK,
                r#"{"query":{"tokens":{"csrftoken":"+\\"}}}"#
            ),
            Err(Error::Auth(_))
        ));
    }

    #[test]
    fn read_revision_of_edit() {
        assert_eq!(
            Some(RevisionId::from(123_u64)),
            revision_from_edit_response(
                StatusCode::OK,
                r#"{"pageinfo":{"lastrevid":123},"success":1}"#.into()
            )
            .unwrap()
        );
        assert_eq!(
            None,
            revision_from_edit_response(StatusCode::OK, r#"{"success":1}"#.into()).unwrap()
        );
    }

    #[test]
    fn failed_edits_carry_status_and_body() {
        assert!(matches!(
            revision_from_edit_response(StatusCode::BAD_GATEWAY, "bad gateway".into()),
            Err(Error::EditFailed { status: 502, body }) if body == "bad gateway"
        ));
        assert!(matches!(
            revision_from_edit_response(
                StatusCode::OK,
                r#"{"error":{"code":"badtoken","info":"Invalid CSRF token."}}"#.into()
            ),
            Err(Error::EditFailed { status: 200, body }) if body == "badtoken: Invalid CSRF token."
        ));
    }

    #[test]
    fn category_members_request() {
        let query = category_members_query("Category:Cats", Some("file|123"));
        assert!(query.contains(&("cmtitle", "Category:Cats")));
        assert!(query.contains(&("cmcontinue", "file|123")));
        assert!(query.contains(&("cmnamespace", "6|14")));
        assert!(!category_members_query("Category:Cats", None)
            .iter()
            .any(|(k, _)| *k == "cmcontinue"));
    }

    #[test]
    fn category_members_response() {
        let response = category_members_from_response(
            StatusCode::OK,
            r#"{"query":{"categorymembers":[{"title":"File:A.jpg","type":"file"}]}}"#,
        )
        .unwrap();
        assert_eq!("File:A.jpg", response.query.categorymembers[0].title);
        assert!(matches!(
            category_members_from_response(
                StatusCode::OK,
                r#"{"error":{"code":"invalidtitle","info":"Bad title"}}"#
            ),
            Err(Error::Query(_))
        ));
    }
}
