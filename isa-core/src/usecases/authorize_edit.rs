use super::prelude::*;

/// Everything that is known about the acting contributor
/// while processing a single request.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub username: String,
    pub credentials: OAuthCredentials,
    /// ISO 3166-1 alpha-2 code or empty if unknown
    pub country: String,
}

/// An authorized edit session, valid for a single edit.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub token: EditToken,
    pub credentials: OAuthCredentials,
}

pub fn authorize_edit<G>(gateway: &G, credentials: &OAuthCredentials) -> Result<EditSession>
where
    G: WikiEditGateway,
{
    let token = gateway.fetch_csrf_token(credentials)?;
    Ok(EditSession {
        token,
        credentials: credentials.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::DummyWiki, *};
    use crate::gateways::wiki;

    #[test]
    fn authorize_with_token() {
        let wiki = DummyWiki::default();
        let session = authorize_edit(&wiki, &DummyWiki::credentials()).unwrap();
        assert_eq!(DummyWiki::TOKEN, session.token.as_str());
        assert_eq!(DummyWiki::credentials(), session.credentials);
    }

    #[test]
    fn authorization_failures_are_propagated() {
        let wiki = DummyWiki::default();
        wiki.fail_authorization.set(true);
        assert!(matches!(
            authorize_edit(&wiki, &DummyWiki::credentials()),
            Err(Error::Wiki(wiki::Error::Auth(_)))
        ));
    }
}
