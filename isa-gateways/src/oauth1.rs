//! Signing of requests with OAuth 1.0a (RFC 5849) and HMAC-SHA1.

use std::num::NonZeroU64;

use isa_core::gateways::wiki::OAuthCredentials;
use oauth1_request::{self as oauth, request::ParameterList};
use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Fixed per-request values of a signature.
///
/// Without them a random nonce and the current time are used.
#[derive(Debug, Clone)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: NonZeroU64,
}

fn sorted_params<'a>(params: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    let mut params = params.to_vec();
    params.sort_unstable();
    params
}

/// The value of the `Authorization` header for a signed request.
///
/// `request_params` must contain both the query parameters and
/// the parameters of an url encoded form body. The `url` itself
/// must not contain a query.
pub fn authorization_header_with_nonce(
    method: Method,
    url: &Url,
    request_params: &[(&str, &str)],
    credentials: &OAuthCredentials,
    nonce: Option<&Nonce>,
) -> String {
    let request = ParameterList::new(sorted_params(request_params));
    let mut builder = oauth::Builder::new(
        oauth::Credentials::new(
            credentials.consumer.key.as_str(),
            credentials.consumer.secret.as_str(),
        ),
        oauth::HMAC_SHA1,
    );
    builder
        .token(oauth::Credentials::new(
            credentials.access.key.as_str(),
            credentials.access.secret.as_str(),
        ))
        .version(true);
    if let Some(Nonce { nonce, timestamp }) = nonce {
        builder.nonce(nonce.as_str()).timestamp(*timestamp);
    }
    match method {
        Method::Get => builder.get(url, &request),
        Method::Post => builder.post(url, &request),
    }
}

pub fn authorization_header(
    method: Method,
    url: &Url,
    request_params: &[(&str, &str)],
    credentials: &OAuthCredentials,
) -> String {
    authorization_header_with_nonce(method, url, request_params, credentials, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isa_core::gateways::wiki::OAuthToken;

    // Sample request of the Twitter API documentation
    fn sample() -> (Url, Vec<(&'static str, &'static str)>, OAuthCredentials, Nonce) {
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let params = vec![
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
        ];
        let credentials = OAuthCredentials {
            consumer: OAuthToken::new(
                "xvz1evFS4wEEPTGEFPHBog",
                "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            ),
            access: OAuthToken::new(
                "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
                "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
            ),
        };
        let nonce = Nonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".into(),
            timestamp: NonZeroU64::new(1318622958).unwrap(),
        };
        (url, params, credentials, nonce)
    }

    #[test]
    fn signature_of_sample_request() {
        let (url, params, credentials, nonce) = sample();
        let header = authorization_header_with_nonce(
            Method::Post,
            &url,
            &params,
            &credentials,
            Some(&nonce),
        );
        assert!(header.starts_with("OAuth "));
        assert!(header.contains(r#"oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog""#));
        assert!(header.contains(r#"oauth_timestamp="1318622958""#));
        assert!(header.contains(r#"oauth_signature="hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D""#));
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let (url, mut params, credentials, nonce) = sample();
        let header =
            authorization_header_with_nonce(Method::Post, &url, &params, &credentials, Some(&nonce));
        params.reverse();
        assert_eq!(
            header,
            authorization_header_with_nonce(Method::Post, &url, &params, &credentials, Some(&nonce))
        );
        assert_ne!(
            header,
            authorization_header_with_nonce(Method::Get, &url, &params, &credentials, Some(&nonce))
        );
    }

    #[test]
    fn generated_nonces_differ() {
        let (url, params, credentials, _) = sample();
        let a = authorization_header(Method::Get, &url, &params, &credentials);
        let b = authorization_header(Method::Get, &url, &params, &credentials);
        assert!(a.contains("oauth_nonce="));
        assert_ne!(a, b);
    }
}
