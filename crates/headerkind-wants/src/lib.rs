//! What a client wants, read from its `accept` header.
//!
//! [`wants`] returns a memoized classifier attached to the request. Entries
//! are matched individually, so `wants.is(AcceptKind::Html)` is true when any
//! listed media range is an HTML type. This is a membership test, not q-value
//! negotiation.

pub mod vocabulary;

use std::convert::Infallible;
use std::ops::Deref;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use headerkind_core::{classify, ExtensionSource, Session, SessionRegistry};

pub use vocabulary::{Accept, AcceptKind};

/// Memoized accept-header classifier for one request.
pub type WantsSession = Session<Accept>;

/// Registry for requests shared behind an `Arc`.
pub type WantsRegistry<S> = SessionRegistry<S, Accept>;

/// Classifier attached to `request`, created on first call.
pub fn wants<S>(request: &mut S) -> Arc<WantsSession>
where
    S: ExtensionSource + ?Sized,
{
    classify::<Accept, S>(request)
}

/// Extractor yielding the request's accept-header classifier.
#[derive(Debug, Clone)]
pub struct Wants(pub Arc<WantsSession>);

impl<S> FromRequestParts<S> for Wants
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(wants(parts)))
    }
}

impl Deref for Wants {
    type Target = WantsSession;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::ACCEPT;
    use axum::http::Request;
    use headerkind_core::Kind;
    use proptest::prelude::*;

    const BROWSER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

    fn request(accept: &str) -> Request<()> {
        Request::get("https://website.net")
            .header(ACCEPT, accept)
            .body(())
            .unwrap()
    }

    const CASES: &[(AcceptKind, &str, bool)] = &[
        (AcceptKind::Any, "*/*", true),
        (AcceptKind::Css, "text/css,*/*;q=0.1", true),
        (AcceptKind::Html, BROWSER, true),
        (AcceptKind::Html, "application/xhtml+xml", true),
        (AcceptKind::Xml, BROWSER, true),
        (AcceptKind::Xml, "application/xml;q=0.9", true),
        (AcceptKind::Xml, "application/xhtml+xml", true),
        (AcceptKind::Json, "application/json", true),
        (AcceptKind::Json, "application/json;q=0.9,text/plain", true),
        (
            AcceptKind::Image,
            "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8",
            true,
        ),
        (AcceptKind::Grpc, "application/grpc-web-text", true),
        (AcceptKind::Html, "*/*", false),
        (AcceptKind::Json, "application/js", false),
        (AcceptKind::Html, "multipart/mixed;deferSpec=20220824", false),
        (AcceptKind::Stream, "application/octet-stream", true),
    ];

    #[test]
    fn test_accept_table() {
        for &(kind, accept, expected) in CASES {
            let mut req = request(accept);
            let wanted = wants(&mut req);
            assert_eq!(wanted.is(kind), expected, "{kind} for {accept}");
            assert_eq!(wanted.not().is(kind), !expected, "not.{kind} for {accept}");
            assert_eq!(wanted.not().not().is(kind), expected, "not.not.{kind} for {accept}");

            req.headers_mut().insert(ACCEPT, "something/else".parse().unwrap());
            assert_eq!(wants(&mut req).is(kind), expected, "{kind} after header change");
        }
    }

    #[test]
    fn test_browser_accept() {
        let mut req = request(BROWSER);
        let wanted = wants(&mut req);
        assert!(wanted.is(AcceptKind::Html));
        assert!(wanted.is(AcceptKind::Xml));
        assert!(wanted.is(AcceptKind::Any));
        assert!(!wanted.is(AcceptKind::Json));
    }

    #[test]
    fn test_wildcard_only() {
        let mut req = request("*/*");
        let wanted = wants(&mut req);
        assert!(!wanted.is(AcceptKind::Html));
        assert!(wanted.is(AcceptKind::Any));
    }

    #[test]
    fn test_each_kind_cached_under_its_own_name() {
        let mut req = request("application/json");
        let wanted = wants(&mut req);
        assert!(wanted.is(AcceptKind::Json));
        assert!(!wanted.is(AcceptKind::Html));
        assert!(wanted.is_cached(AcceptKind::Json));
        assert!(wanted.is_cached(AcceptKind::Html));
        assert!(!wanted.is_cached(AcceptKind::Xml));
        assert_eq!(wanted.cached_count(), 2);
        assert!(wanted.is(AcceptKind::Json));
    }

    #[test]
    fn test_missing_header_wants_nothing() {
        let mut req = Request::new(());
        let wanted = wants(&mut req);
        assert!(wanted.value().is_empty());
        assert!(wanted.snapshot().iter().all(|(_, matched)| !matched));
    }

    #[test]
    fn test_unsupported_property() {
        let mut req = request("*/*");
        let wanted = wants(&mut req);
        let err = wanted.read("unsupported").unwrap_err();
        assert_eq!(err.to_string(), "Wants does not support unsupported");
        let err = wanted.not().read("unsupported").unwrap_err();
        assert_eq!(err.to_string(), "Wants does not support unsupported");
    }

    #[tokio::test]
    async fn test_extractor_reuses_session() {
        let (mut parts, _body) = request("text/event-stream").into_parts();
        let Wants(first) = Wants::from_request_parts(&mut parts, &()).await.unwrap();
        let second = Wants::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(first.is(AcceptKind::Stream));
        assert!(Arc::ptr_eq(&first, &second.0));
    }

    fn media_type() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("*/*"),
            Just("text/css"),
            Just("text/html"),
            Just("application/xhtml+xml"),
            Just("image/png"),
            Just("application/json"),
            Just("application/grpc"),
            Just("text/event-stream"),
            Just("application/rss+xml"),
            Just("text/plain"),
        ]
    }

    proptest! {
        #[test]
        fn kind_matches_iff_some_entry_matches(entries in proptest::collection::vec(media_type(), 0..6)) {
            let mut req = request(&entries.join(", "));
            let wanted = wants(&mut req);
            for &kind in AcceptKind::ALL {
                let single = entries.iter().any(|entry| {
                    let mut one = request(entry);
                    wants(&mut one).is(kind)
                });
                prop_assert_eq!(wanted.is(kind), single);
                prop_assert_eq!(wanted.not().is(kind), !single);
            }
        }
    }
}
