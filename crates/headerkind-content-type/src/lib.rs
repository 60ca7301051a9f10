//! Content-type classification for requests and responses.
//!
//! [`content_type_is`] answers "is this body html / json / xml / ...?" from
//! the `content-type` header. The answer set is memoized on the source
//! object itself, so repeated calls are free and later header edits on the
//! same object are not observed.

pub mod vocabulary;

use std::convert::Infallible;
use std::ops::Deref;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use headerkind_core::{classify, ExtensionSource, Session, SessionRegistry};

pub use vocabulary::{ContentKind, ContentType};

/// Memoized content-type classifier for one source object.
pub type ContentTypeIs = Session<ContentType>;

/// Registry for sources shared behind an `Arc`.
pub type ContentTypeRegistry<S> = SessionRegistry<S, ContentType>;

/// Classifier attached to `source`, created on first call.
pub fn content_type_is<S>(source: &mut S) -> Arc<ContentTypeIs>
where
    S: ExtensionSource + ?Sized,
{
    classify::<ContentType, S>(source)
}

/// Extractor yielding the request's content-type classifier.
#[derive(Debug, Clone)]
pub struct Is(pub Arc<ContentTypeIs>);

impl<S> FromRequestParts<S> for Is
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(content_type_is(parts)))
    }
}

impl Deref for Is {
    type Target = ContentTypeIs;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
