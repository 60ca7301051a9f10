//! Header sources and session attachment.
//!
//! Sessions are owned by the object they classify: [`classify`] stores an
//! `Arc<Session<V>>` in the source's [`Extensions`], so the session lives
//! exactly as long as the request or response carrying it and holds nothing
//! of its own that points back at the source.

use std::sync::Arc;

use axum::http::{request, response, Extensions, HeaderMap, Request, Response};
use tracing::debug;

use crate::classifier::{Session, Vocabulary};

/// Anything that exposes HTTP headers.
pub trait HeaderSource {
    fn headers(&self) -> &HeaderMap;
}

/// A header source that can carry typed extensions.
pub trait ExtensionSource: HeaderSource {
    fn extensions(&self) -> &Extensions;
    fn extensions_mut(&mut self) -> &mut Extensions;
}

impl HeaderSource for HeaderMap {
    fn headers(&self) -> &HeaderMap {
        self
    }
}

impl<B> HeaderSource for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }
}

impl<B> ExtensionSource for Request<B> {
    fn extensions(&self) -> &Extensions {
        Request::extensions(self)
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        Request::extensions_mut(self)
    }
}

impl<B> HeaderSource for Response<B> {
    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }
}

impl<B> ExtensionSource for Response<B> {
    fn extensions(&self) -> &Extensions {
        Response::extensions(self)
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        Response::extensions_mut(self)
    }
}

impl HeaderSource for request::Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl ExtensionSource for request::Parts {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

impl HeaderSource for response::Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl ExtensionSource for response::Parts {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Return the session attached to `source`, creating and attaching it on
/// first use. The header value is extracted only at creation.
pub fn classify<V, S>(source: &mut S) -> Arc<Session<V>>
where
    V: Vocabulary,
    S: ExtensionSource + ?Sized,
{
    if let Some(existing) = source.extensions().get::<Arc<Session<V>>>() {
        return existing.clone();
    }

    let session = Arc::new(Session::<V>::from_headers(source.headers()));
    debug!(classifier = V::NAME, value = ?session.value(), "attached new session");
    source.extensions_mut().insert(session.clone());
    session
}
