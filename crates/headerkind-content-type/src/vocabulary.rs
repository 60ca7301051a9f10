//! Content-type kinds and the patterns deciding them.

use std::fmt;

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use headerkind_core::{Kind, Vocabulary};
use once_cell::sync::Lazy;
use regex::Regex;

/// Kinds a `content-type` header can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Html,
    Json,
    Plain,
    Image,
    Xml,
    Javascript,
    Css,
    Stream,
    Pdf,
    Video,
    Audio,
    Binary,
    Form,
    Multipart,
}

impl Kind for ContentKind {
    const ALL: &'static [Self] = &[
        Self::Html,
        Self::Json,
        Self::Plain,
        Self::Image,
        Self::Xml,
        Self::Javascript,
        Self::Css,
        Self::Stream,
        Self::Pdf,
        Self::Video,
        Self::Audio,
        Self::Binary,
        Self::Form,
        Self::Multipart,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Plain => "plain",
            Self::Image => "image",
            Self::Xml => "xml",
            Self::Javascript => "javascript",
            Self::Css => "css",
            Self::Stream => "stream",
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Binary => "binary",
            Self::Form => "form",
            Self::Multipart => "multipart",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("(?i)^{pattern}")).expect("content-type pattern compiles")
}

// Compiled once, anchored at the start so parameters never matter.
static HTML_RE: Lazy<Regex> = Lazy::new(|| anchored(r"text/html"));
static JSON_RE: Lazy<Regex> = Lazy::new(|| anchored(r"application/(json|ld\+json)"));
static PLAIN_RE: Lazy<Regex> = Lazy::new(|| anchored(r"text/plain"));
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| anchored(r"image/"));
static XML_RE: Lazy<Regex> = Lazy::new(|| anchored(r"(application|text)/(?:\w+\+)?xml"));
static JAVASCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| anchored(r"(application|text)/(javascript|ecmascript)"));
static CSS_RE: Lazy<Regex> = Lazy::new(|| anchored(r"text/css"));
static STREAM_RE: Lazy<Regex> =
    Lazy::new(|| anchored(r"(text/event-stream|application/octet-stream)"));
static PDF_RE: Lazy<Regex> = Lazy::new(|| anchored(r"application/pdf"));
static VIDEO_RE: Lazy<Regex> = Lazy::new(|| anchored(r"video/"));
static AUDIO_RE: Lazy<Regex> = Lazy::new(|| anchored(r"audio/"));
static BINARY_RE: Lazy<Regex> = Lazy::new(|| anchored(r"application/octet-stream"));
static FORM_RE: Lazy<Regex> = Lazy::new(|| anchored(r"application/x-www-form-urlencoded"));
static MULTIPART_RE: Lazy<Regex> = Lazy::new(|| anchored(r"multipart/"));

impl ContentKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Html => &HTML_RE,
            Self::Json => &JSON_RE,
            Self::Plain => &PLAIN_RE,
            Self::Image => &IMAGE_RE,
            Self::Xml => &XML_RE,
            Self::Javascript => &JAVASCRIPT_RE,
            Self::Css => &CSS_RE,
            Self::Stream => &STREAM_RE,
            Self::Pdf => &PDF_RE,
            Self::Video => &VIDEO_RE,
            Self::Audio => &AUDIO_RE,
            Self::Binary => &BINARY_RE,
            Self::Form => &FORM_RE,
            Self::Multipart => &MULTIPART_RE,
        }
    }
}

/// Single-value vocabulary over the lower-cased `content-type` header.
#[derive(Debug, Clone, Copy)]
pub struct ContentType;

impl Vocabulary for ContentType {
    type Kind = ContentKind;
    type Value = String;

    const NAME: &'static str = "contentTypeIs";

    /// Missing or non-text headers classify as the empty string.
    fn extract(headers: &HeaderMap) -> String {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }

    fn matches(kind: ContentKind, value: &String) -> bool {
        kind.pattern().is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> String {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, raw.parse().unwrap());
        ContentType::extract(&headers)
    }

    #[test]
    fn test_extract_lowercases() {
        assert_eq!(extract("Application/JSON; Charset=UTF-8"), "application/json; charset=utf-8");
        assert_eq!(ContentType::extract(&HeaderMap::new()), "");
    }

    #[test]
    fn test_names_round_trip() {
        for &kind in ContentKind::ALL {
            assert_eq!(ContentKind::from_name(kind.name()), Some(kind));
            assert_eq!(ContentKind::ALL[kind.index()], kind);
        }
        assert_eq!(ContentKind::from_name("Json"), None);
    }

    #[test]
    fn test_patterns_anchor_at_start() {
        assert!(!ContentType::matches(ContentKind::Json, &"text/plain; x=application/json".into()));
        assert!(ContentType::matches(ContentKind::Json, &"application/json; charset=utf-8".into()));
    }

    #[test]
    fn test_xml_subtypes() {
        for value in ["application/xml", "text/xml", "application/rss+xml", "application/atom+xml"] {
            assert!(ContentType::matches(ContentKind::Xml, &value.into()), "{value}");
        }
        assert!(!ContentType::matches(ContentKind::Xml, &"image/svg+xml".into()));
    }

    #[test]
    fn test_display_uses_property_name() {
        assert_eq!(ContentKind::Javascript.to_string(), "javascript");
        assert_eq!(ContentKind::Multipart.to_string(), "multipart");
    }
}
