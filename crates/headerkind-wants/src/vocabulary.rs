//! Accept-header kinds.
//!
//! The captured value is the list of comma-separated `accept` entries. A kind
//! matches when any entry satisfies it. Matching is case-sensitive.

use std::fmt;

use axum::http::header::ACCEPT;
use axum::http::HeaderMap;
use headerkind_core::{Kind, Vocabulary};
use once_cell::sync::Lazy;
use regex::Regex;

/// Kinds of response a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptKind {
    Any,
    Css,
    Html,
    Image,
    Json,
    Grpc,
    Stream,
    Xml,
}

impl Kind for AcceptKind {
    const ALL: &'static [Self] = &[
        Self::Any,
        Self::Css,
        Self::Html,
        Self::Image,
        Self::Json,
        Self::Grpc,
        Self::Stream,
        Self::Xml,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Css => "css",
            Self::Html => "html",
            Self::Image => "image",
            Self::Json => "json",
            Self::Grpc => "grpc",
            Self::Stream => "stream",
            Self::Xml => "xml",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AcceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static HTML_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:application|text)/x?html").expect("html pattern compiles"));
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^image/").expect("image pattern compiles"));
static JSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^application/json").expect("json pattern compiles"));
static GRPC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^application/grpc").expect("grpc pattern compiles"));
static STREAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(text/event-stream|application/octet-stream)").expect("stream pattern compiles")
});
static XML_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"application/(?:\w+\+)?xml").expect("xml pattern compiles"));

/// Media range of an entry, without `;q=` or other parameters.
fn media_range(entry: &str) -> &str {
    entry.split(';').next().unwrap_or_default().trim()
}

impl AcceptKind {
    fn accepts(self, entry: &str) -> bool {
        match self {
            Self::Any => media_range(entry) == "*/*",
            Self::Css => media_range(entry) == "text/css",
            Self::Html => HTML_RE.is_match(entry),
            Self::Image => IMAGE_RE.is_match(entry),
            Self::Json => JSON_RE.is_match(entry),
            Self::Grpc => GRPC_RE.is_match(entry),
            Self::Stream => STREAM_RE.is_match(entry),
            Self::Xml => XML_RE.is_match(entry),
        }
    }
}

/// List vocabulary over the `accept` header.
#[derive(Debug, Clone, Copy)]
pub struct Accept;

impl Vocabulary for Accept {
    type Kind = AcceptKind;
    type Value = Vec<String>;

    const NAME: &'static str = "Wants";

    /// Every `accept` line split on commas, entries trimmed, empties dropped.
    fn extract(headers: &HeaderMap) -> Vec<String> {
        headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect()
    }

    fn matches(kind: AcceptKind, value: &Vec<String>) -> bool {
        value.iter().any(|entry| kind.accepts(entry))
    }
}
