//! Delivery of rendered documents as response artifacts.
//!
//! The facade only knows the [`Sink`] trait. [`ResponseSink`] is the bundled
//! implementation and produces an [`http::Response`] that any server built on
//! the `http` types can hand back to a client.

use http::{header, Response, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::Result;

/// MIME type of every document produced by this crate.
pub const MIME_TYPE: &str = "application/pdf";

/// How the receiving client should present the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Save the document as a file.
    Attachment,
    /// Display the document in place.
    Inline,
}

impl Disposition {
    /// The disposition type token of the `Content-Disposition` header.
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        }
    }

    /// Builds the full `Content-Disposition` header value for `name`.
    ///
    /// Names that are not plain printable ASCII get an ASCII fallback plus an
    /// RFC 6266 `filename*` parameter carrying the exact UTF-8 name.
    pub fn header_value(self, name: &str) -> String {
        let mut value = format!("{}; filename=\"{}\"", self.as_str(), quoted_ascii(name));
        if !is_plain_ascii(name) {
            value.push_str("; filename*=UTF-8''");
            value.push_str(&utf8_percent_encode(name, ATTR_CHAR).to_string());
        }
        value
    }
}

fn is_plain_ascii(name: &str) -> bool {
    name.bytes().all(|byte| (0x20..0x7F).contains(&byte))
}

fn quoted_ascii(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            ' '..='~' => quoted.push(ch),
            _ => quoted.push('_'),
        }
    }
    quoted
}

/// Bytes outside the RFC 5987 `attr-char` set.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Turns document bytes into something the caller's transport can deliver.
pub trait Sink {
    /// Artifact produced for the transport layer.
    type Response;

    /// Wraps `content` so that it is delivered as `name` with the given disposition.
    fn send(
        &self,
        content: Vec<u8>,
        name: &str,
        disposition: Disposition,
        mime_type: &str,
    ) -> Result<Self::Response>;
}

impl<S: Sink + ?Sized> Sink for &S {
    type Response = S::Response;

    fn send(
        &self,
        content: Vec<u8>,
        name: &str,
        disposition: Disposition,
        mime_type: &str,
    ) -> Result<Self::Response> {
        (**self).send(content, name, disposition, mime_type)
    }
}

/// Sink producing `http::Response<Vec<u8>>` values.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseSink;

impl ResponseSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ResponseSink {
    type Response = Response<Vec<u8>>;

    fn send(
        &self,
        content: Vec<u8>,
        name: &str,
        disposition: Disposition,
        mime_type: &str,
    ) -> Result<Self::Response> {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime_type)
            .header(header::CONTENT_LENGTH, content.len())
            .header(header::CONTENT_DISPOSITION, disposition.header_value(name))
            .header(header::CACHE_CONTROL, "private, max-age=0, must-revalidate")
            .header(header::PRAGMA, "public")
            .body(content)?;
        Ok(response)
    }
}
