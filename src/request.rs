//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Uri};

use crate::method::Method;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An incoming HTTP request with its body fully read.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: Method, uri: &Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            path: uri.path().to_owned(),
            query: uri.query().map(str::to_owned),
            headers,
            body,
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Case-insensitive header lookup. Values that are not visible ASCII are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first decoded value of a query-string parameter.
    ///
    /// `/snippet/view?id=3` gives `req.query("id") == Some("3".into())`.
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// Returns `None` when the request carries another content type. Repeated
    /// keys keep their first value.
    pub fn form(&self) -> Option<HashMap<String, String>> {
        let content_type = self.header("content-type")?;
        let mime = content_type.split(';').next().unwrap_or_default().trim();
        if !mime.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
            return None;
        }

        let mut fields = HashMap::new();
        for (k, v) in url::form_urlencoded::parse(&self.body) {
            fields.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
        Some(fields)
    }
}
