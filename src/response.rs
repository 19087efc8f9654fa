//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it; the server turns it into a
//! hyper response at the very end.

use bytes::Bytes;
use http_body_util::Full;
use tracing::error;

use crate::status::Status;

const TEXT: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts
///
/// ```rust
/// use snippetbox::{Response, Status};
///
/// Response::text("hello");
/// Response::status(Status::NotFound);
/// Response::redirect("/snippet/view?id=1");
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use snippetbox::{Response, Status};
///
/// Response::builder()
///     .status(Status::MethodNotAllowed)
///     .header("allow", "POST")
///     .text("Method Not Allowed");
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Plain-text response whose body is the status' reason phrase.
    pub fn status(code: Status) -> Self {
        Self::builder().status(code).text(code.reason())
    }

    /// `303 See Other` pointing at `location`.
    pub fn redirect(location: &str) -> Self {
        Self::builder()
            .status(Status::SeeOther)
            .header("location", location)
            .no_body()
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status_code(&self) -> Status { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response type.
    ///
    /// A header that is not a valid HTTP token or value turns the whole
    /// response into a bare 500.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(http::StatusCode::from(self.status));
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder.body(Full::new(Bytes::from(self.body))).unwrap_or_else(|e| {
            error!("invalid response: {e}");
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        let mut headers = vec![("content-type".to_owned(), TEXT.to_owned())];
        headers.extend(self.headers);
        Response { body: body.into().into_bytes(), headers, status: self.status }
    }

    /// Terminate with no body (e.g. `Status::SeeOther`).
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}
