//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! Only the codes this application actually sends are listed.

/// The status codes snippetbox responds with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    SeeOther,             // 303

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    PayloadTooLarge,      // 413
    UnsupportedMediaType, // 415
    UnprocessableContent, // 422

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
    NotImplemented,       // 501
    ServiceUnavailable,   // 503
}

impl Status {
    /// The canonical reason phrase, also used as the default plain-text body.
    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok                   => "OK",
            Status::SeeOther             => "See Other",
            Status::BadRequest           => "Bad Request",
            Status::NotFound             => "Not Found",
            Status::MethodNotAllowed     => "Method Not Allowed",
            Status::PayloadTooLarge      => "Content Too Large",
            Status::UnsupportedMediaType => "Unsupported Media Type",
            Status::UnprocessableContent => "Unprocessable Content",
            Status::InternalServerError  => "Internal Server Error",
            Status::NotImplemented       => "Not Implemented",
            Status::ServiceUnavailable   => "Service Unavailable",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::SeeOther             => 303,
            Status::BadRequest           => 400,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::PayloadTooLarge      => 413,
            Status::UnsupportedMediaType => 415,
            Status::UnprocessableContent => 422,
            Status::InternalServerError  => 500,
            Status::NotImplemented       => 501,
            Status::ServiceUnavailable   => 503,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                   => http::StatusCode::OK,
            Status::SeeOther             => http::StatusCode::SEE_OTHER,
            Status::BadRequest           => http::StatusCode::BAD_REQUEST,
            Status::NotFound             => http::StatusCode::NOT_FOUND,
            Status::MethodNotAllowed     => http::StatusCode::METHOD_NOT_ALLOWED,
            Status::PayloadTooLarge      => http::StatusCode::PAYLOAD_TOO_LARGE,
            Status::UnsupportedMediaType => http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Status::UnprocessableContent => http::StatusCode::UNPROCESSABLE_ENTITY,
            Status::InternalServerError  => http::StatusCode::INTERNAL_SERVER_ERROR,
            Status::NotImplemented       => http::StatusCode::NOT_IMPLEMENTED,
            Status::ServiceUnavailable   => http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_http_codes_agree() {
        for status in [
            Status::Ok,
            Status::SeeOther,
            Status::BadRequest,
            Status::NotFound,
            Status::MethodNotAllowed,
            Status::PayloadTooLarge,
            Status::UnsupportedMediaType,
            Status::UnprocessableContent,
            Status::InternalServerError,
            Status::NotImplemented,
            Status::ServiceUnavailable,
        ] {
            let code: u16 = status.into();
            let http_code: http::StatusCode = status.into();
            assert_eq!(code, http_code.as_u16());
            assert!(!status.reason().is_empty());
        }
    }
}
