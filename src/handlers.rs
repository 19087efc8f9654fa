//! Snippet page handlers.
//!
//! Store outcomes map to statuses the same way everywhere: `NotFound` is 404,
//! every other store error is logged and answered with a bare 500.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{error, info};

use crate::app::App;
use crate::models::StoreError;
use crate::{Request, Response, Status};

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Expiry choices offered by the create form, in days.
pub const PERMITTED_EXPIRES: [i64; 3] = [1, 7, 365];

/// `GET /` — the latest visible snippets as plain text.
pub async fn home(app: Arc<App>, _req: Request) -> Response {
    let snippets = match app.snippets.latest().await {
        Ok(snippets) => snippets,
        Err(e) => return server_error(&e),
    };

    if snippets.is_empty() {
        return Response::text("There's nothing to see here... yet!\n");
    }

    let mut body = String::from("Latest snippets\n\n");
    for snippet in &snippets {
        // writing to a String cannot fail
        let _ = writeln!(
            body,
            "#{:<5} {}  (expires {})",
            snippet.id,
            snippet.title,
            snippet.expires.format("%d %b %Y at %H:%M"),
        );
    }
    Response::text(body)
}

/// `GET /snippet/view?id=N` — one snippet, or 404.
pub async fn snippet_view(app: Arc<App>, req: Request) -> Response {
    let Some(id) = req.query("id").and_then(|raw| raw.parse::<i64>().ok()) else {
        return not_found();
    };
    if id < 1 {
        return not_found();
    }

    match app.snippets.get(id).await {
        Ok(snippet) => Response::text(format!("{snippet}\n")),
        Err(StoreError::NotFound { .. }) => not_found(),
        Err(e) => server_error(&e),
    }
}

/// `POST /snippet/create` — validate the form, insert, redirect to the view.
pub async fn snippet_create(app: Arc<App>, req: Request) -> Response {
    let Some(fields) = req.form() else {
        return client_error(Status::UnsupportedMediaType);
    };

    let form = match SnippetForm::parse(&fields) {
        Ok(form) => form,
        Err(errors) => return unprocessable(&errors),
    };

    match app.snippets.insert(&form.title, &form.content, form.expires).await {
        Ok(id) => {
            info!(id, expires_days = form.expires, "snippet created");
            Response::redirect(&format!("/snippet/view?id={id}"))
        }
        Err(e) => server_error(&e),
    }
}

// ── Form ──────────────────────────────────────────────────────────────────────

/// A validated create-snippet form.
#[derive(Debug, PartialEq, Eq)]
pub struct SnippetForm {
    pub title: String,
    pub content: String,
    pub expires: i64,
}

/// Field name → message, in field order.
pub type FieldErrors = Vec<(&'static str, &'static str)>;

impl SnippetForm {
    /// Validate the raw form fields, collecting every failure.
    pub fn parse(fields: &HashMap<String, String>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let field = |name| field_value(fields, name);

        let title = field("title");
        if title.trim().is_empty() {
            errors.push(("title", "This field cannot be blank"));
        } else if title.chars().count() > MAX_TITLE_CHARS {
            errors.push(("title", "This field cannot be more than 100 characters long"));
        }

        let content = field("content");
        if content.trim().is_empty() {
            errors.push(("content", "This field cannot be blank"));
        }

        let expires = field("expires").trim().parse::<i64>().ok()
            .filter(|days| PERMITTED_EXPIRES.contains(days));
        if expires.is_none() {
            errors.push(("expires", "This field must equal 1, 7 or 365"));
        }

        match expires {
            Some(expires) if errors.is_empty() => Ok(Self {
                title: title.to_owned(),
                content: content.to_owned(),
                expires,
            }),
            _ => Err(errors),
        }
    }
}

fn field_value<'a>(fields: &'a HashMap<String, String>, name: &str) -> &'a str {
    fields.get(name).map(String::as_str).unwrap_or_default()
}

// ── Error responses ───────────────────────────────────────────────────────────

fn server_error(err: &StoreError) -> Response {
    error!(error = ?err, "request failed");
    Response::status(Status::InternalServerError)
}

fn client_error(status: Status) -> Response {
    Response::status(status)
}

fn not_found() -> Response {
    client_error(Status::NotFound)
}

fn unprocessable(errors: &FieldErrors) -> Response {
    let mut body = String::new();
    for (field, message) in errors {
        let _ = writeln!(body, "{field}: {message}");
    }
    Response::builder()
        .status(Status::UnprocessableContent)
        .text(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{self, SnippetStore};
    use crate::request::tests::{get, post_form, request};
    use crate::router::Router;
    use crate::Method;
    use sqlx::SqlitePool;

    async fn setup() -> (Router<App>, SqlitePool) {
        let pool = models::open_pool("sqlite::memory:", 1).await.unwrap();
        models::initialize_schema(&pool).await.unwrap();
        let router = App::new(SnippetStore::new(pool.clone())).routes();
        (router, pool)
    }

    fn body(res: &Response) -> &str {
        std::str::from_utf8(res.body()).unwrap()
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn home_without_snippets() {
        let (router, _pool) = setup().await;
        let res = router.handle(get("/")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert!(body(&res).contains("nothing to see here"));

        let res = router.handle(request(Method::Head, "/", None, "")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn create_then_view() {
        let (router, _pool) = setup().await;

        let res = router
            .handle(post_form(
                "/snippet/create",
                "title=O+snail&content=Climb+Mount+Fuji%2C%0ABut+slowly&expires=7",
            ))
            .await;
        assert_eq!(res.status_code(), Status::SeeOther);
        let location = res.header("location").unwrap().to_owned();
        assert_eq!(location, "/snippet/view?id=1");

        let res = router.handle(get(&location)).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert!(body(&res).contains("O snail"));
        assert!(body(&res).contains("Climb Mount Fuji,\nBut slowly"));

        let res = router.handle(get("/")).await;
        assert!(body(&res).contains("#1"));
        assert!(body(&res).contains("O snail"));
    }

    #[tokio::test]
    async fn view_rejects_bad_ids() {
        let (router, _pool) = setup().await;
        for target in [
            "/snippet/view",
            "/snippet/view?id=",
            "/snippet/view?id=abc",
            "/snippet/view?id=0",
            "/snippet/view?id=-3",
            "/snippet/view?id=999999",
        ] {
            let res = router.handle(get(target)).await;
            assert_eq!(res.status_code(), Status::NotFound, "{target}");
        }
    }

    #[tokio::test]
    async fn create_requires_post() {
        let (router, _pool) = setup().await;
        let res = router.handle(get("/snippet/create")).await;
        assert_eq!(res.status_code(), Status::MethodNotAllowed);
        assert_eq!(res.header("allow"), Some("POST"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_form() {
        let (router, _pool) = setup().await;
        let res = router
            .handle(post_form("/snippet/create", "title=&content=x&expires=30"))
            .await;
        assert_eq!(res.status_code(), Status::UnprocessableContent);
        assert!(body(&res).contains("title: This field cannot be blank"));
        assert!(body(&res).contains("expires:"));

        let res = router.handle(get("/")).await;
        assert!(body(&res).contains("nothing to see here"));
    }

    #[tokio::test]
    async fn create_requires_form_body() {
        let (router, _pool) = setup().await;
        let form = "title=O+snail&content=Climb&expires=7";

        for content_type in [Some("application/json"), None] {
            let res = router
                .handle(request(Method::Post, "/snippet/create", content_type, form))
                .await;
            assert_eq!(res.status_code(), Status::UnsupportedMediaType, "{content_type:?}");
        }

        let res = router.handle(get("/")).await;
        assert!(body(&res).contains("nothing to see here"));
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() {
        let (router, pool) = setup().await;
        pool.close().await;

        for target in ["/", "/snippet/view?id=1"] {
            let res = router.handle(get(target)).await;
            assert_eq!(res.status_code(), Status::InternalServerError, "{target}");
            assert_eq!(body(&res), "Internal Server Error");
        }

        let res = router
            .handle(post_form("/snippet/create", "title=a&content=b&expires=1"))
            .await;
        assert_eq!(res.status_code(), Status::InternalServerError);
    }

    #[tokio::test]
    async fn readiness_follows_pool() {
        let (router, pool) = setup().await;
        assert_eq!(router.handle(get("/readyz")).await.status_code(), Status::Ok);
        assert_eq!(router.handle(get("/healthz")).await.status_code(), Status::Ok);

        pool.close().await;
        assert_eq!(
            router.handle(get("/readyz")).await.status_code(),
            Status::ServiceUnavailable
        );
        assert_eq!(router.handle(get("/healthz")).await.status_code(), Status::Ok);
    }

    #[test]
    fn form_accepts_valid_input() {
        let form = SnippetForm::parse(&fields(&[
            ("title", "O snail"),
            ("content", "Climb Mount Fuji"),
            ("expires", "365"),
        ]))
        .unwrap();
        assert_eq!(form.expires, 365);
        assert_eq!(form.title, "O snail");
    }

    #[test]
    fn form_collects_every_error() {
        let long_title = "x".repeat(MAX_TITLE_CHARS + 1);
        let errors = SnippetForm::parse(&fields(&[
            ("title", &long_title),
            ("content", "   "),
        ]))
        .unwrap_err();
        let failed: Vec<&str> = errors.iter().map(|(f, _)| *f).collect();
        assert_eq!(failed, ["title", "content", "expires"]);
    }

    #[test]
    fn form_title_limit_counts_characters() {
        let title = "é".repeat(MAX_TITLE_CHARS);
        let form = SnippetForm::parse(&fields(&[
            ("title", &title),
            ("content", "body"),
            ("expires", "1"),
        ]));
        assert!(form.is_ok());
    }
}
