//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. A path that exists under
//! some other method answers `405` with an `Allow` header; anything else is
//! `404`. `HEAD` falls back to the `GET` route and drops the body.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router, carrying the shared state `S` handed to every handler.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: Arc<S>,
}

pub(crate) enum Route<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl<S> Router<S>
where
    S: Send + Sync + 'static,
{
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state: Arc::new(state) }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Route<S> {
        let candidates: &[Method] = match method {
            Method::Head => &[Method::Head, Method::Get],
            _ => std::slice::from_ref(&method),
        };

        for candidate in candidates {
            if let Some(matched) = self.routes.get(candidate).and_then(|tree| tree.at(path).ok()) {
                let handler = Arc::clone(matched.value);
                let params = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                return Route::Found(handler, params);
            }
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        if allowed.contains(&Method::Get) && !allowed.contains(&Method::Head) {
            allowed.push(Method::Head);
        }

        if allowed.is_empty() {
            Route::NotFound
        } else {
            allowed.sort();
            Route::MethodNotAllowed(allowed)
        }
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, mut req: Request) -> Response {
        let started = Instant::now();
        let method = req.method();
        let path = req.path().to_owned();

        let mut response = match self.lookup(method, &path) {
            Route::Found(handler, params) => {
                req.params = params;
                handler.call(Arc::clone(&self.state), req).await
            }
            Route::MethodNotAllowed(allowed) => {
                let allow = allowed.iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .text(Status::MethodNotAllowed.reason())
            }
            Route::NotFound => Response::status(Status::NotFound),
        };
        if method == Method::Head {
            response.body.clear();
        }

        debug!(
            %method,
            path = %path,
            status = u16::from(response.status_code()),
            elapsed_us = started.elapsed().as_micros() as u64,
            "request handled"
        );
        response
    }
}
