//! # snippetbox
//!
//! Create and share short text snippets that expire.
//!
//! A small hyper server in front of a SQLite table. Snippets are inserted
//! with an expiry a number of days out and stay readable until then; expired
//! rows are filtered at read time and never deleted.
//!
//! ## Layout
//!
//! - [`models`] — the [`SnippetStore`](models::SnippetStore): insert, point
//!   lookup, latest-ten listing. Everything that touches SQL lives here.
//! - [`handlers`] — the snippet pages, mapping store outcomes to 200/303/404/500.
//! - [`Router`] / [`Server`] — radix-tree routing via [`matchit`] and
//!   hyper 1.x connections with graceful shutdown on SIGTERM / Ctrl-C.
//! - [`app`] — the [`App`](app::App) dependency struct, route table and
//!   bootstrap ([`app::run`]).
//!
//! ## Routes
//!
//! ```text
//! GET  /                  latest snippets
//! GET  /snippet/view?id=N one snippet
//! POST /snippet/create    title, content, expires (form body) → 303
//! GET  /healthz           liveness
//! GET  /readyz            readiness (pings the database)
//! ```
//!
//! `HEAD` is answered wherever `GET` is. Unknown methods get `501`.
//!
//! ## Deployment
//!
//! The server speaks plain HTTP and buffers each request body in memory, up
//! to 64 KiB (`413` beyond that). Run it behind a reverse proxy (nginx,
//! Caddy) for TLS, rate limiting, and slow-client timeouts.

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod handlers;
pub mod health;
pub mod models;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
