//! Application wiring: the dependency struct, the route table, and bootstrap.

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::handlers;
use crate::health;
use crate::method::Method;
use crate::models::{self, SnippetStore};
use crate::router::Router;
use crate::server::Server;

/// Dependencies shared by every handler.
///
/// Built once in [`run`] and handed to the router, which passes it to each
/// handler as an `Arc<App>`.
#[derive(Debug, Clone)]
pub struct App {
    pub snippets: SnippetStore,
}

impl App {
    pub fn new(snippets: SnippetStore) -> Self {
        Self { snippets }
    }

    /// The route table.
    pub fn routes(self) -> Router<App> {
        Router::with_state(self)
            .on(Method::Get,  "/",               handlers::home)
            .on(Method::Get,  "/snippet/view",   handlers::snippet_view)
            .on(Method::Post, "/snippet/create", handlers::snippet_create)
            .on(Method::Get,  "/healthz",        health::liveness)
            .on(Method::Get,  "/readyz",         health::readiness)
    }
}

/// Open the database, serve until shutdown, then close the pool.
///
/// # Errors
///
/// Returns `Error::Config` for invalid settings, `Error::Store` if the
/// database cannot be opened or its schema created, and `Error::Io` if the
/// listen address cannot be bound.
pub async fn run(config: Config) -> Result<(), Error> {
    let addr = config.validate()?;

    let pool = models::open_pool(&config.dsn, config.max_connections).await?;
    info!(dsn = %config.dsn, "database opened");

    models::initialize_schema(&pool).await?;

    let app = App::new(SnippetStore::new(pool.clone()));
    let served = Server::bind(addr).serve(app.routes()).await;

    pool.close().await;
    info!("database closed");
    served
}
