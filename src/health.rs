//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can the database be reached? |

use std::sync::Arc;

use tracing::warn;

use crate::app::App;
use crate::{Request, Response, Status};

/// Always `200 OK` with body `"ok"`. No dependencies.
pub async fn liveness(_app: Arc<App>, _req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` when the snippet store answers a ping,
/// `503 Service Unavailable` otherwise.
pub async fn readiness(app: Arc<App>, _req: Request) -> Response {
    match app.snippets.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            Response::status(Status::ServiceUnavailable)
        }
    }
}
