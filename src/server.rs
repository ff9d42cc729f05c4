//! Read-only HTTP endpoints over the session store.
//!
//! `GET /metadata` and `GET /cycles` return the stored collections as
//! `{ "<resource>": [...] }`. The store folder is reopened per request so
//! sessions saved by other processes show up without a restart.

use std::path::{Path, PathBuf};
use std::time::Duration;

use http::{Method, StatusCode};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{Result, ScoutError};
use crate::store::{DocumentStore, JsonStore};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Resolve a request against the store.
pub fn route(method: &Method, url: &str, store: &dyn DocumentStore) -> (StatusCode, Value) {
    let path = url.split('?').next().unwrap_or_default().trim_end_matches('/');
    let known = matches!(path, "/metadata" | "/cycles");
    if !known {
        return (
            StatusCode::NOT_FOUND,
            json!({ "error": format!("No route for {}", path) }),
        );
    }
    if method != Method::GET {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "error": format!("{} is not allowed on {}", method, path) }),
        );
    }
    match path {
        "/metadata" => (StatusCode::OK, json!({ "metadata": store.list_metadata() })),
        _ => (StatusCode::OK, json!({ "cycles": store.list_cycles() })),
    }
}

fn respond_for(method: &Method, url: &str, store_dir: &Path) -> (StatusCode, Value) {
    match JsonStore::open(store_dir) {
        Ok(store) => route(method, url, &store),
        Err(err) => {
            warn!("Store unavailable: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            )
        }
    }
}

/// Blocking HTTP server for the read endpoints.
pub struct ReadServer {
    server: tiny_http::Server,
    store_dir: PathBuf,
}

impl ReadServer {
    pub fn bind(addr: &str, store_dir: &Path) -> Result<Self> {
        let server = tiny_http::Server::http(addr)
            .map_err(|err| ScoutError::Server(format!("Unable to bind {}: {}", addr, err)))?;
        Ok(Self {
            server,
            store_dir: store_dir.to_path_buf(),
        })
    }

    /// Serve until `shutdown` is cancelled.
    pub fn run(&self, shutdown: &CancellationToken) -> Result<()> {
        info!(store = %self.store_dir.display(), "Serving read endpoints");
        while !shutdown.is_cancelled() {
            let Some(request) = self.server.recv_timeout(POLL_INTERVAL)? else {
                continue;
            };
            let method = Method::from_bytes(request.method().to_string().as_bytes())
                .unwrap_or(Method::GET);
            let (status, body) = respond_for(&method, request.url(), &self.store_dir);
            info!(%method, url = request.url(), status = status.as_u16(), "Request");

            let mut response = tiny_http::Response::from_string(body.to_string())
                .with_status_code(status.as_u16());
            if let Ok(header) =
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
            {
                response = response.with_header(header);
            }
            if let Err(err) = request.respond(response) {
                warn!("Failed to send response: {}", err);
            }
        }
        info!("Server stopped");
        Ok(())
    }
}
