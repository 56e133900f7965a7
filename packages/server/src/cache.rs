use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use crate::state::AppState;

/// Process-wide response cache for GET endpoints.
///
/// Keyed by request path and query, scoped per presented API key so a
/// cached body is only ever replayed to the caller whose request produced
/// it (authentication and role checks happen in the handlers, after this
/// middleware). Invalidation is coarse: every successful write anywhere in
/// the system calls [`ResponseCache::invalidate_all`]. Fine-grained
/// invalidation can replace this once the entry count warrants it.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<DashMap<String, CachedEntry>>,
    ttl: Duration,
}

struct CachedEntry {
    status: StatusCode,
    headers: HeaderMap,
    body: axum::body::Bytes,
    stored_at: Instant,
}

impl CachedEntry {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    fn get(&self, key: &str) -> Option<Response> {
        let expired = match self.inner.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => {
                return Some(entry.to_response());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.inner.remove(key);
        }
        None
    }

    /// Buffer a successful response, cache it, and hand back an equivalent
    /// response. Non-2xx responses pass through uncached.
    async fn store(&self, key: &str, response: Response) -> Response {
        if !response.status().is_success() {
            return response;
        }

        let (parts, body) = response.into_parts();
        match to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                self.inner.insert(
                    key.to_owned(),
                    CachedEntry {
                        status: parts.status,
                        headers: parts.headers.clone(),
                        body: bytes.clone(),
                        stored_at: Instant::now(),
                    },
                );
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(e) => {
                tracing::error!("Failed to buffer response for caching: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }

    /// Drop every cached entry. Called after each successful write.
    pub fn invalidate_all(&self) {
        self.inner.clear();
    }
}

/// Axum middleware serving GET requests from the cache.
pub async fn cache_responses(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let caller = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let key = format!("{caller}:{path}");

    if let Some(hit) = state.cache.get(&key) {
        return hit;
    }

    let response = next.run(req).await;
    state.cache.store(&key, response).await
}
