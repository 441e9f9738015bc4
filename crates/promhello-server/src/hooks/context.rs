use std::time::{Duration, Instant};

use axum::http::Method;

/// Request-scoped state threaded through the hooks of a single request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    started_at: Option<Instant>,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            started_at: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn mark_started(&mut self, at: Instant) {
        self.started_at = Some(at);
    }

    /// Time since `mark_started`, if the timer was started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|t| t.elapsed())
    }
}
