//! Per-request metadata.
//!
//! # Data Flow
//! ```text
//! HTTP request headers
//!     → variables.rs (ServerVariables: HTTP_* keys + host defaults)
//!     → resolver/ (rewrite REMOTE_ADDR, HTTPS, SERVER_PORT, SERVER_PORT_SECURE)
//!     → RequestContext in request extensions
//!     → handlers read the canonical fields
//! ```

pub mod variables;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

pub use variables::ServerVariables;

/// The request context the entry point operates on.
///
/// Owns the request's [`ServerVariables`]. Created by the host middleware for
/// each request and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    server_variables: ServerVariables,
}

impl RequestContext {
    pub fn new(server_variables: ServerVariables) -> Self {
        Self { server_variables }
    }

    pub fn server_variables(&self) -> &ServerVariables {
        &self.server_variables
    }

    pub fn server_variables_mut(&mut self) -> &mut ServerVariables {
        &mut self.server_variables
    }
}

const MISSING_CONTEXT: (StatusCode, &str) = (
    StatusCode::INTERNAL_SERVER_ERROR,
    "Request context missing: nlb-compat middleware is not installed",
);

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or(MISSING_CONTEXT)
    }
}

impl<S> FromRequestParts<S> for ServerVariables
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .map(|ctx| ctx.server_variables().clone())
            .ok_or(MISSING_CONTEXT)
    }
}
