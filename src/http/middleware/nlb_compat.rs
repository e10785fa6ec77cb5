//! Begin-request middleware.
//! Exposes request headers as server variables and normalizes them.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::context::{RequestContext, ServerVariables};
use crate::module::NlbCompatModule;
use crate::observability::metrics;
use crate::resolver::Scheme;

/// State required by the middleware.
#[derive(Debug, Clone)]
pub struct NlbCompatState {
    pub module: NlbCompatModule,
    /// `SERVER_PORT` seen by handlers when no forwarded-proto is present.
    pub default_port: u16,
}

impl NlbCompatState {
    pub fn new(module: NlbCompatModule, default_port: u16) -> Self {
        Self {
            module,
            default_port,
        }
    }

    /// Request headers plus the values a direct, plain-HTTP connection
    /// from the peer would carry.
    fn seed(&self, request: &Request<Body>) -> ServerVariables {
        let keys = self.module.keys();
        let mut vars = ServerVariables::from_headers(request.headers());

        if let Some(ConnectInfo(peer)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
            vars.set(&keys.remote_addr, &peer.ip().to_string());
        }
        vars.set(&keys.https, Scheme::Http.marker());
        vars.set(&keys.server_port, &self.default_port.to_string());
        vars.set(&keys.server_port_secure, Scheme::Http.secure_flag());
        vars
    }
}

pub async fn nlb_compat_middleware(
    State(state): State<NlbCompatState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let mut ctx = RequestContext::new(state.seed(&req));

    if let Err(e) = state.module.process_begin_request(Some(&mut ctx)) {
        tracing::error!(error = %e, "Begin-request processing failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Request context unavailable").into_response();
    }

    metrics::record_request();
    req.extensions_mut().insert(ctx);
    next.run(req).await
}
