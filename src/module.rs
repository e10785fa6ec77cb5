//! Request entry point for load balancer compatibility.
//!
//! # Responsibilities
//! - Register the begin-request hook with the host router (`init`)
//! - Run both forwarding resolvers once per request, before any handler
//! - Reject invocation without a request context
//!
//! # Design Decisions
//! - Stateless: the module only carries the configured variable names
//! - Teardown has nothing to release

use axum::{middleware, Router};

use crate::config::HeaderKeys;
use crate::context::RequestContext;
use crate::error::{NlbError, Result};
use crate::http::middleware::{nlb_compat_middleware, NlbCompatState};
use crate::resolver::{resolve_forwarded_for, resolve_forwarded_proto};

/// Normalizes client address and scheme for requests arriving through a
/// TLS-terminating load balancer.
#[derive(Debug, Clone, Default)]
pub struct NlbCompatModule {
    keys: HeaderKeys,
}

impl NlbCompatModule {
    pub fn new(keys: HeaderKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &HeaderKeys {
        &self.keys
    }

    /// Subscribe the begin-request handler on `router`.
    ///
    /// `default_port` seeds `SERVER_PORT` for requests that carry no
    /// forwarded-protocol header.
    pub fn init<S>(&self, router: Router<S>, default_port: u16) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        tracing::debug!(keys = ?self.keys, default_port, "Registering begin-request handler");
        let state = NlbCompatState::new(self.clone(), default_port);
        router.layer(middleware::from_fn_with_state(state, nlb_compat_middleware))
    }

    /// Process the request context, handling the forwarded-for and
    /// forwarded-proto variables.
    ///
    /// Fails with [`NlbError::InvalidArgument`] without touching anything if
    /// no context is supplied.
    pub fn process_begin_request(&self, context: Option<&mut RequestContext>) -> Result<()> {
        let context = context.ok_or(NlbError::InvalidArgument("context"))?;
        let vars = context.server_variables_mut();

        resolve_forwarded_for(vars, &self.keys);
        resolve_forwarded_proto(vars, &self.keys);
        Ok(())
    }

    /// Nothing to release; kept for symmetry with `init`.
    pub fn dispose(&self) {
        tracing::debug!("NLB compatibility module disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ServerVariables;

    fn context_with(name: &str, value: &str) -> RequestContext {
        let mut vars = ServerVariables::new();
        vars.add(name, value);
        RequestContext::new(vars)
    }

    #[test]
    fn test_missing_context_is_invalid_argument() {
        let module = NlbCompatModule::default();

        let err = module.process_begin_request(None).unwrap_err();

        assert!(matches!(err, NlbError::InvalidArgument("context")));
    }

    #[test]
    fn test_forwarded_for_sets_remote_addr() {
        let module = NlbCompatModule::default();
        for value in ["192.168.0.1", "10.70.30.54,192.168.0.1"] {
            let mut ctx = context_with("HTTP_X_FORWARDED_FOR", value);

            module.process_begin_request(Some(&mut ctx)).unwrap();

            assert_eq!(
                ctx.server_variables().get("REMOTE_ADDR").as_deref(),
                Some("192.168.0.1")
            );
        }
    }

    #[test]
    fn test_forwarded_proto_http() {
        let module = NlbCompatModule::default();
        let mut ctx = context_with("HTTP_X_FORWARDED_PROTO", "http");

        module.process_begin_request(Some(&mut ctx)).unwrap();

        let vars = ctx.server_variables();
        assert_eq!(vars.get("SERVER_PORT").as_deref(), Some("80"));
        assert_eq!(vars.get("SERVER_PORT_SECURE").as_deref(), Some("0"));
        assert_eq!(vars.get("HTTPS").as_deref(), Some("off"));
    }

    #[test]
    fn test_forwarded_proto_https() {
        let module = NlbCompatModule::default();
        let mut ctx = context_with("HTTP_X_FORWARDED_PROTO", "https");

        module.process_begin_request(Some(&mut ctx)).unwrap();

        let vars = ctx.server_variables();
        assert_eq!(vars.get("SERVER_PORT").as_deref(), Some("443"));
        assert_eq!(vars.get("SERVER_PORT_SECURE").as_deref(), Some("1"));
        assert_eq!(vars.get("HTTPS").as_deref(), Some("on"));
    }

    #[test]
    fn test_both_headers_in_one_request() {
        let module = NlbCompatModule::default();
        let mut ctx = context_with("HTTP_X_FORWARDED_FOR", "198.51.100.1,203.0.113.5");
        ctx.server_variables_mut().add("HTTP_X_FORWARDED_PROTO", "HTTPS");

        module.process_begin_request(Some(&mut ctx)).unwrap();

        let vars = ctx.server_variables();
        assert_eq!(vars.get("REMOTE_ADDR").as_deref(), Some("203.0.113.5"));
        assert_eq!(vars.get("HTTPS").as_deref(), Some("on"));
    }

    #[test]
    fn test_no_headers_leaves_context_unchanged() {
        let module = NlbCompatModule::default();
        let mut ctx = context_with("REMOTE_ADDR", "10.1.1.1");
        let before = ctx.server_variables().clone();

        module.process_begin_request(Some(&mut ctx)).unwrap();

        assert_eq!(ctx.server_variables(), &before);
    }
}
