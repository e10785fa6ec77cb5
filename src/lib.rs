//! Load balancer compatibility filter.
//!
//! Makes a request that arrived through a TLS-terminating load balancer look,
//! to the application, as if it came straight from the client:
//! `X-Forwarded-For` becomes `REMOTE_ADDR`, and `X-Forwarded-Proto` becomes
//! `HTTPS`, `SERVER_PORT` and `SERVER_PORT_SECURE`.

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod module;
pub mod observability;
pub mod resolver;

pub use config::NlbConfig;
pub use context::{RequestContext, ServerVariables};
pub use error::NlbError;
pub use http::HttpServer;
pub use module::NlbCompatModule;
pub use resolver::{resolve_forwarded_for, resolve_forwarded_proto, Scheme};
