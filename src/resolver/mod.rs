//! Forwarding header resolvers.
//!
//! # Data Flow
//! ```text
//! ServerVariables
//!     → forwarded_for.rs   (HTTP_X_FORWARDED_FOR   → REMOTE_ADDR)
//!     → forwarded_proto.rs (HTTP_X_FORWARDED_PROTO → HTTPS, SERVER_PORT, SERVER_PORT_SECURE)
//! ```
//!
//! Both resolvers are no-ops when their input is absent or empty, and never
//! fail: unexpected header content is passed through best-effort. They write
//! disjoint fields and may run in either order.

pub mod forwarded_for;
pub mod forwarded_proto;

pub use forwarded_for::{client_address, resolve_forwarded_for, FORWARDED_FOR_SEPARATOR};
pub use forwarded_proto::{resolve_forwarded_proto, Scheme};
