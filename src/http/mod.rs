//! HTTP host integration.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer address captured via ConnectInfo)
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → middleware/nlb_compat.rs (server variables, begin-request module)
//!     → handlers read RequestContext / ServerVariables
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{nlb_compat_middleware, NlbCompatState};
pub use server::{HttpServer, VARIABLES_PATH};
