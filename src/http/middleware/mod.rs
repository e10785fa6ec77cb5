//! HTTP middleware.

pub mod nlb_compat;

pub use nlb_compat::{nlb_compat_middleware, NlbCompatState};
