//! X-Forwarded-For handling.

use crate::config::HeaderKeys;
use crate::context::ServerVariables;
use crate::observability::metrics;

/// Separates hops in the forwarded-for chain.
pub const FORWARDED_FOR_SEPARATOR: char = ',';

/// Compute the remote address carried by a forwarded-for value.
///
/// The first hop is dropped and the rest of the chain is returned verbatim,
/// which is how a server without a load balancer in front would see it. A
/// value without a separator (or with one only at index 0) is returned
/// trimmed. Returns `None` only for an empty value.
pub fn client_address(forwarded_for: &str) -> Option<&str> {
    if forwarded_for.is_empty() {
        return None;
    }

    match forwarded_for.find(FORWARDED_FOR_SEPARATOR) {
        Some(idx) if idx > 0 => Some(&forwarded_for[idx + FORWARDED_FOR_SEPARATOR.len_utf8()..]),
        _ => Some(forwarded_for.trim()),
    }
}

/// Rewrite the remote-address field from the forwarded-for header.
///
/// Returns the address written, or `None` if the header was absent or empty
/// and nothing was touched.
pub fn resolve_forwarded_for(vars: &mut ServerVariables, keys: &HeaderKeys) -> Option<String> {
    let forwarded_for = vars.get(&keys.forwarded_for)?;
    let remote_addr = client_address(&forwarded_for)?.to_string();

    tracing::debug!(
        forwarded_for = %forwarded_for,
        remote_addr = %remote_addr,
        "Resolved client address from forwarded-for"
    );

    vars.set(&keys.remote_addr, &remote_addr);
    metrics::record_forwarded_for();
    Some(remote_addr)
}
