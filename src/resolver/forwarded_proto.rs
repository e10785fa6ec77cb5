//! X-Forwarded-Proto handling (SSL offloading).

use std::fmt;

use crate::config::HeaderKeys;
use crate::context::ServerVariables;
use crate::observability::metrics;

/// Scheme the original client used, as reported by the load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Anything that is not `https` (ASCII case-insensitive) is plain HTTP.
    pub fn from_forwarded(value: &str) -> Self {
        if value.eq_ignore_ascii_case("https") {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    pub fn is_secure(self) -> bool {
        self == Scheme::Https
    }

    pub fn port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    /// Value of the `HTTPS` variable.
    pub fn marker(self) -> &'static str {
        match self {
            Scheme::Http => "off",
            Scheme::Https => "on",
        }
    }

    /// Value of the `SERVER_PORT_SECURE` variable.
    pub fn secure_flag(self) -> &'static str {
        match self {
            Scheme::Http => "0",
            Scheme::Https => "1",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite the secure-flag, port and protocol marker from the
/// forwarded-protocol header.
///
/// All three fields are written together. Returns `None` and leaves them
/// untouched when the header is absent or empty.
pub fn resolve_forwarded_proto(vars: &mut ServerVariables, keys: &HeaderKeys) -> Option<Scheme> {
    let protocol = vars.get(&keys.forwarded_proto).filter(|p| !p.is_empty())?;
    let scheme = Scheme::from_forwarded(&protocol);

    tracing::debug!(
        forwarded_proto = %protocol,
        scheme = %scheme,
        "Resolved scheme from forwarded-proto"
    );

    vars.set(&keys.https, scheme.marker());
    vars.set(&keys.server_port, &scheme.port().to_string());
    vars.set(&keys.server_port_secure, scheme.secure_flag());
    metrics::record_forwarded_proto(scheme);
    Some(scheme)
}
