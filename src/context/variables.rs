//! Server variable collection.
//!
//! An ordered name → values map with multi-valued append semantics. Lookup is
//! ASCII case-insensitive; reading a name with several values yields them
//! joined by `,`, so repeated header lines read as one forwarding chain.

use axum::http::HeaderMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Prefix applied to request headers when they are exposed as variables.
pub const HTTP_PREFIX: &str = "HTTP_";

const VALUE_SEPARATOR: &str = ",";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerVariables {
    entries: Vec<(String, Vec<String>)>,
}

impl ServerVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build variables from request headers using the CGI naming convention:
    /// `X-Forwarded-For` is stored as `HTTP_X_FORWARDED_FOR`.
    ///
    /// Header bytes that are not valid UTF-8 are decoded lossily. `_` and `-`
    /// map alike, so `X_Forwarded_For` also lands in `HTTP_X_FORWARDED_FOR`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut vars = Self::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            vars.add(&header_variable_name(name.as_str()), &value);
        }
        vars
    }

    /// All values stored under `name`, joined by `,`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.position(name)
            .map(|idx| self.entries[idx].1.join(VALUE_SEPARATOR))
    }

    pub fn get_values(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|idx| self.entries[idx].1.as_slice())
    }

    /// Append a value, keeping any already stored under `name`.
    pub fn add(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(idx) => self.entries[idx].1.push(value.to_string()),
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// Replace every value under `name` with `value`.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(idx) => self.entries[idx].1 = vec![value.to_string()],
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, joined value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.join(VALUE_SEPARATOR)))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

/// `x-forwarded-proto` → `HTTP_X_FORWARDED_PROTO`.
pub fn header_variable_name(header: &str) -> String {
    let mut name = String::with_capacity(HTTP_PREFIX.len() + header.len());
    name.push_str(HTTP_PREFIX);
    name.extend(header.chars().map(|c| match c {
        '-' => '_',
        c => c.to_ascii_uppercase(),
    }));
    name
}

impl Serialize for ServerVariables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut vars = ServerVariables::new();
        vars.add("REMOTE_ADDR", "10.0.0.1");

        assert_eq!(vars.get("remote_addr").as_deref(), Some("10.0.0.1"));
        assert!(vars.contains("Remote_Addr"));
    }

    #[test]
    fn test_add_appends_and_get_joins() {
        let mut vars = ServerVariables::new();
        vars.add("HTTP_X_FORWARDED_FOR", "192.168.0.1");
        vars.add("HTTP_X_FORWARDED_FOR", "10.70.30.54");

        assert_eq!(
            vars.get("HTTP_X_FORWARDED_FOR").as_deref(),
            Some("192.168.0.1,10.70.30.54")
        );
        assert_eq!(vars.get_values("HTTP_X_FORWARDED_FOR").map(|v| v.len()), Some(2));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut vars = ServerVariables::new();
        vars.add("HTTPS", "on");
        vars.add("HTTPS", "on");
        vars.set("https", "off");

        assert_eq!(vars.get("HTTPS").as_deref(), Some("off"));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut vars = ServerVariables::new();
        vars.set("SERVER_PORT", "80");

        assert_eq!(vars.remove("server_port"), Some(vec!["80".to_string()]));
        assert!(vars.is_empty());
        assert_eq!(vars.get("SERVER_PORT"), None);
    }

    #[test]
    fn test_from_headers_uses_cgi_names() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.append("x-forwarded-for", HeaderValue::from_static("1.1.1.1"));
        headers.append("x-forwarded-for", HeaderValue::from_static("2.2.2.2"));

        let vars = ServerVariables::from_headers(&headers);

        assert_eq!(vars.get("HTTP_X_FORWARDED_PROTO").as_deref(), Some("https"));
        assert_eq!(vars.get("HTTP_X_FORWARDED_FOR").as_deref(), Some("1.1.1.1,2.2.2.2"));
    }

    #[test]
    fn test_underscore_header_aliases_hyphenated_name() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.1.1.1"));
        headers.insert("x_forwarded_for", HeaderValue::from_static("6.6.6.6"));

        let vars = ServerVariables::from_headers(&headers);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get_values("HTTP_X_FORWARDED_FOR").map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_from_headers_decodes_invalid_utf8_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_bytes(b"10.0.0.1\xff").unwrap(),
        );

        let vars = ServerVariables::from_headers(&headers);

        assert_eq!(
            vars.get("HTTP_X_FORWARDED_FOR").as_deref(),
            Some("10.0.0.1\u{FFFD}")
        );
    }

    #[test]
    fn test_serializes_as_object_in_insertion_order() {
        let mut vars = ServerVariables::new();
        vars.set("REMOTE_ADDR", "10.0.0.1");
        vars.add("HTTP_X_FORWARDED_FOR", "a");
        vars.add("HTTP_X_FORWARDED_FOR", "b");

        let json = serde_json::to_string(&vars).unwrap();

        assert_eq!(json, r#"{"REMOTE_ADDR":"10.0.0.1","HTTP_X_FORWARDED_FOR":"a,b"}"#);
    }
}
