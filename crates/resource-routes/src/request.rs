//! # Request Container
//!
//! The normalized per-call input handed to every action handler. The dispatcher
//! fills it in; the core never parses requests itself.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// URL parameters, query parameters and the raw body of one call.
///
/// The body is opaque bytes: its format belongs to the dispatcher and the
/// serialization layer. [`RequestContainer::json`] is a convenience for the
/// common JSON case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContainer {
    /// Values captured from the matched route's placeholders.
    pub url_params: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, Vec<String>>,
    pub body: Vec<u8>,
}

impl RequestContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_params.insert(name.into(), value.into());
        self
    }

    /// Appends a query value; repeated names accumulate.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn url_param(&self, name: &str) -> Option<&str> {
        self.url_params.get(name).map(String::as_str)
    }

    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_values(name).first().map(String::as_str)
    }

    pub fn query_values(&self, name: &str) -> &[String] {
        self.query_params.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_params() {
        let request = RequestContainer::new()
            .with_url_param("id", "7")
            .with_query_param("tag", "a")
            .with_query_param("tag", "b");

        assert_eq!(request.url_param("id"), Some("7"));
        assert_eq!(request.url_param("missing"), None);
        assert_eq!(request.query_param("tag"), Some("a"));
        assert_eq!(request.query_values("tag"), ["a", "b"]);
        assert!(request.query_values("missing").is_empty());
    }

    #[test]
    fn test_json_body() {
        #[derive(Deserialize)]
        struct Reserve {
            quantity: u32,
        }

        let request = RequestContainer::new().with_body(r#"{"quantity": 3}"#);
        let reserve: Reserve = request.json().unwrap();
        assert_eq!(reserve.quantity, 3);

        assert!(RequestContainer::new().json::<Reserve>().is_err());
    }
}
