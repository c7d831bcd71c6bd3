//! Request and response shapes for the Snibox REST API.
//!
//! DESIGN
//! ======
//! Mutation bodies and server entities stay opaque `serde_json::Value`s:
//! the client only inspects the `completed` flag and the `errors` list,
//! everything else flows straight into UI state.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::Deserialize;
use serde_json::Value;

/// HTTP verbs the client issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of resource mutation a [`RequestSpec`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    #[must_use]
    pub fn http_method(self) -> HttpMethod {
        match self {
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }
}

/// User-facing toast text for one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Messages {
    pub success: String,
    pub error: String,
}

impl Messages {
    #[must_use]
    pub fn new(success: &str, error: &str) -> Self {
        Self { success: success.to_owned(), error: error.to_owned() }
    }
}

/// One outbound mutation: where it goes, what it carries, what to tell the user.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    pub path: String,
    pub method: Mutation,
    pub body: Option<Value>,
    pub messages: Messages,
}

impl RequestSpec {
    #[must_use]
    pub fn new(path: impl Into<String>, method: Mutation, messages: Messages) -> Self {
        Self { path: path.into(), method, body: None, messages }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Reply to a create/update/delete call.
///
/// A 2xx reply may still report `completed: false` with human-readable
/// `errors` (validation failures and the like).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub entity: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl ServerResponse {
    /// Interpret a parsed response body. `null` (an empty 2xx body) reads as
    /// an incomplete response.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `body` is neither `null` nor an object
    /// matching the response shape.
    pub fn from_value(body: Value) -> Result<Self, serde_json::Error> {
        if body.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(body)
    }
}
