use std::fmt;

use crate::rule::EndpointRule;

/// Name of the header the authorizer sets.
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request headers with case-insensitive names.
///
/// The value of an `Authorization` header is never shown by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value of a header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over header names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.entries {
            if name.eq_ignore_ascii_case(AUTHORIZATION) {
                map.entry(name, &"[REDACTED]");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

/// A request on its way out, before the authorizer has seen it.
///
/// `path` is relative to the API base URL and may carry a query string.
///
/// # Examples
///
/// ```
/// use request_gate::{HttpMethod, OutgoingRequest};
///
/// let request = OutgoingRequest::post("/api/penalty/insert")
///     .with_header("Content-Type", "application/json")
///     .with_body(r#"{"name":"x"}"#);
///
/// assert_eq!(request.method(), HttpMethod::Post);
/// assert_eq!(request.headers().get("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    method: HttpMethod,
    path: String,
    headers: Headers,
    body: Option<String>,
}

impl OutgoingRequest {
    /// Creates a request without headers or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the target path, including any query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path with any query string or fragment cut off, for log fields
    /// and error messages.
    pub(crate) fn path_without_query(&self) -> &str {
        match self.path.find(['?', '#']) {
            Some(end) => &self.path[..end],
            None => &self.path,
        }
    }

    /// Returns the headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the headers for modification.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Returns the body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Why a request was allowed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The path matched this whitelist rule; the request is untouched
    Public(EndpointRule),
    /// A bearer credential was attached
    Bearer,
}

/// A request the authorizer has cleared for dispatch.
///
/// Only [`Authorizer`](crate::Authorizer) can produce one, so holding an
/// `AuthorizedRequest` proves the gate ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedRequest {
    request: OutgoingRequest,
    decision: Decision,
}

impl AuthorizedRequest {
    /// Only the authorizer builds these.
    pub(crate) fn new(request: OutgoingRequest, decision: Decision) -> Self {
        Self { request, decision }
    }

    /// Returns the cleared request.
    pub fn request(&self) -> &OutgoingRequest {
        &self.request
    }

    /// Returns why the request was cleared.
    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// Returns `true` if a credential was attached.
    pub fn is_authenticated(&self) -> bool {
        self.decision == Decision::Bearer
    }

    /// Returns the method.
    pub fn method(&self) -> HttpMethod {
        self.request.method
    }

    /// Returns the target path.
    pub fn path(&self) -> &str {
        &self.request.path
    }

    /// Returns the headers, including any attached `Authorization`.
    pub fn headers(&self) -> &Headers {
        &self.request.headers
    }

    /// Unwraps the cleared request.
    pub fn into_inner(self) -> OutgoingRequest {
        self.request
    }
}
