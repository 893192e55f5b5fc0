//! The HTTP client shell the authorizer is hooked into.
//!
//! [`ApiClient`] authorizes every request first and only hands it to its
//! [`Transport`] once cleared. A refused request never reaches the
//! transport.

use std::convert::Infallible;
use std::sync::{Mutex, PoisonError};

use crate::authorizer::Authorizer;
use crate::config::join_url;
use crate::credential::CredentialProvider;
use crate::error::ClientError;
use crate::request::{AuthorizedRequest, HttpMethod, OutgoingRequest};

/// Delivers cleared requests.
///
/// Implementations wrap whatever HTTP stack the application uses. They only
/// accept [`AuthorizedRequest`]s, so a request cannot skip the gate.
pub trait Transport {
    /// Successful response type
    type Response;
    /// Delivery failure type
    type Error;

    /// Sends `request` to the absolute `url`.
    fn send(&self, url: &str, request: &AuthorizedRequest) -> Result<Self::Response, Self::Error>;
}

/// HTTP client that runs the [`Authorizer`] before every dispatch.
///
/// # Examples
///
/// ```
/// use request_gate::{
///     credential_fn, ApiClient, Authorizer, ClientError, RecordingTransport, Whitelist,
/// };
///
/// let authorizer = Authorizer::new(Whitelist::site_default(), credential_fn(|| None));
/// let client = ApiClient::new(authorizer, "https://example.com", RecordingTransport::new());
///
/// // Public endpoints go out without a credential.
/// client.get("/api/leaderboard").unwrap();
///
/// // Protected endpoints are aborted before transmission.
/// let err = client.get("/api/setting/backup").unwrap_err();
/// assert!(matches!(err, ClientError::Authorization(_)));
/// assert_eq!(client.transport().request_count(), 1);
/// ```
#[derive(Debug)]
pub struct ApiClient<P, T> {
    authorizer: Authorizer<P>,
    base_url: String,
    transport: T,
}

impl<P, T> ApiClient<P, T>
where
    P: CredentialProvider,
    T: Transport,
{
    /// Creates a client. Request paths are joined onto `base_url`.
    pub fn new(authorizer: Authorizer<P>, base_url: impl Into<String>, transport: T) -> Self {
        Self {
            authorizer,
            base_url: base_url.into(),
            transport,
        }
    }

    /// Authorizes and dispatches a request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authorization`] without touching the transport
    /// when the request is refused, or [`ClientError::Transport`] when
    /// delivery fails.
    pub fn send(&self, request: OutgoingRequest) -> Result<T::Response, ClientError<T::Error>> {
        let cleared = self.authorizer.authorize(request)?;
        let url = join_url(&self.base_url, cleared.path());

        tracing::debug!(
            method = %cleared.method(),
            authenticated = cleared.is_authenticated(),
            "dispatching request"
        );

        self.transport
            .send(&url, &cleared)
            .map_err(ClientError::Transport)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn get(&self, path: &str) -> Result<T::Response, ClientError<T::Error>> {
        self.send(OutgoingRequest::get(path))
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn post_json(
        &self,
        path: &str,
        body: impl Into<String>,
    ) -> Result<T::Response, ClientError<T::Error>> {
        self.send(
            OutgoingRequest::post(path)
                .with_header("Content-Type", "application/json")
                .with_body(body),
        )
    }

    /// Returns the authorizer.
    pub fn authorizer(&self) -> &Authorizer<P> {
        &self.authorizer
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Metadata about a dispatched request.
///
/// Holds header names and the body length only, never header values or
/// the body itself, so a record can be logged or asserted on freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    /// HTTP method used
    pub method: HttpMethod,
    /// Absolute URL the request was sent to
    pub url: String,
    /// Names of the headers sent
    pub header_names: Vec<String>,
    /// Whether a bearer credential was attached
    pub authenticated: bool,
    /// Length of the request body in bytes
    pub body_len: usize,
}

/// Offline transport that records requests instead of sending them.
///
/// Deterministic and network-free, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    records: Mutex<Vec<DispatchRecord>>,
}

impl RecordingTransport {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded requests.
    pub fn request_count(&self) -> usize {
        self.lock().len()
    }

    /// Returns a snapshot of all recorded requests.
    pub fn requests(&self) -> Vec<DispatchRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DispatchRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for RecordingTransport {
    type Response = DispatchRecord;
    type Error = Infallible;

    fn send(&self, url: &str, request: &AuthorizedRequest) -> Result<DispatchRecord, Infallible> {
        let record = DispatchRecord {
            method: request.method(),
            url: url.to_string(),
            header_names: request.headers().names().map(str::to_string).collect(),
            authenticated: request.is_authenticated(),
            body_len: request.request().body().map_or(0, str::len),
        };
        self.lock().push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{credential_fn, Credential};
    use crate::whitelist::Whitelist;

    fn client_with(
        token: Option<&'static str>,
    ) -> ApiClient<impl CredentialProvider, RecordingTransport> {
        let authorizer = Authorizer::new(
            Whitelist::site_default(),
            credential_fn(move || token.map(Credential::new)),
        );
        ApiClient::new(authorizer, "https://api.example.com", RecordingTransport::new())
    }

    #[test]
    fn refused_request_never_reaches_transport() {
        let client = client_with(None);

        let err = client.post_json("/api/penalty/insert", "{}").unwrap_err();

        assert!(err.is_authorization());
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn public_request_is_sent_without_authorization() {
        let client = client_with(Some("tok1"));

        let record = client.get("/api/penalty/list").unwrap();

        assert_eq!(record.url, "https://api.example.com/api/penalty/list");
        assert!(!record.authenticated);
        assert!(record.header_names.is_empty());
    }

    #[test]
    fn protected_request_carries_authorization() {
        let client = client_with(Some("tok1"));

        let record = client
            .post_json("/api/penalty/update", r#"{"id":7}"#)
            .unwrap();

        assert_eq!(record.method, HttpMethod::Post);
        assert!(record.authenticated);
        assert_eq!(record.body_len, 8);
        assert!(record.header_names.iter().any(|h| h == "Authorization"));
        assert!(record.header_names.iter().any(|h| h == "Content-Type"));
    }

    #[test]
    fn records_do_not_leak_token_or_body() {
        let client = client_with(Some("SECRET_TOKEN_123"));

        client
            .post_json("/api/video/insert", "SECRET_BODY")
            .unwrap();

        let debug_output = format!("{:?}", client.transport().requests());
        assert!(!debug_output.contains("SECRET_TOKEN"));
        assert!(!debug_output.contains("SECRET_BODY"));
    }

    #[test]
    fn transport_errors_are_reported_as_such() {
        struct Offline;

        impl Transport for Offline {
            type Response = ();
            type Error = &'static str;

            fn send(&self, _url: &str, _request: &AuthorizedRequest) -> Result<(), &'static str> {
                Err("offline")
            }
        }

        let authorizer = Authorizer::new(Whitelist::site_default(), credential_fn(|| None));
        let client = ApiClient::new(authorizer, "", Offline);

        let err = client.get("/api/auth/login").unwrap_err();
        assert!(matches!(err, ClientError::Transport("offline")));
    }
}
