//! Client configuration.

use std::sync::Arc;

use crate::authorizer::Authorizer;
use crate::client::{ApiClient, Transport};
use crate::credential::{CredentialStore, DEFAULT_CREDENTIAL_KEY};
use crate::error::RuleError;
use crate::session::Session;
use crate::whitelist::Whitelist;

/// Startup configuration for an [`ApiClient`].
///
/// Everything here is fixed once the client is built; the whitelist in
/// particular is never reloaded.
///
/// # Examples
///
/// ```
/// use request_gate::{ClientConfig, OutgoingRequest, RecordingTransport};
///
/// let (client, session) = ClientConfig::new()
///     .with_base_url("https://example.com/")
///     .connect(RecordingTransport::new());
///
/// assert!(client.send(OutgoingRequest::get("/api/setting/config")).is_err());
///
/// session.login("tok1");
/// let record = client.send(OutgoingRequest::get("/api/setting/config")).unwrap();
/// assert_eq!(record.url, "https://example.com/api/setting/config");
/// assert!(record.authenticated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    credential_key: String,
    whitelist: Whitelist,
}

impl ClientConfig {
    /// Same-origin base URL, the `"token"` key, and the site whitelist.
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            whitelist: Whitelist::site_default(),
        }
    }

    /// Sets the URL request paths are joined onto.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the key the credential is stored under.
    pub fn with_credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }

    /// Replaces the whitelist.
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Replaces the whitelist with one parsed from a rule table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] in the table.
    pub fn with_whitelist_table(self, table: &str) -> Result<Self, RuleError> {
        Ok(self.with_whitelist(Whitelist::parse(table)?))
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the credential key.
    pub fn credential_key(&self) -> &str {
        &self.credential_key
    }

    /// Returns the whitelist.
    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Builds a client over a fresh credential store, plus the session
    /// handle that logs in and out of that store.
    pub fn connect<T: Transport>(
        self,
        transport: T,
    ) -> (ApiClient<Arc<CredentialStore>, T>, Session) {
        let store = Arc::new(CredentialStore::new(self.credential_key));
        let session = Session::new(Arc::clone(&store));
        let authorizer = Authorizer::new(self.whitelist, store);
        let client = ApiClient::new(authorizer, self.base_url, transport);
        (client, session)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins a request path onto a base URL with exactly one `/` between them.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
