//! Bearer credentials and the capability used to read them.
//!
//! The authorizer never reaches for ambient state. It is handed a
//! [`CredentialProvider`] at construction and asks it for the current
//! credential only when an endpoint is not whitelisted.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Storage key the login flow writes the bearer token under.
pub const DEFAULT_CREDENTIAL_KEY: &str = "token";

/// An opaque bearer token.
///
/// `Credential` keeps the token out of logs and error messages. Debug and
/// Display always print `[REDACTED]`; the raw value is reachable only
/// through [`expose`](Self::expose) or as a finished header value through
/// [`bearer_value`](Self::bearer_value).
///
/// # Examples
///
/// ```
/// use request_gate::Credential;
///
/// let token = Credential::new("tok1");
///
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.to_string(), "[REDACTED]");
/// assert_eq!(token.bearer_value(), "Bearer tok1");
/// ```
// Do NOT derive Clone or Default: every copy of a token should be made on purpose.
pub struct Credential {
    // Must stay private, otherwise the redacting formatters are pointless.
    token: String,
}

impl Credential {
    /// Wraps a bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the raw token.
    ///
    /// The caller is responsible for not logging or displaying it.
    pub fn expose(&self) -> &str {
        &self.token
    }

    /// Renders the value of an `Authorization` header for this token.
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Read access to the current bearer credential.
///
/// This is the single capability the [`Authorizer`](crate::Authorizer)
/// needs. Production code passes a shared [`CredentialStore`]; tests can
/// pass [`credential_fn`] closures instead of touching shared state.
pub trait CredentialProvider {
    /// Returns the current credential, or `None` if nobody is logged in.
    fn credential(&self) -> Option<Credential>;
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for &P {
    fn credential(&self) -> Option<Credential> {
        (**self).credential()
    }
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Arc<P> {
    fn credential(&self) -> Option<Credential> {
        (**self).credential()
    }
}

/// A provider backed by a closure.
///
/// Built with [`credential_fn`].
pub struct FnProvider<F> {
    read: F,
}

impl<F> fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProvider").finish_non_exhaustive()
    }
}

impl<F> CredentialProvider for FnProvider<F>
where
    F: Fn() -> Option<Credential>,
{
    fn credential(&self) -> Option<Credential> {
        (self.read)()
    }
}

/// Builds a provider from a closure.
///
/// # Examples
///
/// ```
/// use request_gate::{credential_fn, Credential, CredentialProvider};
///
/// let fixed = credential_fn(|| Some(Credential::new("tok1")));
/// assert_eq!(fixed.credential().unwrap().expose(), "tok1");
///
/// let nobody = credential_fn(|| None);
/// assert!(nobody.credential().is_none());
/// ```
pub fn credential_fn<F>(read: F) -> FnProvider<F>
where
    F: Fn() -> Option<Credential>,
{
    FnProvider { read }
}

/// Process-wide slot holding at most one bearer token.
///
/// Any number of authorization calls may read the slot concurrently. The
/// login/logout flow is the only writer and the last write wins; a stale
/// read simply makes the next request fail authorization.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::{CredentialProvider, CredentialStore};
///
/// let store = Arc::new(CredentialStore::default());
/// assert_eq!(store.key(), "token");
/// assert!(store.credential().is_none());
///
/// store.store("tok1");
/// assert_eq!(store.credential().unwrap().expose(), "tok1");
///
/// store.clear();
/// assert!(!store.is_present());
/// ```
pub struct CredentialStore {
    key: String,
    slot: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Creates an empty store under the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slot: RwLock::new(None),
        }
    }

    /// Returns the well-known key this store is published under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the stored token.
    pub fn store(&self, token: impl Into<String>) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.into());
    }

    /// Removes the stored token, returning whether one was present.
    pub fn clear(&self) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.take().is_some()
    }

    /// Returns `true` if a token is currently stored.
    pub fn is_present(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns a copy of the current token.
    pub fn current(&self) -> Option<Credential> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            .map(Credential::new)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_KEY)
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("key", &self.key)
            .field("present", &self.is_present())
            .finish()
    }
}

impl CredentialProvider for CredentialStore {
    fn credential(&self) -> Option<Credential> {
        self.current()
    }
}
