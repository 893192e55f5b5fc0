use std::sync::Arc;

use crate::credential::CredentialStore;

/// The login/logout side of the credential store.
///
/// This is the only writer of the store. Requests already authorized keep
/// whatever header they were given; the next request sees the new state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use request_gate::{CredentialStore, Session};
///
/// let session = Session::new(Arc::new(CredentialStore::default()));
/// assert!(!session.is_authenticated());
///
/// session.login("tok1");
/// assert!(session.is_authenticated());
///
/// assert!(session.logout());
/// assert!(!session.is_authenticated());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<CredentialStore>,
}

impl Session {
    /// Creates a session writing to `store`.
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    /// Stores the token handed out by a successful login, replacing any
    /// previous one.
    pub fn login(&self, token: impl Into<String>) {
        self.store.store(token);
        tracing::info!(key = %self.store.key(), "credential stored");
    }

    /// Forgets the stored token. Returns whether one was present.
    pub fn logout(&self) -> bool {
        let removed = self.store.clear();
        if removed {
            tracing::info!(key = %self.store.key(), "credential removed");
        }
        removed
    }

    /// Returns `true` while a token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.store.is_present()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::CredentialProvider;

    #[test]
    fn login_replaces_previous_token() {
        let session = Session::new(Arc::new(CredentialStore::default()));
        session.login("old");
        session.login("new");

        assert_eq!(session.store().credential().unwrap().expose(), "new");
    }

    #[test]
    fn logout_twice_reports_nothing_to_remove() {
        let session = Session::new(Arc::new(CredentialStore::default()));
        session.login("tok");

        assert!(session.logout());
        assert!(!session.logout());
    }

    #[test]
    fn clones_share_one_store() {
        let session = Session::new(Arc::new(CredentialStore::default()));
        let other = session.clone();

        other.login("tok");
        assert!(session.is_authenticated());
    }
}
