use crate::credential::CredentialProvider;
use crate::error::AuthorizationError;
use crate::request::{AuthorizedRequest, Decision, OutgoingRequest, AUTHORIZATION};
use crate::whitelist::Whitelist;

/// The pre-dispatch gate for outgoing requests.
///
/// `Authorizer` holds a fixed [`Whitelist`] and the [`CredentialProvider`]
/// it was constructed with. For each request it decides one of three
/// outcomes:
///
/// 1. The target matches a whitelist rule: the request passes through
///    unmodified. The provider is not consulted, so public endpoints behave
///    the same whether or not anyone is logged in.
/// 2. No rule matches and a credential is available: an
///    `Authorization: Bearer <token>` header is set.
/// 3. No rule matches and there is no credential: the request is refused
///    with [`AuthorizationError::MissingCredential`] and must not be sent.
///
/// No I/O happens here. The authorizer only shapes the request.
///
/// # Examples
///
/// ```
/// use request_gate::{
///     credential_fn, AuthorizationError, Authorizer, Credential, OutgoingRequest, Whitelist,
/// };
///
/// let logged_in = Authorizer::new(
///     Whitelist::site_default(),
///     credential_fn(|| Some(Credential::new("tok1"))),
/// );
/// let cleared = logged_in
///     .authorize(OutgoingRequest::get("/api/other/endpoint"))
///     .unwrap();
/// assert_eq!(cleared.headers().get("Authorization"), Some("Bearer tok1"));
///
/// let anonymous = Authorizer::new(Whitelist::site_default(), credential_fn(|| None));
/// let err = anonymous
///     .authorize(OutgoingRequest::get("/api/other/endpoint"))
///     .unwrap_err();
/// assert!(matches!(err, AuthorizationError::MissingCredential { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct Authorizer<P> {
    whitelist: Whitelist,
    credentials: P,
}

impl<P: CredentialProvider> Authorizer<P> {
    /// Creates an authorizer over a fixed whitelist and credential source.
    pub fn new(whitelist: Whitelist, credentials: P) -> Self {
        Self {
            whitelist,
            credentials,
        }
    }

    /// Decides whether `request` may be dispatched, attaching a bearer
    /// credential when the endpoint requires one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::MissingCredential`] when the path is not
    /// whitelisted and the provider has no credential.
    pub fn authorize(
        &self,
        mut request: OutgoingRequest,
    ) -> Result<AuthorizedRequest, AuthorizationError> {
        if let Some(rule) = self.whitelist.matching_rule(request.path()) {
            tracing::debug!(
                method = %request.method(),
                path = %request.path_without_query(),
                rule = %rule,
                "whitelisted request passed through"
            );
            let decision = Decision::Public(rule.clone());
            return Ok(AuthorizedRequest::new(request, decision));
        }

        let Some(credential) = self.credentials.credential() else {
            tracing::warn!(
                method = %request.method(),
                path = %request.path_without_query(),
                "no credential found, request aborted"
            );
            return Err(AuthorizationError::MissingCredential {
                path: request.path_without_query().to_string(),
            });
        };

        request
            .headers_mut()
            .set(AUTHORIZATION, credential.bearer_value());
        tracing::debug!(
            method = %request.method(),
            path = %request.path_without_query(),
            "bearer credential attached"
        );

        Ok(AuthorizedRequest::new(request, Decision::Bearer))
    }

    /// Returns the whitelist in use.
    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Returns the credential provider in use.
    pub fn credentials(&self) -> &P {
        &self.credentials
    }
}
