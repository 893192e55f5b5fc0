//! Bearer-credential gate for outgoing API requests.
//!
//! Every request the client sends passes through an [`Authorizer`] first:
//! - **Public endpoints**: paths matching the [`Whitelist`] go out untouched,
//!   whether or not anyone is logged in
//! - **Protected endpoints**: everything else gets an
//!   `Authorization: Bearer <token>` header from the injected
//!   [`CredentialProvider`]
//! - **No credential**: a protected request is refused with
//!   [`AuthorizationError::MissingCredential`] and never transmitted
//!
//! # Core Types
//!
//! - [`EndpointRule`]: Exact, prefix, or prefix-plus-segments path pattern
//! - [`Whitelist`]: Ordered, read-only table of public endpoint rules
//! - [`Credential`]: Bearer token that redacts itself in logs/output
//! - [`CredentialStore`]: Process-wide credential slot, written by [`Session`]
//! - [`Authorizer`]: The pass/attach/reject decision
//! - [`ApiClient`]: Runs the authorizer before handing requests to a [`Transport`]
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use request_gate::{
//!     AuthorizationError, Authorizer, CredentialStore, OutgoingRequest, Session, Whitelist,
//! };
//!
//! let store = Arc::new(CredentialStore::default());
//! let session = Session::new(Arc::clone(&store));
//! let authorizer = Authorizer::new(Whitelist::site_default(), store);
//!
//! // Public endpoints never need a credential.
//! let cleared = authorizer
//!     .authorize(OutgoingRequest::get("/api/penalty/list"))
//!     .expect("whitelisted");
//! assert!(!cleared.headers().contains("Authorization"));
//!
//! // Protected endpoints are refused until someone logs in.
//! let refused = authorizer.authorize(OutgoingRequest::post("/api/penalty/update"));
//! assert!(matches!(refused, Err(AuthorizationError::MissingCredential { .. })));
//!
//! session.login("tok1");
//! let cleared = authorizer
//!     .authorize(OutgoingRequest::post("/api/penalty/update"))
//!     .expect("logged in");
//! assert_eq!(cleared.headers().get("Authorization"), Some("Bearer tok1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod authorizer;
mod client;
mod config;
mod credential;
mod error;
pub mod format;
mod penalty;
mod request;
mod rule;
mod session;
mod whitelist;

pub use authorizer::Authorizer;
pub use client::{ApiClient, DispatchRecord, RecordingTransport, Transport};
pub use config::ClientConfig;
pub use credential::{
    credential_fn, Credential, CredentialProvider, CredentialStore, FnProvider,
    DEFAULT_CREDENTIAL_KEY,
};
pub use error::{AuthorizationError, ClientError, HmsError, RuleError};
pub use penalty::{PenaltyState, UNKNOWN_LABEL};
pub use request::{
    AuthorizedRequest, Decision, Headers, HttpMethod, OutgoingRequest, AUTHORIZATION,
};
pub use rule::EndpointRule;
pub use session::Session;
pub use whitelist::{Whitelist, WhitelistBuilder};
