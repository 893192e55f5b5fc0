use std::fmt;

/// Refusal raised by [`Authorizer::authorize`](crate::Authorizer::authorize).
///
/// The request that triggered it must not be transmitted. Re-authenticating
/// and reissuing the request from scratch is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The endpoint is not whitelisted and no credential is stored
    MissingCredential {
        /// Path of the refused request
        path: String,
    },
}

impl AuthorizationError {
    /// Returns the path of the refused request.
    pub fn path(&self) -> &str {
        match self {
            AuthorizationError::MissingCredential { path } => path,
        }
    }
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizationError::MissingCredential { path } => {
                write!(f, "no credential present for '{}', please log in again", path)
            }
        }
    }
}

impl std::error::Error for AuthorizationError {}

/// Reasons a textual whitelist rule is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule text is empty or whitespace
    Empty,
    /// The rule does not start with `/`
    NotAbsolute(String),
    /// `*` appears anywhere but the very end
    MisplacedWildcard(String),
    /// A `{}` placeholder is unterminated, empty, or followed by literal segments
    MalformedPlaceholder(String),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::Empty => write!(f, "rule is empty"),
            RuleError::NotAbsolute(rule) => write!(f, "'{}' must start with '/'", rule),
            RuleError::MisplacedWildcard(rule) => {
                write!(f, "'{}' may only end with '*'", rule)
            }
            RuleError::MalformedPlaceholder(rule) => {
                write!(f, "'{}' has a malformed or non-trailing placeholder", rule)
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// A duration string that is not `HH:MM:SS`, `MM:SS` or `SS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmsError {
    /// The rejected input
    pub input: String,
}

impl fmt::Display for HmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a HH:MM:SS duration", self.input)
    }
}

impl std::error::Error for HmsError {}

/// Failure of a request sent through [`ApiClient`](crate::ApiClient).
///
/// `E` is the error type of the underlying transport.
#[derive(Debug)]
pub enum ClientError<E> {
    /// The request was refused before reaching the transport
    Authorization(AuthorizationError),
    /// The transport failed to deliver the request
    Transport(E),
}

impl<E> ClientError<E> {
    /// Returns `true` if the request never left the client.
    pub fn is_authorization(&self) -> bool {
        matches!(self, ClientError::Authorization(_))
    }
}

impl<E: fmt::Display> fmt::Display for ClientError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Authorization(e) => write!(f, "request aborted: {}", e),
            ClientError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl<E> std::error::Error for ClientError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Authorization(e) => Some(e),
            ClientError::Transport(e) => Some(e),
        }
    }
}

impl<E> From<AuthorizationError> for ClientError<E> {
    fn from(e: AuthorizationError) -> Self {
        ClientError::Authorization(e)
    }
}
