use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// A pattern naming request paths that may be sent without a credential.
///
/// Rules are immutable once built. Each variant has a single, fixed match
/// semantic, evaluated by [`matches`](Self::matches):
///
/// - `Exact`: the path equals the pattern.
/// - `Prefix`: the path starts with the pattern.
/// - `SegmentPattern`: the path is `prefix` followed by exactly `segments`
///   identifier segments and nothing else. An identifier segment is one or
///   more ASCII letters, digits, `_` or `-`.
///
/// # Examples
///
/// ```
/// use request_gate::EndpointRule;
///
/// let detail = EndpointRule::segments("/api/penalty/detail", 1);
///
/// assert!(detail.matches("/api/penalty/detail/abc123"));
/// assert!(!detail.matches("/api/penalty/detail/abc123/update"));
///
/// let videos: EndpointRule = "/api/video/list*".parse().unwrap();
/// assert!(videos.matches("/api/video/list/recent"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointRule {
    /// Path equality
    Exact(String),
    /// Path starts with the given prefix
    Prefix(String),
    /// Fixed prefix followed by a fixed number of identifier segments
    SegmentPattern {
        /// Literal part of the path, without a trailing `/`
        prefix: String,
        /// Number of identifier segments that must follow the prefix
        segments: usize,
    },
}

impl EndpointRule {
    /// Creates an exact-match rule.
    pub fn exact(path: impl Into<String>) -> Self {
        EndpointRule::Exact(path.into())
    }

    /// Creates a prefix rule.
    pub fn prefix(path: impl Into<String>) -> Self {
        EndpointRule::Prefix(path.into())
    }

    /// Creates a rule matching `prefix` plus `segments` identifier segments.
    ///
    /// A trailing `/` on the prefix is ignored.
    pub fn segments(prefix: impl Into<String>, segments: usize) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        EndpointRule::SegmentPattern { prefix, segments }
    }

    /// Tests a request target against this rule.
    ///
    /// `path` is compared as given, query string included, so a query only
    /// ever matches through a `Prefix` rule.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            EndpointRule::Exact(exact) => path == exact,
            EndpointRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
            EndpointRule::SegmentPattern { prefix, segments } => {
                matches_segments(path, prefix, *segments)
            }
        }
    }
}

fn matches_segments(path: &str, prefix: &str, segments: usize) -> bool {
    let Some(rest) = path.strip_prefix(prefix) else {
        return false;
    };
    if segments == 0 {
        return rest.is_empty();
    }
    let Some(rest) = rest.strip_prefix('/') else {
        return false;
    };

    let mut count = 0;
    for segment in rest.split('/') {
        if !is_identifier(segment) {
            return false;
        }
        count += 1;
    }
    count == segments
}

fn is_identifier(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Writes the rule in the syntax [`FromStr`] reads.
///
/// Parsing the output gives back the same rule only when the literal paths
/// contain no `*`, `{` or `}` and carry no surrounding whitespace, and the
/// rule has at least one segment if it is a `SegmentPattern`. The
/// constructors accept any text, so `EndpointRule::exact("/a*")` displays as
/// `/a*`, which reads back as a prefix rule.
impl fmt::Display for EndpointRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRule::Exact(path) => f.write_str(path),
            EndpointRule::Prefix(prefix) => write!(f, "{}*", prefix),
            EndpointRule::SegmentPattern { prefix, segments } => {
                f.write_str(prefix)?;
                for _ in 0..*segments {
                    f.write_str("/{segment}")?;
                }
                Ok(())
            }
        }
    }
}

/// Parses the textual rule syntax used by configuration files.
///
/// - `/a/b` is an exact rule.
/// - `/a/b*` is a prefix rule for `/a/b`.
/// - `/a/b/{id}` matches `/a/b` plus one identifier segment; every
///   placeholder adds one segment and placeholders must be trailing.
impl FromStr for EndpointRule {
    type Err = RuleError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RuleError::Empty);
        }
        if !text.starts_with('/') {
            return Err(RuleError::NotAbsolute(text.to_string()));
        }

        if let Some(star) = text.find('*') {
            if star != text.len() - 1 {
                return Err(RuleError::MisplacedWildcard(text.to_string()));
            }
            let prefix = &text[..star];
            if prefix.contains(['{', '}']) {
                return Err(RuleError::MalformedPlaceholder(text.to_string()));
            }
            return Ok(EndpointRule::prefix(prefix));
        }

        let parts: Vec<&str> = text.split('/').collect();
        let first_placeholder = parts.iter().position(|p| p.starts_with('{'));

        let Some(first) = first_placeholder else {
            if text.contains(['{', '}']) {
                return Err(RuleError::MalformedPlaceholder(text.to_string()));
            }
            return Ok(EndpointRule::exact(text));
        };

        let (literal, placeholders) = parts.split_at(first);
        if literal.iter().any(|p| p.contains(['{', '}']))
            || !placeholders.iter().all(|p| is_placeholder(p))
        {
            return Err(RuleError::MalformedPlaceholder(text.to_string()));
        }

        Ok(EndpointRule::segments(literal.join("/"), placeholders.len()))
    }
}

fn is_placeholder(part: &str) -> bool {
    part.strip_prefix('{')
        .and_then(|p| p.strip_suffix('}'))
        .is_some_and(|name| !name.is_empty() && !name.contains(['{', '}']))
}
