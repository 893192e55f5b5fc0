//! The ordered table of public endpoints.

use std::str::FromStr;

use crate::error::RuleError;
use crate::rule::EndpointRule;

/// An ordered, read-only list of [`EndpointRule`]s.
///
/// A request path is public when any rule matches it. Rules are tested in
/// order and the first match wins, which only matters for reporting which
/// rule let a request through.
///
/// Rules see the whole request target. A query string or fragment makes an
/// exact or segment rule miss, so `/api/penalty/list?page=2` needs a
/// credential. Prefix rules still match, since the target starts with the
/// prefix either way.
///
/// # Examples
///
/// ```
/// use request_gate::Whitelist;
///
/// let whitelist = Whitelist::site_default();
///
/// assert!(whitelist.is_public("/api/penalty/list"));
/// assert!(!whitelist.is_public("/api/penalty/list?page=2"));
/// assert!(whitelist.is_public("/api/video/list/recent"));
/// assert!(whitelist.is_public("/api/video/list?page=2"));
/// assert!(!whitelist.is_public("/api/penalty/detail/abc123/update"));
/// assert!(!whitelist.is_public("/api/other/endpoint"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    rules: Vec<EndpointRule>,
}

impl Whitelist {
    /// Creates an empty whitelist: every request then needs a credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// The public endpoints of the community site API.
    ///
    /// | Rule | Match |
    /// |---|---|
    /// | `/api/penalty/list` | exact |
    /// | `/api/penalty/detail/{id}` | one identifier segment, nothing after |
    /// | `/api/video/list*` | prefix |
    /// | `/api/leaderboard*` | prefix |
    /// | `/api/auth/login` | exact |
    pub fn site_default() -> Self {
        Self::builder()
            .exact("/api/penalty/list")
            .segments("/api/penalty/detail", 1)
            .prefix("/api/video/list")
            .prefix("/api/leaderboard")
            .exact("/api/auth/login")
            .build()
    }

    /// Starts building a whitelist rule by rule.
    pub fn builder() -> WhitelistBuilder {
        WhitelistBuilder { rules: Vec::new() }
    }

    /// Parses a rule table, one rule per line.
    ///
    /// Blank lines and lines starting with `#` are ignored. See
    /// [`EndpointRule`]'s `FromStr` impl for the rule syntax.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_gate::Whitelist;
    ///
    /// let table = "
    ///     ## public endpoints
    ///     /api/penalty/list
    ///     /api/penalty/detail/{id}
    ///     /api/video/list*
    ///     /api/leaderboard*
    ///     /api/auth/login
    /// ";
    ///
    /// let parsed = Whitelist::parse(table).unwrap();
    /// assert_eq!(parsed, Whitelist::site_default());
    /// ```
    pub fn parse(table: &str) -> Result<Self, RuleError> {
        let rules = table
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(EndpointRule::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Returns the first rule matching `path`, if any.
    pub fn matching_rule(&self, path: &str) -> Option<&EndpointRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Returns `true` if `path` may be requested without a credential.
    pub fn is_public(&self, path: &str) -> bool {
        self.matching_rule(path).is_some()
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[EndpointRule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the whitelist has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<EndpointRule> for Whitelist {
    fn from_iter<I: IntoIterator<Item = EndpointRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Whitelist {
    type Err = RuleError;

    fn from_str(table: &str) -> Result<Self, Self::Err> {
        Self::parse(table)
    }
}

/// Builder for [`Whitelist`]. Rules keep the order they are added in.
#[derive(Debug)]
pub struct WhitelistBuilder {
    rules: Vec<EndpointRule>,
}

impl WhitelistBuilder {
    /// Adds an exact-match rule.
    pub fn exact(self, path: impl Into<String>) -> Self {
        self.rule(EndpointRule::exact(path))
    }

    /// Adds a prefix rule.
    pub fn prefix(self, path: impl Into<String>) -> Self {
        self.rule(EndpointRule::prefix(path))
    }

    /// Adds a rule for `prefix` plus `segments` identifier segments.
    pub fn segments(self, prefix: impl Into<String>, segments: usize) -> Self {
        self.rule(EndpointRule::segments(prefix, segments))
    }

    /// Adds an already-built rule, skipping exact duplicates.
    pub fn rule(mut self, rule: EndpointRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Freezes the rule table.
    pub fn build(self) -> Whitelist {
        Whitelist { rules: self.rules }
    }
}
