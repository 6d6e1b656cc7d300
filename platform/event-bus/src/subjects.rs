//! Subject naming and routing
//!
//! Keeps the mapping from logical event type to bus subject behind a seam, so
//! subject naming can diverge from the type string without touching publish or
//! dispatch code. Also hosts NATS-style wildcard matching, used for
//! subscription filtering and for grouping related subjects into families.

use crate::{BusError, BusResult};

/// Maps a logical event type to the subject it is published on
pub trait SubjectRouter: Send + Sync {
    fn subject_for_type(&self, event_type: &str) -> String;
}

/// The event type string is the subject
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRouter;

impl SubjectRouter for IdentityRouter {
    fn subject_for_type(&self, event_type: &str) -> String {
        event_type.to_string()
    }
}

/// Check if a subject matches a subscription pattern
///
/// Supports NATS-style wildcards:
/// - `*` matches exactly one token
/// - `>` matches one or more tokens
///
/// # Examples
/// - `ping.*.status` matches `ping.cache.status`
/// - `ping.>` matches `ping.cache.status`
/// - `ping.*` does NOT match `ping.cache.status` (too many tokens)
pub fn matches_family(subject: &str, pattern: &str) -> bool {
    let subject_tokens: Vec<&str> = subject.split('.').collect();
    let pattern_tokens: Vec<&str> = pattern.split('.').collect();

    let mut s_idx = 0;
    let mut p_idx = 0;

    while s_idx < subject_tokens.len() && p_idx < pattern_tokens.len() {
        let pattern_token = pattern_tokens[p_idx];

        if pattern_token == ">" {
            return true;
        } else if pattern_token == "*" || subject_tokens[s_idx] == pattern_token {
            s_idx += 1;
            p_idx += 1;
        } else {
            return false;
        }
    }

    // Both must be exhausted for a full match (unless pattern ended with `>`)
    s_idx == subject_tokens.len() && p_idx == pattern_tokens.len()
}

/// Validate a concrete subject used for publishing
///
/// Rejects empty subjects, empty tokens, whitespace and wildcards.
pub fn validate_subject(subject: &str) -> BusResult<()> {
    validate_tokens(subject)?;

    if subject.split('.').any(|t| t == "*" || t == ">") {
        return Err(BusError::InvalidSubject(format!(
            "wildcards are not allowed in publish subjects: '{}'",
            subject
        )));
    }

    Ok(())
}

/// Validate a subscription pattern
///
/// Same rules as [`validate_subject`], except that `*` tokens are allowed
/// anywhere and a `>` token is allowed in last position.
pub fn validate_pattern(pattern: &str) -> BusResult<()> {
    validate_tokens(pattern)?;

    let tokens: Vec<&str> = pattern.split('.').collect();
    if let Some(pos) = tokens.iter().position(|t| *t == ">") {
        if pos != tokens.len() - 1 {
            return Err(BusError::InvalidSubject(format!(
                "'>' must be the last token: '{}'",
                pattern
            )));
        }
    }

    Ok(())
}

fn validate_tokens(subject: &str) -> BusResult<()> {
    if subject.is_empty() {
        return Err(BusError::InvalidSubject("subject cannot be empty".to_string()));
    }

    if subject.chars().any(char::is_whitespace) {
        return Err(BusError::InvalidSubject(format!(
            "subject cannot contain whitespace: '{}'",
            subject
        )));
    }

    if subject.split('.').any(str::is_empty) {
        return Err(BusError::InvalidSubject(format!(
            "subject cannot contain empty tokens: '{}'",
            subject
        )));
    }

    Ok(())
}

/// A family of related subjects sharing one single-token wildcard
///
/// Lets one subscription cover several event kinds (e.g. one status subject
/// per monitored component) while each member stays individually
/// addressable.
///
/// ```rust
/// use event_bus::SubjectFamily;
///
/// let family = SubjectFamily::new("ping.*.status");
/// assert_eq!(family.member("cache"), "ping.cache.status");
/// assert_eq!(family.segment_of("ping.cache.status"), Some("cache"));
/// assert_eq!(family.segment_of("price.created"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectFamily {
    pattern: &'static str,
}

impl SubjectFamily {
    /// Create a family from a pattern with exactly one `*` token
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    /// The subscription pattern covering every member
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Build the concrete subject for one member of the family
    pub fn member(&self, segment: &str) -> String {
        self.pattern
            .split('.')
            .map(|t| if t == "*" { segment } else { t })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Whether a subject belongs to this family
    pub fn matches(&self, subject: &str) -> bool {
        matches_family(subject, self.pattern)
    }

    /// Extract the wildcard segment of a member subject
    pub fn segment_of<'a>(&self, subject: &'a str) -> Option<&'a str> {
        if !self.matches(subject) {
            return None;
        }

        self.pattern
            .split('.')
            .zip(subject.split('.'))
            .find(|(p, _)| *p == "*")
            .map(|(_, s)| s)
    }
}
