//! Clan and player tags.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static TAG_BODY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

const MIN_TAG_LEN: usize = 3;

/// Reasons a raw tag is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag is required")]
    Empty,

    #[error("tag must be alphanumeric")]
    NotAlphanumeric,

    #[error("tag must be at least 3 characters long")]
    TooShort,
}

/// A validated, normalized tag such as `#9U82JJ0Y`.
///
/// Normalization uppercases the body and replaces the letter `O` with the
/// digit `0`, which the game never uses in tags.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClanTag(String);

/// Player tags follow the same format rules as clan tags.
pub type PlayerTag = ClanTag;

impl ClanTag {
    /// Validate and normalize a tag with or without its leading `#`.
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        let body = raw.trim();
        let body = body.strip_prefix('#').unwrap_or(body);

        if body.is_empty() {
            return Err(TagError::Empty);
        }
        if !TAG_BODY.is_match(body) {
            return Err(TagError::NotAlphanumeric);
        }
        if body.len() < MIN_TAG_LEN {
            return Err(TagError::TooShort);
        }

        let normalized = body.to_uppercase().replace('O', "0");
        Ok(Self(format!("#{}", normalized)))
    }

    /// The tag including its leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag as it appears in an upstream URL path (`%23` + body).
    pub fn encoded(&self) -> String {
        format!("%23{}", &self.0[1..])
    }
}

impl fmt::Display for ClanTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ClanTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClanTag({})", self.0)
    }
}

impl std::str::FromStr for ClanTag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
