use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Validated SQL identifier (table, alias or column name).
///
/// Identifiers are the only strings that reach generated SQL text; values are
/// always bound as parameters. Rendering always double-quotes the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// PostgreSQL truncates identifiers longer than NAMEDATALEN - 1
    const MAX_LENGTH: usize = 63;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidIdentifier(format!(
                "{} (longer than {} characters)",
                value,
                Self::MAX_LENGTH
            )));
        }

        if !IDENTIFIER_PATTERN.is_match(&value) {
            return Err(DomainError::InvalidIdentifier(value));
        }

        Ok(Self(value))
    }

    /// Build an identifier from a compile-time constant known to be valid.
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(IDENTIFIER_PATTERN.is_match(value));
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form used in SQL text
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(identifier: Identifier) -> Self {
        identifier.0
    }
}
