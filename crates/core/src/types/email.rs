//! Contact email for users, customers and order snapshots.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {0} characters")]
    TooLong(usize),
    #[error("email cannot contain whitespace")]
    Whitespace,
    /// Not of the form `name@domain.tld`.
    #[error("email must look like name@domain.tld")]
    Malformed,
}

/// A trimmed email address with a lowercase domain.
///
/// Checks are deliberately loose: one `@`, a non-empty name, and a dotted
/// domain. Deserialization runs the same checks, so stored records and
/// request bodies always hold a parsed address.
///
/// ```
/// use msme_core::Email;
///
/// let email = Email::parse("  Wanjiru@Duka.CO.KE ").unwrap();
/// assert_eq!(email.as_str(), "Wanjiru@duka.co.ke");
///
/// assert!(Email::parse("wanjiru").is_err());
/// assert!(Email::parse("wanjiru@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Longest accepted address (RFC 5321 path limit).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize an address.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] naming the first failed check.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong(Self::MAX_LENGTH));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (name, domain) = s.split_once('@').ok_or(EmailError::Malformed)?;
        let dotted = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
        if name.is_empty() || domain.contains('@') || !dotted {
            return Err(EmailError::Malformed);
        }

        Ok(Self(format!("{name}@{}", domain.to_ascii_lowercase())))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether two addresses name the same mailbox, ignoring case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
