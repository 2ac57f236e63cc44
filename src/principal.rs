//! User principal names.

use std::fmt;

use crate::error::{OffboardError, Result};

/// Syntactic check for an email-shaped principal name.
///
/// Only the presence of `@` is checked; the directory decides whether the
/// name exists.
pub fn is_principal_name(input: &str) -> bool {
    input.trim().contains('@')
}

/// A principal name that passed [`is_principal_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrincipalName(String);

impl PrincipalName {
    /// Validate and wrap a principal name, trimming surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if is_principal_name(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(OffboardError::InvalidPrincipal {
                value: value.to_string(),
            })
        }
    }

    /// The principal name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PrincipalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_anything_with_at_sign() {
        assert!(is_principal_name("jdoe@contoso.com"));
        assert!(is_principal_name("@"));
        assert!(is_principal_name("  x@y  "));
    }

    #[test]
    fn rejects_values_without_at_sign() {
        for input in ["", "   ", "jdoe", "contoso.com", "jdoe(at)contoso.com"] {
            assert!(!is_principal_name(input), "accepted {:?}", input);
        }
    }

    #[test]
    fn parse_trims_whitespace() {
        let name = PrincipalName::parse("  jdoe@contoso.com\n").unwrap();
        assert_eq!(name.as_str(), "jdoe@contoso.com");
        assert_eq!(name.to_string(), "jdoe@contoso.com");
    }

    #[test]
    fn parse_rejects_invalid() {
        let err = PrincipalName::parse("jdoe").unwrap_err();
        assert!(matches!(err, OffboardError::InvalidPrincipal { value } if value == "jdoe"));
    }
}
