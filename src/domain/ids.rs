//! Domain identifier types
//!
//! Newtype wrappers over server-generated UUIDs. Keeping organization, bundle and
//! layer identifiers distinct prevents passing one where another is expected, and
//! guarantees their textual form is always a hyphenated UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generates a new random identifier
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner UUID
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id!(
    /// Organization identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use geobundle::domain::ids::OrganizationId;
    /// use std::str::FromStr;
    ///
    /// let id = OrganizationId::from_str("5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a").unwrap();
    /// assert_eq!(id.to_string(), "5c2c5822-6996-4306-8b5d-1a8b1f3b5f2a");
    /// ```
    OrganizationId,
    "organization id"
);

uuid_id!(
    /// Bundle identifier
    BundleId,
    "bundle id"
);

uuid_id!(
    /// Layer identifier
    LayerId,
    "layer id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_uuid() {
        let id = BundleId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
        assert_eq!(id.to_string(), "7d44b88c-4199-4bad-97dc-d78268e01398");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = LayerId::from_str("  7d44b88c-4199-4bad-97dc-d78268e01398 ").unwrap();
        assert_eq!(id.to_string(), "7d44b88c-4199-4bad-97dc-d78268e01398");
    }

    #[test]
    fn test_parse_rejects_sql_text() {
        let result = OrganizationId::from_str("x' OR '1'='1");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("organization id"));
    }

    #[test]
    fn test_display_is_lowercase_hyphenated() {
        let id = OrganizationId::from_str("7D44B88C41994BAD97DCD78268E01398").unwrap();
        assert_eq!(id.to_string(), "7d44b88c-4199-4bad-97dc-d78268e01398");
    }

    #[test]
    fn test_serde_transparent() {
        let id = BundleId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7d44b88c-4199-4bad-97dc-d78268e01398\"");
        let back: BundleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
