//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. All identifiers are
//! opaque strings; some entities additionally follow a `PREFIX-###` sequence
//! format (see [`SequenceId`]).

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use msme_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("1");
/// let order_id = OrderId::new("ORD-001");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(VariantId);
define_id!(OrderId);
define_id!(CustomerId);
define_id!(LoanId);
define_id!(PaymentMethodId);

impl ProductId {
    /// Generate a fresh random product ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl VariantId {
    /// Generate a fresh random variant ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl UserId {
    /// Generate a fresh random user ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl PaymentMethodId {
    /// Generate a fresh `pm-` prefixed ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("pm-{}", uuid::Uuid::new_v4().simple()))
    }
}

/// IDs rendered as `PREFIX-###`, zero-padded to at least three digits.
///
/// ```rust
/// use msme_core::{OrderId, SequenceId};
///
/// assert_eq!(OrderId::from_sequence(7).as_str(), "ORD-007");
/// assert_eq!(OrderId::new("ORD-042").sequence(), Some(42));
/// assert_eq!(OrderId::new("legacy").sequence(), None);
/// ```
pub trait SequenceId: Sized {
    /// Prefix before the dash, e.g. `ORD`.
    const PREFIX: &'static str;

    /// Build the ID for sequence number `n`.
    fn from_sequence(n: u64) -> Self;

    /// The raw string form of this ID.
    fn raw(&self) -> &str;

    /// Parse the sequence number back out, if the ID follows the format.
    fn sequence(&self) -> Option<u64> {
        self.raw()
            .strip_prefix(Self::PREFIX)?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

impl SequenceId for OrderId {
    const PREFIX: &'static str = "ORD";

    fn from_sequence(n: u64) -> Self {
        Self(format!("{}-{n:03}", Self::PREFIX))
    }

    fn raw(&self) -> &str {
        &self.0
    }
}

impl SequenceId for CustomerId {
    const PREFIX: &'static str = "CUST";

    fn from_sequence(n: u64) -> Self {
        Self(format!("{}-{n:03}", Self::PREFIX))
    }

    fn raw(&self) -> &str {
        &self.0
    }
}

impl SequenceId for LoanId {
    const PREFIX: &'static str = "loan";

    fn from_sequence(n: u64) -> Self {
        Self(format!("{}-{n:03}", Self::PREFIX))
    }

    fn raw(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_formatting() {
        assert_eq!(OrderId::from_sequence(1).as_str(), "ORD-001");
        assert_eq!(CustomerId::from_sequence(12).as_str(), "CUST-012");
        assert_eq!(OrderId::from_sequence(1234).as_str(), "ORD-1234");
        assert_eq!(LoanId::from_sequence(2).as_str(), "loan-002");
    }

    #[test]
    fn test_sequence_parsing() {
        assert_eq!(CustomerId::new("CUST-003").sequence(), Some(3));
        assert_eq!(CustomerId::new("ORD-003").sequence(), None);
        assert_eq!(OrderId::new("ORD-").sequence(), None);
        assert_eq!(OrderId::new("ORD-abc").sequence(), None);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(ProductId::generate(), ProductId::generate());
        assert!(PaymentMethodId::generate().as_str().starts_with("pm-"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::new("ORD-001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ORD-001\"");
        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
