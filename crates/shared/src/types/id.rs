//! Typed GUIDs for type-safe references to GnuCash rows.
//!
//! GnuCash stores every GUID as 32 lowercase hex digits without hyphens, so
//! `Display` uses the simple UUID form. Parsing accepts both forms.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed GUID wrappers.
macro_rules! typed_guid {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random GUID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a GUID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.simple())
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_guid!(AccountGuid, "GUID of an account.");
typed_guid!(CommodityGuid, "GUID of a commodity.");
typed_guid!(TransactionGuid, "GUID of a transaction.");
typed_guid!(SplitGuid, "GUID of a split.");
typed_guid!(PriceGuid, "GUID of a price.");
