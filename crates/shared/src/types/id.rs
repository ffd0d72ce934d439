//! Typed IDs for record references.
//!
//! Using typed IDs prevents accidentally passing an `InvoiceId` where an `IncomeId` is expected.
//! The backend owns id generation, so ids are opaque strings; locally created records get a
//! UUID v7 until the server echoes its own id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new local ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wraps an id assigned elsewhere (usually the backend).
            #[must_use]
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if no id has been assigned yet.
            #[must_use]
            pub fn is_unassigned(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(String::new())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from_raw(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

typed_id!(IncomeId, "Unique identifier for an income record.");
typed_id!(ExpenseId, "Unique identifier for an expense record.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(TransferId, "Unique identifier for a cash/bank transfer.");
typed_id!(ClientId, "Unique identifier for a client.");
