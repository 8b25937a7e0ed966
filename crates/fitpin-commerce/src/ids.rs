//! Newtype identifiers.
//!
//! The backend keys items and fit-storage entries by integer and users by
//! email; the newtypes keep them from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate integer key newtypes.
macro_rules! define_key {
    ($name:ident) => {
        /// A backend-assigned integer key.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw key.
            pub const fn new(key: i64) -> Self {
                Self(key)
            }

            /// Get the raw key.
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(key: i64) -> Self {
                Self(key)
            }
        }
    };
}

define_key!(ItemKey);
define_key!(FitStorageKey);

/// A user's email address, which the backend uses as the account key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    /// Create a new email key.
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no email is set.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserEmail {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserEmail {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
