//! Authenticated caller identity.
//!
//! Authentication middleware resolves credentials into a [`Principal`] and
//! attaches it to the request through [`crate::context`]. A request without
//! credentials still carries a principal: [`Principal::Anonymous`].

use serde::{Deserialize, Serialize};

/// The caller a request is made on behalf of.
///
/// # Example
///
/// ```
/// use herald_core::Principal;
///
/// let principal = Principal::user(7, "Alice", "alice@example.com", true);
/// assert!(!principal.is_anonymous());
/// assert_eq!(principal.log_id(), "user:7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Principal {
    /// No credentials were presented.
    Anonymous,
    /// A registered user account.
    User(UserIdentity),
}

/// Identity of a registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Account id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Whether the account has been activated.
    pub activated: bool,
}

impl Principal {
    /// The anonymous principal.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Builds a user principal.
    #[must_use]
    pub fn user(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        activated: bool,
    ) -> Self {
        Self::User(UserIdentity {
            id,
            name: name.into(),
            email: email.into(),
            activated,
        })
    }

    /// Returns true for the anonymous principal.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns true when the principal is an activated user.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        match self {
            Self::User(user) => user.activated,
            Self::Anonymous => false,
        }
    }

    /// Returns the user identity, if any.
    #[must_use]
    pub const fn as_user(&self) -> Option<&UserIdentity> {
        match self {
            Self::User(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    /// Identifier suitable for log fields. Never includes the email.
    #[must_use]
    pub fn log_id(&self) -> String {
        match self {
            Self::User(user) => format!("user:{}", user.id),
            Self::Anonymous => "anonymous".to_string(),
        }
    }
}
