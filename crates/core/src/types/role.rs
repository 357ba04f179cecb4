//! Account roles reported by the backend.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated account.
///
/// Only [`Role::Admin`] unlocks the admin panels. The client gate is a UX
/// check; the backend enforces authorization on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Store staff with access to content management.
    Admin,
    /// Regular customer account.
    #[default]
    #[serde(alias = "customer")]
    User,
    /// Any role this client does not know about; treated as unprivileged.
    #[serde(other)]
    Other,
}

impl Role {
    /// Whether this role may open admin-only views.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Other => write!(f, "other"),
        }
    }
}
