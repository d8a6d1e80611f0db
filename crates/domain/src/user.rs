//! User — an account holding any number of roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{UserId, impl_identified};
use crate::role::Role;

/// An application user.
///
/// The password is stored as given, without hashing. It is left out of
/// `Debug` output and serialisation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Roles held by the user, in no particular order.
    pub roles: Vec<Role>,
}

impl User {
    /// Create an unsaved user with no roles.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
            roles: Vec::new(),
        }
    }

    /// Grant the given roles.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Whether the user holds a role with the given name.
    #[must_use]
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.name == name)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

impl_identified!(User, UserId);
