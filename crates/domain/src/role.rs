//! Role — a named permission group held by users.

use serde::{Deserialize, Serialize};

use crate::id::{RoleId, impl_identified};

/// A role such as `ADMIN` or `USER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Option<RoleId>,
    pub name: String,
}

impl Role {
    /// Create an unsaved role.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl_identified!(Role, RoleId);
