//! Access seed — roles and a user holding them.

use std::fmt;

use hospital_domain::error::HospitalError;
use hospital_domain::role::Role;
use hospital_domain::user::User;

use crate::ports::{RoleRepository, UserRepository};

/// Roles and user created by the access seed.
#[derive(Debug, Clone)]
pub struct AccessReport {
    pub roles: Vec<Role>,
    pub user: User,
}

/// Runs the access seed sequence.
pub struct AccessSeeder<U, R> {
    users: U,
    roles: R,
}

impl<U: UserRepository, R: RoleRepository> AccessSeeder<U, R> {
    /// Create a seeder backed by the given repositories.
    pub fn new(users: U, roles: R) -> Self {
        Self { users, roles }
    }

    /// Save the `ADMIN` and `USER` roles, then a user holding both.
    ///
    /// # Errors
    ///
    /// Returns the first storage error raised by a repository.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<AccessReport, HospitalError> {
        let mut roles = Vec::with_capacity(2);
        for name in ["ADMIN", "USER"] {
            let role = self.roles.save(Role::new(name)).await?;
            tracing::info!(id = ?role.id, name, "role saved");
            roles.push(role);
        }

        // Plain-text password, kept as the demo defines it.
        let user = User::new("achraf", "password123").with_roles(roles.iter().cloned());
        let user = self.users.save(user).await?;
        tracing::info!(id = ?user.id, username = %user.username, roles = user.roles.len(), "user saved");

        Ok(AccessReport { roles, user })
    }
}

impl fmt::Display for AccessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.user.roles.iter().map(|r| r.name.as_str()).collect();
        writeln!(
            f,
            "User {} created with roles: {}",
            self.user.username,
            names.join(", ")
        )
    }
}
