//! `SQLite` implementation of [`RoleRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hospital_app::ports::{Repository, RoleRepository};
use hospital_domain::error::HospitalError;
use hospital_domain::id::{Identified, Identity, RoleId, UserId};
use hospital_domain::role::Role;

use crate::columns;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Role`].
struct Wrapper(Role);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Role> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Role {
            id: Some(columns::id(id)),
            name,
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO roles (id, name) VALUES (?, ?)
    ON CONFLICT (id) DO UPDATE SET name = excluded.name
    RETURNING id
";

const SELECT_BY_ID: &str = "SELECT * FROM roles WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM roles ORDER BY id";
const SELECT_BY_NAME: &str = "SELECT * FROM roles WHERE name = ? ORDER BY id LIMIT 1";
const SELECT_BY_USER: &str = r"
    SELECT roles.* FROM roles
    JOIN users_roles ON users_roles.role_id = roles.id
    WHERE users_roles.user_id = ?
    ORDER BY roles.id
";
const DELETE_BY_ID: &str = "DELETE FROM roles WHERE id = ?";

/// Load the roles linked to a user.
pub(crate) async fn roles_of_user(
    pool: &SqlitePool,
    user_id: UserId,
) -> Result<Vec<Role>, StorageError> {
    let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
        .bind(user_id.as_raw())
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|w| w.0).collect())
}

/// `SQLite`-backed role repository.
pub struct SqliteRoleRepository {
    pool: SqlitePool,
}

impl SqliteRoleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Role> for SqliteRoleRepository {
    async fn save(&self, mut role: Role) -> Result<Role, HospitalError> {
        let id: i64 = sqlx::query_scalar(UPSERT)
            .bind(columns::raw(role.id))
            .bind(&role.name)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        role.set_id(columns::id(id));
        Ok(role)
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self) -> Result<Vec<Role>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete_by_id(&self, id: RoleId) -> Result<(), HospitalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl RoleRepository for SqliteRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }
}
