//! `SQLite` implementation of [`UserRepository`].
//!
//! Role links live in the `users_roles` join table. They are loaded with every
//! user and rewritten on every save.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hospital_app::ports::{Repository, UserRepository};
use hospital_domain::error::HospitalError;
use hospital_domain::id::{Identified, Identity, RoleId, UserId};
use hospital_domain::user::User;

use crate::columns;
use crate::error::StorageError;
use crate::role_repo::roles_of_user;

/// Wrapper for converting `users` rows into domain [`User`]s, roles not yet loaded.
struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let username: String = row.try_get("username")?;
        let password: String = row.try_get("password")?;

        Ok(Self(User {
            id: Some(columns::id(id)),
            username,
            password,
            roles: Vec::new(),
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO users (id, username, password) VALUES (?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET username = excluded.username, password = excluded.password
    RETURNING id
";

const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY id";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ? ORDER BY id LIMIT 1";
const SELECT_BY_ROLE: &str = r"
    SELECT users.* FROM users
    JOIN users_roles ON users_roles.user_id = users.id
    WHERE users_roles.role_id = ?
    ORDER BY users.id
";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";
const DELETE_LINKS: &str = "DELETE FROM users_roles WHERE user_id = ?";
const INSERT_LINK: &str = "INSERT OR IGNORE INTO users_roles (user_id, role_id) VALUES (?, ?)";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_roles(&self, mut user: User) -> Result<User, StorageError> {
        if let Some(id) = user.id {
            user.roles = roles_of_user(&self.pool, id).await?;
        }
        Ok(user)
    }

    async fn load_all_roles(&self, rows: Vec<Wrapper>) -> Result<Vec<User>, HospitalError> {
        let mut users = Vec::with_capacity(rows.len());
        for Wrapper(user) in rows {
            users.push(self.load_roles(user).await?);
        }
        Ok(users)
    }
}

impl Repository<User> for SqliteUserRepository {
    async fn save(&self, mut user: User) -> Result<User, HospitalError> {
        let role_ids = user
            .roles
            .iter()
            .map(|role| role.id.ok_or(HospitalError::MissingIdentity { entity: "Role" }))
            .collect::<Result<Vec<RoleId>, _>>()?;

        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let id: i64 = sqlx::query_scalar(UPSERT)
            .bind(columns::raw(user.id))
            .bind(&user.username)
            .bind(&user.password)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        sqlx::query(DELETE_LINKS)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        for role_id in role_ids {
            sqlx::query(INSERT_LINK)
                .bind(id)
                .bind(role_id.as_raw())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;

        user.set_id(columns::id(id));
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        match row {
            Some(Wrapper(user)) => Ok(Some(self.load_roles(user).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        self.load_all_roles(rows).await
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), HospitalError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(DELETE_LINKS)
            .bind(id.as_raw())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}

impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        match row {
            Some(Wrapper(user)) => Ok(Some(self.load_roles(user).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_role(&self, role_id: RoleId) -> Result<Vec<User>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ROLE)
            .bind(role_id.as_raw())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        self.load_all_roles(rows).await
    }
}
