//! `SQLite` implementation of [`Repository<Doctor>`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hospital_app::ports::Repository;
use hospital_domain::doctor::Doctor;
use hospital_domain::error::HospitalError;
use hospital_domain::id::{DoctorId, Identified, Identity};

use crate::columns;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Doctor`].
struct Wrapper(Doctor);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Doctor> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: Option<String> = row.try_get("email")?;
        let specialty: String = row.try_get("specialty")?;

        Ok(Self(Doctor {
            id: Some(columns::id(id)),
            name,
            email,
            specialty,
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO doctors (id, name, email, specialty)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET name = excluded.name, email = excluded.email, specialty = excluded.specialty
    RETURNING id
";

const SELECT_BY_ID: &str = "SELECT * FROM doctors WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM doctors ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM doctors WHERE id = ?";

/// `SQLite`-backed doctor repository.
pub struct SqliteDoctorRepository {
    pool: SqlitePool,
}

impl SqliteDoctorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Doctor> for SqliteDoctorRepository {
    async fn save(&self, mut doctor: Doctor) -> Result<Doctor, HospitalError> {
        let id: i64 = sqlx::query_scalar(UPSERT)
            .bind(columns::raw(doctor.id))
            .bind(&doctor.name)
            .bind(doctor.email.as_deref())
            .bind(&doctor.specialty)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        doctor.set_id(columns::id(id));
        Ok(doctor)
    }

    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self) -> Result<Vec<Doctor>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete_by_id(&self, id: DoctorId) -> Result<(), HospitalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
