//! `SQLite` implementation of [`PatientRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hospital_app::ports::{PatientRepository, Repository};
use hospital_domain::error::HospitalError;
use hospital_domain::id::{Identified, Identity, PatientId};
use hospital_domain::patient::Patient;

use crate::error::StorageError;
use crate::columns;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Patient);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Patient> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let registered_at: String = row.try_get("registered_at")?;
        let sick: bool = row.try_get("sick")?;
        let score: i32 = row.try_get("score")?;

        Ok(Self(Patient {
            id: Some(columns::id(id)),
            name,
            registered_at: columns::timestamp(&registered_at)?,
            sick,
            score,
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO patients (id, name, registered_at, sick, score)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET name = excluded.name, registered_at = excluded.registered_at,
        sick = excluded.sick, score = excluded.score
    RETURNING id
";

const SELECT_BY_ID: &str = "SELECT * FROM patients WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM patients ORDER BY id";
const SELECT_BY_SICK: &str = "SELECT * FROM patients WHERE sick = ? ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM patients WHERE id = ?";

/// `SQLite`-backed patient repository.
pub struct SqlitePatientRepository {
    pool: SqlitePool,
}

impl SqlitePatientRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Patient> for SqlitePatientRepository {
    async fn save(&self, mut patient: Patient) -> Result<Patient, HospitalError> {
        let id: i64 = sqlx::query_scalar(UPSERT)
            .bind(columns::raw(patient.id))
            .bind(&patient.name)
            .bind(patient.registered_at.to_rfc3339())
            .bind(patient.sick)
            .bind(patient.score)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        patient.set_id(columns::id(id));
        Ok(patient)
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self) -> Result<Vec<Patient>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete_by_id(&self, id: PatientId) -> Result<(), HospitalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl PatientRepository for SqlitePatientRepository {
    async fn find_by_sick(&self, sick: bool) -> Result<Vec<Patient>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SICK)
            .bind(sick)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use hospital_domain::time::now;

    async fn setup() -> SqlitePatientRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqlitePatientRepository::new(db.pool().clone())
    }

    fn names(patients: &[Patient]) -> Vec<&str> {
        let mut names: Vec<&str> = patients.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn should_assign_unique_identity_when_saving_new_patient() {
        let repo = setup().await;
        let a = repo.save(Patient::new("A", now(), true, 10)).await.unwrap();
        let b = repo.save(Patient::new("B", now(), false, 20)).await.unwrap();

        assert!(a.id.is_some());
        assert!(b.id.is_some());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn should_return_equal_patient_when_found_by_id() {
        let repo = setup().await;
        let saved = repo.save(Patient::new("A", now(), true, 10)).await.unwrap();

        let fetched = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn should_return_none_when_patient_not_found() {
        let repo = setup().await;
        let result = repo.find_by_id(PatientId::from_raw(404)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_saved_patients() {
        let repo = setup().await;
        repo.save(Patient::new("A", now(), true, 10)).await.unwrap();
        repo.save(Patient::new("B", now(), false, 20)).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(names(&all), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn should_update_in_place_when_saving_existing_patient() {
        let repo = setup().await;
        let mut patient = repo.save(Patient::new("A", now(), true, 10)).await.unwrap();
        let id = patient.id;

        patient.score = 99;
        let updated = repo.save(patient).await.unwrap();
        assert_eq!(updated.id, id);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score, 99);
    }

    #[tokio::test]
    async fn should_return_none_after_delete() {
        let repo = setup().await;
        let saved = repo.save(Patient::new("A", now(), true, 10)).await.unwrap();
        let id = saved.id.unwrap();

        repo.delete_by_id(id).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_ignore_delete_of_missing_patient() {
        let repo = setup().await;
        repo.delete_by_id(PatientId::from_raw(404)).await.unwrap();
    }

    #[tokio::test]
    async fn should_partition_patients_by_sick_flag() {
        let repo = setup().await;
        repo.save(Patient::new("A", now(), true, 10)).await.unwrap();
        repo.save(Patient::new("B", now(), false, 20)).await.unwrap();
        repo.save(Patient::new("C", now(), true, 5)).await.unwrap();

        let sick = repo.find_by_sick(true).await.unwrap();
        let healthy = repo.find_by_sick(false).await.unwrap();

        assert!(sick.iter().all(|p| p.sick));
        assert!(healthy.iter().all(|p| !p.sick));
        assert_eq!(sick.len() + healthy.len(), repo.find_all().await.unwrap().len());
    }

    #[tokio::test]
    async fn should_keep_sick_patients_after_deleting_healthy_one() {
        let repo = setup().await;
        repo.save(Patient::new("A", now(), true, 10)).await.unwrap();
        let b = repo.save(Patient::new("B", now(), false, 20)).await.unwrap();
        repo.save(Patient::new("C", now(), true, 5)).await.unwrap();

        let sick = repo.find_by_sick(true).await.unwrap();
        assert_eq!(names(&sick), vec!["A", "C"]);

        repo.delete_by_id(b.id.unwrap()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(names(&all), vec!["A", "C"]);
    }
}
