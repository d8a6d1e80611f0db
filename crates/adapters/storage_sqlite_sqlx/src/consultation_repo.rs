//! `SQLite` implementation of [`ConsultationRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hospital_app::ports::{ConsultationRepository, Repository};
use hospital_domain::consultation::Consultation;
use hospital_domain::error::HospitalError;
use hospital_domain::id::{AppointmentId, ConsultationId, Identified, Identity};

use crate::columns;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Consultation`].
struct Wrapper(Consultation);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Consultation> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let date: String = row.try_get("date")?;
        let report: String = row.try_get("report")?;
        let appointment_id: i64 = row.try_get("appointment_id")?;

        Ok(Self(Consultation {
            id: Some(columns::id(id)),
            date: columns::timestamp(&date)?,
            report,
            appointment_id: columns::id(appointment_id),
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO consultations (id, date, report, appointment_id)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET date = excluded.date, report = excluded.report, appointment_id = excluded.appointment_id
    RETURNING id
";

const SELECT_BY_ID: &str = "SELECT * FROM consultations WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM consultations ORDER BY id";
const SELECT_BY_APPOINTMENT: &str = "SELECT * FROM consultations WHERE appointment_id = ?";
const DELETE_BY_ID: &str = "DELETE FROM consultations WHERE id = ?";

/// `SQLite`-backed consultation repository.
pub struct SqliteConsultationRepository {
    pool: SqlitePool,
}

impl SqliteConsultationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Consultation> for SqliteConsultationRepository {
    async fn save(&self, mut consultation: Consultation) -> Result<Consultation, HospitalError> {
        let id: i64 = sqlx::query_scalar(UPSERT)
            .bind(columns::raw(consultation.id))
            .bind(consultation.date.to_rfc3339())
            .bind(&consultation.report)
            .bind(consultation.appointment_id.as_raw())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        consultation.set_id(columns::id(id));
        Ok(consultation)
    }

    async fn find_by_id(&self, id: ConsultationId) -> Result<Option<Consultation>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self) -> Result<Vec<Consultation>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete_by_id(&self, id: ConsultationId) -> Result<(), HospitalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl ConsultationRepository for SqliteConsultationRepository {
    async fn find_by_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<Option<Consultation>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_APPOINTMENT)
            .bind(appointment_id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }
}
