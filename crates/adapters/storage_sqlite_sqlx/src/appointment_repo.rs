//! `SQLite` implementation of [`AppointmentRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hospital_app::ports::{AppointmentRepository, Repository};
use hospital_domain::appointment::{Appointment, AppointmentStatus};
use hospital_domain::error::HospitalError;
use hospital_domain::id::{AppointmentId, DoctorId, Identified, Identity, PatientId};

use crate::columns;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Appointment`].
struct Wrapper(Appointment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Appointment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let date: String = row.try_get("date")?;
        let status: String = row.try_get("status")?;
        let patient_id: i64 = row.try_get("patient_id")?;
        let doctor_id: i64 = row.try_get("doctor_id")?;

        let status: AppointmentStatus = status
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Appointment {
            id: Some(columns::id(id)),
            date: columns::timestamp(&date)?,
            status,
            patient_id: columns::id(patient_id),
            doctor_id: columns::id(doctor_id),
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO appointments (id, date, status, patient_id, doctor_id)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET date = excluded.date, status = excluded.status,
        patient_id = excluded.patient_id, doctor_id = excluded.doctor_id
    RETURNING id
";

const SELECT_BY_ID: &str = "SELECT * FROM appointments WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM appointments ORDER BY id";
const SELECT_BY_DOCTOR: &str = "SELECT * FROM appointments WHERE doctor_id = ? ORDER BY date";
const SELECT_BY_PATIENT: &str = "SELECT * FROM appointments WHERE patient_id = ? ORDER BY date";
const DELETE_BY_ID: &str = "DELETE FROM appointments WHERE id = ?";

/// `SQLite`-backed appointment repository.
pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, query: &str, key: i64) -> Result<Vec<Appointment>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(query)
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

impl Repository<Appointment> for SqliteAppointmentRepository {
    async fn save(&self, mut appointment: Appointment) -> Result<Appointment, HospitalError> {
        let id: i64 = sqlx::query_scalar(UPSERT)
            .bind(columns::raw(appointment.id))
            .bind(appointment.date.to_rfc3339())
            .bind(appointment.status.to_string())
            .bind(appointment.patient_id.as_raw())
            .bind(appointment.doctor_id.as_raw())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        appointment.set_id(columns::id(id));
        Ok(appointment)
    }

    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, HospitalError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self) -> Result<Vec<Appointment>, HospitalError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete_by_id(&self, id: AppointmentId) -> Result<(), HospitalError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_raw())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    async fn find_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Appointment>, HospitalError> {
        self.fetch_many(SELECT_BY_DOCTOR, doctor_id.as_raw()).await
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Appointment>, HospitalError> {
        self.fetch_many(SELECT_BY_PATIENT, patient_id.as_raw()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor_repo::SqliteDoctorRepository;
    use crate::patient_repo::SqlitePatientRepository;
    use crate::pool::Config;
    use hospital_domain::doctor::Doctor;
    use hospital_domain::patient::Patient;
    use hospital_domain::time::now;

    struct Fixture {
        repo: SqliteAppointmentRepository,
        patients: SqlitePatientRepository,
        patient_id: PatientId,
        doctor_id: DoctorId,
    }

    async fn setup() -> Fixture {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();

        let patients = SqlitePatientRepository::new(pool.clone());
        let patient = patients
            .save(Patient::new("A", now(), true, 10))
            .await
            .unwrap();
        let doctor = SqliteDoctorRepository::new(pool.clone())
            .save(Doctor::new("Dr. Salma", "Cardiologie"))
            .await
            .unwrap();

        Fixture {
            repo: SqliteAppointmentRepository::new(pool),
            patients,
            patient_id: patient.id.unwrap(),
            doctor_id: doctor.id.unwrap(),
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_appointment() {
        let fx = setup().await;
        let saved = fx
            .repo
            .save(Appointment::new(
                now(),
                AppointmentStatus::Pending,
                fx.patient_id,
                fx.doctor_id,
            ))
            .await
            .unwrap();

        let fetched = fx.repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn should_update_status_when_saved_again() {
        let fx = setup().await;
        let mut appointment = fx
            .repo
            .save(Appointment::new(
                now(),
                AppointmentStatus::Pending,
                fx.patient_id,
                fx.doctor_id,
            ))
            .await
            .unwrap();

        appointment.status = AppointmentStatus::Done;
        fx.repo.save(appointment).await.unwrap();

        let all = fx.repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, AppointmentStatus::Done);
    }

    #[tokio::test]
    async fn should_list_appointments_of_doctor_and_patient() {
        let fx = setup().await;
        for status in [AppointmentStatus::Pending, AppointmentStatus::Canceled] {
            fx.repo
                .save(Appointment::new(now(), status, fx.patient_id, fx.doctor_id))
                .await
                .unwrap();
        }

        assert_eq!(fx.repo.find_by_doctor(fx.doctor_id).await.unwrap().len(), 2);
        assert_eq!(fx.repo.find_by_patient(fx.patient_id).await.unwrap().len(), 2);
        assert!(
            fx.repo
                .find_by_doctor(DoctorId::from_raw(404))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn should_reject_appointment_for_unknown_patient() {
        let fx = setup().await;
        let result = fx
            .repo
            .save(Appointment::new(
                now(),
                AppointmentStatus::Pending,
                PatientId::from_raw(404),
                fx.doctor_id,
            ))
            .await;

        assert!(matches!(result, Err(HospitalError::Storage(_))));
    }

    #[tokio::test]
    async fn should_fail_to_delete_patient_with_appointments() {
        let fx = setup().await;
        fx.repo
            .save(Appointment::new(
                now(),
                AppointmentStatus::Pending,
                fx.patient_id,
                fx.doctor_id,
            ))
            .await
            .unwrap();

        let result = fx.patients.delete_by_id(fx.patient_id).await;
        assert!(matches!(result, Err(HospitalError::Storage(_))));
        assert!(fx.patients.find_by_id(fx.patient_id).await.unwrap().is_some());
    }
}
