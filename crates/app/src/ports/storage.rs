//! Storage port — repository traits for persistence.

use std::future::Future;

use hospital_domain::appointment::Appointment;
use hospital_domain::consultation::Consultation;
use hospital_domain::error::HospitalError;
use hospital_domain::id::{AppointmentId, DoctorId, Identified, PatientId, RoleId};
use hospital_domain::patient::Patient;
use hospital_domain::role::Role;
use hospital_domain::user::User;

/// Generic create/read/update/delete contract for one entity type.
pub trait Repository<T: Identified> {
    /// Insert `entity` when its identity is unset, otherwise replace the row
    /// with the same identity. Returns the entity with its identity populated.
    fn save(&self, entity: T) -> impl Future<Output = Result<T, HospitalError>> + Send;

    /// Get an entity by its identity.
    fn find_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, HospitalError>> + Send;

    /// Get every stored entity.
    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send;

    /// Delete an entity by its identity. Deleting a missing row is a no-op.
    fn delete_by_id(&self, id: T::Id) -> impl Future<Output = Result<(), HospitalError>> + Send;
}

/// Repository for [`Patient`]s.
pub trait PatientRepository: Repository<Patient> {
    /// Get all patients whose sick flag equals `sick`.
    fn find_by_sick(
        &self,
        sick: bool,
    ) -> impl Future<Output = Result<Vec<Patient>, HospitalError>> + Send;
}

/// Repository for [`Appointment`]s.
pub trait AppointmentRepository: Repository<Appointment> {
    /// Get all appointments booked with a doctor.
    fn find_by_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> impl Future<Output = Result<Vec<Appointment>, HospitalError>> + Send;

    /// Get all appointments booked for a patient.
    fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> impl Future<Output = Result<Vec<Appointment>, HospitalError>> + Send;
}

/// Repository for [`Consultation`]s.
pub trait ConsultationRepository: Repository<Consultation> {
    /// Get the consultation written for an appointment, if any.
    fn find_by_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Consultation>, HospitalError>> + Send;
}

/// Repository for [`User`]s. Roles are loaded with the user.
pub trait UserRepository: Repository<User> {
    /// Get a user by username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, HospitalError>> + Send;

    /// Get all users holding a role.
    fn find_by_role(
        &self,
        role_id: RoleId,
    ) -> impl Future<Output = Result<Vec<User>, HospitalError>> + Send;
}

/// Repository for [`Role`]s.
pub trait RoleRepository: Repository<Role> {
    /// Get a role by name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Role>, HospitalError>> + Send;
}
