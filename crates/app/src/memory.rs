//! In-memory repositories backing the application-layer tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use hospital_domain::appointment::Appointment;
use hospital_domain::consultation::Consultation;
use hospital_domain::error::HospitalError;
use hospital_domain::id::{AppointmentId, DoctorId, Identified, Identity, PatientId, RoleId};
use hospital_domain::patient::Patient;
use hospital_domain::role::Role;
use hospital_domain::user::User;

use crate::ports::{
    AppointmentRepository, ConsultationRepository, PatientRepository, Repository, RoleRepository,
    UserRepository,
};

pub(crate) struct InMemoryRepository<T> {
    rows: Mutex<BTreeMap<i64, T>>,
    next_id: Mutex<i64>,
    fail_saves: bool,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
            fail_saves: false,
        }
    }
}

impl<T: Clone> InMemoryRepository<T> {
    /// A repository whose `save` always fails.
    pub(crate) fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub(crate) fn rows(&self) -> Vec<T> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Identified + Clone + Send + Sync,
{
    fn save(&self, mut entity: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        let result = if self.fail_saves {
            Err(HospitalError::Storage(Box::new(std::io::Error::other(
                "storage unavailable",
            ))))
        } else {
            let id = entity.id().unwrap_or_else(|| {
                let mut next = self.next_id.lock().unwrap();
                let id = T::Id::from_raw(*next);
                *next += 1;
                id
            });
            entity.set_id(id);
            self.rows
                .lock()
                .unwrap()
                .insert(id.as_raw(), entity.clone());
            Ok(entity)
        };
        async move { result }
    }

    fn find_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, HospitalError>> + Send {
        let result = self.rows.lock().unwrap().get(&id.as_raw()).cloned();
        async move { Ok(result) }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send {
        let result = self.rows();
        async move { Ok(result) }
    }

    fn delete_by_id(&self, id: T::Id) -> impl Future<Output = Result<(), HospitalError>> + Send {
        self.rows.lock().unwrap().remove(&id.as_raw());
        async { Ok(()) }
    }
}

impl PatientRepository for InMemoryRepository<Patient> {
    fn find_by_sick(
        &self,
        sick: bool,
    ) -> impl Future<Output = Result<Vec<Patient>, HospitalError>> + Send {
        let result = self.filtered(|patient| patient.sick == sick);
        async move { Ok(result) }
    }
}

impl AppointmentRepository for InMemoryRepository<Appointment> {
    fn find_by_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> impl Future<Output = Result<Vec<Appointment>, HospitalError>> + Send {
        let result = self.filtered(|appointment| appointment.doctor_id == doctor_id);
        async move { Ok(result) }
    }

    fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> impl Future<Output = Result<Vec<Appointment>, HospitalError>> + Send {
        let result = self.filtered(|appointment| appointment.patient_id == patient_id);
        async move { Ok(result) }
    }
}

impl ConsultationRepository for InMemoryRepository<Consultation> {
    fn find_by_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Consultation>, HospitalError>> + Send {
        let result = self
            .filtered(|consultation| consultation.appointment_id == appointment_id)
            .into_iter()
            .next();
        async move { Ok(result) }
    }
}

impl UserRepository for InMemoryRepository<User> {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, HospitalError>> + Send {
        let result = self
            .filtered(|user| user.username == username)
            .into_iter()
            .next();
        async move { Ok(result) }
    }

    fn find_by_role(
        &self,
        role_id: RoleId,
    ) -> impl Future<Output = Result<Vec<User>, HospitalError>> + Send {
        let result = self.filtered(|user| user.roles.iter().any(|role| role.id == Some(role_id)));
        async move { Ok(result) }
    }
}

impl RoleRepository for InMemoryRepository<Role> {
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Role>, HospitalError>> + Send {
        let result = self.filtered(|role| role.name == name).into_iter().next();
        async move { Ok(result) }
    }
}
