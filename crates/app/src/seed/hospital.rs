//! Hospital seed — patients, then a doctor, an appointment and a consultation.

use std::fmt;

use hospital_domain::appointment::{Appointment, AppointmentStatus};
use hospital_domain::consultation::Consultation;
use hospital_domain::doctor::Doctor;
use hospital_domain::error::HospitalError;
use hospital_domain::id::PatientId;
use hospital_domain::patient::Patient;
use hospital_domain::time::now;

use super::saved_id;
use crate::ports::{AppointmentRepository, ConsultationRepository, PatientRepository, Repository};

/// Score written to the fetched patient during the update step.
pub const UPDATED_SCORE: i32 = 99;

/// The doctor, appointment and consultation created for the fetched patient.
#[derive(Debug, Clone)]
pub struct FollowUp {
    pub doctor: Doctor,
    pub appointment: Appointment,
    pub consultation: Consultation,
}

/// Everything the hospital seed observed, step by step.
#[derive(Debug, Clone)]
pub struct HospitalReport {
    /// All patients right after the inserts.
    pub listed: Vec<Patient>,
    /// The first listed patient, fetched again by identity.
    pub found: Option<Patient>,
    /// Patients whose sick flag is set.
    pub sick: Vec<Patient>,
    /// The fetched patient after its score update.
    pub updated: Option<Patient>,
    /// Identity of the deleted patient.
    pub deleted: PatientId,
    /// All patients after the delete.
    pub remaining: Vec<Patient>,
    pub follow_up: Option<FollowUp>,
}

/// Runs the hospital seed sequence.
pub struct HospitalSeeder<P, D, A, C> {
    patients: P,
    doctors: D,
    appointments: A,
    consultations: C,
}

impl<P, D, A, C> HospitalSeeder<P, D, A, C>
where
    P: PatientRepository,
    D: Repository<Doctor>,
    A: AppointmentRepository,
    C: ConsultationRepository,
{
    /// Create a seeder backed by the given repositories.
    pub fn new(patients: P, doctors: D, appointments: A, consultations: C) -> Self {
        Self {
            patients,
            doctors,
            appointments,
            consultations,
        }
    }

    /// Run the sequence once.
    ///
    /// # Errors
    ///
    /// Returns the first storage error raised by a repository; the remaining
    /// steps are skipped.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<HospitalReport, HospitalError> {
        let mut inserted = Vec::with_capacity(3);
        for (name, sick, score) in [("messi", true, 10), ("hafid", false, 20), ("Karim", true, 5)] {
            let patient = self
                .patients
                .save(Patient::new(name, now(), sick, score))
                .await?;
            tracing::info!(id = ?patient.id, name, "patient inserted");
            inserted.push(saved_id(&patient, "Patient")?);
        }

        let listed = self.patients.find_all().await?;
        tracing::info!(count = listed.len(), "patients listed");

        let found = match listed.first().and_then(|patient| patient.id) {
            Some(id) => self.patients.find_by_id(id).await?,
            None => None,
        };
        if let Some(patient) = &found {
            tracing::info!(name = %patient.name, "patient found");
        }

        let sick = self.patients.find_by_sick(true).await?;
        tracing::info!(count = sick.len(), "sick patients listed");

        let updated = match found.clone() {
            Some(mut patient) => {
                patient.score = UPDATED_SCORE;
                let patient = self.patients.save(patient).await?;
                tracing::info!(name = %patient.name, score = patient.score, "patient updated");
                Some(patient)
            }
            None => None,
        };

        let deleted = inserted[1];
        self.patients.delete_by_id(deleted).await?;
        tracing::info!(id = %deleted, "patient deleted");

        let remaining = self.patients.find_all().await?;

        let follow_up = match &updated {
            Some(patient) => Some(self.follow_up(patient).await?),
            None => {
                tracing::warn!("no patient fetched, skipping appointment");
                None
            }
        };

        Ok(HospitalReport {
            listed,
            found,
            sick,
            updated,
            deleted,
            remaining,
            follow_up,
        })
    }

    async fn follow_up(&self, patient: &Patient) -> Result<FollowUp, HospitalError> {
        let patient_id = saved_id(patient, "Patient")?;

        let doctor = self
            .doctors
            .save(Doctor::new("Dr. Salma", "Cardiologie"))
            .await?;
        let doctor_id = saved_id(&doctor, "Doctor")?;
        tracing::info!(id = %doctor_id, name = %doctor.name, "doctor saved");

        let appointment = self
            .appointments
            .save(Appointment::new(
                now(),
                AppointmentStatus::Pending,
                patient_id,
                doctor_id,
            ))
            .await?;
        let appointment_id = saved_id(&appointment, "Appointment")?;
        tracing::info!(id = %appointment_id, status = %appointment.status, "appointment saved");

        let consultation = self
            .consultations
            .save(Consultation::new(
                now(),
                "Consultation initiale : état stable.",
                appointment_id,
            ))
            .await?;
        tracing::info!(id = ?consultation.id, "consultation saved");

        Ok(FollowUp {
            doctor,
            appointment,
            consultation,
        })
    }
}

fn write_id<T: fmt::Display>(f: &mut fmt::Formatter<'_>, id: Option<T>) -> fmt::Result {
    match id {
        Some(id) => write!(f, "{id}"),
        None => f.write_str("-"),
    }
}

impl fmt::Display for HospitalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All patients:")?;
        for patient in &self.listed {
            write_id(f, patient.id)?;
            writeln!(
                f,
                " | {} | {} | sick: {}",
                patient.name, patient.score, patient.sick
            )?;
        }

        if let Some(patient) = &self.found {
            writeln!(f, "\nPatient found: {}", patient.name)?;
        }

        writeln!(f, "\nSick patients:")?;
        for patient in &self.sick {
            writeln!(f, "{}", patient.name)?;
        }

        if let Some(patient) = &self.updated {
            writeln!(
                f,
                "\nPatient updated: {}, new score: {}",
                patient.name, patient.score
            )?;
        }

        writeln!(f, "\nPatient deleted with id: {}", self.deleted)?;

        if let Some(follow_up) = &self.follow_up {
            write!(f, "\nAppointment ")?;
            write_id(f, follow_up.appointment.id)?;
            writeln!(
                f,
                " with {} ({}) is {}",
                follow_up.doctor.name, follow_up.doctor.specialty, follow_up.appointment.status
            )?;
            writeln!(f, "Consultation report: {}", follow_up.consultation.report)?;
        }
        Ok(())
    }
}
