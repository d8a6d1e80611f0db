//! Appointment — a patient booked with a doctor at a given date.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownStatusError;
use crate::id::{AppointmentId, DoctorId, PatientId, impl_identified};
use crate::time::Timestamp;

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Canceled,
    Done,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Canceled => f.write_str("canceled"),
            Self::Done => f.write_str("done"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "canceled" => Ok(Self::Canceled),
            "done" => Ok(Self::Done),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

/// An appointment between one patient and one doctor.
///
/// At most one [`Consultation`](crate::consultation::Consultation) refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<AppointmentId>,
    pub date: Timestamp,
    pub status: AppointmentStatus,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
}

impl Appointment {
    /// Create an unsaved appointment.
    #[must_use]
    pub fn new(
        date: Timestamp,
        status: AppointmentStatus,
        patient_id: PatientId,
        doctor_id: DoctorId,
    ) -> Self {
        Self {
            id: None,
            date,
            status,
            patient_id,
            doctor_id,
        }
    }
}

impl_identified!(Appointment, AppointmentId);
