//! Consultation — the report written after an appointment.

use serde::{Deserialize, Serialize};

use crate::id::{AppointmentId, ConsultationId, impl_identified};
use crate::time::Timestamp;

/// A consultation. Each appointment has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Option<ConsultationId>,
    pub date: Timestamp,
    pub report: String,
    pub appointment_id: AppointmentId,
}

impl Consultation {
    /// Create an unsaved consultation for the given appointment.
    #[must_use]
    pub fn new(date: Timestamp, report: impl Into<String>, appointment_id: AppointmentId) -> Self {
        Self {
            id: None,
            date,
            report: report.into(),
            appointment_id,
        }
    }
}

impl_identified!(Consultation, ConsultationId);
