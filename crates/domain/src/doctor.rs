//! Doctor — a practitioner who receives appointments.

use serde::{Deserialize, Serialize};

use crate::id::{DoctorId, impl_identified};

/// A doctor. Their appointments are looked up through the appointment
/// repository rather than held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Option<DoctorId>,
    pub name: String,
    pub email: Option<String>,
    pub specialty: String,
}

impl Doctor {
    /// Create an unsaved doctor without an email address.
    #[must_use]
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: None,
            specialty: specialty.into(),
        }
    }

    /// Attach an email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl_identified!(Doctor, DoctorId);
