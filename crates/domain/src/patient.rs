//! Patient — a person registered at the hospital.

use serde::{Deserialize, Serialize};

use crate::id::{PatientId, impl_identified};
use crate::time::Timestamp;

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Option<PatientId>,
    pub name: String,
    pub registered_at: Timestamp,
    /// Whether the patient is currently sick.
    pub sick: bool,
    pub score: i32,
}

impl Patient {
    /// Create an unsaved patient.
    #[must_use]
    pub fn new(name: impl Into<String>, registered_at: Timestamp, sick: bool, score: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            registered_at,
            sick,
            score,
        }
    }
}

impl_identified!(Patient, PatientId);
