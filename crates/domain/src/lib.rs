//! # hospital-domain
//!
//! Pure domain model for the hospital demo.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Patients** and **Doctors**
//! - Define **Appointments** (a patient seeing a doctor) and their **Consultations**
//! - Define **Users** and the **Roles** they hold
//!
//! Entities are plain records. Their identity is unset until the storage layer
//! assigns one on the first save.
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod appointment;
pub mod consultation;
pub mod doctor;
pub mod patient;
pub mod role;
pub mod user;
