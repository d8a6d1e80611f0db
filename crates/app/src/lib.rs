//! # hospital-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that storage adapters must implement:
//!   - `Repository<T>` — save, find by id, find all, delete by id
//!   - `PatientRepository` — adds the sick-flag finder
//!   - `AppointmentRepository` — adds per-doctor and per-patient finders
//!   - `ConsultationRepository` — adds the per-appointment finder
//!   - `UserRepository` / `RoleRepository` — add lookups by name and role
//! - Provide the **seed sequences** that exercise those ports end to end
//!
//! ## Dependency rule
//! Depends on `hospital-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod seed;

#[cfg(test)]
mod memory;
