//! # hospital-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `hospital-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Every `save` is a single upsert: a row without identity gets one from
//! `AUTOINCREMENT`, a row with identity replaces the stored one.
//!
//! ## Dependency rule
//! Depends on `hospital-app` (for port traits) and `hospital-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod appointment_repo;
mod columns;
mod consultation_repo;
mod doctor_repo;
pub mod error;
mod patient_repo;
pub mod pool;
mod role_repo;
mod user_repo;

pub use appointment_repo::SqliteAppointmentRepository;
pub use consultation_repo::SqliteConsultationRepository;
pub use doctor_repo::SqliteDoctorRepository;
pub use error::StorageError;
pub use patient_repo::SqlitePatientRepository;
pub use pool::{Config, Database};
pub use role_repo::SqliteRoleRepository;
pub use user_repo::SqliteUserRepository;
