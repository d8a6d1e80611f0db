//! Seed sequences — fixed scripts that exercise the repositories end to end.
//!
//! Each seeder receives its repositories through its constructor and runs
//! once. Any storage failure aborts the rest of the sequence.

pub mod access;
pub mod hospital;

pub use access::{AccessReport, AccessSeeder};
pub use hospital::{FollowUp, HospitalReport, HospitalSeeder};

use hospital_domain::error::HospitalError;
use hospital_domain::id::Identified;

/// Identity of a record the repository just saved.
fn saved_id<T: Identified>(entity: &T, name: &'static str) -> Result<T::Id, HospitalError> {
    entity
        .id()
        .ok_or(HospitalError::MissingIdentity { entity: name })
}
