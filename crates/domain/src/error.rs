//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HospitalError`] via `From`.

/// Top-level error crossing the port boundary.
#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    /// A record that must already be saved has no identity.
    #[error("{entity} has no identity, it must be saved first")]
    MissingIdentity { entity: &'static str },

    /// The storage collaborator failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Text that does not name a known [`AppointmentStatus`](crate::appointment::AppointmentStatus).
#[derive(Debug, thiserror::Error)]
#[error("unknown appointment status `{0}`")]
pub struct UnknownStatusError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_entity_in_missing_identity_message() {
        let err = HospitalError::MissingIdentity { entity: "Role" };
        assert_eq!(err.to_string(), "Role has no identity, it must be saved first");
    }

    #[test]
    fn should_expose_source_of_storage_error() {
        let inner = std::io::Error::other("disk full");
        let err = HospitalError::Storage(Box::new(inner));
        assert!(std::error::Error::source(&err).is_some());
    }
}
