//! Typed identifier newtypes backed by storage-generated integer keys.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An identity assigned by the storage layer.
pub trait Identity: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync {
    /// Wrap a raw storage key.
    fn from_raw(raw: i64) -> Self;

    /// Access the raw storage key.
    fn as_raw(self) -> i64;
}

/// A record that carries an identity once it has been saved.
pub trait Identified {
    type Id: Identity;

    /// The identity, or `None` before the first successful save.
    fn id(&self) -> Option<Self::Id>;

    /// Record the identity the storage layer assigned.
    fn set_id(&mut self, id: Self::Id);
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl Identity for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn as_raw(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

/// Implement [`Identified`] for a struct with an `id: Option<$id>` field.
macro_rules! impl_identified {
    ($entity:ty, $id:ty) => {
        impl $crate::id::Identified for $entity {
            type Id = $id;

            fn id(&self) -> Option<$id> {
                self.id
            }

            fn set_id(&mut self, id: $id) {
                self.id = Some(id);
            }
        }
    };
}

pub(crate) use impl_identified;

define_id!(
    /// Unique identifier for a [`Patient`](crate::patient::Patient).
    PatientId
);

define_id!(
    /// Unique identifier for a [`Doctor`](crate::doctor::Doctor).
    DoctorId
);

define_id!(
    /// Unique identifier for an [`Appointment`](crate::appointment::Appointment).
    AppointmentId
);

define_id!(
    /// Unique identifier for a [`Consultation`](crate::consultation::Consultation).
    ConsultationId
);

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);

define_id!(
    /// Unique identifier for a [`Role`](crate::role::Role).
    RoleId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = PatientId::from_raw(42);
        let text = id.to_string();
        assert_eq!(text, "42");
        let parsed: PatientId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_bare_integer() {
        let id = DoctorId::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let parsed: DoctorId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        let result = RoleId::from_str("not-a-number");
        assert!(result.is_err());
    }

    #[test]
    fn should_expose_raw_key_when_using_as_raw() {
        let id = AppointmentId::from_raw(3);
        assert_eq!(id.as_raw(), 3);
    }
}
