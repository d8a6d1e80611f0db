//! Column decoding helpers shared by the row wrappers.

use hospital_domain::id::Identity;
use hospital_domain::time::Timestamp;

/// Parse an RFC 3339 text column into a UTC timestamp.
pub(crate) fn timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Wrap an integer key column into a typed identity.
pub(crate) fn id<I: Identity>(raw: i64) -> I {
    I::from_raw(raw)
}

/// Raw key to bind for an optional identity; `NULL` lets `AUTOINCREMENT` pick one.
pub(crate) fn raw<I: Identity>(id: Option<I>) -> Option<i64> {
    id.map(Identity::as_raw)
}
