//! Model to entity mappers
//!
//! `TryFrom<Model> for Entity` converts database rows into domain objects.
//! Text status columns are parsed here; an unknown value means the row was
//! written outside this service and surfaces as a database error.

mod admin;
mod affiliate;
mod application;
mod payment;
mod program;
mod referral;

use std::str::FromStr;

use affiliate_core::error::DomainError;

pub use referral::referral_stats_from_rows;

/// Parse a status/role column
pub(crate) fn parse_column<T>(column: &'static str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| DomainError::DatabaseError(format!("bad {column} column: {e}")))
}
