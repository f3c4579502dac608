//! Affiliate program entity - an offer shown on the public marketing page

use chrono::{DateTime, Utc};

use crate::value_objects::ProgramStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct AffiliateProgram {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub commission_rate: f64,
    pub status: ProgramStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProgram {
    pub name: String,
    pub description: Option<String>,
    pub commission_rate: f64,
    pub status: ProgramStatus,
    pub created_at: DateTime<Utc>,
}
