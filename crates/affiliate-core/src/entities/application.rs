//! Affiliate application entity - a public request to join the program

use chrono::{DateTime, Utc};

use crate::value_objects::ApplicationStatus;

/// Affiliate application as stored
#[derive(Debug, Clone, PartialEq)]
pub struct AffiliateApplication {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub social_media_handles: Option<String>,
    pub audience_size: Option<String>,
    pub audience_description: Option<String>,
    pub motivation: Option<String>,
    pub status: ApplicationStatus,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AffiliateApplication {
    /// Check if the application still awaits a decision
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}

/// Fields captured by the public application form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub social_media_handles: Option<String>,
    pub audience_size: Option<String>,
    pub audience_description: Option<String>,
    pub motivation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewApplication {
    /// Create a submission with the required fields; email is normalized to lower case
    pub fn new(full_name: impl Into<String>, email: &str) -> Self {
        Self {
            full_name: full_name.into().trim().to_string(),
            email: normalize_email(email),
            phone: None,
            social_media_handles: None,
            audience_size: None,
            audience_description: None,
            motivation: None,
            created_at: Utc::now(),
        }
    }
}

/// Lower-case and trim an email address for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_normalizes_email() {
        let app = NewApplication::new("  Ada Lovelace ", "  Ada@Example.COM ");
        assert_eq!(app.full_name, "Ada Lovelace");
        assert_eq!(app.email, "ada@example.com");
        assert!(app.phone.is_none());
    }
}
