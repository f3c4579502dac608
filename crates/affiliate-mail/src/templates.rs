//! Notification templates
//!
//! Plain-text bodies. Labeled lines (`Affiliate code: …`) are kept on their own
//! line so they stay readable in any client.

use crate::message::OutgoingMail;

/// Everything the approval message tells a new affiliate
#[derive(Debug, Clone)]
pub struct ApprovalNotice<'a> {
    pub full_name: &'a str,
    pub affiliate_code: &'a str,
    pub password: &'a str,
    pub commission_rate: f64,
    pub login_url: String,
}

/// Dashboard login page under the frontend base URL
pub fn login_url(frontend_url: &str) -> String {
    format!("{}/affiliate/login", frontend_url.trim_end_matches('/'))
}

/// Acknowledgement sent after a public submission
pub fn application_received(to: &str, full_name: &str, app_name: &str) -> OutgoingMail {
    let body = format!(
        "Hello {full_name},

Thank you for applying to the {app_name} affiliate program.

Our team will review your application and get back to you by email.
You can check the status of your application at any time with this email address.

Best regards,
The {app_name} team
"
    );
    OutgoingMail::new(to, "We received your affiliate application", body)
}

/// Approval with the issued login credentials
pub fn application_approved(to: &str, notice: &ApprovalNotice<'_>, app_name: &str) -> OutgoingMail {
    let body = format!(
        "Hello {name},

Congratulations! Your application to the {app_name} affiliate program has been approved.

Your account details:

  Affiliate code: {code}
  Commission rate: {rate}%
  Login email: {to}
  Password: {password}

Sign in to your dashboard at {login_url}
Please keep this password private.

Best regards,
The {app_name} team
",
        name = notice.full_name,
        code = notice.affiliate_code,
        rate = notice.commission_rate,
        password = notice.password,
        login_url = notice.login_url,
    );
    OutgoingMail::new(to, "Your affiliate application has been approved", body)
}

/// Rejection, with the reviewer's notes when given
pub fn application_rejected(
    to: &str,
    full_name: &str,
    notes: Option<&str>,
    app_name: &str,
) -> OutgoingMail {
    let notes = notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| format!("\nNotes from our team:\n{n}\n"))
        .unwrap_or_default();
    let body = format!(
        "Hello {full_name},

Thank you for your interest in the {app_name} affiliate program.
After careful review we are unable to approve your application at this time.
{notes}
Best regards,
The {app_name} team
"
    );
    OutgoingMail::new(to, "Update on your affiliate application", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        assert_eq!(
            login_url("http://localhost:3000/"),
            "http://localhost:3000/affiliate/login"
        );
    }

    #[test]
    fn test_approval_carries_credentials() {
        let notice = ApprovalNotice {
            full_name: "Ada",
            affiliate_code: "AB12CD34",
            password: "Xy7pQr9sTu2w",
            commission_rate: 12.5,
            login_url: login_url("https://example.com"),
        };
        let mail = application_approved("ada@example.com", &notice, "Academy");
        assert_eq!(mail.to, "ada@example.com");
        assert_eq!(mail.field("Affiliate code"), Some("AB12CD34"));
        assert_eq!(mail.field("Password"), Some("Xy7pQr9sTu2w"));
        assert_eq!(mail.field("Commission rate"), Some("12.5%"));
        assert!(mail.body.contains("https://example.com/affiliate/login"));
    }

    #[test]
    fn test_rejection_notes_are_optional() {
        let without = application_rejected("a@example.com", "Ada", Some("  "), "Academy");
        assert!(!without.body.contains("Notes from our team"));

        let with = application_rejected("a@example.com", "Ada", Some("Audience too small"), "Academy");
        assert!(with.body.contains("Audience too small"));
    }
}
