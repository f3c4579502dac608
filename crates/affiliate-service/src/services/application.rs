//! Application service
//!
//! Public submission and status lookup of affiliate applications.

use affiliate_core::entities::{normalize_email, NewApplication};
use affiliate_core::error::DomainError;
use affiliate_mail::templates;
use serde_json::Value;
use tracing::{info, instrument};

use crate::dto::{
    ApplicationStatusResponse, ApplicationSubmittedResponse, SubmitApplicationRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

/// Free-form form value as stored text
fn value_to_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<'a> ApplicationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a new application
    ///
    /// An email already on file is rejected as a duplicate; the unique index
    /// catches submissions that race past the check.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn submit(
        &self,
        request: SubmitApplicationRequest,
    ) -> ServiceResult<ApplicationSubmittedResponse> {
        let mut application = NewApplication::new(request.full_name, &request.email);

        if self
            .ctx
            .application_repo()
            .email_exists(&application.email)
            .await?
        {
            return Err(DomainError::DuplicateApplication.into());
        }

        application.phone = trimmed(request.phone);
        application.social_media_handles = value_to_text(request.social_media_handles);
        application.audience_size = value_to_text(request.audience_size);
        application.audience_description = trimmed(request.audience_description);
        application.motivation = trimmed(request.motivation);

        let created = self.ctx.application_repo().create(&application).await?;
        info!(application_id = created.id, "Application submitted");

        let mail = templates::application_received(
            &created.email,
            &created.full_name,
            &self.ctx.settings().app_name,
        );
        super::deliver(self.ctx, mail).await;

        Ok(ApplicationSubmittedResponse {
            id: created.id,
            status: created.status,
            message: "Application submitted successfully".to_string(),
        })
    }

    /// Look up an application by the email it was submitted with
    #[instrument(skip(self))]
    pub async fn status_by_email(&self, email: &str) -> ServiceResult<ApplicationStatusResponse> {
        let email = normalize_email(email);
        let application = self
            .ctx
            .application_repo()
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::ApplicationNotFoundForEmail(email))?;

        Ok(application.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use crate::services::ServiceError;
    use affiliate_core::value_objects::ApplicationStatus;
    use serde_json::json;

    fn request(email: &str) -> SubmitApplicationRequest {
        serde_json::from_value(json!({
            "fullName": "Ada Lovelace",
            "email": email,
            "phone": " +2348000000000 ",
            "socialMediaHandles": {"instagram": "@ada"},
            "audienceSize": 12000,
            "motivation": "  "
        }))
        .unwrap()
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(Some(json!("  10k "))), Some("10k".to_string()));
        assert_eq!(value_to_text(Some(json!(5000))), Some("5000".to_string()));
        assert_eq!(value_to_text(Some(json!(null))), None);
        assert_eq!(value_to_text(None), None);
    }

    #[tokio::test]
    async fn test_submit_and_lookup() {
        let (ctx, mailer) = testing::context().await;
        let service = ApplicationService::new(&ctx);

        let submitted = service.submit(request("Ada@Example.com")).await.unwrap();
        assert_eq!(submitted.status, ApplicationStatus::Pending);

        let stored = ctx.application_repo().find_by_id(submitted.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "ada@example.com");
        assert_eq!(stored.phone.as_deref(), Some("+2348000000000"));
        assert_eq!(stored.social_media_handles.as_deref(), Some(r#"{"instagram":"@ada"}"#));
        assert_eq!(stored.audience_size.as_deref(), Some("12000"));
        assert!(stored.motivation.is_none());

        let status = service.status_by_email(" ADA@example.com ").await.unwrap();
        assert_eq!(status.id, submitted.id);

        assert_eq!(mailer.sent_to("ada@example.com").len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (ctx, _) = testing::context().await;
        let service = ApplicationService::new(&ctx);

        service.submit(request("dup@example.com")).await.unwrap();
        let err = service.submit(request("DUP@example.com")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "DUPLICATE_APPLICATION");
        assert_eq!(ctx.application_repo().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let (ctx, _) = testing::context().await;
        let err = ApplicationService::new(&ctx)
            .status_by_email("nobody@example.com")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::ApplicationNotFoundForEmail(_))
        ));
    }
}
