//! API Integration Tests
//!
//! Each test starts its own server on an ephemeral port with a private
//! in-memory SQLite database, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use affiliate_common::PrincipalKind;
use integration_tests::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");

    let response = server.get("/api/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], "ok");
}

// ============================================================================
// Applications
// ============================================================================

#[tokio::test]
async fn test_submit_and_lookup_application() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email("applicant");

    let id = server.submit_application(&email).await.unwrap();
    assert!(id > 0);

    // Lookup is case-insensitive on the email
    let response = server
        .get(&format!(
            "/api/affiliates/applications/status/{}",
            email.to_uppercase()
        ))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "pending");

    // Applicant is told the application arrived
    assert_eq!(server.mailer.sent_to(&email).len(), 1);

    let response = server
        .get("/api/affiliates/applications/status/nobody@example.com")
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_application_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let email = unique_email("dupe");

    server.submit_application(&email).await.unwrap();

    let response = server
        .post("/api/affiliates/applications", &application_form(&email))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "DUPLICATE_APPLICATION");

    let response = server
        .get_auth("/api/admin/applications", &admin)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_invalid_application_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/api/affiliates/applications",
            &json!({"fullName": "Ada", "email": "not-an-email"}),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());

    // Missing required field
    let response = server
        .post("/api/affiliates/applications", &json!({"email": "x@example.com"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Review workflow
// ============================================================================

#[tokio::test]
async fn test_approval_issues_working_credentials() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let email = unique_email("approved");
    let id = server.submit_application(&email).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/admin/applications/{id}/review"),
            &admin,
            &approve_body(Some(15.0)),
        )
        .await
        .unwrap();
    let review: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(review["application"]["status"], "approved");
    assert_eq!(review["emailSent"], true);
    assert!(review.get("issuedPassword").is_none());

    let affiliate = &review["affiliate"];
    assert_eq!(affiliate["email"], email.as_str());
    assert_eq!(affiliate["commissionRate"], 15.0);
    assert_eq!(affiliate["status"], "active");
    let code = affiliate["affiliateCode"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    // Mail carries the code and the password
    assert_eq!(
        server.mailer.last_field(&email, "Affiliate code").as_deref(),
        Some(code)
    );
    let password = server.mailer.issued_password(&email).unwrap();
    assert_eq!(password.len(), 12);

    let response = server
        .post("/api/affiliates/login", &LoginRequest::new(&email, &password))
        .await
        .unwrap();
    let login: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login["affiliate"]["affiliateCode"], code);

    let token = token_of(&login).unwrap();
    let response = server.get_auth("/api/affiliates/profile", &token).await.unwrap();
    let profile: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile["id"], affiliate["id"]);
    assert!(profile["referralLink"].as_str().unwrap().contains(code));

    let response = server
        .post("/api/affiliates/login", &LoginRequest::new(&email, "WrongPass123"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_re_review_is_a_conflict() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let id = server
        .submit_application(&unique_email("twice"))
        .await
        .unwrap();

    server.approve(&admin, id).await.unwrap();

    for body in [approve_body(None), reject_body("changed my mind")] {
        let response = server
            .post_auth(&format!("/api/admin/applications/{id}/review"), &admin, &body)
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
        assert_eq!(code, "APPLICATION_ALREADY_REVIEWED");
    }

    let response = server
        .get_auth("/api/admin/affiliates", &admin)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_rejection_creates_no_affiliate() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let email = unique_email("rejected");
    let id = server.submit_application(&email).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/admin/applications/{id}/review"),
            &admin,
            &reject_body("Audience too small"),
        )
        .await
        .unwrap();
    let review: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(review["application"]["status"], "rejected");
    assert!(review.get("affiliate").is_none());

    let response = server
        .get_auth("/api/admin/affiliates", &admin)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["pagination"]["total"], 0);

    // Received + rejected notices, and no credentials
    assert_eq!(server.mailer.sent_to(&email).len(), 2);
    assert!(server.mailer.issued_password(&email).is_none());

    let response = server
        .get_auth(&format!("/api/admin/applications/{id}"), &admin)
        .await
        .unwrap();
    let application: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(application["reviewNotes"], "Audience too small");
}

#[tokio::test]
async fn test_review_requires_a_decision() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let id = server
        .submit_application(&unique_email("undecided"))
        .await
        .unwrap();

    let response = server
        .post_auth(
            &format!("/api/admin/applications/{id}/review"),
            &admin,
            &json!({"status": "pending"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth(
            "/api/admin/applications/9999/review",
            &admin,
            &approve_body(None),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth("/api/admin/applications/abc/review", &admin, &approve_body(None))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Authentication boundaries
// ============================================================================

#[tokio::test]
async fn test_token_failures() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let affiliate = server.approved_affiliate(&admin).await.unwrap();

    // Missing
    let response = server.get("/api/affiliates/dashboard").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Malformed
    let response = server
        .get_auth("/api/affiliates/dashboard", "not.a.jwt")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");

    // Expired
    let expired = expired_token(PrincipalKind::Affiliate, affiliate.id, &affiliate.email).unwrap();
    let response = server
        .get_auth("/api/affiliates/dashboard", &expired)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "TOKEN_EXPIRED");

    // Wrong principal kind, both directions
    let response = server
        .get_auth("/api/affiliates/dashboard", &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth("/api/admin/applications", &affiliate.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Valid token still works
    let response = server
        .get_auth("/api/affiliates/dashboard", &affiliate.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_suspended_affiliate_is_locked_out() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let affiliate = server.approved_affiliate(&admin).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/admin/affiliates/{}/status", affiliate.id),
            &admin,
            &json!({"status": "suspended"}),
        )
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["status"], "suspended");

    let response = server
        .get_auth("/api/affiliates/profile", &affiliate.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "AFFILIATE_NOT_ACTIVE");

    let response = server
        .post(
            "/api/affiliates/login",
            &LoginRequest::new(&affiliate.email, &affiliate.password),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Codes of suspended affiliates stop tracking
    let response = server
        .post(
            "/api/affiliates/referrals/track",
            &track_body(&affiliate.code, 1, Some(10.0)),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Dashboard & referrals
// ============================================================================

#[tokio::test]
async fn test_dashboard_stats_match_referrals() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let affiliate = server.approved_affiliate(&admin).await.unwrap();
    let other = server.approved_affiliate(&admin).await.unwrap();

    let mut ids = Vec::new();
    for (user, amount) in [(101, 100.0), (102, 200.0), (103, 50.0), (104, 80.0)] {
        let response = server
            .post(
                "/api/affiliates/referrals/track",
                &track_body(&affiliate.code.to_lowercase(), user, Some(amount)),
            )
            .await
            .unwrap();
        let referral: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(referral["status"], "pending");
        ids.push(referral["id"].as_i64().unwrap());
    }
    // Default 10% rate
    server
        .post("/api/affiliates/referrals/track", &track_body(&other.code, 200, None))
        .await
        .unwrap();

    for (id, status) in [(ids[0], "confirmed"), (ids[1], "paid"), (ids[2], "completed")] {
        let response = server
            .put_auth(
                &format!("/api/admin/referrals/{id}/status"),
                &admin,
                &json!({"status": status}),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get_auth("/api/affiliates/dashboard", &affiliate.token)
        .await
        .unwrap();
    let dashboard: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let stats = &dashboard["stats"];
    assert_eq!(stats["totalReferrals"], 4);
    assert_eq!(stats["pendingReferrals"], 1);
    assert_eq!(stats["confirmedReferrals"], 2);
    assert_eq!(stats["paidReferrals"], 1);
    assert_eq!(stats["totalCommission"], 43.0);
    assert_eq!(stats["paidCommission"], 20.0);
    assert_eq!(dashboard["recentReferrals"].as_array().unwrap().len(), 4);
    assert!(dashboard["paymentInfo"].is_null());

    let response = server
        .get_auth("/api/affiliates/stats", &affiliate.token)
        .await
        .unwrap();
    let direct: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(&direct, stats);

    let response = server
        .get_auth("/api/affiliates/referrals?status=confirmed&limit=1", &affiliate.token)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["pagination"]["total"], 2);
    assert_eq!(page["pagination"]["totalPages"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_referral_status_cannot_move_backwards() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let affiliate = server.approved_affiliate(&admin).await.unwrap();

    let response = server
        .post(
            "/api/affiliates/referrals/track",
            &track_body(&affiliate.code, 7, Some(100.0)),
        )
        .await
        .unwrap();
    let referral: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/admin/referrals/{}/status", referral["id"]);

    let response = server
        .put_auth(&path, &admin, &json!({"status": "paid", "saleAmount": 300.0}))
        .await
        .unwrap();
    let paid: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["commissionAmount"], 30.0);

    for status in ["pending", "confirmed"] {
        let response = server
            .put_auth(&path, &admin, &json!({"status": status}))
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
        assert_eq!(code, "INVALID_STATUS_TRANSITION");
    }

    let response = server
        .post(
            "/api/affiliates/referrals/track",
            &track_body("ZZZZZZZZ", 8, None),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Payment settings
// ============================================================================

#[tokio::test]
async fn test_payment_settings_upsert_keeps_one_row() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let affiliate = server.approved_affiliate(&admin).await.unwrap();

    let response = server
        .get_auth("/api/affiliates/payment-settings", &affiliate.token)
        .await
        .unwrap();
    let empty: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(empty.is_null());

    let response = server
        .put_auth(
            "/api/affiliates/payment-settings",
            &affiliate.token,
            &payment_body("First Bank", "0123456789"),
        )
        .await
        .unwrap();
    let first: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_auth(
            "/api/affiliates/payment-info",
            &affiliate.token,
            &payment_body("Second Bank", "9876543210"),
        )
        .await
        .unwrap();
    let second: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["bankName"], "Second Bank");
    assert_eq!(second["maskedAccountNumber"], "******3210");

    let response = server
        .get_auth("/api/affiliates/payment-info", &affiliate.token)
        .await
        .unwrap();
    let current: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(current["id"], first["id"]);
    assert_eq!(current["accountNumber"], "9876543210");

    let response = server
        .put_auth(
            "/api/affiliates/payment-settings",
            &affiliate.token,
            &payment_body("   ", "123"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Admin back office
// ============================================================================

#[tokio::test]
async fn test_admin_listings_and_overview() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();

    let response = server.get_auth("/api/admin/me", &admin).await.unwrap();
    let me: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me["email"], ADMIN_EMAIL);
    assert_eq!(me["role"], "super_admin");

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(server.submit_application(&unique_email("list")).await.unwrap());
    }
    server.approve(&admin, ids[0]).await.unwrap();

    let response = server
        .get_auth("/api/admin/applications?status=pending&page=1&limit=1", &admin)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["pagination"]["total"], 2);
    assert_eq!(page["pagination"]["totalPages"], 2);
    assert_eq!(page["data"][0]["id"], ids[2]);

    let response = server
        .get_auth("/api/admin/applications?status=archived", &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth("/api/admin/overview", &admin).await.unwrap();
    let overview: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(overview["applications"]["pending"], 2);
    assert_eq!(overview["applications"]["approved"], 1);
    assert_eq!(overview["applications"]["total"], 3);
    assert_eq!(overview["affiliates"]["active"], 1);
    assert_eq!(overview["referrals"]["totalReferrals"], 0);
}

#[tokio::test]
async fn test_programs_and_settings() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token().await.unwrap();

    let response = server
        .post_auth(
            "/api/admin/programs",
            &admin,
            &json!({"name": "Spring Launch", "description": "Course bundle", "commissionRate": 20.0, "status": "published"}),
        )
        .await
        .unwrap();
    let published: Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/api/admin/programs",
            &admin,
            &json!({"name": "Draft Offer", "commissionRate": 5.0}),
        )
        .await
        .unwrap();
    let draft: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(draft["status"], "draft");

    let response = server.get("/api/affiliates/programs").await.unwrap();
    let public: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let public = public.as_array().unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["id"], published["id"]);

    let response = server
        .put_auth(
            &format!("/api/admin/programs/{}/status", published["id"]),
            &admin,
            &json!({"status": "archived"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/admin/programs", &admin).await.unwrap();
    let all: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);

    // Setting drives the default rate of later approvals
    let response = server
        .put_auth(
            "/api/admin/settings/default_commission_rate",
            &admin,
            &json!({"value": "12.5"}),
        )
        .await
        .unwrap();
    let setting: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(setting["value"], "12.5");

    let response = server
        .put_auth(
            "/api/admin/settings/default_commission_rate",
            &admin,
            &json!({"value": "abc"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let id = server
        .submit_application(&unique_email("rate"))
        .await
        .unwrap();
    let review = server.approve(&admin, id).await.unwrap();
    assert_eq!(review["affiliate"]["commissionRate"], 12.5);

    let response = server.get_auth("/api/admin/settings", &admin).await.unwrap();
    let settings: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(settings
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["key"] == "default_commission_rate"));
}

#[tokio::test]
async fn test_wrong_admin_password() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post(
            "/api/admin/login",
            &LoginRequest::new(ADMIN_EMAIL, "not-the-password"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}
