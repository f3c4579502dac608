//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::{json, Value};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}{}@example.com", unique_suffix())
}

/// Application form with every optional field filled
pub fn application_form(email: &str) -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "email": email,
        "phone": "+44 20 7946 0000",
        "socialMediaHandles": {"instagram": "@ada", "youtube": "ada-codes"},
        "audienceSize": 25000,
        "audienceDescription": "Students learning to program",
        "motivation": "I recommend courses I have taken"
    })
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

pub fn approve_body(commission_rate: Option<f64>) -> Value {
    match commission_rate {
        Some(rate) => json!({"status": "approved", "commissionRate": rate, "notes": "Welcome aboard"}),
        None => json!({"status": "approved"}),
    }
}

pub fn reject_body(notes: &str) -> Value {
    json!({"status": "rejected", "notes": notes})
}

pub fn payment_body(bank: &str, account_number: &str) -> Value {
    json!({
        "bankName": bank,
        "accountNumber": account_number,
        "accountName": "Ada Lovelace"
    })
}

pub fn track_body(code: &str, user_id: i64, sale_amount: Option<f64>) -> Value {
    json!({
        "affiliateCode": code,
        "referredUserId": user_id,
        "saleAmount": sale_amount
    })
}
