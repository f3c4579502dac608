//! Affiliate payment entity - where commissions are paid out

use chrono::{DateTime, Utc};

/// Current payout bank details of an affiliate (at most one per affiliate)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliatePayment {
    pub id: i64,
    pub affiliate_id: i64,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AffiliatePayment {
    /// Account number with all but the last four digits hidden
    pub fn masked_account_number(&self) -> String {
        let chars: Vec<char> = self.account_number.chars().collect();
        let split = chars.len().saturating_sub(4);
        let tail: String = chars[split..].iter().collect();
        format!("{}{}", "*".repeat(split), tail)
    }
}

/// Bank fields submitted by an affiliate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(account_number: &str) -> AffiliatePayment {
        let now = Utc::now();
        AffiliatePayment {
            id: 1,
            affiliate_id: 1,
            bank_name: "First Bank".to_string(),
            account_number: account_number.to_string(),
            account_name: "Ada Lovelace".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_masked_account_number() {
        assert_eq!(payment("0123456789").masked_account_number(), "******6789");
        assert_eq!(payment("123").masked_account_number(), "123");
    }
}
