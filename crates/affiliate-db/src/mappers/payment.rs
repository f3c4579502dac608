//! Payment model -> entity mapper

use affiliate_core::entities::AffiliatePayment;

use crate::models::PaymentModel;

impl From<PaymentModel> for AffiliatePayment {
    fn from(model: PaymentModel) -> Self {
        AffiliatePayment {
            id: model.id,
            affiliate_id: model.affiliate_id,
            bank_name: model.bank_name,
            account_number: model.account_number,
            account_name: model.account_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
