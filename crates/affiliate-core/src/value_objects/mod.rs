//! Value objects - immutable types that represent domain concepts

mod affiliate_code;
mod commission;
mod status;

pub use affiliate_code::{generate_affiliate_code, is_valid_affiliate_code, AFFILIATE_CODE_LEN};
pub use commission::calculate_commission;
pub use status::{
    AdminRole, AffiliateStatus, ApplicationStatus, ProgramStatus, ReferralStatus,
    StatusParseError,
};
