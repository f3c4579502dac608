//! Affiliate code - short public identifier used in referral links

/// Length of every issued affiliate code
pub const AFFILIATE_CODE_LEN: usize = 8;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random 8-character uppercase affiliate code
pub fn generate_affiliate_code() -> String {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    (0..AFFILIATE_CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Check that a code has the issued shape (8 chars, A-Z or 0-9)
pub fn is_valid_affiliate_code(code: &str) -> bool {
    code.len() == AFFILIATE_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_affiliate_code() {
        let code = generate_affiliate_code();
        assert_eq!(code.len(), AFFILIATE_CODE_LEN);
        assert!(is_valid_affiliate_code(&code));
        assert_eq!(code, code.to_uppercase());
    }

    #[test]
    fn test_codes_are_random() {
        let codes: std::collections::HashSet<_> =
            (0..50).map(|_| generate_affiliate_code()).collect();
        assert!(codes.len() > 45);
    }

    #[test]
    fn test_is_valid_affiliate_code() {
        assert!(is_valid_affiliate_code("AB12CD34"));
        assert!(!is_valid_affiliate_code("ab12cd34"));
        assert!(!is_valid_affiliate_code("AB12CD3"));
        assert!(!is_valid_affiliate_code("AB12-D34"));
    }
}
