//! Commission arithmetic

/// Commission earned on a sale at `rate` percent, rounded to cents
pub fn calculate_commission(sale_amount: f64, rate: f64) -> f64 {
    if sale_amount <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    (sale_amount * rate / 100.0 * 100.0).round() / 100.0
}
