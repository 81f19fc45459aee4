/// Rounds `value` to `decimals` places, halves away from zero.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// assert_eq!(round_to(2.5, 0), 3.0);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// assert_eq!(round_to(0.12345, 3), 0.123);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_decimals_is_integer() {
        assert_eq!(round_to(4321.49, 0), 4321.0);
        assert_eq!(round_to(4321.5, 0), 4322.0);
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(round_to(0.0875, 2), 0.09);
        assert_eq!(round_to(11.234, 2), 11.23);
        assert_eq!(round_to(-0.0449, 3), -0.045);
    }
}
