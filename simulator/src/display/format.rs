//! Number formatting for terminal output.

/// Fixed-point formatting with comma thousands separators.
///
/// ## Example
/// ```
/// use simulator::prelude::*;
/// assert_eq!(fmt(1234567.891, 2), "1,234,567.89");
/// assert_eq!(fmt(-1234.0, 0), "-1,234");
/// ```
pub fn fmt(value: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// A fraction as a percentage with one decimal, `0.0437` becomes `4.4%`.
pub fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Formats money amounts with a fixed currency symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    symbol: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::new("£")
    }
}

impl NumberFormat {
    pub fn new(symbol: &str) -> NumberFormat {
        NumberFormat {
            symbol: symbol.to_string(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// ## Example
    /// ```
    /// use simulator::prelude::*;
    /// assert_eq!(NumberFormat::default().currency(4500.4, 0), "£4,500");
    /// ```
    pub fn currency(&self, value: f64, decimals: usize) -> String {
        format!("{}{}", self.symbol, fmt(value, decimals))
    }
}
