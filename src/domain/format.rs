//! Currency and percentage formatting for console output.

/// Round to two decimal places (half away from zero).
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// US-dollar currency string: `$1,234.56`, `-$5.87`.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

/// Signed absolute change: `+2.34`, `-5.87`.
pub fn format_change(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change:.2}")
}

/// Signed percentage change: `+1.25%`, `-2.37%`.
pub fn format_change_percent(change_percent: f64) -> String {
    let sign = if change_percent >= 0.0 { "+" } else { "" };
    format!("{sign}{change_percent:.2}%")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
