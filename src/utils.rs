// src/utils.rs

/// Two decimals with thousands separators, e.g. `1,234,567.89`.
pub fn format_gdp(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && text != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
