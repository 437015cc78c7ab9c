/// Format a number the way it is written back into formula text.
///
/// Uses the shortest representation that round-trips, never scientific
/// notation (an exponent `e`/`E` would be read back as a column letter).
/// Non-finite values become `Infinity`, `-Infinity` and `NaN`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Covers -0 as well.
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// Format a list as bare comma-joined text (`1,2,3`).
pub fn format_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|n| format_number(*n))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_bool(b: bool) -> String {
    if b { "true" } else { "false" }.to_string()
}
