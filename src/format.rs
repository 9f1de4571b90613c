//! Display formatting for troop counts. Output only; computed values are never rounded.

/// `"0"` for exactly zero, otherwise thousands with two decimals and a `k` suffix.
///
/// ```
/// # use troopfill::format::format_count;
/// assert_eq!(format_count(0.0), "0");
/// assert_eq!(format_count(63_000.0), "63.00k");
/// assert_eq!(format_count(1_234.5), "1.23k");
/// ```
pub fn format_count(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}k", to_fixed_2(value / 1000.0))
}

/// Two decimal places; a value exactly halfway between two cents rounds away from zero.
fn to_fixed_2(x: f64) -> String {
    let magnitude = x.abs();
    let doubled_cents = (magnitude * 200.0).round();
    // `magnitude * 8.0` is exact, so the fused multiply-add is zero only when
    // `magnitude * 200` is exactly the odd integer `doubled_cents`.
    let is_tie = doubled_cents < 9_007_199_254_740_992.0
        && doubled_cents % 2.0 == 1.0
        && (magnitude * 8.0).mul_add(25.0, -doubled_cents) == 0.0;
    if !is_tie {
        return format!("{x:.2}");
    }
    let cents = ((doubled_cents + 1.0) / 2.0) as u64;
    let sign = if x < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}
