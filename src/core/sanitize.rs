// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Parse a score as shown on the site. Accepts Arabic-Indic digits
/// (`٤١٠٫٥`) as well as ASCII ones.
pub fn parse_score(s: &str) -> Option<f64> {
    let ascii: String = s
        .trim()
        .chars()
        .map(|ch| match ch {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (ch as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (ch as u32 - 0x06F0) as u8),
            '\u{066B}' => '.',
            _ => ch,
        })
        .collect();
    ascii.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric pagination label; arrows and words give `None`.
pub fn page_number(s: &str) -> Option<u32> {
    let t = normalize_ws(s);
    if t.is_empty() || !t.chars().all(|c| c.is_ascii_digit()) { return None; }
    t.parse().ok()
}
