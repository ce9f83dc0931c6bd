//! CLI to Config conversion utilities

use anyhow::{Context, Result};

/// Parse a duration string (e.g., "30s", "5m", "1h") to seconds
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("sec").or_else(|| s.strip_suffix('s')) {
        (n, 1u64)
    } else if let Some(n) = s.strip_suffix("min").or_else(|| s.strip_suffix('m')) {
        (n, 60)
    } else if let Some(n) = s.strip_suffix("hr").or_else(|| s.strip_suffix('h')) {
        (n, 3600)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Duration out of range: {}", s))
}

/// Parse a delimiter argument into a single character
///
/// Accepts a literal character, `\t`, or the names `tab`, `comma`,
/// `semicolon` and `pipe`.
pub fn parse_delimiter(s: &str) -> Result<char> {
    let named = match s.to_lowercase().as_str() {
        "tab" | "\\t" => Some('\t'),
        "comma" => Some(','),
        "semicolon" => Some(';'),
        "pipe" => Some('|'),
        _ => None,
    };
    if let Some(c) = named {
        return Ok(c);
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("Delimiter must be a single character, got {:?}", s),
    }
}
