//! Small formatting helpers used by the VOD and penalty listings.

use crate::error::HmsError;

/// Parses `HH:MM:SS`, `MM:SS` or `SS` into seconds.
///
/// Fields are read right to left, so `"90"` is ninety seconds and
/// `"1:30"` is one minute thirty. Fields are not range-checked:
/// `"0:90"` is also ninety seconds.
///
/// # Errors
///
/// Returns [`HmsError`] for empty input, more than three fields, or any
/// field that is not made of ASCII digits.
///
/// # Examples
///
/// ```
/// use request_gate::format::parse_hms;
///
/// assert_eq!(parse_hms("01:02:03").unwrap(), 3723);
/// assert_eq!(parse_hms("2:05").unwrap(), 125);
/// assert!(parse_hms("1:xx").is_err());
/// ```
pub fn parse_hms(hms: &str) -> Result<u64, HmsError> {
    let invalid = || HmsError {
        input: hms.to_string(),
    };

    let fields: Vec<&str> = hms.trim().split(':').collect();
    if fields.len() > 3 {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    for (field, unit) in fields.iter().rev().zip([1u64, 60, 3600]) {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u64 = field.parse().map_err(|_| invalid())?;
        total = value
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(invalid)?;
    }
    Ok(total)
}

/// Formats seconds as `HH:MM:SS`, each field at least two digits wide.
///
/// Hours are not wrapped, so long streams render as e.g. `123:00:00`.
pub fn format_hms(seconds: u64) -> String {
    let s = seconds % 60;
    let m = (seconds / 60) % 60;
    let h = seconds / 3600;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Formats a signed offset by its magnitude; the sign is dropped.
pub fn format_signed_hms(seconds: i64) -> String {
    format_hms(seconds.unsigned_abs())
}

/// Cuts `text` to `max_chars` characters and appends `...` if anything was
/// removed.
///
/// # Examples
///
/// ```
/// use request_gate::format::truncate;
///
/// assert_eq!(truncate("懲罰清單", 2), "懲罰...");
/// assert_eq!(truncate("short", 10), "short");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Items addressable by a numeric id.
pub trait Identified {
    /// Returns the item's id.
    fn id(&self) -> u64;
}

/// Returns the first item with the given id.
pub fn find_by_id<T: Identified>(items: &[T], id: u64) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}
