//! Utility functions for notification channels

/// Maximum length of an API response body kept in error values.
pub const MAX_BODY_LENGTH: usize = 500;

/// Truncate a string to at most `max_len` bytes, snapping back to a char
/// boundary.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &s[..end])
}

/// Mask all but the last four characters of a secret for log output.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
