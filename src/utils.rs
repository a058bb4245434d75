//! Common utility functions shared across the codebase.

/// Checks if the text looks like an abbreviated or full git object hash:
/// 4 to 40 lowercase hexadecimal characters.
///
/// # Examples
///
/// ```
/// use acd::utils::is_hex_hash;
///
/// assert!(is_hex_hash("a1b2c3d"));
/// assert!(is_hex_hash("deadbeef"));
/// assert!(is_hex_hash("1234"));
/// assert!(!is_hex_hash("abc"));
/// assert!(!is_hex_hash("initial"));
/// assert!(!is_hex_hash("DEADBEEF"));
/// assert!(!is_hex_hash(""));
/// ```
pub fn is_hex_hash(text: &str) -> bool {
    (4..=40).contains(&text.len())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
