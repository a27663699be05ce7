//! Address normalization utilities.
//!
//! Sui addresses are 32-byte values, but they're often represented in
//! different formats:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix: "2"
//!
//! The full form is the canonical format for object IDs at the fetch
//! boundary; the short form is the canonical format inside type tags.

/// Normalize an address to lowercase with 0x prefix and full 64 hex characters.
///
/// # Examples
///
/// ```
/// use sui_reify_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2"),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// assert_eq!(
///     normalize_address("ABC"),
///     "0x0000000000000000000000000000000000000000000000000000000000000abc"
/// );
/// ```
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    if hex.len() < 64 {
        format!("0x{:0>64}", hex)
    } else {
        format!("0x{}", &hex[..64])
    }
}

/// Normalize an address, returning None if it's not a valid hex address.
pub fn normalize_address_checked(addr: &str) -> Option<String> {
    if !is_hex_address(addr.trim()) {
        return None;
    }
    Some(normalize_address(addr))
}

/// Normalize an address to short form (minimal hex digits).
///
/// An all-zero address stays "0x0"; other addresses have leading zeros
/// trimmed. This is the form used inside normalized type tags.
///
/// # Examples
///
/// ```
/// use sui_reify_types::address::normalize_address_short;
///
/// assert_eq!(normalize_address_short("0x0000000000000000000000000000000000000000000000000000000000000002"), "0x2");
/// assert_eq!(normalize_address_short("0x00abc"), "0xabc");
/// ```
pub fn normalize_address_short(addr: &str) -> String {
    let normalized = normalize_address(addr);
    let hex = normalized.strip_prefix("0x").unwrap_or(&normalized);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// Check whether a string is a plausible hex address (with or without 0x).
pub fn is_hex_address(s: &str) -> bool {
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    !hex.is_empty() && hex.len() <= 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse an address string into its 32-byte representation.
///
/// Accepts short or full form, with or without the 0x prefix.
pub fn address_to_bytes(addr: &str) -> Option<[u8; 32]> {
    let normalized = normalize_address_checked(addr)?;
    let raw = hex::decode(normalized.strip_prefix("0x")?).ok()?;
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&raw);
    Some(bytes)
}

/// Format 32 address bytes as the full-form hex string.
pub fn address_from_bytes(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
