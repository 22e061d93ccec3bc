//! Order-key bit packing for the exchange contract.
//!
//! The exchange identifies orders by a composite `u64` sort key derived from
//! the owning account, the offered currency symbol, and a creation timestamp.
//! The layout must match the key derivation inside the deployed contract
//! bit-for-bit:
//!
//! - Account names pack 5 bits per character, most-significant first, into
//!   the high 60 bits; a 13th character occupies the low 4 bits.
//! - Symbols pack 8 bits per character, last character in the highest byte.
//! - The final key is `name + symbol + timestamp_ms` with wrapping u64
//!   addition (addition, not OR — deliberate in the contract).

use crate::errors::TranseosError;

/// Map a name character to its 5-bit value: `.` = 0, `1`..`5` = 1..5,
/// `a`..`z` = 6..31.
pub fn char_to_value(c: char) -> Result<u64, TranseosError> {
    match c {
        '.' => Ok(0),
        '1'..='5' => Ok(c as u64 - '0' as u64),
        'a'..='z' => Ok(c as u64 - 'a' as u64 + 6),
        _ => Err(TranseosError::InvalidCharacter(c)),
    }
}

/// Pack an account name (up to 13 characters) into a `u64`.
///
/// The first twelve characters fill the high 60 bits at 5 bits each; a 13th
/// character must map to a value of at most 15 and fills the low 4 bits.
/// Shorter names are left-aligned. The empty name packs to zero.
pub fn name_to_u64(name: &str) -> Result<u64, TranseosError> {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > 13 {
        return Err(TranseosError::NameTooLong(chars.len()));
    }
    if chars.is_empty() {
        return Ok(0);
    }

    let n = chars.len().min(12);
    let mut value: u64 = 0;
    for &c in &chars[..n] {
        value = (value << 5) | char_to_value(c)?;
    }
    value <<= 4 + 5 * (12 - n as u32);

    if chars.len() == 13 {
        let v = char_to_value(chars[12])?;
        if v > 15 {
            return Err(TranseosError::InvalidTrailingChar(chars[12]));
        }
        value |= v;
    }
    Ok(value)
}

/// Pack a currency symbol (up to 7 uppercase letters) into a `u64`,
/// one byte per character, last character most significant.
pub fn symbol_to_u64(symbol: &str) -> Result<u64, TranseosError> {
    let chars: Vec<char> = symbol.chars().collect();
    if chars.len() > 7 {
        return Err(TranseosError::SymbolTooLong(chars.len()));
    }
    let mut value: u64 = 0;
    for &c in chars.iter().rev() {
        if !c.is_ascii_uppercase() {
            return Err(TranseosError::InvalidSymbolChar(c));
        }
        value = (value << 8) | c as u64;
    }
    Ok(value)
}

/// Derive the composite order key for `account` offering `symbol` at
/// `timestamp_ms` (milliseconds since the Unix epoch).
///
/// Uses wrapping u64 addition to match the on-chain derivation.
pub fn order_key(account: &str, symbol: &str, timestamp_ms: u64) -> Result<u64, TranseosError> {
    let name = name_to_u64(account)?;
    let asset = symbol_to_u64(symbol)?;
    Ok(name.wrapping_add(asset).wrapping_add(timestamp_ms))
}
