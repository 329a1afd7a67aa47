//! Variable-width text codec for response payloads.
//!
//! The wire encoding maps each 16-bit code unit to one, two, or three bytes,
//! selected by the bit pattern of the lead byte:
//!
//! ```text
//! 0xxxxxxx                            1 byte,  units 0x0000..=0x007F
//! 110xxxxx 10xxxxxx                   2 bytes, units 0x0080..=0x07FF
//! 1110xxxx 10xxxxxx 10xxxxxx          3 bytes, units 0x0800..=0xFFFF
//! ```
//!
//! This is the classic 1-3 byte scheme: supplementary characters travel as a
//! surrogate pair of 16-bit units, each encoded separately. The decoder
//! validates its input: lead bytes outside the three patterns above,
//! continuation bytes not matching `10xxxxxx`, and sequences running past the
//! end of the input are all reported as [`DecodeError`]s with byte offsets.

use crate::error::DecodeError;

/// Decodes an encoded byte sequence into 16-bit code units.
///
/// Pure transformation; the output always holds at most one unit per input
/// byte.
pub fn decode(input: &[u8]) -> Result<Vec<u16>, DecodeError> {
    let mut units = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let b = input[pos];
        if b < 0x80 {
            units.push(u16::from(b));
            pos += 1;
        } else if b & 0xE0 == 0xC0 {
            let b2 = continuation(input, pos, 1, 1)?;
            units.push((u16::from(b) & 0x1F) << 6 | u16::from(b2) & 0x3F);
            pos += 2;
        } else if b & 0xF0 == 0xE0 {
            let b2 = continuation(input, pos, 1, 2)?;
            let b3 = continuation(input, pos, 2, 2)?;
            units.push(
                (u16::from(b) & 0x0F) << 12
                    | (u16::from(b2) & 0x3F) << 6
                    | u16::from(b3) & 0x3F,
            );
            pos += 3;
        } else {
            // Continuation bytes (10xxxxxx) and 4-byte leads (11110xxx and
            // above) cannot start a sequence in this encoding.
            return Err(DecodeError::InvalidLeadByte {
                byte: b,
                offset: pos,
            });
        }
    }

    Ok(units)
}

/// Fetches the `index`-th continuation byte of the sequence starting at
/// `lead_pos`, validating bounds and the `10xxxxxx` pattern.
fn continuation(
    input: &[u8],
    lead_pos: usize,
    index: usize,
    needed: usize,
) -> Result<u8, DecodeError> {
    let pos = lead_pos + index;
    let Some(&b) = input.get(pos) else {
        return Err(DecodeError::TruncatedSequence {
            offset: lead_pos,
            lead: input[lead_pos],
            needed,
        });
    };
    if b & 0xC0 != 0x80 {
        return Err(DecodeError::InvalidContinuation { byte: b, offset: pos });
    }
    Ok(b)
}

/// Decodes an encoded byte sequence into a `String` for display.
///
/// Unpaired surrogate units are replaced with U+FFFD; paired surrogates
/// reconstruct the supplementary character they encode.
pub fn decode_to_string(input: &[u8]) -> Result<String, DecodeError> {
    let units = decode(input)?;
    Ok(String::from_utf16_lossy(&units))
}

/// Encodes 16-bit code units into the wire encoding.
pub fn encode_units(units: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 3);
    for &unit in units {
        if unit < 0x80 {
            bytes.push(unit as u8);
        } else if unit < 0x800 {
            bytes.push(0xC0 | (unit >> 6) as u8);
            bytes.push(0x80 | (unit & 0x3F) as u8);
        } else {
            bytes.push(0xE0 | (unit >> 12) as u8);
            bytes.push(0x80 | (unit >> 6 & 0x3F) as u8);
            bytes.push(0x80 | (unit & 0x3F) as u8);
        }
    }
    bytes
}

/// Encodes a string into the wire encoding.
///
/// Supplementary characters are encoded as their surrogate pair, one 3-byte
/// sequence per unit, matching what [`decode`] reverses.
pub fn encode(text: &str) -> Vec<u8> {
    let units: Vec<u16> = text.encode_utf16().collect();
    encode_units(&units)
}
