//! Numeric codec primitives.
//!
//! Every value is appended little-endian, with its low bits acting as a length
//! tag so that a decoder can tell how many bytes belong to it:
//!
//! ```text
//! xxxx_xxx0              1 byte
//! xxxx_xx01 xxxx_xxxx    2 bytes
//! xxxx_xx11 (+3 bytes)   4 bytes
//! ```
//!
//! Out-of-contract input (NaN, infinities) never panics: Rust's saturating
//! float to integer casts make those values fail every compact-form check, so
//! they fall through to the 4-byte real form with their IEEE-754 bits intact
//! (apart from the mantissa rounding described on [`encode_real`]).

/// Largest value (exclusive) that fits the 1-byte natural form.
const ONE_BYTE_LIMIT: u32 = 1 << 7;

/// Largest value (exclusive) that fits the 2-byte natural form.
const TWO_BYTE_LIMIT: u32 = 1 << 14;

/// Scale applied to zero-to-one values. 15120 = 2^4 * 3^3 * 5 * 7, so many
/// common fractions are exact.
const ZERO_TO_ONE_SCALE: f32 = 15120.0;

/// Append an unsigned natural number.
///
/// Values of `2^30` and above do not fit the 4-byte form; their top two bits
/// are lost.
pub fn encode_natural(buf: &mut Vec<u8>, u: u32) {
    if u < ONE_BYTE_LIMIT {
        buf.push((u << 1) as u8);
    } else if u < TWO_BYTE_LIMIT {
        let u = (u << 2) | 0x01;
        buf.extend_from_slice(&(u as u16).to_le_bytes());
    } else {
        let u = (u << 2) | 0x03;
        buf.extend_from_slice(&u.to_le_bytes());
    }
}

/// Append a real number, used for level-of-detail bounds.
///
/// Small non-negative integers use the natural forms. Anything else is
/// written as an IEEE-754 single whose mantissa is rounded to a multiple of 4,
/// freeing the low two bits for the length tag.
pub fn encode_real(buf: &mut Vec<u8>, f: f32) {
    let u = f as u32;
    if u as f32 == f && u < TWO_BYTE_LIMIT {
        encode_natural(buf, u);
        return;
    }
    encode_4_byte_real(buf, f);
}

/// Append a signed coordinate.
///
/// Integers in `[-64, 64)` take one byte, multiples of `1/64` in
/// `[-128, 128)` take two, everything else is a 4-byte real.
pub fn encode_coordinate(buf: &mut Vec<u8>, f: f32) {
    let i = f as i32;
    if (-64..64).contains(&i) && i as f32 == f {
        buf.push(((i + 64) << 1) as u8);
        return;
    }

    let scaled = f * 64.0;
    let i = scaled as i32;
    if (-128 * 64..128 * 64).contains(&i) && i as f32 == scaled {
        let u = (((i + 128 * 64) as u32) << 2) | 0x01;
        buf.extend_from_slice(&(u as u16).to_le_bytes());
        return;
    }

    encode_4_byte_real(buf, f);
}

/// Append a value known to lie in `[0, 1]`, used for arc rotation.
pub fn encode_zero_to_one(buf: &mut Vec<u8>, f: f32) {
    let scaled = f * ZERO_TO_ONE_SCALE;
    let u = scaled as u32;
    if u as f32 == scaled && u < ZERO_TO_ONE_SCALE as u32 {
        if u % 126 == 0 {
            buf.push(((u / 126) << 1) as u8);
            return;
        }
        if u % 2 == 0 {
            let u = ((u / 2) << 2) | 0x01;
            buf.extend_from_slice(&(u as u16).to_le_bytes());
            return;
        }
    }
    encode_4_byte_real(buf, f);
}

fn encode_4_byte_real(buf: &mut Vec<u8>, f: f32) {
    let u = f.to_bits();

    // Round the mantissa to the nearest multiple of 4 without carrying into
    // the exponent.
    let mut mantissa = u & 0x007f_ffff;
    if mantissa < 0x007f_fffe {
        mantissa += 2;
    }
    let u = (u & 0xff80_0000) | mantissa | 0x03;
    buf.extend_from_slice(&u.to_le_bytes());
}


// ============================================================================
// Property-Based Tests
// ============================================================================
