//! Canonical binary float/double codec.
//!
//! BINARY_FLOAT and BINARY_DOUBLE travel as SQLT_IBFLOAT/SQLT_IBDOUBLE:
//! the IEEE-754 bit pattern, sign-transformed so that the byte sequence
//! compares like the value, emitted big-endian. Non-negative values get
//! the sign bit set; negative values have all bits inverted.

use crate::{Error, Result};

const F64_SIGN: u64 = 0x8000_0000_0000_0000;
const F32_SIGN: u32 = 0x8000_0000;

pub(crate) fn encode_double(val: f64) -> [u8; 8] {
    let mut bits = val.to_bits();
    if bits & F64_SIGN != 0 {
        bits = !bits;
    } else {
        bits |= F64_SIGN;
    }
    bits.to_be_bytes()
}

pub(crate) fn encode_float(val: f32) -> [u8; 4] {
    let mut bits = val.to_bits();
    if bits & F32_SIGN != 0 {
        bits = !bits;
    } else {
        bits |= F32_SIGN;
    }
    bits.to_be_bytes()
}

fn decode_double_bits(buf: [u8; 8]) -> f64 {
    let mut bits = u64::from_be_bytes(buf);
    if bits & F64_SIGN == 0 {
        bits = !bits;
    } else {
        bits &= !F64_SIGN;
    }
    f64::from_bits(bits)
}

fn decode_float_bits(buf: [u8; 4]) -> f32 {
    let mut bits = u32::from_be_bytes(buf);
    if bits & F32_SIGN == 0 {
        bits = !bits;
    } else {
        bits &= !F32_SIGN;
    }
    f32::from_bits(bits)
}

/// Decodes a fetched binary float/double buffer. The width is the
/// column's declared byte size; 4-byte values widen to f64.
pub(crate) fn decode(buf: &[u8]) -> Result<f64> {
    match buf.len() {
        8 => {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(buf);
            Ok(decode_double_bits(bytes))
        }
        4 => {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(buf);
            Ok(decode_float_bits(bytes) as f64)
        }
        n => Err(Error::msg(format!("unhandled binary float size: {}", n))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_round_trip() {
        let samples = [
            0.0, -0.0, 1.0, -1.0, 3.14, -3.14,
            f64::MIN_POSITIVE,            // smallest normal
            f64::MIN_POSITIVE / 4.0,      // subnormal
            -f64::MIN_POSITIVE / 4.0,
            f64::MAX, f64::MIN,
            1234567890.987654321,
        ];
        for &val in &samples {
            let encoded = encode_double(val);
            let decoded = decode(&encoded).unwrap();
            assert_eq!(val.to_bits(), decoded.to_bits(), "value {}", val);
        }
    }

    #[test]
    fn float_round_trip() {
        let samples = [0.0f32, -0.0, 1.5, -1.5, f32::MIN_POSITIVE / 2.0, f32::MAX];
        for &val in &samples {
            let encoded = encode_float(val);
            let decoded = decode(&encoded).unwrap();
            assert_eq!(val, decoded as f32, "value {}", val);
        }
    }

    #[test]
    fn nan_is_bit_exact() {
        let val = f64::NAN;
        let decoded = decode(&encode_double(val)).unwrap();
        assert_eq!(val.to_bits(), decoded.to_bits());
    }

    #[test]
    fn encoded_bytes_sort_like_values() {
        // The whole point of the sign transformation.
        let ordered = [-2.5f64, -1.0, -0.5, 0.0, 0.5, 1.0, 2.5];
        let encoded: Vec<[u8; 8]> = ordered.iter().map(|&v| encode_double(v)).collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn unhandled_width_is_an_error() {
        assert!(decode(&[0u8; 2]).is_err());
        assert!(decode(&[0u8; 16]).is_err());
    }
}
