//! Minimal ASN.1 BER encoding for the structures SM2 puts on the wire.
//!
//! Only the three tags SM2 uses are supported: INTEGER, OCTET STRING and
//! SEQUENCE, with definite short- and long-form lengths. Decoders return the
//! parsed value together with the remaining input so callers can walk a
//! sequence body field by field.

use num_bigint::BigUint;
use thiserror::Error;

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_SEQUENCE: u8 = 0x30;

/// ASN.1 structure errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The indefinite length form is not used by SM2 and is rejected.
    #[error("indefinite length is not supported")]
    Indefinite,

    /// Declared content length exceeds the remaining input.
    #[error("content shorter than declared length")]
    LengthOverflow,

    /// A different tag was expected at this position.
    #[error("expected tag {expected:#04x}, found {actual:#04x}")]
    TagMismatch {
        /// The tag required by the caller.
        expected: u8,
        /// The tag actually present in the input.
        actual: u8,
    },
}

type Result<T> = core::result::Result<T, Error>;

/// Encode a non-negative INTEGER.
///
/// The content is sized as `⌊bitlen⌋/8 + 1` bytes, which leaves a leading
/// zero octet whenever the top bit of the value is set and so keeps the
/// DER sign bit clear.
pub fn encode_integer(value: &BigUint) -> Vec<u8> {
    let content_len = (value.bits() / 8 + 1) as usize;
    let mut out = Vec::with_capacity(2 + content_len);
    out.push(TAG_INTEGER);
    encode_length_into(&mut out, content_len);
    let bytes = value.to_bytes_be();
    out.resize(out.len() + content_len - bytes.len(), 0);
    out.extend_from_slice(&bytes);
    out
}

/// Encode an OCTET STRING.
pub fn encode_octet_string(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + content.len());
    out.push(TAG_OCTET_STRING);
    encode_length_into(&mut out, content.len());
    out.extend_from_slice(content);
    out
}

/// Encode a SEQUENCE from already-encoded parts.
pub fn encode_sequence(parts: &[&[u8]]) -> Vec<u8> {
    let content_len = parts.iter().map(|part| part.len()).sum();
    let mut out = Vec::with_capacity(2 + content_len);
    out.push(TAG_SEQUENCE);
    encode_length_into(&mut out, content_len);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Encode a length field: one byte below 128, otherwise `0x80 | lenlen`
/// followed by the length in big-endian.
pub fn encode_length(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + (usize::BITS / 8) as usize);
    encode_length_into(&mut out, len);
    out
}

fn encode_length_into(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let be = len.to_be_bytes();
    let skip = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
    out.push(0x80 | (be.len() - skip) as u8);
    out.extend_from_slice(&be[skip..]);
}

/// Decode a length field, returning the content length and the remaining
/// input.
pub fn decode_length(input: &[u8]) -> Result<(usize, &[u8])> {
    let (&first, rest) = input.split_first().ok_or(Error::LengthOverflow)?;
    if first < 0x80 {
        return Ok((first as usize, rest));
    }
    if first == 0x80 {
        return Err(Error::Indefinite);
    }
    let lenlen = (first & 0x7f) as usize;
    if lenlen > (usize::BITS / 8) as usize || rest.len() < lenlen {
        return Err(Error::LengthOverflow);
    }
    let mut len = 0usize;
    for &byte in &rest[..lenlen] {
        len = len << 8 | byte as usize;
    }
    Ok((len, &rest[lenlen..]))
}

fn decode_tlv(input: &[u8], expected: u8) -> Result<(&[u8], &[u8])> {
    let (&actual, rest) = input.split_first().ok_or(Error::LengthOverflow)?;
    if actual != expected {
        return Err(Error::TagMismatch { expected, actual });
    }
    let (len, rest) = decode_length(rest)?;
    if rest.len() < len {
        return Err(Error::LengthOverflow);
    }
    Ok(rest.split_at(len))
}

/// Decode an INTEGER, returning the value and the remaining input.
pub fn decode_integer(input: &[u8]) -> Result<(BigUint, &[u8])> {
    let (content, rest) = decode_tlv(input, TAG_INTEGER)?;
    Ok((BigUint::from_bytes_be(content), rest))
}

/// Decode an OCTET STRING, returning the content and the remaining input.
pub fn decode_octet_string(input: &[u8]) -> Result<(&[u8], &[u8])> {
    decode_tlv(input, TAG_OCTET_STRING)
}

/// Decode a SEQUENCE, returning the body and the remaining input.
pub fn decode_sequence(input: &[u8]) -> Result<(&[u8], &[u8])> {
    decode_tlv(input, TAG_SEQUENCE)
}
