//! Byte-array parsing.
//!
//! The output buffer is allocated once from the [`size::parsed_max_len`]
//! upper bound and only ever grows to the actual byte count. Hex digits and
//! configured literals are matched ignoring ASCII case; line boundaries
//! accept CRLF, LF, and CR. All indices are byte offsets into the input.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::digits;
use crate::format::HexFormat;
use crate::size;
use crate::types::{check_range, Error, Result};

/// Parse all of `input` under `format`.
pub fn decode(input: &str, format: &HexFormat) -> Result<Vec<u8>> {
    decode_range(input, 0, input.len(), format)
}

/// Parse `input[start..end]` under `format`.
pub fn decode_range(input: &str, start: usize, end: usize, format: &HexFormat) -> Result<Vec<u8>> {
    check_range(input.len(), start, end)?;
    if start == end {
        return Ok(Vec::new());
    }
    let src = input.as_bytes();
    let mut out = Vec::with_capacity(size::parsed_max_len(end - start, &format.bytes));
    if format.bytes.has_breaks() || !decode_unbroken(src, start, end, format, &mut out) {
        // the general pass re-parses from scratch and carries the
        // diagnostics; the fast pass only ever accepts
        out.clear();
        decode_general(src, start, end, format, &mut out)?;
    }
    Ok(out)
}

#[inline]
fn pair(src: &[u8], i: usize) -> Option<u8> {
    let hi = digits::nibble(src[i])?;
    let lo = digits::nibble(src[i + 1])?;
    Some((hi << 4) | lo)
}

// Fast pass for configurations without line wrapping or grouping. Derives
// the byte count from the input length; returns false on any mismatch so
// the caller can fall back to the general pass for a precise error.
fn decode_unbroken(
    src: &[u8],
    start: usize,
    end: usize,
    format: &HexFormat,
    out: &mut Vec<u8>,
) -> bool {
    let bp = format.bytes.byte_prefix.as_bytes();
    let bx = format.bytes.byte_suffix.as_bytes();
    let bs = format.bytes.byte_separator.as_bytes();
    let len = end - start;
    let per_byte = 2 + bp.len() + bx.len() + bs.len();
    let n = (len + bs.len()) / per_byte;
    if n == 0 || n * per_byte - bs.len() != len {
        return false;
    }

    if bp.is_empty() && bx.is_empty() && bs.is_empty() {
        let mut i = start;
        while i < end {
            match pair(src, i) {
                Some(b) => out.push(b),
                None => return false,
            }
            i += 2;
        }
        return true;
    }

    if bp.is_empty() && bx.is_empty() && bs.len() == 1 {
        let sep = bs[0];
        match pair(src, start) {
            Some(b) => out.push(b),
            None => return false,
        }
        let mut i = start + 2;
        while i < end {
            if !src[i].eq_ignore_ascii_case(&sep) {
                return false;
            }
            match pair(src, i + 1) {
                Some(b) => out.push(b),
                None => return false,
            }
            i += 3;
        }
        return true;
    }

    // bp D D (bx bs bp D D)* bx: the interior literal is matched as one
    // composite token
    let mut mid = Vec::with_capacity(bx.len() + bs.len() + bp.len());
    mid.extend_from_slice(bx);
    mid.extend_from_slice(bs);
    mid.extend_from_slice(bp);
    let mut i = start;
    if !src[i..i + bp.len()].eq_ignore_ascii_case(bp) {
        return false;
    }
    i += bp.len();
    match pair(src, i) {
        Some(b) => out.push(b),
        None => return false,
    }
    i += 2;
    for _ in 1..n {
        if !src[i..i + mid.len()].eq_ignore_ascii_case(&mid) {
            return false;
        }
        i += mid.len();
        match pair(src, i) {
            Some(b) => out.push(b),
            None => return false,
        }
        i += 2;
    }
    debug_assert_eq!(i + bx.len(), end);
    src[i..end].eq_ignore_ascii_case(bx)
}

fn decode_general(
    src: &[u8],
    start: usize,
    end: usize,
    format: &HexFormat,
    out: &mut Vec<u8>,
) -> Result<()> {
    let bf = &format.bytes;
    let bp = bf.byte_prefix.as_bytes();
    let bx = bf.byte_suffix.as_bytes();
    let bs = bf.byte_separator.as_bytes();
    let gs = bf.group_separator.as_bytes();
    let mut i = start;
    let mut index_in_line = 0usize;
    let mut index_in_group = 0usize;
    while i < end {
        if index_in_line == bf.bytes_per_line {
            i = expect_new_line(src, i, end)?;
            index_in_line = 0;
            index_in_group = 0;
        } else if index_in_group == bf.bytes_per_group {
            i = expect_literal(src, i, end, gs, "group separator")?;
            index_in_group = 0;
        } else if index_in_group != 0 {
            i = expect_literal(src, i, end, bs, "byte separator")?;
        }
        index_in_line += 1;
        index_in_group += 1;
        i = expect_literal(src, i, end, bp, "byte prefix")?;
        if i + 2 > end {
            return Err(Error::InvalidFormat(format!(
                "expected 2 hexadecimal digits at index {i}, but the input ends at index {end}"
            )));
        }
        let hi = expect_digit(src, i)?;
        let lo = expect_digit(src, i + 1)?;
        out.push((hi << 4) | lo);
        i += 2;
        i = expect_literal(src, i, end, bx, "byte suffix")?;
    }
    Ok(())
}

fn expect_new_line(src: &[u8], i: usize, end: usize) -> Result<usize> {
    match src[i] {
        b'\r' if i + 1 < end && src[i + 1] == b'\n' => Ok(i + 2),
        b'\r' | b'\n' => Ok(i + 1),
        _ => Err(Error::InvalidFormat(format!(
            "expected a new line at index {i}, but was \"{}\"",
            snippet(src, i, i + 1)
        ))),
    }
}

// Case-insensitive literal match; returns the index just past the literal.
pub(crate) fn expect_literal(
    src: &[u8],
    i: usize,
    end: usize,
    literal: &[u8],
    what: &str,
) -> Result<usize> {
    let stop = i + literal.len();
    if stop <= end && src[i..stop].eq_ignore_ascii_case(literal) {
        return Ok(stop);
    }
    Err(Error::InvalidFormat(format!(
        "expected {what} \"{}\" at index {i}, but was \"{}\"",
        String::from_utf8_lossy(literal),
        snippet(src, i, stop)
    )))
}

pub(crate) fn expect_digit(src: &[u8], i: usize) -> Result<u8> {
    digits::nibble(src[i]).ok_or_else(|| {
        Error::InvalidFormat(format!(
            "expected a hexadecimal digit at index {i}, but was \"{}\"",
            snippet(src, i, i + 1)
        ))
    })
}

// Substring for error messages; the end is clamped to the input and nudged
// forward to the next UTF-8 boundary so a multi-byte char prints whole.
pub(crate) fn snippet(src: &[u8], start: usize, end: usize) -> String {
    let mut end = end.min(src.len());
    while end < src.len() && (src[end] & 0xc0) == 0x80 {
        end += 1;
    }
    String::from_utf8_lossy(&src[start..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::HexFormat;
    use alloc::vec;

    fn invalid(result: Result<Vec<u8>>) -> String {
        match result {
            Err(Error::InvalidFormat(msg)) => msg,
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn plain_and_mixed_case() {
        let format = HexFormat::default();
        let want = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(decode("deadbeef", &format).expect("decode"), want);
        assert_eq!(decode("DEADbeef", &format).expect("decode"), want);
        assert_eq!(decode("DEADBEEF", &format).expect("decode"), want);
    }

    #[test]
    fn empty_input() {
        let format = HexFormat::default();
        assert_eq!(decode("", &format).expect("decode"), vec![]);
        assert_eq!(decode_range("abcd", 2, 2, &format).expect("decode"), vec![]);
    }

    #[test]
    fn sub_range() {
        let format = HexFormat::default();
        assert_eq!(
            decode_range("xxabcdxx", 2, 6, &format).expect("decode"),
            vec![0xab, 0xcd]
        );
    }

    #[test]
    fn single_char_separator() {
        let format = HexFormat::builder()
            .bytes_per_group(1)
            .group_separator(".")
            .build();
        assert_eq!(
            decode("d9.6e.99.4a", &format).expect("decode"),
            vec![0xd9, 0x6e, 0x99, 0x4a]
        );
    }

    #[test]
    fn affixed_bytes() {
        let format = HexFormat::builder()
            .byte_separator(" ")
            .byte_prefix("&#x")
            .byte_suffix(";")
            .build();
        assert_eq!(
            decode("&#x01; &#x02; &#x03;", &format).expect("decode"),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn affixed_bytes_case_folded() {
        let format = HexFormat::builder()
            .byte_prefix("0X")
            .byte_separator(", ")
            .build();
        assert_eq!(
            decode("0xAB, 0Xcd", &format).expect("decode"),
            vec![0xab, 0xcd]
        );
    }

    #[test]
    fn line_separator_tolerance() {
        let format = HexFormat::builder()
            .bytes_per_line(2)
            .bytes_per_group(1)
            .group_separator(" ")
            .build();
        let want = vec![1, 2, 3, 4, 5];
        assert_eq!(decode("01 02\n03 04\n05", &format).expect("lf"), want);
        assert_eq!(decode("01 02\r\n03 04\r\n05", &format).expect("crlf"), want);
        assert_eq!(decode("01 02\r03 04\r05", &format).expect("cr"), want);
    }

    #[test]
    fn missing_new_line() {
        let format = HexFormat::builder().bytes_per_line(1).build();
        let msg = invalid(decode("01 02", &format));
        assert_eq!(msg, "expected a new line at index 2, but was \" \"");
    }

    #[test]
    fn wrong_separator() {
        let format = HexFormat::builder()
            .bytes_per_group(1)
            .group_separator(".")
            .build();
        let msg = invalid(decode("d9-6e", &format));
        assert_eq!(msg, "expected group separator \".\" at index 2, but was \"-\"");
    }

    #[test]
    fn non_digit() {
        let format = HexFormat::default();
        let msg = invalid(decode("abxd", &format));
        assert_eq!(msg, "expected a hexadecimal digit at index 2, but was \"x\"");
    }

    #[test]
    fn truncated_byte() {
        let format = HexFormat::default();
        let msg = invalid(decode("abc", &format));
        assert_eq!(
            msg,
            "expected 2 hexadecimal digits at index 2, but the input ends at index 3"
        );
    }

    #[test]
    fn dangling_separator() {
        let format = HexFormat::builder().byte_separator(":").build();
        let msg = invalid(decode("ab:", &format));
        assert_eq!(
            msg,
            "expected 2 hexadecimal digits at index 3, but the input ends at index 3"
        );
    }

    #[test]
    fn missing_byte_prefix() {
        let format = HexFormat::builder().byte_prefix("#").build();
        let msg = invalid(decode("#ab cd", &format));
        assert_eq!(msg, "expected byte prefix \"#\" at index 3, but was \" \"");
    }

    #[test]
    fn truncated_byte_suffix() {
        let format = HexFormat::builder().byte_suffix(";;").build();
        let msg = invalid(decode("ab;", &format));
        assert_eq!(msg, "expected byte suffix \";;\" at index 2, but was \";\"");
    }

    #[test]
    fn multi_byte_char_in_message() {
        let format = HexFormat::default();
        let msg = invalid(decode("ab£d", &format));
        assert_eq!(msg, "expected a hexadecimal digit at index 2, but was \"£\"");
    }

    #[test]
    fn fast_and_general_pass_agree() {
        // force the general pass with a grouped twin of each unbroken
        // format and compare results
        let unbroken = HexFormat::builder()
            .byte_prefix("<")
            .byte_suffix(">")
            .byte_separator("-")
            .build();
        let mut grouped = unbroken.clone();
        grouped.bytes.bytes_per_line = 1 << 20;
        let text = "<aa>-<Bb>-<CC>";
        assert_eq!(
            decode(text, &unbroken).expect("fast"),
            decode(text, &grouped).expect("general")
        );
    }
}
