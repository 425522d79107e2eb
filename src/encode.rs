//! Byte-array formatting.
//!
//! The output buffer is allocated once from [`size::formatted_len`] and
//! filled in a single pass. Configurations without line wrapping or
//! grouping take a specialized path that carries no counter state.

use alloc::string::String;
use alloc::vec::Vec;

use crate::digits;
use crate::format::HexFormat;
use crate::size;
use crate::types::{check_range, Result};

/// Format all of `bytes` under `format`.
pub fn encode(bytes: &[u8], format: &HexFormat) -> Result<String> {
    encode_range(bytes, 0, bytes.len(), format)
}

/// Format `bytes[start..end]` under `format`.
pub fn encode_range(bytes: &[u8], start: usize, end: usize, format: &HexFormat) -> Result<String> {
    check_range(bytes.len(), start, end)?;
    if start == end {
        return Ok(String::new());
    }
    let src = &bytes[start..end];
    let len = size::formatted_len(src.len(), &format.bytes)?;
    let mut out = Vec::with_capacity(len);
    let table = digits::table(format.upper_case);
    if format.bytes.has_breaks() {
        encode_general(src, format, table, &mut out);
    } else {
        encode_unbroken(src, format, table, &mut out);
    }
    debug_assert_eq!(out.len(), len);
    // every piece written is a valid UTF-8 fragment
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[inline]
fn push_byte(out: &mut Vec<u8>, table: &[u8; 16], b: u8) {
    out.push(table[(b >> 4) as usize]);
    out.push(table[(b & 0x0f) as usize]);
}

// No line wrapping, no grouping.
fn encode_unbroken(src: &[u8], format: &HexFormat, table: &[u8; 16], out: &mut Vec<u8>) {
    let bp = format.bytes.byte_prefix.as_bytes();
    let bx = format.bytes.byte_suffix.as_bytes();
    let bs = format.bytes.byte_separator.as_bytes();
    if bp.is_empty() && bx.is_empty() && bs.is_empty() {
        for &b in src {
            push_byte(out, table, b);
        }
    } else if bp.is_empty() && bx.is_empty() && bs.len() == 1 {
        let sep = bs[0];
        push_byte(out, table, src[0]);
        for &b in &src[1..] {
            out.push(sep);
            push_byte(out, table, b);
        }
    } else {
        encode_per_byte(src, bp, bx, bs, table, out);
    }
}

fn encode_per_byte(
    src: &[u8],
    bp: &[u8],
    bx: &[u8],
    bs: &[u8],
    table: &[u8; 16],
    out: &mut Vec<u8>,
) {
    let mut first = true;
    for &b in src {
        if !first {
            out.extend_from_slice(bs);
        }
        first = false;
        out.extend_from_slice(bp);
        push_byte(out, table, b);
        out.extend_from_slice(bx);
    }
}

fn encode_general(src: &[u8], format: &HexFormat, table: &[u8; 16], out: &mut Vec<u8>) {
    let bf = &format.bytes;
    let bp = bf.byte_prefix.as_bytes();
    let bx = bf.byte_suffix.as_bytes();
    let bs = bf.byte_separator.as_bytes();
    let gs = bf.group_separator.as_bytes();
    let mut index_in_line = 0usize;
    let mut index_in_group = 0usize;
    for &b in src {
        if index_in_line == bf.bytes_per_line {
            out.push(b'\n');
            index_in_line = 0;
            index_in_group = 0;
        } else if index_in_group == bf.bytes_per_group {
            out.extend_from_slice(gs);
            index_in_group = 0;
        } else if index_in_group != 0 {
            out.extend_from_slice(bs);
        }
        out.extend_from_slice(bp);
        push_byte(out, table, b);
        out.extend_from_slice(bx);
        index_in_line += 1;
        index_in_group += 1;
    }
}
