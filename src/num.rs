//! Fixed-width integer formatting and parsing.
//!
//! A value is treated as an unsigned nibble sequence of its width; signed
//! types bit-cast through their unsigned twin. Formatting never fails (the
//! output is at most prefix + 16 digits + suffix); parsing reports
//! [`Error::InvalidFormat`] with the failing byte index.

use alloc::format;
use alloc::string::String;

use crate::decode::{expect_digit, expect_literal, snippet};
use crate::digits;
use crate::format::HexFormat;
use crate::types::{check_range, Error, Result};

const MAX_NIBBLES: usize = 16;

fn format_long(value: u64, nibbles: usize, format: &HexFormat) -> String {
    debug_assert!(nibbles >= 1 && nibbles <= MAX_NIBBLES);
    let table = digits::table(format.upper_case);
    let nf = &format.number;
    let mut scratch = [0u8; MAX_NIBBLES];
    for (pos, slot) in scratch[..nibbles].iter_mut().enumerate() {
        let shift = 4 * (nibbles - 1 - pos);
        *slot = table[((value >> shift) & 0xf) as usize];
    }
    let written = &scratch[..nibbles];
    let lead = if nf.remove_leading_zeros {
        // keep at least one digit; zero renders as "0"
        written[..nibbles - 1]
            .iter()
            .take_while(|&&d| d == b'0')
            .count()
    } else {
        0
    };
    let digits_str = core::str::from_utf8(&written[lead..]).expect("ascii digits");
    if nf.is_digits_only() {
        return String::from(digits_str);
    }
    let mut out = String::with_capacity(nf.prefix.len() + nibbles + nf.suffix.len());
    out.push_str(&nf.prefix);
    out.push_str(digits_str);
    out.push_str(&nf.suffix);
    out
}

fn parse_long(
    input: &str,
    start: usize,
    end: usize,
    format: &HexFormat,
    max_digits: usize,
) -> Result<u64> {
    check_range(input.len(), start, end)?;
    let src = input.as_bytes();
    let nf = &format.number;
    let prefix = nf.prefix.as_bytes();
    let suffix = nf.suffix.as_bytes();
    if end - start < prefix.len() + suffix.len() + 1 {
        return Err(Error::InvalidFormat(format!(
            "expected at least 1 hexadecimal digit between prefix \"{}\" and suffix \"{}\" at index {start}, but was \"{}\"",
            nf.prefix,
            nf.suffix,
            snippet(src, start, end)
        )));
    }
    let ds = expect_literal(src, start, end, prefix, "prefix")?;
    let de = end - suffix.len();
    expect_literal(src, de, end, suffix, "suffix")?;
    if de - ds > max_digits {
        return Err(Error::InvalidFormat(format!(
            "expected at most {max_digits} hexadecimal digits at index {ds}, but the digit part is of length {}",
            de - ds
        )));
    }
    let mut value = 0u64;
    for i in ds..de {
        value = (value << 4) | u64::from(expect_digit(src, i)?);
    }
    Ok(value)
}

macro_rules! int_codec {
    ($ty:ty as $uty:ty, $nibbles:expr, $format_fn:ident, $parse_fn:ident, $parse_range_fn:ident) => {
        pub fn $format_fn(value: $ty, format: &HexFormat) -> String {
            format_long(value as $uty as u64, $nibbles, format)
        }

        pub fn $parse_fn(input: &str, format: &HexFormat) -> Result<$ty> {
            $parse_range_fn(input, 0, input.len(), format)
        }

        pub fn $parse_range_fn(
            input: &str,
            start: usize,
            end: usize,
            format: &HexFormat,
        ) -> Result<$ty> {
            parse_long(input, start, end, format, $nibbles).map(|v| v as $uty as $ty)
        }
    };
}

int_codec!(u8 as u8, 2, format_u8, parse_u8, parse_u8_range);
int_codec!(u16 as u16, 4, format_u16, parse_u16, parse_u16_range);
int_codec!(u32 as u32, 8, format_u32, parse_u32, parse_u32_range);
int_codec!(u64 as u64, 16, format_u64, parse_u64, parse_u64_range);
int_codec!(i8 as u8, 2, format_i8, parse_i8, parse_i8_range);
int_codec!(i16 as u16, 4, format_i16, parse_i16, parse_i16_range);
int_codec!(i32 as u32, 8, format_i32, parse_i32, parse_i32_range);
int_codec!(i64 as u64, 16, format_i64, parse_i64, parse_i64_range);
