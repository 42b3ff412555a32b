use winnow::ascii::digit1;
use winnow::combinator::{alt, eof, opt};
use winnow::token::{literal, take_while};
use winnow::{Parser, Result};

/// A token that is not a well-formed integer.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct NumberError;

/// Parses an integer the way C's `atoi` does.
///
/// Leading whitespace and a sign are accepted, followed by as many decimal
/// digits as are present. Anything after the digits is ignored. A token with
/// no digits reads as zero, and values that do not fit wrap around.
///
/// Examples:
///
/// - `"13"` -> 13
/// - `"-4"` -> -4
/// - `"12abc"` -> 12
/// - `"abc"` -> 0
pub fn parse_legacy_int(token: &[u8]) -> i32 {
    let mut input = token;
    parse_atoi.parse_next(&mut input).unwrap_or(0)
}

/// Parses an integer, rejecting anything that is not entirely a number.
///
/// Examples of valid input:
///
/// - `"13"`
/// - `"+13"`
/// - `"-13"`
pub fn parse_strict_int(token: &[u8]) -> core::result::Result<i32, NumberError> {
    let mut input = token;
    parse_whole_int
        .parse_next(&mut input)
        .map_err(|_| NumberError)
}

/// Parse an optional sign ("+" or "-") as a multiplier, defaulting to
/// positive.
fn parse_opt_sign<'s>(input: &mut &'s [u8]) -> Result<i32> {
    opt(alt((literal("+").value(1), literal("-").value(-1))))
        .map(|sign| sign.unwrap_or(1))
        .parse_next(input)
}

fn parse_atoi<'s>(input: &mut &'s [u8]) -> Result<i32> {
    take_while(0.., |b: u8| b.is_ascii_whitespace()).parse_next(input)?;
    let sign = parse_opt_sign.parse_next(input)?;
    let magnitude = take_while(0.., |b: u8| b.is_ascii_digit())
        .map(|digits: &[u8]| {
            digits.iter().fold(0i32, |acc, digit| {
                acc.wrapping_mul(10).wrapping_add(i32::from(digit - b'0'))
            })
        })
        .parse_next(input)?;
    Ok(sign.wrapping_mul(magnitude))
}

fn parse_whole_int<'s>(input: &mut &'s [u8]) -> Result<i32> {
    let value = (parse_opt_sign, digit1.verify_map(checked_magnitude))
        .try_map(|(sign, magnitude)| {
            i32::try_from(i64::from(sign) * magnitude)
        })
        .parse_next(input)?;
    eof.parse_next(input)?;
    Ok(value)
}

/// Decimal value of a run of digits, or `None` once it no longer fits.
fn checked_magnitude(digits: &[u8]) -> Option<i64> {
    digits.iter().try_fold(0i64, |acc, digit| {
        acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
    })
}
