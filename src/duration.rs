//! Interval string parsing
//!
//! Window widths arrive as short duration strings such as `"1m"`, `"90s"`,
//! `"1h30m"` or `"1.5s"`: an optional sign followed by one or more
//! `<decimal><unit>` terms. Recognised units are `ns`, `us` (or `µs`), `ms`,
//! `s`, `m` and `h`. The bare literal `"0"` is also accepted.

use crate::error::{Error, Result};
use chrono::TimeDelta;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit0, one_of},
    combinator::{all_consuming, map, opt},
    multi::many1,
    sequence::{pair, preceded, tuple},
    IResult,
};

/// Digits kept from a fractional part; anything finer is below a nanosecond
const MAX_FRACTION_DIGITS: usize = 20;

#[derive(Debug, PartialEq)]
struct Term<'a> {
    whole: &'a str,
    fraction: Option<&'a str>,
    unit: &'a str,
}

fn is_unit_char(c: char) -> bool {
    c != '.' && !c.is_ascii_digit()
}

fn term(input: &str) -> IResult<&str, Term<'_>> {
    map(
        tuple((
            digit0,
            opt(preceded(char('.'), digit0)),
            take_while1(is_unit_char),
        )),
        |(whole, fraction, unit)| Term {
            whole,
            fraction,
            unit,
        },
    )(input)
}

fn interval(input: &str) -> IResult<&str, (Option<char>, Vec<Term<'_>>)> {
    all_consuming(pair(opt(one_of("+-")), many1(term)))(input)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}

fn term_nanos(raw: &str, term: &Term<'_>) -> Result<u128> {
    let fraction = term.fraction.unwrap_or("");
    if term.whole.is_empty() && fraction.is_empty() {
        return Err(Error::invalid_interval(
            raw,
            format!("missing number before unit '{}'", term.unit),
        ));
    }

    let scale = unit_nanos(term.unit)
        .ok_or_else(|| Error::invalid_interval(raw, format!("unknown unit '{}'", term.unit)))?;
    let overflow = || Error::invalid_interval(raw, "interval overflows");

    let whole: u128 = if term.whole.is_empty() {
        0
    } else {
        term.whole.parse().map_err(|_| overflow())?
    };
    let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let digits: u128 = fraction.parse().map_err(|_| overflow())?;
        let divisor = 10u128.pow(fraction.len() as u32);
        nanos = nanos
            .checked_add(digits * scale / divisor)
            .ok_or_else(overflow)?;
    }

    Ok(nanos)
}

/// Parse a window interval string into a signed duration
///
/// Sign and magnitude are returned as written; rejecting non-positive
/// intervals is left to the caller.
pub fn parse_interval(raw: &str) -> Result<TimeDelta> {
    if raw.is_empty() {
        return Err(Error::invalid_interval(raw, "empty interval"));
    }
    if raw == "0" {
        return Ok(TimeDelta::zero());
    }

    let (_, (sign, terms)) = interval(raw)
        .map_err(|_| Error::invalid_interval(raw, "expected one or more <number><unit> terms"))?;

    let mut total: u128 = 0;
    for term in &terms {
        total = total
            .checked_add(term_nanos(raw, term)?)
            .ok_or_else(|| Error::invalid_interval(raw, "interval overflows"))?;
    }

    let magnitude =
        i64::try_from(total).map_err(|_| Error::invalid_interval(raw, "interval overflows"))?;
    let nanos = if sign == Some('-') { -magnitude } else { magnitude };
    Ok(TimeDelta::nanoseconds(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("1m", TimeDelta::minutes(1))]
    #[case("60s", TimeDelta::seconds(60))]
    #[case("1h30m", TimeDelta::minutes(90))]
    #[case("1.5s", TimeDelta::milliseconds(1500))]
    #[case(".5m", TimeDelta::seconds(30))]
    #[case("2.h", TimeDelta::hours(2))]
    #[case("250ms", TimeDelta::milliseconds(250))]
    #[case("10us", TimeDelta::microseconds(10))]
    #[case("10µs", TimeDelta::microseconds(10))]
    #[case("7ns", TimeDelta::nanoseconds(7))]
    #[case("+5s", TimeDelta::seconds(5))]
    #[case("-2m", TimeDelta::minutes(-2))]
    #[case("0", TimeDelta::zero())]
    #[case("0s", TimeDelta::zero())]
    fn test_parse_valid(#[case] raw: &str, #[case] expected: TimeDelta) {
        assert_eq!(parse_interval(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("m")]
    #[case(".s")]
    #[case("1x")]
    #[case("1sec")]
    #[case("invalid")]
    #[case("1m-")]
    #[case("--1m")]
    #[case("99999999999999999999h")]
    #[case("3000000h")]
    fn test_parse_invalid(#[case] raw: &str) {
        let err = parse_interval(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInterval, "{raw}");
    }

    #[test]
    fn test_unknown_unit_message() {
        let err = parse_interval("5d").unwrap_err();
        assert_eq!(err.to_string(), "invalid interval '5d': unknown unit 'd'");
    }
}
