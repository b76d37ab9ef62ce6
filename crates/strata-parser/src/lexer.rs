//! Lexer for CSS length values.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{map, map_res, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use strata_core::ParseError;

/// Units understood inside grid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Percent,
    Fr,
    /// A bare number
    None,
}

/// A number with an optional unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Resolve to pixels. Percentages resolve against `total`; bare numbers
    /// count as pixels; fractions have no pixel value.
    pub fn to_px(&self, total: f64) -> Option<f64> {
        match self.unit {
            LengthUnit::Px | LengthUnit::None => Some(self.value),
            LengthUnit::Percent => Some(self.value / 100.0 * total),
            LengthUnit::Fr => None,
        }
    }
}

/// Parse a number (integer or float, optionally signed, `.5` allowed).
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            opt(alt((char('-'), char('+')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a unit suffix.
pub fn unit(input: &str) -> IResult<&str, LengthUnit> {
    alt((
        map(tag_no_case("px"), |_| LengthUnit::Px),
        map(tag("%"), |_| LengthUnit::Percent),
        map(tag_no_case("fr"), |_| LengthUnit::Fr),
    ))(input)
}

/// Parse a length: a number directly followed by an optional unit.
pub fn length(input: &str) -> IResult<&str, Length> {
    map(
        tuple((multispace0, number, opt(unit), multispace0)),
        |(_, value, unit, _)| Length {
            value,
            unit: unit.unwrap_or(LengthUnit::None),
        },
    )(input)
}

/// Parse a complete length value such as `"12px"`, `"50%"` or `"2fr"`.
pub fn parse_length(value: &str) -> Result<Length, ParseError> {
    match length(value) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rest, _)) => Err(ParseError::TrailingInput {
            value: value.to_string(),
            rest: rest.to_string(),
        }),
        Err(_) => Err(ParseError::InvalidLength {
            value: value.to_string(),
        }),
    }
}
