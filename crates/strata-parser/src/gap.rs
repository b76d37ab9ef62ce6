//! `gap` parsing.

use strata_core::GapValue;

use crate::lexer::{parse_length, LengthUnit};

/// Row and column gaps in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gap {
    pub row: f64,
    pub column: f64,
}

impl Gap {
    pub fn uniform(px: f64) -> Self {
        Self { row: px, column: px }
    }
}

/// Parse a captured gap.
///
/// `12`, `"12"`, and `"12px"` apply to both axes; `"12px 8px"` is the
/// `row column` shorthand. Anything that is not a non-negative pixel value
/// counts as zero.
pub fn parse_gap(value: &GapValue) -> Gap {
    match value {
        GapValue::Number(n) => Gap::uniform(sanitize(*n)),
        GapValue::Text(text) => {
            let mut parts = text.split_whitespace().map(gap_px);
            match (parts.next(), parts.next()) {
                (Some(row), Some(column)) => Gap { row, column },
                (Some(both), None) => Gap::uniform(both),
                _ => Gap::default(),
            }
        }
    }
}

fn gap_px(token: &str) -> f64 {
    match parse_length(token) {
        Ok(length) if matches!(length.unit, LengthUnit::Px | LengthUnit::None) => sanitize(length.value),
        _ => 0.0,
    }
}

fn sanitize(px: f64) -> f64 {
    if px.is_finite() && px > 0.0 {
        px
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_gap() {
        assert_eq!(parse_gap(&GapValue::Number(12.0)), Gap::uniform(12.0));
        assert_eq!(parse_gap(&GapValue::Number(-3.0)), Gap::uniform(0.0));
    }

    #[test]
    fn test_text_gap() {
        assert_eq!(parse_gap(&GapValue::Text("10px".into())), Gap::uniform(10.0));
        assert_eq!(parse_gap(&GapValue::Text("8".into())), Gap::uniform(8.0));
        assert_eq!(
            parse_gap(&GapValue::Text("12px 4px".into())),
            Gap { row: 12.0, column: 4.0 }
        );
    }

    #[test]
    fn test_unparsable_gap_is_zero() {
        assert_eq!(parse_gap(&GapValue::Text("normal".into())), Gap::default());
        assert_eq!(parse_gap(&GapValue::Text("".into())), Gap::default());
        assert_eq!(parse_gap(&GapValue::Text("5%".into())), Gap::uniform(0.0));
    }
}
