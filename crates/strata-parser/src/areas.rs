//! `grid-template-areas` parsing.
//!
//! A template such as `"'a a b' 'c d b'"` becomes an [`AreaGrid`] with one row per
//! quoted string, and [`build_area_map`] derives each name's bounding box.
//!
//! Names are not required to cover a rectangle. A name whose cells form an
//! L-shape (or are disjoint) gets the bounding box of all of its cells, so two
//! boxes may overlap. This is a known approximation of the CSS rules, which
//! reject such templates outright.

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::char,
    sequence::delimited,
    IResult,
};
use strata_core::{AreaGrid, AreaMap};

/// Token marking a cell that belongs to no area.
pub const EMPTY_CELL: &str = ".";

/// Parse a single- or double-quoted, non-empty string.
fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), is_not("'"), char('\'')),
        delimited(char('"'), is_not("\""), char('"')),
    ))(input)
}

/// Parse a `grid-template-areas` value into rows of area names.
///
/// Returns `None` when no quoted row is found.
pub fn parse_area_spec(spec: &str) -> Option<AreaGrid> {
    let mut rows = Vec::new();
    let mut rest = spec;

    while let Some(pos) = rest.find(['\'', '"']) {
        match quoted(&rest[pos..]) {
            Ok((remaining, row)) => {
                let cells: Vec<String> = row.split_whitespace().map(normalize_cell).collect();
                if !cells.is_empty() {
                    rows.push(cells);
                }
                rest = remaining;
            }
            // A stray quote: skip it and keep scanning
            Err(_) => rest = &rest[pos + 1..],
        }
    }

    if rows.is_empty() {
        None
    } else {
        Some(AreaGrid(rows))
    }
}

/// Runs of dots (`...`) all mean an empty cell.
fn normalize_cell(token: &str) -> String {
    if token.chars().all(|c| c == '.') {
        EMPTY_CELL.to_string()
    } else {
        token.to_string()
    }
}

/// Map each area name to the bounding box of the cells it occupies.
///
/// Returns `None` when the grid names no area at all.
pub fn build_area_map(grid: &AreaGrid) -> Option<AreaMap> {
    let mut map = AreaMap::new();
    for (row, cells) in grid.iter_rows().enumerate() {
        for (column, name) in cells.iter().enumerate() {
            if name.is_empty() || name == EMPTY_CELL {
                continue;
            }
            map.include(name, row, column);
        }
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::AreaBox;

    #[test]
    fn test_parse_rows() {
        let grid = parse_area_spec("'a a b' 'c d b'").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(0, 0), Some("a"));
        assert_eq!(grid.get(1, 2), Some("b"));
    }

    #[test]
    fn test_parse_double_quotes_and_dots() {
        let grid = parse_area_spec("\"head head\"\n\"... main\"").unwrap();
        assert_eq!(grid.get(0, 1), Some("head"));
        assert_eq!(grid.get(1, 0), Some("."));
    }

    #[test]
    fn test_no_quoted_rows() {
        assert_eq!(parse_area_spec(""), None);
        assert_eq!(parse_area_spec("none"), None);
        assert_eq!(parse_area_spec("'' '   '"), None);
    }

    #[test]
    fn test_stray_quote_is_skipped() {
        let grid = parse_area_spec("' \"a b\"").unwrap();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.get(0, 1), Some("b"));
    }

    #[test]
    fn test_build_area_map() {
        let map = build_area_map(&parse_area_spec("'a a b' 'c d b'").unwrap()).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("a"), Some(&AreaBox { row_start: 0, row_end: 0, col_start: 0, col_end: 1 }));
        assert_eq!(map.get("b"), Some(&AreaBox { row_start: 0, row_end: 1, col_start: 2, col_end: 2 }));
        assert_eq!(map.get("c"), Some(&AreaBox { row_start: 1, row_end: 1, col_start: 0, col_end: 0 }));
        assert_eq!(map.get("d"), Some(&AreaBox { row_start: 1, row_end: 1, col_start: 1, col_end: 1 }));
    }

    #[test]
    fn test_non_rectangular_area_is_bounding_boxed() {
        let map = build_area_map(&parse_area_spec("'a a' 'a b'").unwrap()).unwrap();
        assert_eq!(map.get("a"), Some(&AreaBox { row_start: 0, row_end: 1, col_start: 0, col_end: 1 }));
    }

    #[test]
    fn test_all_empty_cells_is_none() {
        assert_eq!(build_area_map(&parse_area_spec("'. .' '. .'").unwrap()), None);
    }
}
