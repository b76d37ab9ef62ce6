//! Parsers for the grid values a capture carries.
//!
//! - [`parse_track_spec`]: `grid-template-columns` / `grid-template-rows` into [`Track`]s
//! - [`parse_area_spec`] and [`build_area_map`]: `grid-template-areas` into named boxes
//! - [`parse_gap`]: `gap` shorthand into row and column pixels
//!
//! None of these fail hard. An absent or empty template parses to `None`, which
//! tells the caller there is no explicit grid on that axis; an unreadable track
//! becomes a zero-width fixed track.
//!
//! [`Track`]: strata_core::Track

pub mod areas;
pub mod gap;
pub mod lexer;
pub mod tracks;

pub use areas::{build_area_map, parse_area_spec};
pub use gap::{parse_gap, Gap};
pub use lexer::{parse_length, Length, LengthUnit};
pub use tracks::{parse_track_spec, parse_track_spec_with_limit, tokenize_tracks, MAX_TRACKS};
