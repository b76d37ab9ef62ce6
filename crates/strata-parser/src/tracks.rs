//! Track template parsing (`grid-template-columns` / `grid-template-rows`).
//!
//! The parser turns a template into an ordered list of [`Track`]s:
//!
//! | token                      | track                                   |
//! |----------------------------|-----------------------------------------|
//! | `100px`, `100`             | `Fixed(100)`                            |
//! | `25%`                      | `Fixed(0.25 * basis)`                   |
//! | `2fr`, `fr`                | `Fractional(2)`, `Fractional(1)`        |
//! | `minmax(100px, 1fr)`       | `Fixed(100)` with minmax metadata       |
//! | `minmax(100px, 200px)`     | `Fixed(100)`                            |
//! | anything else              | `Fixed(0)`                              |
//!
//! `repeat(<n>, ...)` is expanded literally. `repeat(auto-fill | auto-fit, ...)`
//! is estimated: fr units count as a 100px baseline when measuring one
//! repetition, and `count = max(1, floor(total / repetition_width))`. True CSS
//! resolution depends on item intrinsic sizes, so this is a heuristic only.
//!
//! Percentages resolve against the basis left once the gaps between the final
//! tracks are taken out: `max(0, total - gap * (count - 1))`.

use strata_core::Track;
use tracing::{trace, warn};

use crate::lexer::{parse_length, LengthUnit};

/// Upper bound on the number of tracks a single template may expand to.
pub const MAX_TRACKS: usize = 256;

/// Pixel width one fr unit is assumed to need when estimating auto repeats.
const FR_BASELINE_PX: f64 = 100.0;

/// Parse a track template against the axis length `total` and inter-track `gap`.
///
/// Returns `None` when the template is absent or empty.
pub fn parse_track_spec(spec: &str, total: f64, gap: f64) -> Option<Vec<Track>> {
    parse_track_spec_with_limit(spec, total, gap, MAX_TRACKS)
}

/// Like [`parse_track_spec`] with an explicit cap on the track count.
pub fn parse_track_spec_with_limit(spec: &str, total: f64, gap: f64, max_tracks: usize) -> Option<Vec<Track>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    let max_tracks = max_tracks.max(1);
    let expanded = expand_repeats(spec, total, max_tracks);
    let mut tokens = tokenize_tracks(&expanded);
    if tokens.is_empty() {
        return None;
    }
    if tokens.len() > max_tracks {
        warn!(count = tokens.len(), max_tracks, "track template truncated");
        tokens.truncate(max_tracks);
    }

    let basis = (total - gap.max(0.0) * (tokens.len() - 1) as f64).max(0.0);
    let tracks: Vec<Track> = tokens.iter().map(|t| classify_token(t, basis)).collect();
    trace!(spec, count = tracks.len(), "parsed track template");
    Some(tracks)
}

/// Split a template on whitespace outside parentheses.
///
/// `minmax(100px, 1fr)` stays a single token.
pub fn tokenize_tracks(spec: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, ch) in spec.char_indices() {
        match ch {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                start.get_or_insert(i);
            }
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&spec[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&spec[s..]);
    }
    tokens
}

/// Classify a single token; `basis` is what percentages resolve against.
fn classify_token(token: &str, basis: f64) -> Track {
    if token.eq_ignore_ascii_case("fr") {
        return Track::fractional(1.0);
    }

    if let Some((min, max)) = function_args(token, "minmax") {
        return classify_minmax(min, max, basis);
    }

    match parse_length(token) {
        Ok(length) if length.value >= 0.0 => match length.unit {
            LengthUnit::Fr => Track::fractional(length.value),
            _ => Track::fixed(length.to_px(basis).unwrap_or(0.0)),
        },
        _ => Track::fixed(0.0),
    }
}

fn classify_minmax(min: &str, max: &str, basis: f64) -> Track {
    let min_px = parse_length(min)
        .ok()
        .filter(|l| l.value >= 0.0)
        .and_then(|l| l.to_px(basis));

    let Some(min_px) = min_px else {
        // Content-sized minimums have no pixel floor to offer
        return Track::fixed(0.0);
    };

    let max_fr = if max.trim().eq_ignore_ascii_case("fr") {
        Some(1.0)
    } else {
        parse_length(max)
            .ok()
            .filter(|l| l.unit == LengthUnit::Fr && l.value > 0.0)
            .map(|l| l.value)
    };

    match max_fr {
        Some(max_fr) => Track::min_max(min_px, max_fr),
        None => Track::fixed(min_px),
    }
}

/// Split `name(a, b)` into its two top-level arguments.
fn function_args<'a>(token: &'a str, name: &str) -> Option<(&'a str, &'a str)> {
    let open = token.find('(')?;
    if !token[..open].trim().eq_ignore_ascii_case(name) || !token.ends_with(')') {
        return None;
    }
    let inner = &token[open + 1..token.len() - 1];
    let comma = top_level_comma(inner)?;
    Some((inner[..comma].trim(), inner[comma + 1..].trim()))
}

fn top_level_comma(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// A `repeat(...)` clause located inside a template.
struct RepeatClause<'a> {
    /// Byte range of the whole clause
    start: usize,
    end: usize,
    count: &'a str,
    list: &'a str,
}

/// Find the first well-formed `repeat(` clause at or after `from`.
fn find_repeat(spec: &str, from: usize) -> Option<RepeatClause<'_>> {
    let lower = spec.to_ascii_lowercase();
    let mut search = from;

    while let Some(offset) = lower.get(search..)?.find("repeat") {
        let start = search + offset;
        let after = start + "repeat".len();
        search = after;

        let boundary = spec[..start]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == '(' || c == ',');
        if !boundary {
            continue;
        }
        let rest = &spec[after..];
        let open = after + (rest.len() - rest.trim_start().len());
        if !spec[open..].starts_with('(') {
            continue;
        }

        // Unterminated clause: nothing after it can be well-formed either
        let end = matching_paren(spec, open)?;
        let inner = &spec[open + 1..end - 1];
        match top_level_comma(inner) {
            Some(comma) => {
                return Some(RepeatClause {
                    start,
                    end,
                    count: inner[..comma].trim(),
                    list: inner[comma + 1..].trim(),
                })
            }
            None => search = end,
        }
    }
    None
}

/// Byte index just past the parenthesis closing the one at `open`.
fn matching_paren(spec: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in spec[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Expand every `repeat()` clause, re-scanning after each substitution so that
/// repeats produced by an expansion are expanded too.
fn expand_repeats(spec: &str, total: f64, max_tracks: usize) -> String {
    let mut out = spec.to_string();
    let mut cursor = 0;
    let mut passes = 0;

    while let Some(clause) = find_repeat(&out, cursor) {
        passes += 1;
        if passes > max_tracks {
            warn!(spec, "giving up on repeat() expansion");
            break;
        }

        let per_repetition = tokenize_tracks(clause.list).len();
        let Some(requested) = repeat_count(clause.count, clause.list, total) else {
            // Leave it in place; it tokenizes to an unrecognized track
            cursor = clause.end;
            continue;
        };
        if per_repetition == 0 {
            let start = clause.start;
            out.replace_range(start..clause.end, "");
            cursor = start;
            continue;
        }

        let outside = tokenize_tracks(&out[..clause.start]).len() + tokenize_tracks(&out[clause.end..]).len();
        let budget = max_tracks.saturating_sub(outside) / per_repetition;
        let count = requested.min(budget.max(1));
        if count < requested {
            warn!(requested, count, max_tracks, "repeat() count capped");
        }

        let replacement = vec![clause.list; count].join(" ");
        let start = clause.start;
        out.replace_range(clause.start..clause.end, &replacement);
        cursor = start;
    }
    out
}

/// Number of repetitions for a `repeat()` count argument.
fn repeat_count(count: &str, list: &str, total: f64) -> Option<usize> {
    if count.eq_ignore_ascii_case("auto-fill") || count.eq_ignore_ascii_case("auto-fit") {
        let width = repetition_min_width(list, total);
        if width <= 0.0 || total <= 0.0 {
            return Some(1);
        }
        // Allow for float noise when the tracks fit exactly
        let fits = ((total + 1e-6) / width).floor();
        return Some((fits as usize).max(1));
    }
    count.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Best-effort minimum width of one repetition of `list`.
fn repetition_min_width(list: &str, total: f64) -> f64 {
    tokenize_tracks(list)
        .into_iter()
        .map(|token| {
            if token.eq_ignore_ascii_case("fr") {
                return FR_BASELINE_PX;
            }
            if let Some((min, _)) = function_args(token, "minmax") {
                return parse_length(min)
                    .ok()
                    .and_then(|l| l.to_px(total))
                    .filter(|px| *px > 0.0)
                    .unwrap_or(0.0);
            }
            match parse_length(token) {
                Ok(l) if l.unit == LengthUnit::Fr => FR_BASELINE_PX * l.value.max(0.0),
                Ok(l) if l.unit != LengthUnit::None => l.to_px(total).unwrap_or(0.0).max(0.0),
                _ => 0.0,
            }
        })
        .sum()
}
