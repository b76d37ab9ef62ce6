//! Track sizing: parsed tracks plus an axis length into pixel lengths.

use strata_core::{Track, TrackList};
use strata_parser::parse_track_spec;

/// Resolve tracks into pixel lengths for an axis of length `total`.
///
/// Fixed tracks keep their literal size. When any fractional track is present,
/// the space left after gaps and fixed tracks is shared out per fr unit, and
/// minmax tracks grow to `per_fr * max_fr` but never shrink below their minimum.
/// No rounding is applied here.
pub fn size_tracks(tracks: &[Track], total: f64, gap: f64) -> TrackList {
    let count = tracks.len();
    let total_gap = gap * count.saturating_sub(1) as f64;
    let available = (total - total_gap).max(0.0);

    let mut fixed_total = 0.0_f64;
    let mut fraction_total = 0.0_f64;
    for track in tracks {
        match track {
            Track::Fixed { px, minmax } => fixed_total += minmax.map_or(*px, |m| m.min_px),
            Track::Fractional(fr) => fraction_total += fr,
        }
    }

    if fraction_total <= 0.0 {
        return TrackList::new(
            tracks
                .iter()
                .map(|track| match track {
                    Track::Fixed { px, minmax } => minmax.map_or(*px, |m| m.min_px),
                    Track::Fractional(_) => 0.0,
                })
                .collect(),
        );
    }

    let remaining = (available - fixed_total).max(0.0);
    let fr_unit = remaining / fraction_total;

    TrackList::new(
        tracks
            .iter()
            .map(|track| match track {
                Track::Fixed { px, minmax: None } => *px,
                Track::Fixed { minmax: Some(m), .. } => m.min_px.max(fr_unit * m.max_fr),
                Track::Fractional(fr) => fr * fr_unit,
            })
            .collect(),
    )
}

/// Parse and size a track template in one step.
///
/// Returns `None` when the template is absent or empty.
pub fn resolve_track_spec(spec: &str, total: f64, gap: f64) -> Option<TrackList> {
    parse_track_spec(spec, total, gap).map(|tracks| size_tracks(&tracks, total, gap))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn percentage_axis_fills_total(
            shares in proptest::collection::vec(1u32..50, 1..8),
            total in 0.0f64..4000.0,
            gap in 0.0f64..24.0,
        ) {
            let sum: u32 = shares.iter().sum();
            let spec = shares
                .iter()
                .map(|s| format!("{}%", *s as f64 * 100.0 / sum as f64))
                .collect::<Vec<_>>()
                .join(" ");
            let tracks = resolve_track_spec(&spec, total, gap).unwrap();
            let gaps = gap * (shares.len() - 1) as f64;
            prop_assume!(total >= gaps);
            prop_assert!((tracks.total_with_gaps(gap) - total).abs() < 1.0);
        }

        #[test]
        fn fractions_never_overflow_axis(
            frs in proptest::collection::vec(1u32..6, 1..8),
            fixed in 0.0f64..300.0,
            total in 0.0f64..4000.0,
            gap in 0.0f64..24.0,
        ) {
            let mut spec = format!("{fixed}px");
            for fr in &frs {
                spec.push_str(&format!(" {fr}fr"));
            }
            let tracks = resolve_track_spec(&spec, total, gap).unwrap();
            let gaps = gap * frs.len() as f64;
            prop_assert!(tracks.iter().all(|px| px >= 0.0));
            if total >= gaps + fixed {
                prop_assert!((tracks.total_with_gaps(gap) - total).abs() < 1.0);
            }
        }
    }
}
