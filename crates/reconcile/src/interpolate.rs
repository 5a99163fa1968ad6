//! Bounded in-station gap interpolation.

use crate::align::Cell;
use crate::result::Provenance;

/// Fills interior gaps of at most `max_gap` consecutive missing slots by
/// linear interpolation between the bracketing values.
///
/// Filled slots get [`Provenance::Interpolated`]. Gaps longer than
/// `max_gap`, and leading or trailing runs with only one bracket, are left
/// missing for spatial combination to resolve. A `max_gap` of zero disables
/// filling entirely.
pub(crate) fn fill_gaps(cells: &mut [Cell], max_gap: usize) {
    if max_gap == 0 {
        return;
    }

    let mut prev: Option<usize> = None;
    for i in 0..cells.len() {
        if cells[i].is_none() {
            continue;
        }
        if let Some(a) = prev {
            let gap = i - a - 1;
            if gap > 0 && gap <= max_gap {
                let va = cells[a].expect("bracket present").0;
                let vb = cells[i].expect("bracket present").0;
                let span = (i - a) as f64;
                for j in (a + 1)..i {
                    let frac = (j - a) as f64 / span;
                    cells[j] = Some((va + (vb - va) * frac, Provenance::Interpolated));
                }
            }
        }
        prev = Some(i);
    }
}
