//! Per-slot spatial combination of normalised stations.

use crate::align::Cell;
use crate::location::Location;
use crate::result::Provenance;

/// Distance floor so a station sitting exactly on the target does not
/// produce an infinite weight.
const MIN_DISTANCE_KM: f64 = 1e-3;

/// A station normalised onto the target grid, ready for combination.
pub(crate) struct AlignedStation {
    /// Station location, if known. Unlocated stations are excluded from
    /// distance weighting but still usable as a sole candidate.
    pub location: Option<Location>,
    /// One cell per grid slot.
    pub cells: Vec<Cell>,
}

/// Combines per-station cells into one cell per slot.
///
/// A slot with a single candidate passes through with that candidate's
/// provenance. A slot with several candidates becomes the
/// inverse-distance-weighted average of the located candidates, tagged
/// [`Provenance::Interpolated`]; conflicting simultaneous values are
/// therefore always averaged, never arbitrarily chosen. When no candidate
/// has a location the unweighted mean is used instead.
pub(crate) fn combine(
    aligned: &[AlignedStation],
    target: &Location,
    idw_power: f64,
) -> Vec<Cell> {
    let n_slots = aligned.first().map_or(0, |s| s.cells.len());
    let mut out = vec![None; n_slots];

    for (slot, out_cell) in out.iter_mut().enumerate() {
        let candidates: Vec<(&AlignedStation, f64, Provenance)> = aligned
            .iter()
            .filter_map(|s| s.cells[slot].map(|(v, p)| (s, v, p)))
            .collect();

        *out_cell = match candidates.len() {
            0 => None,
            1 => Some((candidates[0].1, candidates[0].2)),
            _ => {
                let located: Vec<&(&AlignedStation, f64, Provenance)> = candidates
                    .iter()
                    .filter(|(s, _, _)| s.location.is_some())
                    .collect();

                if located.len() == 1 {
                    Some((located[0].1, located[0].2))
                } else if located.is_empty() {
                    let mean =
                        candidates.iter().map(|(_, v, _)| v).sum::<f64>() / candidates.len() as f64;
                    Some((mean, Provenance::Interpolated))
                } else {
                    let mut num = 0.0;
                    let mut den = 0.0;
                    for (s, v, _) in &located {
                        let d = s
                            .location
                            .as_ref()
                            .expect("located candidate")
                            .distance_km(target)
                            .max(MIN_DISTANCE_KM);
                        let w = d.powf(-idw_power);
                        num += w * v;
                        den += w;
                    }
                    Some((num / den, Provenance::Interpolated))
                }
            }
        };
    }

    out
}
