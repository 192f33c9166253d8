//! Spawn rooftop selection
//!
//! Each player spawns on a building in their third of the city. A candidate
//! is skipped when a much taller building stands within the throw window in
//! front of it, since every reasonable shot would hit that wall.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::skyline::Building;
use crate::settings::GameSettings;

/// Which edge of the city a player spawns on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal throw direction toward the opponent
    #[inline]
    pub fn forward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Result of rooftop selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RooftopPick {
    /// Index into the skyline
    pub index: usize,
    /// True when no candidate passed the clearance check
    pub fallback: bool,
}

/// Candidate building indices for a side
pub fn candidate_range(n: usize, side: Side) -> std::ops::Range<usize> {
    if n < 6 {
        return 0..n;
    }
    match side {
        Side::Left => 1..(n / 3).max(2),
        Side::Right => (2 * n / 3).min(n - 2)..n - 1,
    }
}

/// Whether the building at `index` has a clear throw toward `side.forward()`
pub fn has_clearance(
    skyline: &[Building],
    index: usize,
    side: Side,
    settings: &GameSettings,
) -> bool {
    let candidate = &skyline[index];
    let cx = candidate.roof_center_x();
    let (lo, hi) = match side {
        Side::Left => (cx, cx + settings.clearance_window),
        Side::Right => (cx - settings.clearance_window, cx),
    };

    skyline.iter().enumerate().all(|(j, other)| {
        if j == index || !other.rect().overlaps_span(lo, hi) {
            return true;
        }
        // Smaller y is a taller roof
        candidate.y - other.y <= settings.wall_margin
    })
}

/// Pick a spawn rooftop for `side`, never the `taken` building.
///
/// Small cities share one candidate range between both sides; if excluding
/// `taken` empties it, any other building is allowed. Returns `None` only
/// when no building is left at all.
pub fn select_rooftop<R: Rng>(
    skyline: &[Building],
    side: Side,
    taken: Option<usize>,
    settings: &GameSettings,
    rng: &mut R,
) -> Option<RooftopPick> {
    let free = |i: &usize| Some(*i) != taken;
    let mut candidates: Vec<usize> = candidate_range(skyline.len(), side).filter(free).collect();
    if candidates.is_empty() {
        candidates = (0..skyline.len()).filter(free).collect();
    }

    let eligible: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| has_clearance(skyline, i, side, settings))
        .collect();

    if let Some(&index) = eligible.choose(rng) {
        return Some(RooftopPick {
            index,
            fallback: false,
        });
    }

    // Nobody is clear: take one of the tallest candidates
    let mut tallest = candidates;
    tallest.sort_by(|&a, &b| skyline[a].y.total_cmp(&skyline[b].y).then(a.cmp(&b)));
    tallest.truncate(settings.fallback_pool.max(1));

    let index = *tallest.choose(rng)?;
    log::debug!("No clear rooftop on {:?} side, falling back to building {}", side, index);
    Some(RooftopPick {
        index,
        fallback: true,
    })
}
