use pathgrid_core::{Grid, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::f64::consts::SQRT_2;

/// A legal transition out of a cell: target position and step cost.
pub type Step = (Point, f64);

// Cardinal moves first (east, west, south, north), then the diagonals.
// This fixed order is what tie-breaking falls back to when shuffling is
// disabled.
const CARDINAL: [(i32, i32, f64); 4] = [(1, 0, 1.0), (-1, 0, 1.0), (0, 1, 1.0), (0, -1, 1.0)];
const DIAGONAL: [(i32, i32, f64); 4] = [
    (1, -1, SQRT_2),
    (-1, -1, SQRT_2),
    (1, 1, SQRT_2),
    (-1, 1, SQRT_2),
];

/// Which neighbor transitions a search may take.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveSet {
    /// 4-directional movement, every step costs `1`.
    Cardinal,
    /// 8-directional movement: cardinal steps cost `1`, diagonal steps
    /// cost `SQRT_2`. Diagonal steps may pass between two orthogonally
    /// adjacent walls.
    Octile,
}

impl MoveSet {
    /// Append the legal steps out of `from` into `buf`, filtered to
    /// in-bounds, non-blocked targets. The caller clears `buf` before
    /// calling.
    pub fn steps(self, grid: &Grid, from: Point, buf: &mut Vec<Step>) {
        for &(dx, dy, cost) in CARDINAL.iter() {
            let to = from.shift(dx, dy);
            if !grid.is_blocked(to) {
                buf.push((to, cost));
            }
        }
        if self == Self::Octile {
            for &(dx, dy, cost) in DIAGONAL.iter() {
                let to = from.shift(dx, dy);
                if !grid.is_blocked(to) {
                    buf.push((to, cost));
                }
            }
        }
    }
}

/// The order in which generated steps are handed to the search driver.
///
/// Order never changes which costs are reachable; it only decides which of
/// several equal-cost paths is discovered first. The default is the fixed
/// deterministic order of [`MoveSet::steps`]; shuffling is opt-in and draws
/// a fresh permutation per expansion from an RNG private to one search.
#[derive(Clone, Debug)]
pub enum MoveOrder {
    /// Keep the deterministic enumeration order.
    Fixed,
    /// Shuffle steps before each expansion.
    Shuffled(StdRng),
}

impl MoveOrder {
    /// A shuffling order. With `Some(seed)` the permutation stream is
    /// reproducible across runs; with `None` it is seeded from the OS.
    pub fn shuffled(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::Shuffled(StdRng::seed_from_u64(s)),
            None => Self::Shuffled(StdRng::from_os_rng()),
        }
    }

    pub(crate) fn permute(&mut self, steps: &mut [Step]) {
        if let Self::Shuffled(rng) = self {
            steps.shuffle(rng);
        }
    }
}

impl Default for MoveOrder {
    fn default() -> Self {
        Self::Fixed
    }
}
