use std::collections::BinaryHeap;
use std::fmt;

use pathgrid_core::{Grid, Point};

use crate::heuristic::Heuristic;
use crate::moves::{MoveOrder, MoveSet, Step};
use crate::policy::EvalPolicy;

pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell search state
// ---------------------------------------------------------------------------

/// Arena node: the mutable per-position record of one search.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Accumulated cost of the best known path from the start.
    pub(crate) g: f64,
    /// Heuristic estimate, recomputed on every relaxation.
    pub(crate) h: f64,
    /// Frontier ordering key; meaning depends on the active policy.
    pub(crate) f: f64,
    /// Index of the neighbor that produced the current best `g`, or
    /// [`NO_PARENT`]. Parent links form a forest rooted at the start.
    pub(crate) parent: usize,
    /// Whether a frontier entry for this node is still waiting to be acted
    /// on. Cleared on expansion; popped entries whose node is no longer
    /// open are stale and skipped.
    pub(crate) open: bool,
    /// Whether the node has ever been expanded.
    pub(crate) expanded: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: NO_PARENT,
            open: false,
            expanded: false,
        }
    }
}

/// Frontier entry: a score paired with a position index.
///
/// Ordered by `f` ascending, then by insertion sequence ascending, so
/// equal scores pop in FIFO order. `BinaryHeap` is a max-heap, hence both
/// comparisons are reversed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) f: f64,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

// ---------------------------------------------------------------------------
// Configuration and outcomes
// ---------------------------------------------------------------------------

/// The pluggable parts of a search, fixed at configuration time.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    pub moves: MoveSet,
    pub order: MoveOrder,
    pub policy: EvalPolicy,
}

impl Default for SearchConfig {
    /// Manhattan estimate, 4-way moves in fixed order, additive policy.
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            moves: MoveSet::Cardinal,
            order: MoveOrder::Fixed,
            policy: EvalPolicy::AStar,
        }
    }
}

/// Where a search currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Configured; the frontier holds only the start.
    Unstarted,
    /// At least one frontier entry has been popped.
    Running,
    /// The goal was expanded; a path is reconstructable.
    Succeeded,
    /// The frontier emptied without reaching the goal: no path exists.
    Exhausted,
}

impl SearchState {
    /// Whether the search has finished, one way or the other.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }
}

/// The terminal result of a search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// A path was found.
    Succeeded {
        /// Every position on the path after the start, through the goal,
        /// in travel order. Empty when the search starts on its goal.
        path: Vec<Point>,
        /// The goal's final accumulated cost.
        cost: f64,
        /// Number of edges traversed; always equal to `path.len()`.
        steps: usize,
    },
    /// Every reachable cell was expanded without meeting the goal.
    Exhausted,
}

/// Errors detected when configuring a search.
///
/// All of these are eager: a failing [`Search::new`] returns no partial
/// state. Unreachability is *not* an error; it is the
/// [`Exhausted`](SearchOutcome::Exhausted) outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Start or goal lies outside the grid.
    OutOfBounds(Point),
    /// Start or goal is a blocked cell.
    Blocked(Point),
    /// A weighted policy with negative or non-finite weights.
    InvalidWeights { alpha: f64, beta: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
            Self::Blocked(p) => write!(f, "endpoint {p} is a blocked cell"),
            Self::InvalidWeights { alpha, beta } => {
                write!(
                    f,
                    "policy weights must be finite and non-negative, got alpha = {alpha}, beta = {beta}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One best-first search over a borrowed grid.
///
/// A `Search` owns all of its mutable state (node arena, frontier,
/// optional move-order RNG), so any number of searches may borrow the
/// same [`Grid`] concurrently. Drive it with [`run`](Self::run), or with
/// [`step`](Self::step) when the caller wants a cancellation point
/// between expansions; afterwards the read accessors report per-cell
/// bookkeeping for display layers.
#[derive(Debug)]
pub struct Search<'g> {
    pub(crate) grid: &'g Grid,
    pub(crate) start: Point,
    pub(crate) goal: Point,
    pub(crate) heuristic: Heuristic,
    pub(crate) moves: MoveSet,
    pub(crate) order: MoveOrder,
    pub(crate) policy: EvalPolicy,
    pub(crate) width: usize,
    pub(crate) goal_idx: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) frontier: BinaryHeap<Entry>,
    pub(crate) seq: u64,
    pub(crate) state: SearchState,
    pub(crate) outcome: Option<SearchOutcome>,
    pub(crate) expansions: usize,
    // Scratch buffer for step generation, reused across expansions.
    pub(crate) sbuf: Vec<Step>,
}

impl<'g> Search<'g> {
    /// Configure a search from `start` to `goal` on `grid`.
    ///
    /// Fails eagerly if either endpoint is out of bounds or blocked, or if
    /// the policy carries unusable weights. The grid itself is valid by
    /// construction (see [`GridError`](pathgrid_core::GridError)).
    pub fn new(
        grid: &'g Grid,
        start: Point,
        goal: Point,
        config: SearchConfig,
    ) -> Result<Self, ConfigError> {
        for p in [start, goal] {
            if !grid.in_bounds(p) {
                return Err(ConfigError::OutOfBounds(p));
            }
            if grid.is_blocked(p) {
                return Err(ConfigError::Blocked(p));
            }
        }
        if let EvalPolicy::Weighted { alpha, beta } = config.policy {
            if !config.policy.weights_valid() {
                return Err(ConfigError::InvalidWeights { alpha, beta });
            }
        }

        let width = grid.width() as usize;
        let mut nodes = vec![Node::default(); grid.len()];
        let start_idx = (start.y as usize) * width + start.x as usize;
        let goal_idx = (goal.y as usize) * width + goal.x as usize;

        // Seed the start node.
        let h = config.heuristic.estimate(start, goal);
        let f = config.policy.combine(0.0, h);
        let node = &mut nodes[start_idx];
        node.g = 0.0;
        node.h = h;
        node.f = f;
        node.open = true;

        let mut frontier = BinaryHeap::new();
        frontier.push(Entry {
            f,
            seq: 0,
            idx: start_idx,
        });

        Ok(Self {
            grid,
            start,
            goal,
            heuristic: config.heuristic,
            moves: config.moves,
            order: config.order,
            policy: config.policy,
            width,
            goal_idx,
            nodes,
            frontier,
            seq: 1,
            state: SearchState::Unstarted,
            outcome: None,
            expansions: 0,
            sbuf: Vec::with_capacity(8),
        })
    }

    /// The configured start position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The configured goal position.
    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Current state of the search state machine.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The terminal outcome, once the search has finished.
    #[inline]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// How many frontier entries have been expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    // -----------------------------------------------------------------------
    // Per-cell accessors for display layers
    // -----------------------------------------------------------------------

    /// The cell's current accumulated cost, `INFINITY` if never relaxed
    /// or out of bounds.
    pub fn cost_at(&self, p: Point) -> f64 {
        match self.idx(p) {
            Some(i) => self.nodes[i].g,
            None => f64::INFINITY,
        }
    }

    /// The cell's most recently computed heuristic estimate (`0.0` if the
    /// cell was never relaxed).
    pub fn estimate_at(&self, p: Point) -> f64 {
        match self.idx(p) {
            Some(i) => self.nodes[i].h,
            None => 0.0,
        }
    }

    /// The cell's current frontier score, `INFINITY` if never relaxed or
    /// out of bounds.
    pub fn score_at(&self, p: Point) -> f64 {
        match self.idx(p) {
            Some(i) => self.nodes[i].f,
            None => f64::INFINITY,
        }
    }

    /// The neighbor that produced the cell's current best cost.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        let i = self.idx(p)?;
        let parent = self.nodes[i].parent;
        if parent == NO_PARENT {
            None
        } else {
            Some(self.point(parent))
        }
    }

    /// Whether the cell was ever reached by a relaxation.
    pub fn was_discovered(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.nodes[i].g.is_finite(),
            None => false,
        }
    }

    /// Whether the cell was ever expanded from the frontier.
    pub fn was_expanded(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.nodes[i].expanded,
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat arena index. `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if self.grid.in_bounds(p) {
            Some((p.y as usize) * self.width + p.x as usize)
        } else {
            None
        }
    }

    /// Convert a flat arena index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_orders_by_score_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(Entry {
            f: 2.0,
            seq: 0,
            idx: 10,
        });
        heap.push(Entry {
            f: 1.0,
            seq: 1,
            idx: 20,
        });
        heap.push(Entry {
            f: 1.0,
            seq: 2,
            idx: 30,
        });
        // Lowest score first; equal scores pop in insertion order.
        assert_eq!(heap.pop().map(|e| e.idx), Some(20));
        assert_eq!(heap.pop().map(|e| e.idx), Some(30));
        assert_eq!(heap.pop().map(|e| e.idx), Some(10));
    }

    #[test]
    fn new_rejects_out_of_bounds_endpoints() {
        let g = Grid::new(4, 4).unwrap();
        let err = Search::new(
            &g,
            Point::new(0, 0),
            Point::new(4, 0),
            SearchConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::OutOfBounds(Point::new(4, 0)));
    }

    #[test]
    fn new_rejects_blocked_endpoints() {
        let g = Grid::parse("#.\n..").unwrap();
        let err = Search::new(
            &g,
            Point::new(0, 0),
            Point::new(1, 1),
            SearchConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::Blocked(Point::new(0, 0)));
    }

    #[test]
    fn new_rejects_bad_weights() {
        let g = Grid::new(4, 4).unwrap();
        let config = SearchConfig {
            policy: EvalPolicy::Weighted {
                alpha: -0.5,
                beta: 1.0,
            },
            ..SearchConfig::default()
        };
        let err = Search::new(&g, Point::new(0, 0), Point::new(3, 3), config).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidWeights {
                alpha: -0.5,
                beta: 1.0
            }
        );
    }

    #[test]
    fn new_seeds_start_cell() {
        let g = Grid::new(4, 4).unwrap();
        let s = Search::new(
            &g,
            Point::new(0, 0),
            Point::new(3, 3),
            SearchConfig::default(),
        )
        .unwrap();
        assert_eq!(s.state(), SearchState::Unstarted);
        assert_eq!(s.cost_at(Point::new(0, 0)), 0.0);
        assert_eq!(s.estimate_at(Point::new(0, 0)), 6.0);
        assert_eq!(s.score_at(Point::new(0, 0)), 6.0);
        assert!(s.was_discovered(Point::new(0, 0)));
        assert!(!s.was_discovered(Point::new(1, 0)));
        assert_eq!(s.cost_at(Point::new(1, 0)), f64::INFINITY);
        assert_eq!(s.predecessor(Point::new(0, 0)), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        let outcome = SearchOutcome::Succeeded {
            path: vec![Point::new(1, 0), Point::new(1, 1)],
            cost: 2.0,
            steps: 2,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SearchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn policy_round_trip() {
        let p = EvalPolicy::Weighted {
            alpha: 1.0,
            beta: 2.5,
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: EvalPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
