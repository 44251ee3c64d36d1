use std::collections::VecDeque;

use pathgrid_core::{Grid, Point};

use crate::moves::MoveSet;

const UNREACHED: u32 = u32::MAX;

/// Brute-force breadth-first distance from `from` to `to`, counting every
/// legal step as 1 regardless of the move set's step costs.
///
/// Returns `None` when either endpoint is blocked or out of bounds, or
/// when no path exists. Under [`MoveSet::Cardinal`] the step count equals
/// the optimal path cost, which makes this a ground-truth oracle for the
/// informed search.
pub fn bfs_distance(grid: &Grid, moves: MoveSet, from: Point, to: Point) -> Option<u32> {
    if grid.is_blocked(from) || grid.is_blocked(to) {
        return None;
    }
    let width = grid.width() as usize;
    let idx = |p: Point| (p.y as usize) * width + p.x as usize;

    let mut dist = vec![UNREACHED; grid.len()];
    let mut queue: VecDeque<Point> = VecDeque::new();
    dist[idx(from)] = 0;
    queue.push_back(from);

    let mut buf = Vec::with_capacity(8);

    while let Some(cp) = queue.pop_front() {
        let d = dist[idx(cp)];
        if cp == to {
            return Some(d);
        }
        buf.clear();
        moves.steps(grid, cp, &mut buf);
        for &(np, _) in buf.iter() {
            let ni = idx(np);
            if dist[ni] == UNREACHED {
                dist[ni] = d + 1;
                queue.push_back(np);
            }
        }
    }
    None
}
