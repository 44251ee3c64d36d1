use crate::search::{Entry, NO_PARENT, Search, SearchOutcome, SearchState};

impl Search<'_> {
    /// Expand at most one frontier entry.
    ///
    /// This is the cooperative cancellation point: a caller that wants to
    /// bound runtime on large or degenerate grids drives `step` in its own
    /// loop instead of calling [`run`](Self::run). Stale frontier entries
    /// (superseded by a cheaper relaxation, or whose node was already
    /// expanded) are discarded without expansion.
    pub fn step(&mut self) -> SearchState {
        if self.state.is_terminal() {
            return self.state;
        }

        let Some(current) = self.frontier.pop() else {
            self.state = SearchState::Exhausted;
            self.outcome = Some(SearchOutcome::Exhausted);
            log::debug!(
                "search exhausted after {} expansions: {} -> {} has no path",
                self.expansions,
                self.start,
                self.goal
            );
            return self.state;
        };
        self.state = SearchState::Running;

        let ci = current.idx;

        // Skip stale entries.
        if !self.nodes[ci].open {
            return self.state;
        }
        self.nodes[ci].open = false;
        self.nodes[ci].expanded = true;
        self.expansions += 1;

        if ci == self.goal_idx {
            let outcome = self.reconstruct();
            if let SearchOutcome::Succeeded { cost, steps, .. } = &outcome {
                log::debug!(
                    "search succeeded: cost {cost}, {steps} steps, {} expansions",
                    self.expansions
                );
            }
            self.state = SearchState::Succeeded;
            self.outcome = Some(outcome);
            return self.state;
        }

        let current_g = self.nodes[ci].g;
        let current_point = self.point(ci);

        let mut buf = std::mem::take(&mut self.sbuf);
        buf.clear();
        self.moves.steps(self.grid, current_point, &mut buf);
        self.order.permute(&mut buf);

        for &(np, step_cost) in buf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let candidate = current_g + step_cost;
            if candidate < self.nodes[ni].g {
                let h = self.heuristic.estimate(np, self.goal);
                let f = self.policy.combine(candidate, h);
                let n = &mut self.nodes[ni];
                n.g = candidate;
                n.h = h;
                n.f = f;
                n.parent = ci;
                n.open = true;
                self.frontier.push(Entry {
                    f,
                    seq: self.seq,
                    idx: ni,
                });
                self.seq += 1;
            }
        }
        self.sbuf = buf;

        self.state
    }

    /// Drive the search to a terminal state and return its outcome.
    ///
    /// A single pass either finds a path (the optimum, for admissible and
    /// consistent configurations) or proves unreachability; there is no
    /// retry.
    pub fn run(&mut self) -> SearchOutcome {
        while !self.state.is_terminal() {
            self.step();
        }
        self.outcome.clone().unwrap_or(SearchOutcome::Exhausted)
    }

    /// Walk predecessor links back from the goal.
    ///
    /// Collects every position after the start through the goal, so the
    /// path length equals the number of edges traversed and a search that
    /// starts on its goal yields an empty path at cost zero.
    fn reconstruct(&self) -> SearchOutcome {
        let mut path = Vec::new();
        let mut ci = self.goal_idx;
        while self.nodes[ci].parent != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        let steps = path.len();
        SearchOutcome::Succeeded {
            path,
            cost: self.nodes[self.goal_idx].g,
            steps,
        }
    }
}
