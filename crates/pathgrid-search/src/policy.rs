/// How accumulated cost and heuristic estimate combine into the frontier
/// ordering key.
///
/// The policy is fixed for the whole lifetime of a search and is a total,
/// deterministic function of its two inputs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalPolicy {
    /// Score by the heuristic alone: `f = h`.
    ///
    /// Expands straight toward the goal and ignores accumulated cost, so
    /// the returned path is not guaranteed optimal.
    Greedy,
    /// The additive policy: `f = g + h`.
    ///
    /// Optimal and complete when the heuristic is admissible and
    /// consistent and all step costs are non-negative.
    AStar,
    /// The weighted blend: `f = alpha·g + beta·h`.
    ///
    /// `alpha = beta = 1` reduces to [`AStar`](Self::AStar) and
    /// `alpha = 0, beta = 1` to [`Greedy`](Self::Greedy); `beta > 1`
    /// biases toward faster, possibly suboptimal solutions, `alpha > 1`
    /// toward more exhaustive exploration. Both weights must be finite
    /// and non-negative, which is enforced when the search is configured.
    Weighted { alpha: f64, beta: f64 },
}

impl EvalPolicy {
    /// Combine cost-so-far `g` and heuristic estimate `h` into a score.
    #[inline]
    pub fn combine(self, g: f64, h: f64) -> f64 {
        match self {
            Self::Greedy => h,
            Self::AStar => g + h,
            Self::Weighted { alpha, beta } => alpha * g + beta * h,
        }
    }

    /// Whether the policy's numeric parameters are usable.
    pub(crate) fn weights_valid(self) -> bool {
        match self {
            Self::Greedy | Self::AStar => true,
            Self::Weighted { alpha, beta } => {
                alpha.is_finite() && beta.is_finite() && alpha >= 0.0 && beta >= 0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_ignores_cost() {
        assert_eq!(EvalPolicy::Greedy.combine(100.0, 7.0), 7.0);
    }

    #[test]
    fn astar_adds() {
        assert_eq!(EvalPolicy::AStar.combine(3.0, 4.0), 7.0);
    }

    #[test]
    fn weighted_blend() {
        let p = EvalPolicy::Weighted {
            alpha: 2.0,
            beta: 0.5,
        };
        assert_eq!(p.combine(3.0, 4.0), 8.0);
    }

    #[test]
    fn unit_weights_match_astar() {
        let w = EvalPolicy::Weighted {
            alpha: 1.0,
            beta: 1.0,
        };
        for (g, h) in [(0.0, 18.0), (5.0, 3.5), (12.25, 0.0)] {
            assert_eq!(w.combine(g, h), EvalPolicy::AStar.combine(g, h));
        }
    }

    #[test]
    fn zero_alpha_matches_greedy() {
        let w = EvalPolicy::Weighted {
            alpha: 0.0,
            beta: 1.0,
        };
        for (g, h) in [(0.0, 18.0), (5.0, 3.5), (12.25, 0.0)] {
            assert_eq!(w.combine(g, h), EvalPolicy::Greedy.combine(g, h));
        }
    }

    #[test]
    fn weight_validation() {
        assert!(EvalPolicy::Greedy.weights_valid());
        assert!(EvalPolicy::AStar.weights_valid());
        assert!(
            EvalPolicy::Weighted {
                alpha: 0.0,
                beta: 2.0
            }
            .weights_valid()
        );
        assert!(
            !EvalPolicy::Weighted {
                alpha: -1.0,
                beta: 1.0
            }
            .weights_valid()
        );
        assert!(
            !EvalPolicy::Weighted {
                alpha: 1.0,
                beta: f64::NAN
            }
            .weights_valid()
        );
        assert!(
            !EvalPolicy::Weighted {
                alpha: f64::INFINITY,
                beta: 1.0
            }
            .weights_valid()
        );
    }
}
