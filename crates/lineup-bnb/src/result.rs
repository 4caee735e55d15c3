// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::stats::BnbSolverStatistics;
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::lineup::Lineup;
use std::time::Duration;

/// The best lineup a solve produced, with its proof status.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult<T> {
    /// We have proven that no lineup satisfies the constraints.
    Infeasible,
    /// We have found a lineup and proven its optimality.
    Optimal(Lineup<T>),
    /// We have found a lineup, but the search stopped before proving it optimal.
    Feasible(Lineup<T>),
    /// The search stopped without finding a lineup and without proving
    /// infeasibility.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the lineup carried by an `Optimal` or `Feasible` result.
    #[inline]
    pub fn lineup(&self) -> Option<&Lineup<T>> {
        match self {
            SolverResult::Optimal(lineup) | SolverResult::Feasible(lineup) => Some(lineup),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Consumes the result, returning its lineup if it has one.
    #[inline]
    pub fn into_lineup(self) -> Option<Lineup<T>> {
        match self {
            SolverResult::Optimal(lineup) | SolverResult::Feasible(lineup) => Some(lineup),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: SalaryNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(lineup) => write!(
                f,
                "Optimal(points={:.2}, salary={})",
                lineup.total_projected_points(),
                lineup.total_salary()
            ),
            SolverResult::Feasible(lineup) => write!(
                f,
                "Feasible(points={:.2}, salary={})",
                lineup.total_projected_points(),
                lineup.total_salary()
            ),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why a monitor stopped the search early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The node ceiling was reached.
    NodeLimit { limit: u64 },
    /// The wall-clock budget was spent.
    TimeLimit { limit: Duration },
    /// The cooperative cancellation flag was raised.
    Interrupted,
    /// A custom monitor requested termination.
    Other(String),
}

impl AbortReason {
    /// Returns `true` for budget exhaustion (node or time limit).
    #[inline]
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            AbortReason::NodeLimit { .. } | AbortReason::TimeLimit { .. }
        )
    }
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::NodeLimit { limit } => write!(f, "Node limit of {} exceeded", limit),
            AbortReason::TimeLimit { limit } => {
                write!(f, "Time limit of {:.3}s exceeded", limit.as_secs_f64())
            }
            AbortReason::Interrupted => write!(f, "Interrupt signal received"),
            AbortReason::Other(msg) => write!(f, "{}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a lineup.
    OptimalityProven,
    /// The solver proved that no lineup exists.
    InfeasibilityProven,
    /// A monitor stopped the search.
    Aborted(AbortReason),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Caller-facing summary of a solve.
///
/// `Timeout` means a node or time limit stopped the search and the outcome
/// is unknown. It never means infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Timeout,
    Cancelled,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Timeout => write!(f, "Timeout"),
            SolveStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn optimal(lineup: Lineup<T>, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(lineup),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted(
        lineup: Option<Lineup<T>>,
        reason: AbortReason,
        statistics: BnbSolverStatistics,
    ) -> Self {
        let result = match lineup {
            Some(lineup) => SolverResult::Feasible(lineup),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Consumes the outcome, returning the solver result.
    #[inline]
    pub fn into_result(self) -> SolverResult<T> {
        self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Maps the termination reason onto the caller-facing status.
    pub fn status(&self) -> SolveStatus {
        match &self.termination_reason {
            TerminationReason::OptimalityProven => SolveStatus::Optimal,
            TerminationReason::InfeasibilityProven => SolveStatus::Infeasible,
            TerminationReason::Aborted(reason) if reason.is_limit() => SolveStatus::Timeout,
            TerminationReason::Aborted(_) => SolveStatus::Cancelled,
        }
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: SalaryNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(result: {}, termination: {}, nodes: {})",
            self.result, self.termination_reason, self.statistics.nodes_explored
        )
    }
}
