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

use lineup_core::num::saturating::SaturatingAddVal;
use std::time::Duration;

/// Statistics collected during a lineup search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BnbSolverStatistics {
    /// Main loop iterations.
    pub steps: u64,
    /// Total nodes visited, including the root.
    pub nodes_explored: u64,
    /// Total returns from a child node to its parent.
    pub backtracks: u64,
    /// Total candidate decisions pushed onto the stack.
    pub decisions_generated: u64,
    /// The deepest level reached in the tree (number of filled slots).
    pub max_depth: u64,
    /// Candidates rejected by the team cap or the overlap limit.
    pub prunings_infeasible: u64,
    /// Candidates rejected because the cheapest completion breaks the cap.
    pub prunings_salary: u64,
    /// Nodes whose best-case completion cannot beat the incumbent.
    pub prunings_bound: u64,
    /// Complete lineups that replaced the incumbent.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add_val(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_decision_generated(&mut self) {
        self.decisions_generated = self.decisions_generated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_salary(&mut self) {
        self.prunings_salary = self.prunings_salary.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total number of pruned candidates and nodes.
    #[inline]
    pub fn prunings_total(&self) -> u64 {
        self.prunings_infeasible
            .saturating_add_val(self.prunings_salary)
            .saturating_add_val(self.prunings_bound)
    }

    /// Adds the counters of `other` into `self`; `max_depth` takes the maximum.
    pub fn merge(&mut self, other: &BnbSolverStatistics) {
        self.steps = self.steps.saturating_add_val(other.steps);
        self.nodes_explored = self.nodes_explored.saturating_add_val(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add_val(other.backtracks);
        self.decisions_generated = self
            .decisions_generated
            .saturating_add_val(other.decisions_generated);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.prunings_infeasible = self
            .prunings_infeasible
            .saturating_add_val(other.prunings_infeasible);
        self.prunings_salary = self.prunings_salary.saturating_add_val(other.prunings_salary);
        self.prunings_bound = self.prunings_bound.saturating_add_val(other.prunings_bound);
        self.solutions_found = self.solutions_found.saturating_add_val(other.solutions_found);
        self.time_total += other.time_total;
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lineup-BnB Solver Statistics:")?;
        writeln!(f, "  Steps:                {}", self.steps)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:  {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (salary):    {}", self.prunings_salary)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_step();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_backtrack();
        stats.on_decision_generated();
        stats.on_pruning_infeasible();
        stats.on_pruning_salary();
        stats.on_pruning_bound();
        stats.on_solution_found();
        stats.on_depth_update(3);
        stats.on_depth_update(2);

        assert_eq!(stats.steps, 1);
        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.backtracks, 1);
        assert_eq!(stats.decisions_generated, 1);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.prunings_total(), 3);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_merge_sums_counters_and_keeps_max_depth() {
        let mut a = BnbSolverStatistics {
            nodes_explored: 10,
            max_depth: 4,
            time_total: Duration::from_millis(3),
            ..Default::default()
        };
        let b = BnbSolverStatistics {
            nodes_explored: 5,
            max_depth: 2,
            prunings_bound: 7,
            time_total: Duration::from_millis(2),
            ..Default::default()
        };
        a.merge(&b);

        assert_eq!(a.nodes_explored, 15);
        assert_eq!(a.max_depth, 4);
        assert_eq!(a.prunings_bound, 7);
        assert_eq!(a.time_total, Duration::from_millis(5));
    }

    #[test]
    fn test_display_contains_counters() {
        let stats = BnbSolverStatistics {
            nodes_explored: 12,
            ..Default::default()
        };
        let shown = stats.to_string();
        assert!(shown.starts_with("Lineup-BnB Solver Statistics:"));
        assert!(shown.contains("Nodes explored:       12"));
    }
}
