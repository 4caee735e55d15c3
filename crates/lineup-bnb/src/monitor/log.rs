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

//! Progress logging through `tracing`.
//!
//! `LogTreeSearchMonitor` emits an `info!` line at most once per
//! `log_interval`, reading the clock only when the explored node count hits
//! `clock_check_mask`. A `debug!` summary follows on exit. No subscriber is
//! installed here; without one the monitor costs a few branches per node.

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{lineup::Lineup, roster::RosterModel};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    contest_id: String,
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_points: Option<f64>,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            contest_id: String::new(),
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_points: None,
        }
    }

    /// Returns the projected points of the best lineup seen in the current
    /// search.
    #[inline]
    pub fn best_points(&self) -> Option<f64> {
        self.best_points
    }

    fn log_line<T>(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics)
    where
        T: SalaryNumeric,
    {
        let now = Instant::now();
        let best = match self.best_points {
            Some(points) => format!("{:.2}", points),
            None => "-".to_string(),
        };

        info!(
            contest = %self.contest_id,
            elapsed_secs = now.duration_since(self.start_time).as_secs_f64(),
            nodes = stats.nodes_explored,
            depth = state.depth(),
            best = %best,
            current_points = state.current_points(),
            backtracks = stats.backtracks,
            pruned = stats.prunings_total(),
            "lineup search progress"
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}ms, clock_check_mask: {})",
            self.log_interval.as_millis(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor
where
    T: SalaryNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &RosterModel<T>, _statistics: &BnbSolverStatistics) {
        self.contest_id = model.contest_id().to_string();
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_points = None;
        debug!(contest = %self.contest_id, slots = model.num_slots(), "lineup search started");
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        debug!(
            contest = %self.contest_id,
            nodes = statistics.nodes_explored,
            backtracks = statistics.backtracks,
            prunings_bound = statistics.prunings_bound,
            prunings_salary = statistics.prunings_salary,
            prunings_infeasible = statistics.prunings_infeasible,
            solutions = statistics.solutions_found,
            elapsed = ?statistics.time_total,
            "lineup search finished"
        );
    }

    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState<T>,
        _count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_descend(
        &mut self,
        state: &SearchState<T>,
        _decision: Decision,
        statistics: &BnbSolverStatistics,
    ) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, lineup: &Lineup<T>, _statistics: &BnbSolverStatistics) {
        self.best_points = Some(lineup.total_projected_points());
    }
}
