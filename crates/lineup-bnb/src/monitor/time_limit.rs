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

use crate::{
    decision::Decision,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    result::AbortReason,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use lineup_core::num::{salary::SalaryNumeric, saturating::SaturatingAddVal};
use lineup_model::{lineup::Lineup, roster::RosterModel};
use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// A monitor that terminates the search after a specified duration.
///
/// Checks the clock only every `check_interval` steps to minimize overhead.
/// A zero duration terminates on the first check.
pub struct TimeLimitMonitor<T> {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    ops_since_last_check: u64,
    _marker: PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Creates a new `TimeLimitMonitor`. A higher `check_interval` reduces
    /// overhead but may overshoot the limit slightly.
    pub fn new(duration: Duration, check_interval: u64) -> Self {
        Self {
            time_limit: duration,
            start_time: None,
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a new `TimeLimitMonitor` checking the clock every 10,000 steps.
    pub fn with_default_check_interval(duration: Duration) -> Self {
        Self::new(duration, 10_000)
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SalaryNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &RosterModel<T>, _statistics: &BnbSolverStatistics) {
        self.start_time = Some(Instant::now());
        // Force a check on the first step so an exhausted budget stops at once.
        self.ops_since_last_check = self.check_interval.saturating_sub(1);
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.start_time = None;
    }

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        self.ops_since_last_check = self.ops_since_last_check.saturating_add_val(1);

        if self.ops_since_last_check >= self.check_interval {
            self.ops_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() >= self.time_limit
            {
                return SearchCommand::Terminate(AbortReason::TimeLimit {
                    limit: self.time_limit,
                });
            }
        }

        SearchCommand::Continue
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
        _state: &SearchState<T>,
        _decision: Decision,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics) {}
    fn on_solution_found(&mut self, _lineup: &Lineup<T>, _statistics: &BnbSolverStatistics) {}
}

impl<T> std::fmt::Display for TimeLimitMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeLimitMonitor(time_limit: {:.3}s, check_interval: {})",
            self.time_limit.as_secs_f64(),
            self.check_interval
        )
    }
}
