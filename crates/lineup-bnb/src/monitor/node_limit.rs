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
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{lineup::Lineup, roster::RosterModel};

/// The node ceiling applied when none is configured.
pub const DEFAULT_NODE_LIMIT: u64 = 50_000_000;

/// A monitor that terminates the search once `limit` nodes were explored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor<T> {
    limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NodeLimitMonitor<T> {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<T> Default for NodeLimitMonitor<T> {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_LIMIT)
    }
}

impl<T> TreeSearchMonitor<T> for NodeLimitMonitor<T>
where
    T: SalaryNumeric,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &RosterModel<T>, _statistics: &BnbSolverStatistics) {}
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if statistics.nodes_explored > self.limit {
            SearchCommand::Terminate(AbortReason::NodeLimit { limit: self.limit })
        } else {
            SearchCommand::Continue
        }
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
