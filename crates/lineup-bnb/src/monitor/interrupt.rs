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
use std::sync::atomic::{AtomicBool, Ordering};

/// A monitor that stops the search once the borrowed flag is raised.
///
/// The flag is polled on every step, i.e. between two slot expansions.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a, T> {
    stop_flag: &'a AtomicBool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> InterruptMonitor<'a, T> {
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self {
            stop_flag,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for InterruptMonitor<'a, T>
where
    T: SalaryNumeric,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _model: &RosterModel<T>, _statistics: &BnbSolverStatistics) {}
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate(AbortReason::Interrupted)
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

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = u32;

    #[test]
    fn test_interrupt_monitor_continues_when_flag_is_clear() {
        let flag = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::<IntegerType>::new(&flag);
        let state = SearchState::new(1, 1, 1);

        assert_eq!(
            monitor.search_command(&state, &BnbSolverStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_flag_is_set() {
        let flag = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::<IntegerType>::new(&flag);
        let state = SearchState::new(1, 1, 1);
        flag.store(true, Ordering::Relaxed);

        match monitor.search_command(&state, &BnbSolverStatistics::default()) {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason.to_string(), "Interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
