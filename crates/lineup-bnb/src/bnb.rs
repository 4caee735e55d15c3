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

//! Branch-and-bound solver for a single optimal lineup.
//!
//! The search fills one roster slot per depth, in the order fixed by the
//! `SearchPlan`. Pending decisions live on a frame-structured LIFO stack;
//! candidates are pushed in reverse rank order so the densest one is explored
//! first. Three rules cut the tree:
//!
//! - a candidate is never enqueued if it breaks the team cap or the overlap
//!   limit of the search context, or if the cheapest completion after it
//!   would exceed the salary cap;
//! - a child is dropped when the best completion it could reach cannot
//!   replace the incumbent;
//! - consecutive interchangeable slots take strictly increasing candidate
//!   ranks, so every player set is enumerated once.
//!
//! The solver owns its stack, plan and state and reuses their buffers across
//! solves. A search session object holds the per-run incumbent, statistics
//! and timing. Monitors observe every step and may stop the search; a stopped
//! search reports the best lineup seen so far as merely feasible.

use crate::{
    context::SearchContext,
    decision::Decision,
    incumbent::Incumbent,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    plan::SearchPlan,
    result::{BnbSolverOutcome, TerminationReason},
    stack::SearchStack,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{
    index::{PlayerIndex, TeamIndex},
    lineup::Lineup,
    pool::ProjectionPool,
    roster::RosterModel,
};

/// A branch-and-bound solver returning the single best lineup of a pool
/// under a roster model.
#[derive(Clone, Debug)]
pub struct BnbSolver<T> {
    stack: SearchStack,
    plan: SearchPlan<T>,
    state: SearchState<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: SalaryNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: SalaryNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            stack: SearchStack::new(),
            plan: SearchPlan::new(),
            state: SearchState::new(0, 0, 0),
        }
    }

    /// Create a solver with storage preallocated for the given problem size.
    ///
    /// # Note
    ///
    /// Every solve grows the buffers to the size it needs anyway. This only
    /// moves the allocations to construction time.
    #[inline]
    pub fn preallocated(num_players: usize, num_slots: usize) -> Self {
        Self {
            stack: SearchStack::preallocated(num_players, num_slots),
            plan: SearchPlan::new(),
            state: SearchState::new(num_players, num_slots, 0),
        }
    }

    /// Solve without exclusions, penalties or overlap constraints.
    #[inline]
    pub fn solve<S>(
        &mut self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        let context = SearchContext::new(pool.len());
        self.solve_with_context(pool, model, &context, monitor)
    }

    /// Solve under the exclusions, density penalties and overlap constraint
    /// of `context`.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `model` or `context`
    /// were built for a pool of a different size.
    pub fn solve_with_context<S>(
        &mut self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        context: &SearchContext,
        mut monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        debug_assert_eq!(
            model.num_players(),
            pool.len(),
            "called `BnbSolver::solve_with_context` with a model for {} players but a pool of {}",
            model.num_players(),
            pool.len()
        );

        let session = BnbSolverSearchSession::new(self, pool, model, context, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears per-run state while keeping allocated capacity.
    #[inline]
    fn reset(&mut self) {
        self.stack.reset();
    }
}

/// A child node generated from a decision.
#[derive(Clone, Copy, Debug)]
struct ChildNode<T> {
    salary: T,
    points: f64,
    team: TeamIndex,
}

/// Cheapest total salary of a lineup that adds `salary` to `prefix` and then
/// fills the remaining slots. `None` if the sum overflows `T`, which exceeds
/// every cap.
#[inline]
fn min_completion_salary<T>(prefix: T, salary: T, tail: Option<T>) -> Option<T>
where
    T: SalaryNumeric,
{
    prefix.checked_add_val(salary)?.checked_add_val(tail?)
}

/// The per-run state and logic of one search.
struct BnbSolverSearchSession<'a, T, S>
where
    T: SalaryNumeric,
{
    solver: &'a mut BnbSolver<T>,
    pool: &'a ProjectionPool<T>,
    model: &'a RosterModel<T>,
    context: &'a SearchContext,
    monitor: &'a mut S,
    incumbent: Incumbent<T>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Display for BnbSolverSearchSession<'a, T, S>
where
    T: SalaryNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let best = match self.incumbent.lineup() {
            Some(lineup) => lineup.to_string(),
            None => "No lineup found".to_string(),
        };
        write!(
            f,
            "SearchSession(state: {}, best: {}, nodes: {})",
            self.solver.state, best, self.stats.nodes_explored
        )
    }
}

impl<'a, T, S> BnbSolverSearchSession<'a, T, S>
where
    T: SalaryNumeric,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        pool: &'a ProjectionPool<T>,
        model: &'a RosterModel<T>,
        context: &'a SearchContext,
        monitor: &'a mut S,
    ) -> Self {
        Self {
            solver,
            pool,
            model,
            context,
            monitor,
            incumbent: Incumbent::default(),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor.on_enter_search(self.model, &self.stats);

        // Structural infeasibility is detected before the first node.
        if !self.initialize() {
            self.stats.set_total_time(self.start_time.elapsed());
            self.monitor.on_exit_search(&self.stats);
            return self.finalize_result(TerminationReason::InfeasibilityProven);
        }

        let termination_reason = loop {
            self.monitor.on_step(&self.solver.state, &self.stats);
            self.stats.on_step();

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&self.solver.state, &self.stats)
            {
                break TerminationReason::Aborted(reason);
            }

            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    break if self.incumbent.is_some() {
                        TerminationReason::OptimalityProven
                    } else {
                        TerminationReason::InfeasibilityProven
                    };
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    fn finalize_result(mut self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        match reason {
            TerminationReason::OptimalityProven => match self.incumbent.take() {
                Some(lineup) => BnbSolverOutcome::optimal(lineup, self.stats),
                None => BnbSolverOutcome::infeasible(self.stats),
            },
            TerminationReason::InfeasibilityProven => BnbSolverOutcome::infeasible(self.stats),
            TerminationReason::Aborted(reason) => {
                BnbSolverOutcome::aborted(self.incumbent.take(), reason, self.stats)
            }
        }
    }

    /// Builds the plan, resets the state and expands the root.
    ///
    /// Returns `false` if the instance is infeasible before any branching:
    /// some run of interchangeable slots lacks candidates, or even the
    /// cheapest completion exceeds the cap.
    fn initialize(&mut self) -> bool {
        let num_slots = self.model.num_slots();
        let num_accepted = self.context.overlap().map_or(0, |o| o.num_lineups());

        self.solver.stack.ensure_capacity(self.pool.len(), num_slots);
        self.solver
            .state
            .reset(self.pool.len(), self.model.num_teams(), num_accepted);

        if !self.solver.plan.rebuild(self.pool, self.model, self.context) {
            self.stats.on_pruning_infeasible();
            return false;
        }
        let cap = self.model.cap();
        if self.solver.plan.suffix_min_salary(0).is_none_or(|s| s > cap) {
            self.stats.on_pruning_salary();
            return false;
        }

        // Root frame. Crucial to have this before pushing decisions!
        self.solver.stack.push_frame();
        self.stats.on_node_explored();
        self.expand();
        true
    }

    /// Enqueues the feasible candidates of the next slot to fill.
    fn expand(&mut self) {
        let plan = &self.solver.plan;
        let state = &self.solver.state;
        let stack = &mut self.solver.stack;

        let depth = state.depth();
        let slot = plan.slot_at(depth);
        let cap = self.model.cap();
        let tail_salary = plan.suffix_min_salary(depth + 1);
        let overlap = self.context.overlap();
        let candidates = plan.candidates(depth);

        let min_rank = if plan.is_chained(depth) {
            state.last_rank().map_or(0, |rank| rank as usize + 1)
        } else {
            0
        };

        let count_before = stack.num_entries();
        for rank in (min_rank..candidates.len()).rev() {
            let player = candidates[rank];
            if state.is_used(player) {
                continue;
            }

            let breaks_overlap =
                overlap.is_some_and(|o| o.would_exceed(player, state.overlap_counts()));
            if breaks_overlap || !self.model.is_feasible_candidate(player, slot, state.team_counts())
            {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(state, PruneReason::Infeasible, &self.stats);
                continue;
            }

            let min_salary = min_completion_salary(
                state.current_salary(),
                self.pool.salary(player),
                tail_salary,
            );
            if min_salary.is_none_or(|s| s > cap) {
                self.stats.on_pruning_salary();
                self.monitor
                    .on_prune(state, PruneReason::SalaryCap, &self.stats);
                continue;
            }

            stack.push(Decision::new(player, rank as u32));
            self.stats.on_decision_generated();
        }

        let added_count = stack.num_entries() - count_before;
        self.monitor
            .on_decisions_enqueued(state, added_count, &self.stats);
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.solver.state, &self.stats);

        self.solver.state.pop(self.context.overlap());
        self.solver.stack.pop_frame();
    }

    #[inline]
    fn process_next_decision(&mut self) {
        let Some(decision) = self.solver.stack.pop() else {
            return;
        };

        if let Some(child) = self.build_child(decision) {
            self.descend(child, decision);
        }
    }

    /// Prices the decision and drops it if no completion through it can
    /// replace the incumbent.
    #[inline]
    fn build_child(&mut self, decision: Decision) -> Option<ChildNode<T>> {
        let player = decision.player();
        debug_assert!(
            player.get() < self.pool.len(),
            "called `BnbSolverSearchSession::build_child` with player index out of bounds: the len is {} but the index is {}",
            self.pool.len(),
            player.get()
        );

        let state = &self.solver.state;
        let plan = &self.solver.plan;
        let depth = state.depth();

        let salary = self.pool.salary(player);
        let points = self.pool.projected_points(player) * plan.multiplier_at(depth);

        let upper_points = state.current_points() + points + plan.suffix_best_points(depth + 1);
        let Some(min_salary) = min_completion_salary(
            state.current_salary(),
            salary,
            plan.suffix_min_salary(depth + 1),
        ) else {
            self.stats.on_pruning_salary();
            self.monitor
                .on_prune(state, PruneReason::SalaryCap, &self.stats);
            return None;
        };

        if self.incumbent.dominates(upper_points, min_salary) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(state, PruneReason::BoundDominated, &self.stats);
            return None;
        }

        Some(ChildNode {
            salary,
            points,
            team: self.model.team_of(player),
        })
    }

    fn descend(&mut self, child: ChildNode<T>, decision: Decision) {
        self.solver.state.push(
            decision,
            child.team,
            child.salary,
            child.points,
            self.context.overlap(),
        );
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats
            .on_depth_update(self.solver.state.depth() as u64);
        self.monitor
            .on_descend(&self.solver.state, decision, &self.stats);

        if self.solver.state.depth() == self.solver.plan.num_slots() {
            self.handle_complete_lineup();
            return;
        }

        self.expand();
    }

    /// Compares the lineup of the current leaf with the incumbent.
    fn handle_complete_lineup(&mut self) {
        let plan = &self.solver.plan;
        let mut slot_assignment = vec![PlayerIndex::new(0); plan.num_slots()];
        for (depth, &player) in self.solver.state.assignment().iter().enumerate() {
            slot_assignment[plan.slot_at(depth).get()] = player;
        }

        let lineup = Lineup::from_assignment(self.pool, self.model, slot_assignment);
        debug_assert!(
            lineup.validate(self.pool, self.model).is_ok(),
            "called `BnbSolverSearchSession::handle_complete_lineup` with an invalid lineup: {}",
            lineup
        );

        if self.incumbent.improves(self.pool, &lineup) {
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&lineup, &self.stats);
            self.incumbent.install(self.pool, lineup);
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.solver.state, PruneReason::BoundDominated, &self.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::OverlapConstraint,
        monitor::{
            composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor,
            log::LogTreeSearchMonitor, no_op::NoOperationMonitor, node_limit::NodeLimitMonitor,
            time_limit::TimeLimitMonitor,
        },
        result::{AbortReason, SolveStatus, SolverResult},
    };
    use lineup_model::{
        contest::{ContestConfig, SlateType, SlotDefinition},
        index::SlotIndex,
        lineup::POINTS_EPSILON,
        player::PlayerProjection,
    };
    use proptest::prelude::*;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    type IntegerType = u32;

    fn p(i: usize) -> PlayerIndex {
        PlayerIndex::new(i)
    }

    /// Pool {A: 10/20/{X}, B: 10/15/{X}, C: 5/5/{Y}}, slots [X, Y].
    fn small_instance(
        cap: IntegerType,
    ) -> (ProjectionPool<IntegerType>, RosterModel<IntegerType>) {
        let pool = ProjectionPool::from_players([
            PlayerProjection::new("A", "T1", ["X"], 10, 20.0),
            PlayerProjection::new("B", "T2", ["X"], 10, 15.0),
            PlayerProjection::new("C", "T3", ["Y"], 5, 5.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "small",
            cap,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        );
        let model = RosterModel::new(&config, &pool).unwrap();
        (pool, model)
    }

    fn solve(
        pool: &ProjectionPool<IntegerType>,
        model: &RosterModel<IntegerType>,
    ) -> BnbSolverOutcome<IntegerType> {
        BnbSolver::new().solve(pool, model, NoOperationMonitor::new())
    }

    #[test]
    fn test_small_instance_optimum() {
        let (pool, model) = small_instance(20);
        let outcome = solve(&pool, &model);

        assert_eq!(outcome.status(), SolveStatus::Optimal);
        let lineup = outcome.result().lineup().unwrap();
        assert_eq!(lineup.slot_assignment(), &[p(0), p(2)]);
        assert_eq!(lineup.total_salary(), 15);
        assert_eq!(lineup.total_projected_points(), 25.0);
    }

    #[test]
    fn test_cap_below_cheapest_combination_is_infeasible() {
        let (pool, model) = small_instance(14);
        let outcome = solve(&pool, &model);

        assert_eq!(outcome.status(), SolveStatus::Infeasible);
        assert!(matches!(outcome.result(), SolverResult::Infeasible));
    }

    fn max_cap_instance(
        players: Vec<PlayerProjection<u8>>,
    ) -> (ProjectionPool<u8>, RosterModel<u8>) {
        let pool = ProjectionPool::from_players(players).unwrap();
        let config = ContestConfig::new(
            "max",
            u8::MAX,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        );
        let model = RosterModel::new(&config, &pool).unwrap();
        (pool, model)
    }

    #[test]
    fn test_salary_overflow_at_max_cap_is_infeasible() {
        let (pool, model) = max_cap_instance(vec![
            PlayerProjection::new("A", "T1", ["X"], 200, 10.0),
            PlayerProjection::new("B", "T2", ["Y"], 200, 10.0),
        ]);
        let outcome = BnbSolver::new().solve(&pool, &model, NoOperationMonitor::new());

        assert_eq!(outcome.status(), SolveStatus::Infeasible);
        assert!(outcome.result().lineup().is_none());
    }

    #[test]
    fn test_salary_overflow_at_max_cap_prunes_the_overflowing_pair() {
        let (pool, model) = max_cap_instance(vec![
            PlayerProjection::new("A", "T1", ["X"], 200, 30.0),
            PlayerProjection::new("A2", "T1", ["X"], 50, 10.0),
            PlayerProjection::new("B", "T2", ["Y"], 50, 5.0),
            PlayerProjection::new("C", "T2", ["Y"], 200, 20.0),
        ]);
        let outcome = BnbSolver::new().solve(&pool, &model, NoOperationMonitor::new());

        assert_eq!(outcome.status(), SolveStatus::Optimal);
        let lineup = outcome.result().lineup().unwrap();
        assert_eq!(lineup.slot_assignment(), &[p(0), p(2)]);
        assert_eq!(lineup.total_salary(), 250);
        assert!(lineup.validate(&pool, &model).is_ok());
    }

    #[test]
    fn test_fewer_eligible_players_than_slots_is_infeasible() {
        let pool = ProjectionPool::<IntegerType>::from_players([
            PlayerProjection::new("A", "T1", ["X"], 10, 20.0),
            PlayerProjection::new("C", "T3", ["Y"], 5, 5.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "short",
            100,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("X")],
        );
        let model = RosterModel::new(&config, &pool).unwrap();

        assert_eq!(solve(&pool, &model).status(), SolveStatus::Infeasible);
    }

    #[test]
    fn test_multiplier_slot_takes_the_best_player() {
        let pool = ProjectionPool::<IntegerType>::from_players([
            PlayerProjection::new("P3", "T1", ["WR"], 10, 10.0),
            PlayerProjection::new("P1", "T2", ["QB"], 10, 30.0),
            PlayerProjection::new("P2", "T1", ["WR"], 10, 20.0),
        ])
        .unwrap();
        let flex = ["QB", "WR"];
        let config = ContestConfig::new(
            "sg",
            30,
            SlateType::SingleGame,
            vec![
                SlotDefinition::new("MVP", flex).with_multiplier(1.5),
                SlotDefinition::new("UTIL", flex),
                SlotDefinition::new("UTIL", flex),
            ],
        );
        let model = RosterModel::new(&config, &pool).unwrap();
        let outcome = solve(&pool, &model);

        let lineup = outcome.result().lineup().unwrap();
        assert_eq!(lineup.player_at(SlotIndex::new(0)), p(1));
        assert_eq!(lineup.total_projected_points(), 75.0);
        assert!(lineup.validate(&pool, &model).is_ok());
    }

    #[test]
    fn test_team_cap_is_respected() {
        let pool = ProjectionPool::<IntegerType>::from_players([
            PlayerProjection::new("Star1", "KC", ["X"], 10, 30.0),
            PlayerProjection::new("Star2", "KC", ["Y"], 10, 30.0),
            PlayerProjection::new("Other", "BUF", ["Y"], 10, 5.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "cap",
            100,
            SlateType::SingleGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        )
        .with_max_players_per_team(1);
        let model = RosterModel::new(&config, &pool).unwrap();
        let outcome = solve(&pool, &model);

        let lineup = outcome.result().lineup().unwrap();
        assert_eq!(lineup.slot_assignment(), &[p(0), p(2)]);
        assert!(outcome.statistics().prunings_infeasible > 0);
    }

    #[test]
    fn test_equal_points_prefers_lower_salary_then_name() {
        let pool = ProjectionPool::<IntegerType>::from_players([
            PlayerProjection::new("Zed", "T1", ["X"], 10, 20.0),
            PlayerProjection::new("Amy", "T1", ["X"], 10, 20.0),
            PlayerProjection::new("Bob", "T1", ["X"], 12, 20.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "ties",
            50,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X")],
        );
        let model = RosterModel::new(&config, &pool).unwrap();

        let lineup = solve(&pool, &model).into_result().into_lineup().unwrap();
        assert_eq!(lineup.slot_assignment(), &[p(1)]);
    }

    #[test]
    fn test_solve_is_deterministic_and_solver_reusable() {
        let (pool, model) = small_instance(20);
        let mut solver = BnbSolver::preallocated(pool.len(), model.num_slots());

        let first = solver.solve(&pool, &model, NoOperationMonitor::new());
        let second = solver.solve(&pool, &model, NoOperationMonitor::new());
        assert_eq!(first.result(), second.result());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );

        let (pool, model) = small_instance(14);
        assert_eq!(
            solver.solve(&pool, &model, NoOperationMonitor::new()).status(),
            SolveStatus::Infeasible
        );
    }

    #[test]
    fn test_exclusions_change_the_optimum() {
        let (pool, model) = small_instance(20);
        let mut context = SearchContext::new(pool.len());
        context.exclude(p(0));

        let outcome =
            BnbSolver::new().solve_with_context(&pool, &model, &context, NoOperationMonitor::new());
        let lineup = outcome.result().lineup().unwrap();
        assert_eq!(lineup.slot_assignment(), &[p(1), p(2)]);
        assert_eq!(lineup.total_projected_points(), 20.0);
    }

    #[test]
    fn test_overlap_constraint_is_hard() {
        let (pool, model) = small_instance(20);
        let accepted = vec![vec![p(0), p(2)]];

        let one = SearchContext::new(pool.len())
            .with_overlap(OverlapConstraint::new(pool.len(), 1, &accepted));
        let outcome =
            BnbSolver::new().solve_with_context(&pool, &model, &one, NoOperationMonitor::new());
        assert_eq!(
            outcome.result().lineup().unwrap().slot_assignment(),
            &[p(1), p(2)]
        );

        // C is the only Y player, so nothing can avoid sharing it.
        let zero = SearchContext::new(pool.len())
            .with_overlap(OverlapConstraint::new(pool.len(), 0, &accepted));
        let outcome =
            BnbSolver::new().solve_with_context(&pool, &model, &zero, NoOperationMonitor::new());
        assert_eq!(outcome.status(), SolveStatus::Infeasible);
    }

    #[test]
    fn test_node_limit_reports_timeout_not_infeasible() {
        let (pool, model) = small_instance(20);
        let outcome = BnbSolver::new().solve(&pool, &model, NodeLimitMonitor::new(0));

        assert_eq!(outcome.status(), SolveStatus::Timeout);
        assert!(matches!(outcome.result(), SolverResult::Unknown));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted(AbortReason::NodeLimit { limit: 0 })
        );
    }

    #[test]
    fn test_zero_time_limit_reports_timeout() {
        let (pool, model) = small_instance(20);
        let outcome = BnbSolver::new().solve(
            &pool,
            &model,
            TimeLimitMonitor::new(Duration::ZERO, 1),
        );
        assert_eq!(outcome.status(), SolveStatus::Timeout);
    }

    #[test]
    fn test_raised_interrupt_flag_cancels() {
        let (pool, model) = small_instance(20);
        let flag = AtomicBool::new(true);
        let outcome = BnbSolver::new().solve(&pool, &model, InterruptMonitor::new(&flag));

        assert_eq!(outcome.status(), SolveStatus::Cancelled);
    }

    #[test]
    fn test_composite_with_log_monitor_does_not_change_result() {
        let (pool, model) = small_instance(20);
        let flag = AtomicBool::new(false);
        let mut monitor = CompositeTreeSearchMonitor::new();
        monitor.add_monitor(InterruptMonitor::new(&flag));
        monitor.add_monitor(NodeLimitMonitor::default());
        monitor.add_monitor(LogTreeSearchMonitor::new(Duration::ZERO, 0));

        let logged = BnbSolver::new().solve(&pool, &model, monitor);
        let plain = solve(&pool, &model);
        assert_eq!(logged.result(), plain.result());
    }

    #[test]
    fn test_statistics_coherence_after_solve() {
        let (pool, model) = small_instance(20);
        let outcome = solve(&pool, &model);
        let stats = outcome.statistics();

        assert!(stats.nodes_explored >= 3);
        assert!(stats.solutions_found >= 1);
        assert_eq!(stats.max_depth, 2);
        assert!(stats.steps >= stats.nodes_explored - 1);
    }

    /// Candidate instance for brute-force comparison.
    #[derive(Debug, Clone)]
    struct Instance {
        players: Vec<(u8, IntegerType, u32, u8)>,
        slots: Vec<u8>,
        cap: IntegerType,
        mvp: bool,
        team_cap: Option<usize>,
    }

    fn arb_instance() -> impl Strategy<Value = Instance> {
        (
            prop::collection::vec((1u8..=3, 1u32..=20, 0u32..=30, 0u8..3), 2..=8),
            prop::collection::vec(0u8..3, 2..=3),
            10u32..=50,
            any::<bool>(),
            prop::option::of(1usize..=2),
        )
            .prop_map(|(players, slots, cap, mvp, team_cap)| Instance {
                players,
                slots,
                cap,
                mvp,
                team_cap,
            })
    }

    fn build(instance: &Instance) -> Option<(ProjectionPool<IntegerType>, RosterModel<IntegerType>)> {
        let players = instance
            .players
            .iter()
            .enumerate()
            .map(|(i, &(mask, salary, points, team))| {
                let positions: Vec<&str> = [(1u8, "X"), (2u8, "Y")]
                    .iter()
                    .filter(|(bit, _)| mask & bit != 0)
                    .map(|(_, pos)| *pos)
                    .collect();
                PlayerProjection::new(
                    format!("P{}", i),
                    format!("T{}", team),
                    positions,
                    salary,
                    points as f64,
                )
            });
        let pool = ProjectionPool::from_players(players).ok()?;

        let slots = instance
            .slots
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let slot = match kind {
                    0 => SlotDefinition::single("X"),
                    1 => SlotDefinition::single("Y"),
                    _ => SlotDefinition::new("FLEX", ["X", "Y"]),
                };
                if instance.mvp && i == 0 {
                    slot.with_multiplier(1.5)
                } else {
                    slot
                }
            })
            .collect();
        let mut config = ContestConfig::new("prop", instance.cap, SlateType::MultiGame, slots);
        if let Some(cap) = instance.team_cap {
            config = config.with_max_players_per_team(cap);
        }
        let model = RosterModel::new(&config, &pool).ok()?;
        Some((pool, model))
    }

    /// Best lineup by exhaustive enumeration under the same tie-break order.
    fn brute_force(
        pool: &ProjectionPool<IntegerType>,
        model: &RosterModel<IntegerType>,
    ) -> Option<Lineup<IntegerType>> {
        fn recurse(
            pool: &ProjectionPool<IntegerType>,
            model: &RosterModel<IntegerType>,
            assignment: &mut Vec<PlayerIndex>,
            best: &mut Option<Lineup<IntegerType>>,
        ) {
            if assignment.len() == model.num_slots() {
                let lineup = Lineup::from_assignment(pool, model, assignment.clone());
                if lineup.validate(pool, model).is_err() {
                    return;
                }
                let better = match best.as_ref() {
                    None => true,
                    Some(b) => {
                        let key = |l: &Lineup<IntegerType>| {
                            let mut ids: Vec<u32> =
                                l.slot_assignment().iter().map(|&p| pool.identity_rank(p)).collect();
                            ids.sort_unstable();
                            ids
                        };
                        let (lp, bp) = (lineup.total_projected_points(), b.total_projected_points());
                        if lp > bp + POINTS_EPSILON {
                            true
                        } else if lp < bp - POINTS_EPSILON {
                            false
                        } else if lineup.total_salary() != b.total_salary() {
                            lineup.total_salary() < b.total_salary()
                        } else {
                            key(&lineup) < key(b)
                        }
                    }
                };
                if better {
                    *best = Some(lineup);
                }
                return;
            }

            let slot = SlotIndex::new(assignment.len());
            for &player in model.eligible_players(slot) {
                if assignment.contains(&player) {
                    continue;
                }
                assignment.push(player);
                recurse(pool, model, assignment, best);
                assignment.pop();
            }
        }

        let mut best = None;
        recurse(pool, model, &mut Vec::new(), &mut best);
        best
    }

    proptest! {
        #[test]
        fn test_solver_matches_brute_force(instance in arb_instance()) {
            let Some((pool, model)) = build(&instance) else {
                return Ok(());
            };

            let outcome = solve(&pool, &model);
            match brute_force(&pool, &model) {
                None => prop_assert_eq!(outcome.status(), SolveStatus::Infeasible),
                Some(expected) => {
                    prop_assert_eq!(outcome.status(), SolveStatus::Optimal);
                    let actual = outcome.result().lineup().unwrap();
                    prop_assert!(actual.validate(&pool, &model).is_ok());
                    prop_assert!(
                        (actual.total_projected_points() - expected.total_projected_points()).abs()
                            <= POINTS_EPSILON
                    );
                    prop_assert_eq!(actual.total_salary(), expected.total_salary());
                    prop_assert_eq!(actual.players(), expected.players());
                }
            }
        }
    }
}
