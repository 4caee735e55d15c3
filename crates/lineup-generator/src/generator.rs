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

//! # Multi-Lineup Generation
//!
//! `LineupGenerator` produces up to `N` distinct lineups for one contest by
//! solving repeatedly with a `SearchContext` rebuilt from the lineups
//! accepted so far.
//!
//! ## Per-solve context
//!
//! - Players that already appear in `ceil(max_exposure * N)` accepted
//!   lineups are excluded.
//! - Players that appear in `k > 0` accepted lineups have their value density
//!   scaled by `overlap_penalty^k`. This only reorders candidates; the
//!   objective is unchanged.
//! - An overlap constraint bounds how many players the next lineup may share
//!   with each accepted one by the working overlap limit.
//!
//! ## Relaxation
//!
//! The working limit starts at the request's initial overlap. When a solve
//! is infeasible the limit is raised by one and the solve repeated. Once the
//! limit has reached the maximum (never more than `slots - 1`, which keeps
//! lineups distinct) another infeasible solve ends the run. An infeasible
//! first solve ends the run right away, since no overlap constraint is
//! active yet.
//!
//! ## Limits
//!
//! The node ceiling applies to each solve. The time limit covers the whole
//! run: each solve receives whatever budget is left. A solve stopped by a
//! limit or the interrupt flag ends the run; its unproven lineup is
//! discarded.

use crate::{
    config::{EngineConfig, GenerationRequest},
    error::GeneratorError,
    result::{GenerationOutcome, GenerationStatistics, GenerationStatus},
};
use lineup_bnb::{
    bnb::BnbSolver,
    context::{OverlapConstraint, SearchContext},
    monitor::{
        composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor,
        log::LogTreeSearchMonitor, node_limit::NodeLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::SolveStatus,
};
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{
    index::PlayerIndex, lineup::Lineup, pool::ProjectionPool, roster::RosterModel,
};
use std::{
    sync::atomic::AtomicBool,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

/// Node count between two clock reads of the progress logger.
const LOG_CLOCK_CHECK_MASK: u64 = 4095;

/// Builds the monitor stack of one solve: interrupt flag, node ceiling,
/// the remaining time budget (if any) and progress logging.
pub(crate) fn solve_monitor<'a, T>(
    config: &EngineConfig,
    stop_signal: &'a AtomicBool,
    remaining: Option<Duration>,
) -> CompositeTreeSearchMonitor<'a, T>
where
    T: SalaryNumeric,
{
    let mut monitor = CompositeTreeSearchMonitor::with_capacity(4);
    monitor.add_monitor(InterruptMonitor::new(stop_signal));
    monitor.add_monitor(NodeLimitMonitor::new(config.node_limit()));
    if let Some(remaining) = remaining {
        monitor.add_monitor(TimeLimitMonitor::with_default_check_interval(remaining));
    }
    monitor.add_monitor(LogTreeSearchMonitor::new(
        config.log_interval(),
        LOG_CLOCK_CHECK_MASK,
    ));
    monitor
}

/// Repeated solving with exposure caps, density penalties and overlap
/// constraints.
#[derive(Debug, Clone)]
pub struct LineupGenerator<T> {
    solver: BnbSolver<T>,
    config: EngineConfig,
}

impl<T> Default for LineupGenerator<T>
where
    T: SalaryNumeric,
{
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<T> LineupGenerator<T>
where
    T: SalaryNumeric,
{
    #[inline]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            solver: BnbSolver::new(),
            config,
        }
    }

    /// Creates a generator whose solver buffers fit the given problem size.
    #[inline]
    pub fn preallocated(config: EngineConfig, num_players: usize, num_slots: usize) -> Self {
        Self {
            solver: BnbSolver::preallocated(num_players, num_slots),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates lineups without an external interrupt flag.
    pub fn generate(
        &mut self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome<T>, GeneratorError> {
        let stop_signal = AtomicBool::new(false);
        self.generate_until(pool, model, request, &stop_signal)
    }

    /// Generates lineups until the request is met, no further lineup
    /// exists, a limit is hit or `stop_signal` is raised.
    pub fn generate_until(
        &mut self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        request: &GenerationRequest,
        stop_signal: &AtomicBool,
    ) -> Result<GenerationOutcome<T>, GeneratorError> {
        request.validate()?;

        let start_time = Instant::now();
        let requested = request.num_lineups();
        let exposure_cap = request.exposure_cap();
        let max_limit = request
            .max_overlap()
            .min(model.num_slots().saturating_sub(1));
        let mut limit = request.initial_overlap().min(max_limit);

        let mut accepted: Vec<Lineup<T>> = Vec::with_capacity(requested);
        let mut appearances = vec![0u32; pool.len()];
        let mut stats = GenerationStatistics::default();

        let status = loop {
            if accepted.len() == requested {
                break GenerationStatus::Complete;
            }

            let context = self.build_context(pool, &accepted, &appearances, exposure_cap, limit);
            let remaining = self
                .config
                .time_limit()
                .map(|budget| budget.saturating_sub(start_time.elapsed()));
            let monitor = solve_monitor(&self.config, stop_signal, remaining);

            let outcome = self
                .solver
                .solve_with_context(pool, model, &context, monitor);
            stats.solves += 1;
            stats.search.merge(outcome.statistics());

            match outcome.status() {
                SolveStatus::Optimal => {
                    let Some(lineup) = outcome.into_result().into_lineup() else {
                        break GenerationStatus::Infeasible;
                    };
                    debug_assert!(
                        accepted.iter().all(|prev| prev.shared_players(&lineup) <= limit),
                        "accepted lineup shares more than {} players with an earlier one",
                        limit
                    );

                    for &player in lineup.slot_assignment() {
                        appearances[player.get()] += 1;
                    }
                    debug!(
                        contest = model.contest_id(),
                        lineup = accepted.len() + 1,
                        points = lineup.total_projected_points(),
                        salary = %lineup.total_salary(),
                        overlap_limit = limit,
                        "Accepted lineup"
                    );
                    accepted.push(lineup);
                }
                SolveStatus::Infeasible => {
                    if accepted.is_empty() {
                        break GenerationStatus::Infeasible;
                    }
                    if limit >= max_limit {
                        warn!(
                            contest = model.contest_id(),
                            produced = accepted.len(),
                            requested,
                            "No further distinct lineup within the overlap limit"
                        );
                        break GenerationStatus::Partial {
                            produced: accepted.len(),
                            requested,
                        };
                    }

                    limit += 1;
                    stats.relaxations += 1;
                    info!(
                        contest = model.contest_id(),
                        produced = accepted.len(),
                        overlap_limit = limit,
                        "Relaxed overlap limit"
                    );
                }
                SolveStatus::Timeout => {
                    warn!(
                        contest = model.contest_id(),
                        produced = accepted.len(),
                        requested,
                        reason = %outcome.termination_reason(),
                        "Lineup generation stopped by a search limit"
                    );
                    break GenerationStatus::Timeout {
                        produced: accepted.len(),
                    };
                }
                SolveStatus::Cancelled => {
                    warn!(
                        contest = model.contest_id(),
                        produced = accepted.len(),
                        requested,
                        "Lineup generation cancelled"
                    );
                    break GenerationStatus::Cancelled {
                        produced: accepted.len(),
                    };
                }
            }
        };

        sort_lineups(pool, &mut accepted);
        stats.final_overlap_limit = limit;
        stats.time_total = start_time.elapsed();

        Ok(GenerationOutcome::new(
            model.contest_id(),
            accepted,
            status,
            stats,
        ))
    }

    fn build_context(
        &self,
        pool: &ProjectionPool<T>,
        accepted: &[Lineup<T>],
        appearances: &[u32],
        exposure_cap: usize,
        limit: usize,
    ) -> SearchContext {
        let mut context = SearchContext::new(pool.len());
        let penalty = self.config.overlap_penalty();

        for (i, &count) in appearances.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let player = PlayerIndex::new(i);
            if count as usize >= exposure_cap {
                context.exclude(player);
            } else {
                let factor = penalty.powi(count as i32).max(f64::MIN_POSITIVE);
                context.set_density_penalty(player, factor);
            }
        }

        if !accepted.is_empty() {
            context.set_overlap(OverlapConstraint::new(
                pool.len(),
                limit,
                accepted.iter().map(Lineup::slot_assignment),
            ));
        }

        context
    }
}

/// Orders lineups by points descending, then salary ascending, then the
/// sorted player identities ascending.
fn sort_lineups<T>(pool: &ProjectionPool<T>, lineups: &mut [Lineup<T>])
where
    T: SalaryNumeric,
{
    let identity = |lineup: &Lineup<T>| {
        let mut key: Vec<u32> = lineup
            .slot_assignment()
            .iter()
            .map(|&p| pool.identity_rank(p))
            .collect();
        key.sort_unstable();
        key
    };

    lineups.sort_by(|a, b| {
        b.total_projected_points()
            .total_cmp(&a.total_projected_points())
            .then_with(|| a.total_salary().cmp(&b.total_salary()))
            .then_with(|| identity(a).cmp(&identity(b)))
    });
}
