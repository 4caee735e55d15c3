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

//! # Lineup Engine
//!
//! The caller-facing entry point. A `LineupEngine` owns an `EngineConfig`
//! and a cooperative stop signal, and runs three kinds of work:
//!
//! - `solve_one`: a single optimal lineup for a pool and roster model.
//! - `generate` / `generate_for_contest`: a diverse set of lineups for one
//!   contest.
//! - `generate_batch`: independent contests in parallel on a bounded set of
//!   scoped worker threads, each contest with its own solver buffers. Pools
//!   and contest configs are only borrowed.
//!
//! Every solve gets an interrupt monitor on the engine's stop signal, so
//! `cancel` (callable from any thread through a shared reference) stops
//! all running work at the next node. The signal stays raised until
//! `reset_cancellation` is called.
//!
//! ```rust
//! use lineup_generator::{config::GenerationRequest, engine::LineupEngine};
//! use lineup_model::{
//!     contest::{ContestConfig, SlateType, SlotDefinition},
//!     player::PlayerProjection,
//!     pool::ProjectionPool,
//! };
//!
//! let pool = ProjectionPool::<u32>::from_players([
//!     PlayerProjection::new("A", "T1", ["X"], 10, 20.0),
//!     PlayerProjection::new("B", "T2", ["X"], 10, 15.0),
//!     PlayerProjection::new("C", "T1", ["Y"], 5, 5.0),
//! ])
//! .unwrap();
//! let contest = ContestConfig::new(
//!     "demo",
//!     20,
//!     SlateType::MultiGame,
//!     vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
//! );
//!
//! let engine = LineupEngine::builder()
//!     .with_time_limit(std::time::Duration::from_secs(5))
//!     .build();
//! let outcome = engine
//!     .generate_for_contest(&pool, &contest, &GenerationRequest::new(1, 1))
//!     .unwrap();
//! assert_eq!(outcome.lineups()[0].total_projected_points(), 25.0);
//! ```

use crate::{
    config::{EngineConfig, GenerationRequest},
    error::GeneratorError,
    generator::{LineupGenerator, solve_monitor},
    result::GenerationOutcome,
};
use lineup_bnb::{bnb::BnbSolver, result::BnbSolverOutcome};
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{
    contest::ContestConfig, error::ConfigurationError, pool::ProjectionPool, roster::InjuryPolicy,
    roster::RosterModel,
};
use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};
use tracing::info;

/// One contest of a batch run.
#[derive(Debug, Clone)]
pub struct ContestJob<'a, T> {
    pub pool: &'a ProjectionPool<T>,
    pub contest: &'a ContestConfig<T>,
    pub request: GenerationRequest,
}

impl<'a, T> ContestJob<'a, T> {
    #[inline]
    pub fn new(
        pool: &'a ProjectionPool<T>,
        contest: &'a ContestConfig<T>,
        request: GenerationRequest,
    ) -> Self {
        Self {
            pool,
            contest,
            request,
        }
    }
}

#[derive(Debug)]
pub struct LineupEngine {
    config: EngineConfig,
    /// Raised by `cancel`; polled by every running solve.
    stop_signal: AtomicBool,
}

impl Default for LineupEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LineupEngine {
    #[inline]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stop_signal: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn builder() -> LineupEngineBuilder {
        LineupEngineBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Asks all running and future solves of this engine to stop.
    #[inline]
    pub fn cancel(&self) {
        self.stop_signal.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stop_signal.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset_cancellation(&self) {
        self.stop_signal.store(false, Ordering::Relaxed);
    }

    /// Builds the roster model of `contest` under the engine's injury policy.
    pub fn build_model<T>(
        &self,
        pool: &ProjectionPool<T>,
        contest: &ContestConfig<T>,
    ) -> Result<RosterModel<T>, ConfigurationError>
    where
        T: SalaryNumeric,
    {
        RosterModel::with_injury_policy(contest, pool, self.config.injury_policy())
    }

    /// Finds the single best lineup.
    pub fn solve_one<T>(&self, pool: &ProjectionPool<T>, model: &RosterModel<T>) -> BnbSolverOutcome<T>
    where
        T: SalaryNumeric,
    {
        let monitor = solve_monitor(&self.config, &self.stop_signal, self.config.time_limit());
        let mut solver = BnbSolver::preallocated(pool.len(), model.num_slots());
        solver.solve(pool, model, monitor)
    }

    /// Generates a diverse set of lineups for a prepared roster model.
    pub fn generate<T>(
        &self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome<T>, GeneratorError>
    where
        T: SalaryNumeric,
    {
        let mut generator =
            LineupGenerator::preallocated(self.config.clone(), pool.len(), model.num_slots());
        generator.generate_until(pool, model, request, &self.stop_signal)
    }

    /// Builds the roster model of `contest` and generates lineups for it.
    pub fn generate_for_contest<T>(
        &self,
        pool: &ProjectionPool<T>,
        contest: &ContestConfig<T>,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome<T>, GeneratorError>
    where
        T: SalaryNumeric,
    {
        let model = self.build_model(pool, contest)?;
        self.generate(pool, &model, request)
    }

    /// Runs independent contests concurrently on at most
    /// `EngineConfig::batch_threads` workers. Results come back in job order.
    pub fn generate_batch<T>(
        &self,
        jobs: &[ContestJob<'_, T>],
    ) -> Vec<Result<GenerationOutcome<T>, GeneratorError>>
    where
        T: SalaryNumeric,
    {
        let workers = self.config.batch_threads(jobs.len());
        info!(
            contests = jobs.len(),
            workers, "Starting batch lineup generation"
        );

        let next_job = AtomicUsize::new(0);
        let mut slots: Vec<Option<Result<GenerationOutcome<T>, GeneratorError>>> =
            (0..jobs.len()).map(|_| None).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(|| {
                        let mut done = Vec::new();
                        loop {
                            let index = next_job.fetch_add(1, Ordering::Relaxed);
                            let Some(job) = jobs.get(index) else {
                                break;
                            };
                            let result =
                                self.generate_for_contest(job.pool, job.contest, &job.request);
                            done.push((index, result));
                        }
                        done
                    })
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(done) => {
                        for (index, result) in done {
                            slots[index] = Some(result);
                        }
                    }
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
        });

        // Workers drain the queue, so every slot is filled.
        slots.into_iter().flatten().collect()
    }
}

pub struct LineupEngineBuilder {
    config: EngineConfig,
}

impl Default for LineupEngineBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl LineupEngineBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Starts from a loaded config instead of the defaults.
    #[inline]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.config = self.config.with_node_limit(limit);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config = self.config.with_time_limit(limit);
        self
    }

    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_log_interval(interval);
        self
    }

    #[inline]
    pub fn with_overlap_penalty(mut self, penalty: f64) -> Self {
        self.config = self.config.with_overlap_penalty(penalty);
        self
    }

    #[inline]
    pub fn with_injury_policy(mut self, policy: InjuryPolicy) -> Self {
        self.config = self.config.with_injury_policy(policy);
        self
    }

    #[inline]
    pub fn with_batch_threads(mut self, threads: usize) -> Self {
        self.config = self.config.with_batch_threads(threads);
        self
    }

    #[inline]
    pub fn build(self) -> LineupEngine {
        LineupEngine::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::GenerationStatus;
    use lineup_bnb::result::{SolveStatus, SolverResult};
    use lineup_model::{
        contest::{SlateType, SlotDefinition},
        player::{InjuryStatus, PlayerProjection},
    };

    type IntegerType = u32;

    fn small_pool() -> ProjectionPool<IntegerType> {
        ProjectionPool::from_players([
            PlayerProjection::new("A", "T1", ["X"], 10, 20.0),
            PlayerProjection::new("B", "T2", ["X"], 10, 15.0),
            PlayerProjection::new("C", "T1", ["Y"], 5, 5.0),
            PlayerProjection::new("D", "T2", ["Y"], 5, 4.0),
        ])
        .unwrap()
    }

    fn contest(id: &str, cap: IntegerType) -> ContestConfig<IntegerType> {
        ContestConfig::new(
            id,
            cap,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        )
    }

    #[test]
    fn test_builder_sets_config() {
        let engine = LineupEngine::builder()
            .with_node_limit(99)
            .with_time_limit(Duration::from_millis(10))
            .with_log_interval(Duration::from_millis(20))
            .with_overlap_penalty(0.5)
            .with_injury_policy(InjuryPolicy::IncludeAll)
            .build();

        assert_eq!(engine.config().node_limit(), 99);
        assert_eq!(engine.config().time_limit(), Some(Duration::from_millis(10)));
        assert_eq!(engine.config().log_interval(), Duration::from_millis(20));
        assert_eq!(engine.config().overlap_penalty(), 0.5);
        assert_eq!(engine.config().injury_policy(), InjuryPolicy::IncludeAll);

        let engine = LineupEngine::builder()
            .with_config(EngineConfig::new().with_node_limit(5))
            .build();
        assert_eq!(engine.config().node_limit(), 5);
    }

    #[test]
    fn test_solve_one_finds_optimum() {
        let pool = small_pool();
        let engine = LineupEngine::default();
        let model = engine.build_model(&pool, &contest("one", 20)).unwrap();

        let outcome = engine.solve_one(&pool, &model);
        assert_eq!(outcome.status(), SolveStatus::Optimal);
        let lineup = outcome.result().lineup().unwrap();
        assert_eq!(lineup.total_salary(), 15);
        assert_eq!(lineup.total_projected_points(), 25.0);

        let model = engine.build_model(&pool, &contest("one", 14)).unwrap();
        assert_eq!(engine.solve_one(&pool, &model).result(), &SolverResult::Infeasible);
    }

    #[test]
    fn test_cancel_and_reset() {
        let pool = small_pool();
        let engine = LineupEngine::default();
        let request = GenerationRequest::new(2, 1);

        engine.cancel();
        assert!(engine.is_cancelled());
        let outcome = engine
            .generate_for_contest(&pool, &contest("c", 20), &request)
            .unwrap();
        assert_eq!(outcome.status(), GenerationStatus::Cancelled { produced: 0 });

        engine.reset_cancellation();
        let outcome = engine
            .generate_for_contest(&pool, &contest("c", 20), &request)
            .unwrap();
        assert_eq!(outcome.status(), GenerationStatus::Complete);
        assert_eq!(outcome.len(), 2);
    }

    #[test]
    fn test_injury_policy_applies_to_built_models() {
        let pool = ProjectionPool::<IntegerType>::from_players([
            PlayerProjection::new("A", "T1", ["X"], 10, 20.0).with_injury_status(InjuryStatus::Out),
            PlayerProjection::new("B", "T2", ["X"], 10, 15.0),
            PlayerProjection::new("C", "T1", ["Y"], 5, 5.0),
        ])
        .unwrap();

        let engine = LineupEngine::default();
        let outcome = engine
            .generate_for_contest(&pool, &contest("inj", 50), &GenerationRequest::new(1, 1))
            .unwrap();
        assert_eq!(outcome.lineups()[0].total_projected_points(), 20.0);

        let engine = LineupEngine::builder()
            .with_injury_policy(InjuryPolicy::IncludeAll)
            .build();
        let outcome = engine
            .generate_for_contest(&pool, &contest("inj", 50), &GenerationRequest::new(1, 1))
            .unwrap();
        assert_eq!(outcome.lineups()[0].total_projected_points(), 25.0);
    }

    #[test]
    fn test_batch_runs_contests_independently() {
        let pool = small_pool();
        let wide = contest("wide", 100);
        let tight = contest("tight", 14);
        let broken = ContestConfig::new("broken", 100, SlateType::MultiGame, Vec::new());

        let engine = LineupEngine::default();
        let jobs = [
            ContestJob::new(&pool, &wide, GenerationRequest::new(2, 1)),
            ContestJob::new(&pool, &tight, GenerationRequest::new(2, 1)),
            ContestJob::new(&pool, &broken, GenerationRequest::new(2, 1)),
            ContestJob::new(&pool, &wide, GenerationRequest::new(0, 1)),
        ];
        let results = engine.generate_batch(&jobs);
        assert_eq!(results.len(), 4);

        let wide_outcome = results[0].as_ref().unwrap();
        assert_eq!(wide_outcome.contest_id(), "wide");
        assert_eq!(wide_outcome.status(), GenerationStatus::Complete);
        assert_eq!(wide_outcome.len(), 2);

        let tight_outcome = results[1].as_ref().unwrap();
        assert_eq!(tight_outcome.status(), GenerationStatus::Infeasible);

        assert!(matches!(
            results[2],
            Err(GeneratorError::Configuration(ConfigurationError::NoSlots { .. }))
        ));
        assert!(matches!(results[3], Err(GeneratorError::InvalidRequest(_))));
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let pool = small_pool();
        let first = contest("first", 100);
        let second = contest("second", 30);
        let engine = LineupEngine::default();
        let request = GenerationRequest::new(3, 1).with_max_exposure(0.7);

        let batch = engine.generate_batch(&[
            ContestJob::new(&pool, &first, request.clone()),
            ContestJob::new(&pool, &second, request.clone()),
        ]);
        let sequential = [
            engine.generate_for_contest(&pool, &first, &request).unwrap(),
            engine.generate_for_contest(&pool, &second, &request).unwrap(),
        ];

        for (batched, single) in batch.iter().zip(sequential.iter()) {
            let batched = batched.as_ref().unwrap();
            assert_eq!(batched.lineups(), single.lineups());
            assert_eq!(batched.status(), single.status());
        }
    }

    #[test]
    fn test_batch_with_more_contests_than_workers_keeps_job_order() {
        let pool = small_pool();
        let contests: Vec<_> = (0..7)
            .map(|i| contest(&format!("c{}", i), 15 + i))
            .collect();
        let jobs: Vec<_> = contests
            .iter()
            .map(|c| ContestJob::new(&pool, c, GenerationRequest::new(1, 1)))
            .collect();

        let engine = LineupEngine::builder().with_batch_threads(2).build();
        assert_eq!(engine.config().batch_threads(jobs.len()), 2);

        let results = engine.generate_batch(&jobs);
        assert_eq!(results.len(), 7);
        for (i, result) in results.iter().enumerate() {
            let outcome = result.as_ref().unwrap();
            assert_eq!(outcome.contest_id(), format!("c{}", i));
            assert_eq!(outcome.status(), GenerationStatus::Complete);
        }

        assert!(engine.generate_batch::<IntegerType>(&[]).is_empty());
    }
}
