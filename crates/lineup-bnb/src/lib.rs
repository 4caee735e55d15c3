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

//! Lineup-BnB: branch-and-bound for lineup optimization
//!
//! Finds the single lineup of a `ProjectionPool` that maximizes projected
//! points under a `RosterModel` (slot eligibility, salary cap, optional team
//! cap), or proves that none exists. The solver is deterministic: the same
//! pool, model and search context always yield the same lineup.
//!
//! Core flow
//! - Build a `lineup_model::roster::RosterModel<T>` for the pool.
//! - Optionally build a `context::SearchContext` (exclusions, density
//!   penalties, overlap constraint against accepted lineups).
//! - Pick a monitor (`monitor::*`) for logging, limits and cancellation.
//! - Run `bnb::BnbSolver` and read the `result::BnbSolverOutcome`.
//!
//! Module map
//! - `bnb`: the solver engine and search session.
//! - `context`: exclusions, penalties and overlap constraints of a solve.
//! - `decision`: branching decisions.
//! - `monitor`: tree-search monitors (log, limits, interrupt, composite).
//! - `plan`: slot order, candidate order and suffix bounds.
//! - `result`: outcomes, termination reasons and caller-facing status.
//! - `state`: the partial lineup under construction.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod context;
pub mod decision;
mod incumbent;
pub mod monitor;
pub mod plan;
pub mod result;
mod stack;
pub mod state;
pub mod stats;
