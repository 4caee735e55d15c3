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

//! Lineup-Generator: diverse lineup sets on top of `lineup-bnb`
//!
//! Produces up to `N` distinct lineups for one contest by running the
//! branch-and-bound solver repeatedly. Every accepted lineup feeds the next
//! solve through a `lineup_bnb::context::SearchContext`: players that hit
//! their exposure cap are excluded, players already used get a density
//! penalty, and an overlap constraint bounds how many players the next
//! lineup may share with each accepted one. When a solve becomes infeasible
//! the working overlap limit is relaxed one step at a time up to the
//! requested maximum.
//!
//! Module map
//! - `config`: engine settings and generation requests, loadable from TOML.
//! - `engine`: the `LineupEngine` facade with cancellation and batch runs.
//! - `error`: request and configuration errors.
//! - `generator`: the sequential generation loop.
//! - `result`: generation status, statistics and outcome.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod result;
