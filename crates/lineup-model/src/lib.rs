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

//! Lineup‑Model: inputs and outputs of the lineup optimization engine
//!
//! Data flow
//! - `PlayerProjection` records are validated into a `ProjectionPool`.
//! - A `ContestConfig` (built in code, from a preset, or loaded from TOML)
//!   describes the salary cap, the slate type and the ordered roster slots.
//! - `RosterModel::new(&config, &pool)` turns both into the queryable rule set
//!   the solver runs against, or fails with a `ConfigurationError`.
//! - The solver returns `Lineup`s, which can be re‑checked with
//!   `Lineup::validate`.
//!
//! Module map
//! - `index`: typed `PlayerIndex`, `SlotIndex`, `TeamIndex`.
//! - `position`: normalized position codes and position sets.
//! - `player`: projection records and injury status.
//! - `pool`: the validated projection pool.
//! - `contest`: contest descriptors, slot definitions and presets.
//! - `roster`: the roster constraint model, injury policy and team counts.
//! - `lineup`: lineups, invariant checks and tabular display.
//! - `error`: error types of this crate.

pub mod contest;
pub mod error;
pub mod index;
pub mod lineup;
pub mod player;
pub mod pool;
pub mod position;
pub mod roster;
