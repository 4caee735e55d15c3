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

//! Error types of the model layer.
//!
//! `PoolError` and `ConfigurationError` reject malformed inputs before any
//! search starts. `ConfigLoadError` covers reading configuration from TOML.
//! `LineupViolation` names the first broken invariant of a lineup checked
//! with `Lineup::validate`.

use crate::index::{PlayerIndex, SlotIndex};
use thiserror::Error;

/// A projection record was rejected while building a `ProjectionPool`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolError {
    #[error("player '{name}' ({team}) has no eligible positions")]
    EmptyPositions { name: String, team: String },

    #[error("player '{name}' ({team}) has a non-positive salary")]
    NonPositiveSalary { name: String, team: String },

    #[error("player '{name}' ({team}) has an invalid projection: {points}")]
    InvalidProjection {
        name: String,
        team: String,
        points: f64,
    },

    #[error("player '{name}' ({team}) appears more than once in the pool")]
    DuplicatePlayer { name: String, team: String },
}

/// A contest configuration cannot be turned into a roster constraint model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("contest '{contest_id}' defines no roster slots")]
    NoSlots { contest_id: String },

    #[error("contest '{contest_id}' has a non-positive salary cap")]
    NonPositiveCap { contest_id: String },

    #[error("slot {slot} ('{label}') accepts no positions")]
    EmptySlotPositions { slot: SlotIndex, label: String },

    #[error("slot {slot} ('{label}') has an invalid multiplier: {multiplier}")]
    InvalidMultiplier {
        slot: SlotIndex,
        label: String,
        multiplier: f64,
    },

    #[error("contest '{contest_id}' has a team cap of zero players")]
    InvalidTeamCap { contest_id: String },

    #[error("no available player in the pool is eligible for slot {slot} ('{label}')")]
    NoEligiblePlayers { slot: SlotIndex, label: String },
}

/// Failure to load a configuration document.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The first invariant a lineup breaks against its pool and roster model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineupViolation {
    #[error("lineup fills {actual} slots but the contest has {expected}")]
    SlotCount { expected: usize, actual: usize },

    #[error("{player} is assigned to slot {slot} but is not eligible for it")]
    IneligiblePlayer { player: PlayerIndex, slot: SlotIndex },

    #[error("{player} occupies more than one slot")]
    DuplicatePlayer { player: PlayerIndex },

    #[error("total salary {total} exceeds the cap of {cap}")]
    SalaryCapExceeded { total: String, cap: String },

    #[error("total salary overflows the salary type and exceeds the cap of {cap}")]
    SalaryOverflow { cap: String },

    #[error("recorded totals do not match the assigned players")]
    TotalsMismatch,

    #[error("team '{team}' has {count} players, more than the cap of {cap}")]
    TeamCapExceeded {
        team: String,
        count: usize,
        cap: usize,
    },
}
