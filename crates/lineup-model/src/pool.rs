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

//! The projection pool.
//!
//! `ProjectionPool<T>` is the validated, read-only collection of player
//! projections a solve runs against. Players are addressed by `PlayerIndex`
//! in insertion order. Identity is the `(name, team)` pair; the pool keeps a
//! precomputed identity rank (position in ascending `(name, team)` order) so
//! that name-based tie-breaks in the solver compare integers instead of
//! strings.
//!
//! Pools are built with `ProjectionPoolBuilder`, which rejects records the
//! engine cannot reason about: no eligible position, a zero salary, a
//! negative or non-finite projection, or a duplicate identity.

use crate::{error::PoolError, index::PlayerIndex, player::PlayerProjection};
use lineup_core::num::salary::SalaryNumeric;
use rustc_hash::FxHashMap;

#[derive(Clone)]
pub struct ProjectionPool<T> {
    players: Vec<PlayerProjection<T>>,
    identity_ranks: Vec<u32>,
    lookup: FxHashMap<(String, String), PlayerIndex>,
}

impl<T> ProjectionPool<T>
where
    T: SalaryNumeric,
{
    /// Builds a pool from an iterator of projections, failing on the first
    /// rejected record.
    pub fn from_players<I>(players: I) -> Result<Self, PoolError>
    where
        I: IntoIterator<Item = PlayerProjection<T>>,
    {
        let mut builder = ProjectionPoolBuilder::new();
        for player in players {
            builder.add_player(player)?;
        }
        Ok(builder.build())
    }

    /// Returns the number of players in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if the pool holds no players.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns the player at `index`.
    ///
    /// # Panics
    ///
    /// This function will panic if `index` is out of bounds.
    #[inline]
    pub fn player(&self, index: PlayerIndex) -> &PlayerProjection<T> {
        let i = index.get();
        debug_assert!(
            i < self.players.len(),
            "called `ProjectionPool::player` with player index out of bounds: the len is {} but the index is {}",
            self.players.len(),
            i
        );
        &self.players[i]
    }

    /// Returns all players in index order.
    #[inline]
    pub fn players(&self) -> &[PlayerProjection<T>] {
        &self.players
    }

    /// Iterates over `(index, player)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, &PlayerProjection<T>)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| (PlayerIndex::new(i), p))
    }

    /// Looks a player up by identity.
    #[inline]
    pub fn find(&self, name: &str, team: &str) -> Option<PlayerIndex> {
        self.lookup
            .get(&(name.to_string(), team.to_string()))
            .copied()
    }

    /// Returns the rank of the player in ascending `(name, team)` order.
    /// Ranks are unique within the pool.
    #[inline]
    pub fn identity_rank(&self, index: PlayerIndex) -> u32 {
        self.identity_ranks[index.get()]
    }

    /// Returns the salary of the player at `index`.
    #[inline]
    pub fn salary(&self, index: PlayerIndex) -> T {
        self.player(index).salary()
    }

    /// Returns the projected points of the player at `index`.
    #[inline]
    pub fn projected_points(&self, index: PlayerIndex) -> f64 {
        self.player(index).projected_points()
    }
}

impl<T> std::fmt::Debug for ProjectionPool<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionPool")
            .field("players", &self.players)
            .finish()
    }
}

impl<T> std::fmt::Display for ProjectionPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProjectionPool(players: {})", self.players.len())
    }
}

/// Incremental, validating builder for a `ProjectionPool`.
#[derive(Clone, Debug, Default)]
pub struct ProjectionPoolBuilder<T> {
    players: Vec<PlayerProjection<T>>,
    lookup: FxHashMap<(String, String), PlayerIndex>,
}

impl<T> ProjectionPoolBuilder<T>
where
    T: SalaryNumeric,
{
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            players: Vec::with_capacity(capacity),
            lookup: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the number of players added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Validates and adds a player, returning the index it will have in the
    /// built pool.
    pub fn add_player(&mut self, player: PlayerProjection<T>) -> Result<PlayerIndex, PoolError> {
        let identity = || (player.name().to_string(), player.team().to_string());

        if player.eligible_positions().iter().all(|p| p.is_empty()) {
            let (name, team) = identity();
            return Err(PoolError::EmptyPositions { name, team });
        }

        if player.salary() == T::ZERO {
            let (name, team) = identity();
            return Err(PoolError::NonPositiveSalary { name, team });
        }

        let points = player.projected_points();
        if !points.is_finite() || points < 0.0 {
            let (name, team) = identity();
            return Err(PoolError::InvalidProjection { name, team, points });
        }

        let key = identity();
        if self.lookup.contains_key(&key) {
            let (name, team) = key;
            return Err(PoolError::DuplicatePlayer { name, team });
        }

        let index = PlayerIndex::new(self.players.len());
        self.lookup.insert(key, index);
        self.players.push(player);
        Ok(index)
    }

    /// Finalizes the pool and computes identity ranks.
    pub fn build(self) -> ProjectionPool<T> {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (&self.players[a], &self.players[b]);
            pa.name()
                .cmp(pb.name())
                .then_with(|| pa.team().cmp(pb.team()))
        });

        let mut identity_ranks = vec![0u32; self.players.len()];
        for (rank, &i) in order.iter().enumerate() {
            identity_ranks[i] = rank as u32;
        }

        ProjectionPool {
            players: self.players,
            identity_ranks,
            lookup: self.lookup,
        }
    }
}
