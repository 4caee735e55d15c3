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

//! Search state of the lineup solver.
//!
//! `SearchState` holds the partial lineup the search is currently extending:
//! the player chosen at each depth (in slot fill order), their candidate
//! ranks, prefix sums of salary and points, the set of used players, the
//! per-team counts and, when an overlap constraint is active, how many
//! players the partial lineup already shares with each accepted lineup.
//!
//! The state is mutated in place. Every `push` is undone by exactly one
//! `pop`, so backtracking needs no separate trail. Prefix sums are stored per
//! depth, which makes `pop` a truncation instead of a subtraction and keeps
//! floating point totals exact across backtracks.

use crate::{context::OverlapConstraint, decision::Decision};
use fixedbitset::FixedBitSet;
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{
    index::{PlayerIndex, TeamIndex},
    roster::TeamCounts,
};

#[derive(Debug, Clone)]
pub struct SearchState<T> {
    assignment: Vec<PlayerIndex>,
    ranks: Vec<u32>,
    teams: Vec<TeamIndex>,
    salary_prefix: Vec<T>,
    points_prefix: Vec<f64>,
    used: FixedBitSet,
    team_counts: TeamCounts,
    overlap_counts: Vec<u32>,
}

impl<T> SearchState<T>
where
    T: SalaryNumeric,
{
    /// Creates an empty state for the given problem size.
    #[inline]
    pub fn new(num_players: usize, num_slots: usize, num_teams: usize) -> Self {
        let mut salary_prefix = Vec::with_capacity(num_slots + 1);
        salary_prefix.push(T::ZERO);
        let mut points_prefix = Vec::with_capacity(num_slots + 1);
        points_prefix.push(0.0);

        Self {
            assignment: Vec::with_capacity(num_slots),
            ranks: Vec::with_capacity(num_slots),
            teams: Vec::with_capacity(num_slots),
            salary_prefix,
            points_prefix,
            used: FixedBitSet::with_capacity(num_players),
            team_counts: TeamCounts::new(num_teams),
            overlap_counts: Vec::new(),
        }
    }

    /// Clears the state for a new solve, keeping allocated capacity.
    pub fn reset(&mut self, num_players: usize, num_teams: usize, num_accepted: usize) {
        self.assignment.clear();
        self.ranks.clear();
        self.teams.clear();
        self.salary_prefix.clear();
        self.salary_prefix.push(T::ZERO);
        self.points_prefix.clear();
        self.points_prefix.push(0.0);
        self.used.clear();
        self.used.grow(num_players);
        self.team_counts.reset(num_teams);
        self.overlap_counts.clear();
        self.overlap_counts.resize(num_accepted, 0);
    }

    /// Returns the number of filled slots.
    #[inline]
    pub fn depth(&self) -> usize {
        self.assignment.len()
    }

    /// Returns the salary of the partial lineup.
    #[inline]
    pub fn current_salary(&self) -> T {
        self.salary_prefix[self.assignment.len()]
    }

    /// Returns the multiplier-weighted points of the partial lineup.
    #[inline]
    pub fn current_points(&self) -> f64 {
        self.points_prefix[self.assignment.len()]
    }

    /// Returns the chosen players in slot fill order.
    #[inline]
    pub fn assignment(&self) -> &[PlayerIndex] {
        &self.assignment
    }

    /// Returns the candidate rank chosen at the deepest filled slot.
    #[inline]
    pub fn last_rank(&self) -> Option<u32> {
        self.ranks.last().copied()
    }

    #[inline]
    pub fn is_used(&self, player: PlayerIndex) -> bool {
        self.used.contains(player.get())
    }

    #[inline]
    pub fn team_counts(&self) -> &TeamCounts {
        &self.team_counts
    }

    /// Returns the number of players shared with each accepted lineup.
    #[inline]
    pub fn overlap_counts(&self) -> &[u32] {
        &self.overlap_counts
    }

    /// Fills the next slot.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if the player is already
    /// part of the partial lineup.
    #[inline]
    pub(crate) fn push(
        &mut self,
        decision: Decision,
        team: TeamIndex,
        salary: T,
        points: f64,
        overlap: Option<&OverlapConstraint>,
    ) {
        let player = decision.player();
        debug_assert!(
            !self.is_used(player),
            "called `SearchState::push` with a player already in the lineup: {}",
            player
        );

        // Children are only enqueued when their cheapest completion fits the
        // cap, so the prefix cannot overflow.
        let salary = self.current_salary().checked_add_val(salary);
        debug_assert!(
            salary.is_some(),
            "called `SearchState::push` with a salary prefix overflowing the salary type"
        );
        let salary = salary.unwrap_or_else(T::max_value);
        let points = self.current_points() + points;

        self.assignment.push(player);
        self.ranks.push(decision.rank());
        self.teams.push(team);
        self.salary_prefix.push(salary);
        self.points_prefix.push(points);
        self.used.insert(player.get());
        self.team_counts.increment(team);

        if let Some(overlap) = overlap {
            for &lineup in overlap.memberships(player) {
                self.overlap_counts[lineup as usize] += 1;
            }
        }
    }

    /// Empties the deepest filled slot, returning the player that filled it.
    #[inline]
    pub(crate) fn pop(&mut self, overlap: Option<&OverlapConstraint>) -> Option<PlayerIndex> {
        let player = self.assignment.pop()?;
        self.ranks.pop();
        self.salary_prefix.pop();
        self.points_prefix.pop();
        self.used.set(player.get(), false);
        if let Some(team) = self.teams.pop() {
            self.team_counts.decrement(team);
        }

        if let Some(overlap) = overlap {
            for &lineup in overlap.memberships(player) {
                self.overlap_counts[lineup as usize] -= 1;
            }
        }

        Some(player)
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: SalaryNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(depth: {}, salary: {}, points: {:.2})",
            self.depth(),
            self.current_salary(),
            self.current_points()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = u32;

    fn d(player: usize, rank: u32) -> Decision {
        Decision::new(PlayerIndex::new(player), rank)
    }

    #[test]
    fn test_push_and_pop_restore_totals() {
        let mut state = SearchState::<IntegerType>::new(4, 2, 2);
        state.push(d(1, 0), TeamIndex::new(0), 10, 20.0, None);
        state.push(d(3, 2), TeamIndex::new(0), 5, 7.5, None);

        assert_eq!(state.depth(), 2);
        assert_eq!(state.current_salary(), 15);
        assert_eq!(state.current_points(), 27.5);
        assert_eq!(state.last_rank(), Some(2));
        assert!(state.is_used(PlayerIndex::new(3)));
        assert_eq!(state.team_counts().count(TeamIndex::new(0)), 2);

        assert_eq!(state.pop(None), Some(PlayerIndex::new(3)));
        assert_eq!(state.current_salary(), 10);
        assert_eq!(state.current_points(), 20.0);
        assert!(!state.is_used(PlayerIndex::new(3)));
        assert_eq!(state.team_counts().count(TeamIndex::new(0)), 1);

        assert_eq!(state.pop(None), Some(PlayerIndex::new(1)));
        assert_eq!(state.pop(None), None);
        assert_eq!(state.current_salary(), 0);
    }

    #[test]
    fn test_overlap_counts_follow_push_and_pop() {
        let lineups = vec![vec![PlayerIndex::new(0)], vec![PlayerIndex::new(0), PlayerIndex::new(1)]];
        let overlap = OverlapConstraint::new(3, 1, &lineups);

        let mut state = SearchState::<IntegerType>::new(3, 2, 1);
        state.reset(3, 1, overlap.num_lineups());
        state.push(d(0, 0), TeamIndex::new(0), 1, 1.0, Some(&overlap));
        assert_eq!(state.overlap_counts(), &[1, 1]);

        state.push(d(1, 0), TeamIndex::new(0), 1, 1.0, Some(&overlap));
        assert_eq!(state.overlap_counts(), &[1, 2]);

        state.pop(Some(&overlap));
        state.pop(Some(&overlap));
        assert_eq!(state.overlap_counts(), &[0, 0]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = SearchState::<IntegerType>::new(2, 1, 1);
        state.push(d(0, 0), TeamIndex::new(0), 3, 3.0, None);
        state.reset(5, 2, 0);

        assert_eq!(state.depth(), 0);
        assert_eq!(state.current_salary(), 0);
        assert!(!state.is_used(PlayerIndex::new(0)));
        assert_eq!(state.team_counts().count(TeamIndex::new(1)), 0);
        assert!(state.last_rank().is_none());
    }
}
