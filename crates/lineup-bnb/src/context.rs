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

//! Search context
//!
//! Everything that alters a solve without touching the pool or the roster
//! model lives here, keyed by `PlayerIndex`:
//!
//! - hard exclusions (players the search must not roster),
//! - density penalties (multiplicative factors on a player's value density
//!   that push them later in the candidate order),
//! - an optional overlap constraint: a set of previously accepted lineups and
//!   a limit on how many players the new lineup may share with each of them.
//!
//! A context is plain data and can be rebuilt from scratch at any time, which
//! is how the multi-lineup generator derives the context of each iteration
//! from the lineups it has accepted so far.

use fixedbitset::FixedBitSet;
use lineup_model::index::PlayerIndex;
use smallvec::SmallVec;

/// Previously accepted lineups and the maximum number of players a new
/// lineup may share with any one of them.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlapConstraint {
    limit: usize,
    num_lineups: usize,
    memberships: Vec<SmallVec<[u32; 4]>>,
}

impl OverlapConstraint {
    /// Builds the constraint over a pool of `num_players` players. Each item
    /// of `lineups` is the player set of one accepted lineup.
    pub fn new<I, L>(num_players: usize, limit: usize, lineups: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[PlayerIndex]>,
    {
        let mut memberships = vec![SmallVec::new(); num_players];
        let mut num_lineups = 0usize;
        for (lineup_index, lineup) in lineups.into_iter().enumerate() {
            for player in lineup.as_ref() {
                memberships[player.get()].push(lineup_index as u32);
            }
            num_lineups = lineup_index + 1;
        }

        Self {
            limit,
            num_lineups,
            memberships,
        }
    }

    /// Maximum number of players shared with any accepted lineup.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of accepted lineups the constraint is checked against.
    #[inline]
    pub fn num_lineups(&self) -> usize {
        self.num_lineups
    }

    /// Returns the indices of the accepted lineups containing `player`.
    #[inline]
    pub fn memberships(&self, player: PlayerIndex) -> &[u32] {
        &self.memberships[player.get()]
    }

    /// Returns `true` if adding `player` to a partial lineup whose shared
    /// counts per accepted lineup are `shared` would exceed the limit.
    #[inline]
    pub fn would_exceed(&self, player: PlayerIndex, shared: &[u32]) -> bool {
        self.memberships(player)
            .iter()
            .any(|&lineup| shared[lineup as usize] as usize >= self.limit)
    }
}

/// Exclusions, penalties and the overlap constraint of one solve.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchContext {
    excluded: FixedBitSet,
    density_penalties: Vec<f64>,
    overlap: Option<OverlapConstraint>,
}

impl SearchContext {
    /// Creates an unconstrained context for a pool of `num_players` players.
    pub fn new(num_players: usize) -> Self {
        Self {
            excluded: FixedBitSet::with_capacity(num_players),
            density_penalties: vec![1.0; num_players],
            overlap: None,
        }
    }

    #[inline]
    pub fn num_players(&self) -> usize {
        self.density_penalties.len()
    }

    /// Hard-excludes a player from the solve.
    #[inline]
    pub fn exclude(&mut self, player: PlayerIndex) {
        self.excluded.insert(player.get());
    }

    #[inline]
    pub fn is_excluded(&self, player: PlayerIndex) -> bool {
        self.excluded.contains(player.get())
    }

    #[inline]
    pub fn num_excluded(&self) -> usize {
        self.excluded.count_ones(..)
    }

    /// Scales the value density of `player` by `factor` when ordering
    /// candidates.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `factor` is not a
    /// positive finite number.
    #[inline]
    pub fn set_density_penalty(&mut self, player: PlayerIndex, factor: f64) {
        debug_assert!(
            factor.is_finite() && factor > 0.0,
            "called `SearchContext::set_density_penalty` with invalid factor: {}",
            factor
        );
        self.density_penalties[player.get()] = factor;
    }

    #[inline]
    pub fn density_penalty(&self, player: PlayerIndex) -> f64 {
        self.density_penalties[player.get()]
    }

    #[inline]
    pub fn set_overlap(&mut self, overlap: OverlapConstraint) {
        self.overlap = Some(overlap);
    }

    pub fn with_overlap(mut self, overlap: OverlapConstraint) -> Self {
        self.overlap = Some(overlap);
        self
    }

    #[inline]
    pub fn overlap(&self) -> Option<&OverlapConstraint> {
        self.overlap.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> PlayerIndex {
        PlayerIndex::new(i)
    }

    #[test]
    fn test_new_context_is_unconstrained() {
        let ctx = SearchContext::new(4);
        assert_eq!(ctx.num_players(), 4);
        assert_eq!(ctx.num_excluded(), 0);
        assert!(!ctx.is_excluded(p(2)));
        assert_eq!(ctx.density_penalty(p(3)), 1.0);
        assert!(ctx.overlap().is_none());
    }

    #[test]
    fn test_exclusions_and_penalties() {
        let mut ctx = SearchContext::new(4);
        ctx.exclude(p(1));
        ctx.exclude(p(1));
        ctx.set_density_penalty(p(2), 0.5);

        assert!(ctx.is_excluded(p(1)));
        assert_eq!(ctx.num_excluded(), 1);
        assert_eq!(ctx.density_penalty(p(2)), 0.5);
    }

    #[test]
    fn test_overlap_memberships_and_limit() {
        let lineups = vec![vec![p(0), p(1)], vec![p(1), p(2)]];
        let overlap = OverlapConstraint::new(4, 1, &lineups);

        assert_eq!(overlap.num_lineups(), 2);
        assert_eq!(overlap.limit(), 1);
        assert_eq!(overlap.memberships(p(1)), &[0, 1]);
        assert!(overlap.memberships(p(3)).is_empty());

        // Lineup 0 already shares one player with the partial lineup.
        let shared = [1u32, 0u32];
        assert!(overlap.would_exceed(p(0), &shared));
        assert!(overlap.would_exceed(p(1), &shared));
        assert!(!overlap.would_exceed(p(2), &shared));
        assert!(!overlap.would_exceed(p(3), &shared));

        let ctx = SearchContext::new(4).with_overlap(overlap.clone());
        assert_eq!(ctx.overlap(), Some(&overlap));
    }
}
