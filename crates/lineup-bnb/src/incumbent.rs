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

//! The best lineup found so far.
//!
//! Lineups compare by projected points first. Totals within
//! `POINTS_EPSILON` of each other count as equal and fall through to the
//! lower salary, then to the lexicographically smaller set of sorted player
//! identity ranks (ascending `(name, team)`).

use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{index::PlayerIndex, lineup::Lineup, lineup::POINTS_EPSILON, pool::ProjectionPool};
use smallvec::SmallVec;

/// Sorted identity ranks of a lineup's players.
pub(crate) type IdentityKey = SmallVec<[u32; 9]>;

pub(crate) fn identity_key<T>(pool: &ProjectionPool<T>, players: &[PlayerIndex]) -> IdentityKey
where
    T: SalaryNumeric,
{
    let mut key: IdentityKey = players.iter().map(|&p| pool.identity_rank(p)).collect();
    key.sort_unstable();
    key
}

#[derive(Debug, Clone)]
pub(crate) struct Incumbent<T> {
    best: Option<(Lineup<T>, IdentityKey)>,
}

impl<T> Default for Incumbent<T> {
    fn default() -> Self {
        Self { best: None }
    }
}

impl<T> Incumbent<T>
where
    T: SalaryNumeric,
{
    #[inline]
    pub fn is_some(&self) -> bool {
        self.best.is_some()
    }

    #[inline]
    pub fn lineup(&self) -> Option<&Lineup<T>> {
        self.best.as_ref().map(|(lineup, _)| lineup)
    }

    /// Returns `true` if no completion with at most `upper_points` points and
    /// at least `min_salary` salary can replace the incumbent.
    #[inline]
    pub fn dominates(&self, upper_points: f64, min_salary: T) -> bool {
        let Some((best, _)) = &self.best else {
            return false;
        };
        let best_points = best.total_projected_points();

        if upper_points < best_points - POINTS_EPSILON {
            return true;
        }
        upper_points <= best_points + POINTS_EPSILON && min_salary > best.total_salary()
    }

    /// Returns `true` if `candidate` replaces the incumbent.
    pub fn improves(&self, pool: &ProjectionPool<T>, candidate: &Lineup<T>) -> bool {
        let Some((best, best_key)) = &self.best else {
            return true;
        };

        let points = candidate.total_projected_points();
        let best_points = best.total_projected_points();
        if points > best_points + POINTS_EPSILON {
            return true;
        }
        if points < best_points - POINTS_EPSILON {
            return false;
        }

        match candidate.total_salary().cmp(&best.total_salary()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => {
                identity_key(pool, candidate.slot_assignment()) < *best_key
            }
        }
    }

    #[inline]
    pub fn install(&mut self, pool: &ProjectionPool<T>, lineup: Lineup<T>) {
        let key = identity_key(pool, lineup.slot_assignment());
        self.best = Some((lineup, key));
    }

    #[inline]
    pub fn take(&mut self) -> Option<Lineup<T>> {
        self.best.take().map(|(lineup, _)| lineup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_model::{
        contest::{ContestConfig, SlateType, SlotDefinition},
        player::PlayerProjection,
        roster::RosterModel,
    };

    type IntegerType = u32;

    fn fixture() -> (ProjectionPool<IntegerType>, RosterModel<IntegerType>) {
        let pool = ProjectionPool::from_players([
            PlayerProjection::new("Bravo", "T1", ["X"], 10, 10.0),
            PlayerProjection::new("Alpha", "T1", ["X"], 10, 10.0),
            PlayerProjection::new("Cheap", "T1", ["X"], 8, 10.0),
            PlayerProjection::new("Star", "T1", ["X"], 12, 11.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "inc",
            50,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X")],
        );
        let model = RosterModel::new(&config, &pool).unwrap();
        (pool, model)
    }

    fn lineup(
        pool: &ProjectionPool<IntegerType>,
        model: &RosterModel<IntegerType>,
        i: usize,
    ) -> Lineup<IntegerType> {
        Lineup::from_assignment(pool, model, vec![PlayerIndex::new(i)])
    }

    #[test]
    fn test_empty_incumbent_accepts_anything() {
        let (pool, model) = fixture();
        let inc = Incumbent::default();
        assert!(!inc.is_some());
        assert!(inc.improves(&pool, &lineup(&pool, &model, 0)));
        assert!(!inc.dominates(0.0, 1000));
    }

    #[test]
    fn test_tie_breaks_salary_then_identity() {
        let (pool, model) = fixture();
        let mut inc = Incumbent::default();
        inc.install(&pool, lineup(&pool, &model, 0));

        // Same points and salary, "Alpha" sorts before "Bravo".
        assert!(inc.improves(&pool, &lineup(&pool, &model, 1)));
        // Same points, lower salary.
        assert!(inc.improves(&pool, &lineup(&pool, &model, 2)));
        // More points.
        assert!(inc.improves(&pool, &lineup(&pool, &model, 3)));

        inc.install(&pool, lineup(&pool, &model, 1));
        assert!(!inc.improves(&pool, &lineup(&pool, &model, 0)));
        assert_eq!(inc.take().map(|l| l.slot_assignment()[0]), Some(PlayerIndex::new(1)));
        assert!(!inc.is_some());
    }

    #[test]
    fn test_dominates_uses_epsilon_and_salary() {
        let (pool, model) = fixture();
        let mut inc = Incumbent::default();
        inc.install(&pool, lineup(&pool, &model, 0));

        assert!(inc.dominates(9.0, 0));
        assert!(!inc.dominates(10.5, 100));
        assert!(inc.dominates(10.0 + POINTS_EPSILON / 2.0, 11));
        assert!(!inc.dominates(10.0, 10));
        assert!(!inc.dominates(10.0, 9));
    }
}
