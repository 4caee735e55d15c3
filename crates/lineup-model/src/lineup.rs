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

//! Lineups produced by the solver.
//!
//! A `Lineup` maps every roster slot (in contest slot order) to exactly one
//! player and records the resulting salary and projected score. Totals are
//! always computed in slot order from the pool, so two lineups with the same
//! assignment carry bit-identical totals.

use crate::{
    error::LineupViolation,
    index::{PlayerIndex, SlotIndex},
    pool::ProjectionPool,
    roster::RosterModel,
};
use lineup_core::num::salary::SalaryNumeric;

/// Absolute tolerance used when comparing projected point totals.
pub const POINTS_EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct Lineup<T> {
    slot_assignment: Vec<PlayerIndex>,
    total_salary: T,
    total_projected_points: f64,
}

impl<T> Lineup<T>
where
    T: SalaryNumeric,
{
    /// Creates a lineup from a slot assignment, computing its totals. A
    /// salary total that overflows `T` is recorded as `T::max_value()` and
    /// rejected by `validate`.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if the assignment does not
    /// have one entry per slot of `model`.
    pub fn from_assignment(
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        slot_assignment: Vec<PlayerIndex>,
    ) -> Self {
        debug_assert_eq!(
            slot_assignment.len(),
            model.num_slots(),
            "called `Lineup::from_assignment` with {} players for {} slots",
            slot_assignment.len(),
            model.num_slots()
        );

        let (total_salary, total_projected_points) = totals(pool, model, &slot_assignment);
        Self {
            slot_assignment,
            total_salary: total_salary.unwrap_or_else(T::max_value),
            total_projected_points,
        }
    }

    /// Returns the player of every slot, in contest slot order.
    #[inline]
    pub fn slot_assignment(&self) -> &[PlayerIndex] {
        &self.slot_assignment
    }

    /// Returns the player filling `slot`.
    #[inline]
    pub fn player_at(&self, slot: SlotIndex) -> PlayerIndex {
        self.slot_assignment[slot.get()]
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slot_assignment.len()
    }

    #[inline]
    pub fn total_salary(&self) -> T {
        self.total_salary
    }

    #[inline]
    pub fn total_projected_points(&self) -> f64 {
        self.total_projected_points
    }

    /// Returns the rostered players in ascending index order.
    pub fn players(&self) -> Vec<PlayerIndex> {
        let mut players = self.slot_assignment.clone();
        players.sort_unstable();
        players
    }

    #[inline]
    pub fn contains(&self, player: PlayerIndex) -> bool {
        self.slot_assignment.contains(&player)
    }

    /// Counts the players both lineups roster, regardless of slot.
    pub fn shared_players(&self, other: &Lineup<T>) -> usize {
        self.slot_assignment
            .iter()
            .filter(|p| other.contains(**p))
            .count()
    }

    /// Returns `true` if both lineups roster the same set of players.
    pub fn same_players(&self, other: &Lineup<T>) -> bool {
        self.slot_assignment.len() == other.slot_assignment.len()
            && self.shared_players(other) == self.slot_assignment.len()
    }

    /// Checks every lineup invariant against the pool and model: one player
    /// per slot, slot eligibility, no repeated player, the salary cap, the
    /// team cap and consistent totals.
    pub fn validate(
        &self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
    ) -> Result<(), LineupViolation> {
        if self.slot_assignment.len() != model.num_slots() {
            return Err(LineupViolation::SlotCount {
                expected: model.num_slots(),
                actual: self.slot_assignment.len(),
            });
        }

        for (slot, &player) in self.slot_assignment.iter().enumerate() {
            let slot = SlotIndex::new(slot);
            if player.get() >= pool.len() || !model.is_eligible(player, slot) {
                return Err(LineupViolation::IneligiblePlayer { player, slot });
            }
        }

        let players = self.players();
        if let Some(pair) = players.windows(2).find(|w| w[0] == w[1]) {
            return Err(LineupViolation::DuplicatePlayer { player: pair[0] });
        }

        let (salary, points) = totals(pool, model, &self.slot_assignment);
        let Some(salary) = salary else {
            return Err(LineupViolation::SalaryOverflow {
                cap: model.cap().to_string(),
            });
        };
        if salary > model.cap() {
            return Err(LineupViolation::SalaryCapExceeded {
                total: salary.to_string(),
                cap: model.cap().to_string(),
            });
        }

        if salary != self.total_salary
            || (points - self.total_projected_points).abs() > POINTS_EPSILON
        {
            return Err(LineupViolation::TotalsMismatch);
        }

        if let Some(cap) = model.max_players_per_team() {
            let mut counts = model.empty_team_counts();
            for &player in &self.slot_assignment {
                let team = model.team_of(player);
                counts.increment(team);
                if counts.count(team) > cap {
                    return Err(LineupViolation::TeamCapExceeded {
                        team: model.team_name(team).to_string(),
                        count: counts.count(team),
                        cap,
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns a displayable slot-by-slot table of the lineup.
    pub fn table<'a>(
        &'a self,
        pool: &'a ProjectionPool<T>,
        model: &'a RosterModel<T>,
    ) -> LineupTable<'a, T> {
        LineupTable {
            lineup: self,
            pool,
            model,
        }
    }
}

/// Sums salary and points in slot order. The salary is `None` if it
/// overflows `T`.
fn totals<T>(
    pool: &ProjectionPool<T>,
    model: &RosterModel<T>,
    assignment: &[PlayerIndex],
) -> (Option<T>, f64)
where
    T: SalaryNumeric,
{
    let mut salary = Some(T::ZERO);
    let mut points = 0.0;
    for (slot, &player) in assignment.iter().enumerate() {
        salary = salary.and_then(|s| s.checked_add_val(pool.salary(player)));
        points += pool.projected_points(player) * model.multiplier(SlotIndex::new(slot));
    }
    (salary, points)
}

impl<T> std::fmt::Display for Lineup<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let players: Vec<String> = self
            .slot_assignment
            .iter()
            .map(|p| p.get().to_string())
            .collect();
        write!(
            f,
            "Lineup(points: {:.2}, salary: {}, players: [{}])",
            self.total_projected_points,
            self.total_salary,
            players.join(", ")
        )
    }
}

/// Slot-by-slot rendering of a lineup against its pool and model.
pub struct LineupTable<'a, T> {
    lineup: &'a Lineup<T>,
    pool: &'a ProjectionPool<T>,
    model: &'a RosterModel<T>,
}

impl<T> std::fmt::Display for LineupTable<'_, T>
where
    T: SalaryNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<6} | {:<24} | {:<5} | {:>8} | {:>8}",
            "Slot", "Player", "Team", "Salary", "Points"
        )?;
        writeln!(f, "{}", "-".repeat(63))?;
        for (slot, &index) in self.lineup.slot_assignment.iter().enumerate() {
            let slot = SlotIndex::new(slot);
            let player = self.pool.player(index);
            writeln!(
                f,
                "{:<6} | {:<24} | {:<5} | {:>8} | {:>8.2}",
                self.model.slot(slot).label(),
                player.name(),
                player.team(),
                player.salary(),
                player.projected_points() * self.model.multiplier(slot)
            )?;
        }
        writeln!(f, "{}", "-".repeat(63))?;
        write!(
            f,
            "{:<6} | {:<24} | {:<5} | {:>8} | {:>8.2}",
            "Total", "", "", self.lineup.total_salary, self.lineup.total_projected_points
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contest::{ContestConfig, SlateType, SlotDefinition},
        player::PlayerProjection,
    };

    type IntegerType = u32;

    fn fixture(team_cap: Option<usize>) -> (ProjectionPool<IntegerType>, RosterModel<IntegerType>) {
        let pool = ProjectionPool::from_players([
            PlayerProjection::new("A", "T1", ["X"], 10, 20.0),
            PlayerProjection::new("B", "T1", ["X"], 10, 15.0),
            PlayerProjection::new("C", "T1", ["Y"], 5, 5.0),
        ])
        .unwrap();

        let mut config = ContestConfig::new(
            "fixture",
            20,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        );
        if let Some(cap) = team_cap {
            config = config.with_max_players_per_team(cap);
        }

        let model = RosterModel::new(&config, &pool).unwrap();
        (pool, model)
    }

    fn idx(i: usize) -> PlayerIndex {
        PlayerIndex::new(i)
    }

    #[test]
    fn test_from_assignment_computes_totals() {
        let (pool, model) = fixture(None);
        let lineup = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(2)]);

        assert_eq!(lineup.total_salary(), 15);
        assert_eq!(lineup.total_projected_points(), 25.0);
        assert_eq!(lineup.player_at(SlotIndex::new(1)), idx(2));
        assert_eq!(lineup.num_slots(), 2);
        assert!(lineup.validate(&pool, &model).is_ok());
    }

    #[test]
    fn test_shared_and_same_players() {
        let (pool, model) = fixture(None);
        let a = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(2)]);
        let b = Lineup::from_assignment(&pool, &model, vec![idx(1), idx(2)]);

        assert_eq!(a.shared_players(&b), 1);
        assert!(!a.same_players(&b));
        assert!(a.same_players(&a.clone()));
        assert_eq!(a.players(), vec![idx(0), idx(2)]);
        assert!(a.contains(idx(0)));
        assert!(!a.contains(idx(1)));
    }

    #[test]
    fn test_validate_reports_violations() {
        let (pool, model) = fixture(None);

        let short = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(2)]);
        let short = Lineup {
            slot_assignment: vec![short.slot_assignment[0]],
            ..short
        };
        assert_eq!(
            short.validate(&pool, &model),
            Err(LineupViolation::SlotCount {
                expected: 2,
                actual: 1
            })
        );

        let ineligible = Lineup::from_assignment(&pool, &model, vec![idx(2), idx(0)]);
        assert!(matches!(
            ineligible.validate(&pool, &model),
            Err(LineupViolation::IneligiblePlayer { .. })
        ));

        let tampered = Lineup {
            total_projected_points: 99.0,
            ..Lineup::from_assignment(&pool, &model, vec![idx(0), idx(2)])
        };
        assert_eq!(
            tampered.validate(&pool, &model),
            Err(LineupViolation::TotalsMismatch)
        );
    }

    #[test]
    fn test_validate_rejects_salary_and_team_cap() {
        let pool = ProjectionPool::<IntegerType>::from_players([
            PlayerProjection::new("A", "T1", ["X"], 15, 20.0),
            PlayerProjection::new("C", "T1", ["Y"], 10, 5.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "caps",
            20,
            SlateType::SingleGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        )
        .with_max_players_per_team(1);
        let model = RosterModel::new(&config, &pool).unwrap();

        let over = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(1)]);
        assert!(matches!(
            over.validate(&pool, &model),
            Err(LineupViolation::SalaryCapExceeded { .. })
        ));

        let (pool, model) = fixture(Some(1));
        let stacked = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(2)]);
        assert!(matches!(
            stacked.validate(&pool, &model),
            Err(LineupViolation::TeamCapExceeded { count: 2, cap: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_salary_overflowing_a_max_cap() {
        let pool = ProjectionPool::<u8>::from_players([
            PlayerProjection::new("A", "T1", ["X"], 200, 10.0),
            PlayerProjection::new("B", "T2", ["Y"], 200, 10.0),
        ])
        .unwrap();
        let config = ContestConfig::new(
            "max",
            u8::MAX,
            SlateType::MultiGame,
            vec![SlotDefinition::single("X"), SlotDefinition::single("Y")],
        );
        let model = RosterModel::new(&config, &pool).unwrap();

        let lineup = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(1)]);
        assert_eq!(lineup.total_salary(), u8::MAX);
        assert_eq!(
            lineup.validate(&pool, &model),
            Err(LineupViolation::SalaryOverflow {
                cap: "255".to_string()
            })
        );
    }

    #[test]
    fn test_display_and_table() {
        let (pool, model) = fixture(None);
        let lineup = Lineup::from_assignment(&pool, &model, vec![idx(0), idx(2)]);

        assert_eq!(
            lineup.to_string(),
            "Lineup(points: 25.00, salary: 15, players: [0, 2])"
        );

        let table = lineup.table(&pool, &model).to_string();
        assert!(table.contains("A"));
        assert!(table.lines().last().unwrap().contains("25.00"));
    }
}
