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

//! # Roster Constraint Model
//!
//! Translates a `ContestConfig` and the `ProjectionPool` it will be solved
//! against into a concrete, queryable rule set. Everything the search needs
//! to ask in its inner loop is precomputed here:
//!
//! - per-slot eligibility as a bit set over player indices (and as an index
//!   list for enumeration),
//! - player availability after applying the `InjuryPolicy`,
//! - interned team indices so that per-team caps are tracked in a flat
//!   `TeamCounts` vector instead of a string map.
//!
//! Construction fails with a `ConfigurationError` when the contest is
//! structurally broken (no slots, zero cap, a slot accepting no positions, a
//! non-positive multiplier, a zero team cap) or when some slot has no
//! available player at all. Slate types differ only in the data they carry;
//! the model exposes the same queries for every slate.

use crate::{
    contest::{ContestConfig, SlateType, SlotDefinition},
    error::ConfigurationError,
    index::{PlayerIndex, SlotIndex, TeamIndex},
    player::InjuryStatus,
    pool::ProjectionPool,
};
use fixedbitset::FixedBitSet;
use lineup_core::num::salary::SalaryNumeric;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Which players the injury report removes from consideration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryPolicy {
    /// Every player in the pool is available.
    IncludeAll,
    /// Players reported `Out` are unavailable.
    #[default]
    ExcludeOut,
    /// Players reported `Out` or `Questionable` are unavailable.
    ExcludeOutAndQuestionable,
}

impl InjuryPolicy {
    /// Returns `true` if a player with the given status may be rostered.
    /// Players without a reported status are always admitted.
    #[inline]
    pub fn admits(&self, status: Option<InjuryStatus>) -> bool {
        match (self, status) {
            (InjuryPolicy::IncludeAll, _) => true,
            (InjuryPolicy::ExcludeOut, Some(InjuryStatus::Out)) => false,
            (
                InjuryPolicy::ExcludeOutAndQuestionable,
                Some(InjuryStatus::Out | InjuryStatus::Questionable),
            ) => false,
            _ => true,
        }
    }
}

/// Per-team player counts of a partial lineup.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TeamCounts {
    counts: Vec<u32>,
}

impl TeamCounts {
    pub fn new(num_teams: usize) -> Self {
        Self {
            counts: vec![0; num_teams],
        }
    }

    #[inline]
    pub fn count(&self, team: TeamIndex) -> usize {
        self.counts[team.get()] as usize
    }

    #[inline]
    pub fn increment(&mut self, team: TeamIndex) {
        self.counts[team.get()] += 1;
    }

    #[inline]
    pub fn decrement(&mut self, team: TeamIndex) {
        debug_assert!(
            self.counts[team.get()] > 0,
            "called `TeamCounts::decrement` on a team with no players: {}",
            team
        );
        self.counts[team.get()] -= 1;
    }

    /// Zeroes every count and resizes to `num_teams`.
    #[inline]
    pub fn reset(&mut self, num_teams: usize) {
        self.counts.clear();
        self.counts.resize(num_teams, 0);
    }
}

/// The concrete rule set of one contest over one projection pool.
#[derive(Clone, Debug)]
pub struct RosterModel<T> {
    contest_id: String,
    slate_type: SlateType,
    cap: T,
    slots: Vec<SlotDefinition>,
    max_players_per_team: Option<usize>,
    injury_policy: InjuryPolicy,
    available: FixedBitSet,
    eligibility: Vec<FixedBitSet>,
    eligible_players: Vec<Vec<PlayerIndex>>,
    player_teams: Vec<TeamIndex>,
    team_names: Vec<String>,
}

impl<T> RosterModel<T>
where
    T: SalaryNumeric,
{
    /// Builds the model with the default injury policy (`ExcludeOut`).
    pub fn new(
        config: &ContestConfig<T>,
        pool: &ProjectionPool<T>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_injury_policy(config, pool, InjuryPolicy::default())
    }

    /// Builds the model, treating players rejected by `policy` as unavailable.
    pub fn with_injury_policy(
        config: &ContestConfig<T>,
        pool: &ProjectionPool<T>,
        policy: InjuryPolicy,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let num_players = pool.len();
        let mut available = FixedBitSet::with_capacity(num_players);
        let mut player_teams = Vec::with_capacity(num_players);
        let mut team_names: Vec<String> = Vec::new();
        let mut team_lookup: FxHashMap<&str, TeamIndex> = FxHashMap::default();

        for (index, player) in pool.iter() {
            if policy.admits(player.injury_status()) {
                available.insert(index.get());
            }

            let team = *team_lookup.entry(player.team()).or_insert_with(|| {
                team_names.push(player.team().to_string());
                TeamIndex::new(team_names.len() - 1)
            });
            player_teams.push(team);
        }

        let mut eligibility = Vec::with_capacity(config.num_slots());
        let mut eligible_players = Vec::with_capacity(config.num_slots());

        for (slot, definition) in config.roster_slots().iter().enumerate() {
            let mut bits = FixedBitSet::with_capacity(num_players);
            let mut players = Vec::new();
            for i in available.ones() {
                let index = PlayerIndex::new(i);
                if pool.player(index).is_eligible_for(definition.eligible_positions()) {
                    bits.insert(i);
                    players.push(index);
                }
            }

            if players.is_empty() {
                return Err(ConfigurationError::NoEligiblePlayers {
                    slot: SlotIndex::new(slot),
                    label: definition.label().to_string(),
                });
            }

            eligibility.push(bits);
            eligible_players.push(players);
        }

        Ok(Self {
            contest_id: config.contest_id().to_string(),
            slate_type: config.slate_type(),
            cap: config.salary_cap(),
            slots: config.roster_slots().to_vec(),
            max_players_per_team: config.max_players_per_team(),
            injury_policy: policy,
            available,
            eligibility,
            eligible_players,
            player_teams,
            team_names,
        })
    }

    /// Returns the ordered slot definitions.
    #[inline]
    pub fn slots(&self) -> &[SlotDefinition] {
        &self.slots
    }

    /// Returns the definition of a single slot.
    #[inline]
    pub fn slot(&self, slot: SlotIndex) -> &SlotDefinition {
        &self.slots[slot.get()]
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Returns the points multiplier of a slot.
    #[inline]
    pub fn multiplier(&self, slot: SlotIndex) -> f64 {
        self.slots[slot.get()].multiplier()
    }

    /// Returns the salary cap.
    #[inline]
    pub fn cap(&self) -> T {
        self.cap
    }

    #[inline]
    pub fn contest_id(&self) -> &str {
        &self.contest_id
    }

    #[inline]
    pub fn slate_type(&self) -> SlateType {
        self.slate_type
    }

    #[inline]
    pub fn max_players_per_team(&self) -> Option<usize> {
        self.max_players_per_team
    }

    #[inline]
    pub fn injury_policy(&self) -> InjuryPolicy {
        self.injury_policy
    }

    /// Returns the number of players of the pool this model was built for.
    #[inline]
    pub fn num_players(&self) -> usize {
        self.player_teams.len()
    }

    #[inline]
    pub fn num_teams(&self) -> usize {
        self.team_names.len()
    }

    /// Returns `true` if the injury policy admits the player.
    #[inline]
    pub fn is_available(&self, player: PlayerIndex) -> bool {
        self.available.contains(player.get())
    }

    /// Returns `true` if the player is available and shares a position with
    /// the slot.
    #[inline]
    pub fn is_eligible(&self, player: PlayerIndex, slot: SlotIndex) -> bool {
        self.eligibility[slot.get()].contains(player.get())
    }

    /// Returns the eligibility bit set of a slot.
    #[inline]
    pub fn eligibility(&self, slot: SlotIndex) -> &FixedBitSet {
        &self.eligibility[slot.get()]
    }

    /// Returns the players eligible for a slot in ascending index order.
    #[inline]
    pub fn eligible_players(&self, slot: SlotIndex) -> &[PlayerIndex] {
        &self.eligible_players[slot.get()]
    }

    #[inline]
    pub fn team_of(&self, player: PlayerIndex) -> TeamIndex {
        self.player_teams[player.get()]
    }

    #[inline]
    pub fn team_name(&self, team: TeamIndex) -> &str {
        &self.team_names[team.get()]
    }

    /// Returns `true` if the player may fill `slot` given the team counts of
    /// the partial lineup being built: the player is eligible for the slot and
    /// adding them keeps their team within `max_players_per_team`.
    #[inline]
    pub fn is_feasible_candidate(
        &self,
        player: PlayerIndex,
        slot: SlotIndex,
        team_counts: &TeamCounts,
    ) -> bool {
        if !self.is_eligible(player, slot) {
            return false;
        }
        match self.max_players_per_team {
            Some(max) => team_counts.count(self.team_of(player)) < max,
            None => true,
        }
    }

    /// Returns a zeroed `TeamCounts` sized for this model.
    #[inline]
    pub fn empty_team_counts(&self) -> TeamCounts {
        TeamCounts::new(self.num_teams())
    }
}

impl<T> std::fmt::Display for RosterModel<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RosterModel(contest: {}, slots: {}, cap: {}, players: {}, teams: {})",
            self.contest_id,
            self.slots.len(),
            self.cap,
            self.player_teams.len(),
            self.team_names.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{player::PlayerProjection, pool::ProjectionPool};

    type IntegerType = u32;

    fn pool() -> ProjectionPool<IntegerType> {
        ProjectionPool::from_players([
            PlayerProjection::new("Qb One", "KC", ["QB"], 40, 22.0),
            PlayerProjection::new("Rb One", "KC", ["RB"], 30, 15.0),
            PlayerProjection::new("Wr One", "BUF", ["WR"], 28, 14.0)
                .with_injury_status(InjuryStatus::Questionable),
            PlayerProjection::new("Te One", "BUF", ["TE"], 20, 9.0)
                .with_injury_status(InjuryStatus::Out),
        ])
        .unwrap()
    }

    fn single_game(team_cap: usize) -> ContestConfig<IntegerType> {
        ContestConfig::new(
            "sg",
            150,
            SlateType::SingleGame,
            vec![
                SlotDefinition::new("MVP", ["QB", "RB", "WR", "TE"]).with_multiplier(1.5),
                SlotDefinition::new("UTIL", ["QB", "RB", "WR", "TE"]),
            ],
        )
        .with_max_players_per_team(team_cap)
    }

    #[test]
    fn test_injury_policy_admits() {
        assert!(InjuryPolicy::IncludeAll.admits(Some(InjuryStatus::Out)));
        assert!(!InjuryPolicy::ExcludeOut.admits(Some(InjuryStatus::Out)));
        assert!(InjuryPolicy::ExcludeOut.admits(Some(InjuryStatus::Questionable)));
        assert!(!InjuryPolicy::ExcludeOutAndQuestionable.admits(Some(InjuryStatus::Questionable)));
        assert!(InjuryPolicy::ExcludeOutAndQuestionable.admits(None));
        assert!(InjuryPolicy::ExcludeOutAndQuestionable.admits(Some(InjuryStatus::Unknown)));
    }

    #[test]
    fn test_model_precomputes_eligibility_and_teams() {
        let pool = pool();
        let model = RosterModel::new(&single_game(4), &pool).unwrap();

        assert_eq!(model.num_slots(), 2);
        assert_eq!(model.cap(), 150);
        assert_eq!(model.contest_id(), "sg");
        assert_eq!(model.slate_type(), SlateType::SingleGame);
        assert_eq!(model.multiplier(SlotIndex::new(0)), 1.5);
        assert_eq!(model.num_players(), 4);
        assert_eq!(model.num_teams(), 2);
        assert_eq!(model.team_name(model.team_of(PlayerIndex::new(2))), "BUF");

        // The tight end is out and must not be eligible anywhere.
        assert!(!model.is_available(PlayerIndex::new(3)));
        assert!(!model.is_eligible(PlayerIndex::new(3), SlotIndex::new(1)));
        assert_eq!(
            model.eligible_players(SlotIndex::new(0)),
            &[PlayerIndex::new(0), PlayerIndex::new(1), PlayerIndex::new(2)]
        );
        assert_eq!(model.eligibility(SlotIndex::new(1)).count_ones(..), 3);
    }

    #[test]
    fn test_is_feasible_candidate_respects_team_cap() {
        let pool = pool();
        let model = RosterModel::new(&single_game(1), &pool).unwrap();
        let mut counts = model.empty_team_counts();

        let qb = PlayerIndex::new(0);
        let rb = PlayerIndex::new(1);
        let slot = SlotIndex::new(1);

        assert!(model.is_feasible_candidate(rb, slot, &counts));
        counts.increment(model.team_of(qb));
        assert!(!model.is_feasible_candidate(rb, slot, &counts));
        counts.decrement(model.team_of(qb));
        assert!(model.is_feasible_candidate(rb, slot, &counts));
    }

    #[test]
    fn test_no_eligible_players_is_a_configuration_error() {
        let pool = pool();
        let config = ContestConfig::new(
            "mg",
            100,
            SlateType::MultiGame,
            vec![SlotDefinition::single("QB"), SlotDefinition::single("K")],
        );
        let err = RosterModel::new(&config, &pool).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NoEligiblePlayers {
                slot: SlotIndex::new(1),
                label: "K".to_string(),
            }
        );
    }

    #[test]
    fn test_injury_filtering_can_empty_a_slot() {
        let pool = pool();
        let config = ContestConfig::new(
            "mg",
            100,
            SlateType::MultiGame,
            vec![SlotDefinition::single("TE")],
        );

        assert!(matches!(
            RosterModel::new(&config, &pool),
            Err(ConfigurationError::NoEligiblePlayers { .. })
        ));
        assert!(RosterModel::with_injury_policy(&config, &pool, InjuryPolicy::IncludeAll).is_ok());
    }

    #[test]
    fn test_structural_errors_surface_before_pool_checks() {
        let pool = pool();
        let config = ContestConfig::<IntegerType>::new("e", 100, SlateType::MultiGame, vec![]);
        assert!(matches!(
            RosterModel::new(&config, &pool),
            Err(ConfigurationError::NoSlots { .. })
        ));
    }
}
