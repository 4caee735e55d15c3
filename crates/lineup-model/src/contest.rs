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

//! Contest descriptors.
//!
//! A `ContestConfig` carries the structural rules of one contest: the salary
//! cap, the slate type and the ordered roster slots. Slate differences are
//! pure data. A single-game slate is just a config with a captain-style
//! multiplier slot and a per-team cap; the solver never branches on
//! `SlateType`.
//!
//! Configs deserialize from TOML:
//!
//! ```rust
//! use lineup_model::contest::{ContestConfig, SlateType};
//!
//! let config = ContestConfig::<u32>::from_toml_str(r#"
//!     contest_id = "nfl-sg-1"
//!     salary_cap = 135
//!     slate_type = "single_game"
//!     max_players_per_team = 4
//!
//!     [[roster_slots]]
//!     label = "MVP"
//!     eligible_positions = ["QB", "RB", "WR", "TE"]
//!     multiplier = 1.5
//!
//!     [[roster_slots]]
//!     label = "UTIL"
//!     eligible_positions = ["QB", "RB", "WR", "TE"]
//! "#).unwrap();
//!
//! assert_eq!(config.slate_type(), SlateType::SingleGame);
//! assert_eq!(config.roster_slots()[1].multiplier(), 1.0);
//! ```

use crate::{
    error::{ConfigLoadError, ConfigurationError},
    index::SlotIndex,
    position::{Position, PositionSet},
};
use lineup_core::num::salary::SalaryNumeric;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whether the contest draws from one game or from a multi-game slate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlateType {
    SingleGame,
    #[default]
    MultiGame,
}

impl std::fmt::Display for SlateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlateType::SingleGame => write!(f, "SingleGame"),
            SlateType::MultiGame => write!(f, "MultiGame"),
        }
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// One roster slot: a label, the positions it accepts and the factor applied
/// to the projected points of the player filling it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SlotDefinition {
    label: String,
    eligible_positions: PositionSet,
    #[serde(default = "default_multiplier")]
    multiplier: f64,
}

impl SlotDefinition {
    /// Creates a slot with multiplier 1.0.
    pub fn new<I, P>(label: impl Into<String>, eligible_positions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        Self {
            label: label.into(),
            eligible_positions: eligible_positions.into_iter().map(Into::into).collect(),
            multiplier: 1.0,
        }
    }

    /// Creates a slot named after its single accepted position.
    pub fn single(position: &str) -> Self {
        Self::new(Position::new(position).as_str(), [position])
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn eligible_positions(&self) -> &[Position] {
        &self.eligible_positions
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Returns `true` if both slots accept the same positions with the same
    /// multiplier, i.e. filling one or the other is interchangeable.
    pub fn is_interchangeable_with(&self, other: &SlotDefinition) -> bool {
        self.multiplier == other.multiplier
            && self.eligible_positions.len() == other.eligible_positions.len()
            && self
                .eligible_positions
                .iter()
                .all(|p| other.eligible_positions.contains(p))
    }
}

impl std::fmt::Display for SlotDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let positions: Vec<&str> = self.eligible_positions.iter().map(Position::as_str).collect();
        write!(f, "{}[{}]", self.label, positions.join("/"))?;
        if self.multiplier != 1.0 {
            write!(f, "x{}", self.multiplier)?;
        }
        Ok(())
    }
}

/// The structural rules of one contest.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ContestConfig<T> {
    contest_id: String,
    salary_cap: T,
    #[serde(default)]
    slate_type: SlateType,
    roster_slots: Vec<SlotDefinition>,
    #[serde(default)]
    max_players_per_team: Option<usize>,
}

impl<T> ContestConfig<T>
where
    T: SalaryNumeric,
{
    pub fn new(
        contest_id: impl Into<String>,
        salary_cap: T,
        slate_type: SlateType,
        roster_slots: Vec<SlotDefinition>,
    ) -> Self {
        Self {
            contest_id: contest_id.into(),
            salary_cap,
            slate_type,
            roster_slots,
            max_players_per_team: None,
        }
    }

    pub fn with_max_players_per_team(mut self, max: usize) -> Self {
        self.max_players_per_team = Some(max);
        self
    }

    /// Loads a config from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError>
    where
        T: for<'de> Deserialize<'de>,
    {
        Ok(toml::from_str(s)?)
    }

    #[inline]
    pub fn contest_id(&self) -> &str {
        &self.contest_id
    }

    #[inline]
    pub fn salary_cap(&self) -> T {
        self.salary_cap
    }

    #[inline]
    pub fn slate_type(&self) -> SlateType {
        self.slate_type
    }

    #[inline]
    pub fn roster_slots(&self) -> &[SlotDefinition] {
        &self.roster_slots
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.roster_slots.len()
    }

    #[inline]
    pub fn max_players_per_team(&self) -> Option<usize> {
        self.max_players_per_team
    }

    /// Checks the rules that do not depend on a player pool.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.roster_slots.is_empty() {
            return Err(ConfigurationError::NoSlots {
                contest_id: self.contest_id.clone(),
            });
        }

        if self.salary_cap == T::ZERO {
            return Err(ConfigurationError::NonPositiveCap {
                contest_id: self.contest_id.clone(),
            });
        }

        if self.max_players_per_team == Some(0) {
            return Err(ConfigurationError::InvalidTeamCap {
                contest_id: self.contest_id.clone(),
            });
        }

        for (i, slot) in self.roster_slots.iter().enumerate() {
            if slot.eligible_positions.iter().all(Position::is_empty) {
                return Err(ConfigurationError::EmptySlotPositions {
                    slot: SlotIndex::new(i),
                    label: slot.label.clone(),
                });
            }

            if !slot.multiplier.is_finite() || slot.multiplier <= 0.0 {
                return Err(ConfigurationError::InvalidMultiplier {
                    slot: SlotIndex::new(i),
                    label: slot.label.clone(),
                    multiplier: slot.multiplier,
                });
            }
        }

        Ok(())
    }
}

impl<T> ContestConfig<T>
where
    T: SalaryNumeric + From<u8>,
{
    /// Classic multi-game football roster: QB, 2 RB, 3 WR, TE, a RB/WR/TE
    /// flex and a team defense under a cap of 200.
    pub fn nfl_multi_game(contest_id: impl Into<String>) -> Self {
        let slots = vec![
            SlotDefinition::single("QB"),
            SlotDefinition::single("RB"),
            SlotDefinition::single("RB"),
            SlotDefinition::single("WR"),
            SlotDefinition::single("WR"),
            SlotDefinition::single("WR"),
            SlotDefinition::single("TE"),
            SlotDefinition::new("FLEX", ["RB", "WR", "TE"]),
            SlotDefinition::single("DEF"),
        ];
        Self::new(
            contest_id,
            <T as From<u8>>::from(200u8),
            SlateType::MultiGame,
            slots,
        )
    }

    /// Single-game football roster: one MVP scoring 1.5x and four utility
    /// slots, at most four players from one team, under a cap of 135.
    pub fn nfl_single_game(contest_id: impl Into<String>) -> Self {
        const ANY: [&str; 6] = ["QB", "RB", "WR", "TE", "K", "DEF"];
        let mut slots = vec![SlotDefinition::new("MVP", ANY).with_multiplier(1.5)];
        slots.extend((0..4).map(|_| SlotDefinition::new("UTIL", ANY)));
        Self::new(
            contest_id,
            <T as From<u8>>::from(135u8),
            SlateType::SingleGame,
            slots,
        )
            .with_max_players_per_team(4)
    }
}

impl<T> std::fmt::Display for ContestConfig<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots: Vec<String> = self.roster_slots.iter().map(|s| s.to_string()).collect();
        write!(
            f,
            "ContestConfig(id: {}, cap: {}, slate: {}, slots: [{}])",
            self.contest_id,
            self.salary_cap,
            self.slate_type,
            slots.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = u32;

    #[test]
    fn test_multi_game_preset_layout() {
        let config = ContestConfig::<IntegerType>::nfl_multi_game("c1");
        assert_eq!(config.contest_id(), "c1");
        assert_eq!(config.salary_cap(), 200);
        assert_eq!(config.slate_type(), SlateType::MultiGame);
        assert_eq!(config.num_slots(), 9);
        assert_eq!(config.max_players_per_team(), None);
        assert_eq!(config.roster_slots()[7].label(), "FLEX");
        assert_eq!(config.roster_slots()[7].eligible_positions().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_single_game_preset_layout() {
        let config = ContestConfig::<IntegerType>::nfl_single_game("c2");
        assert_eq!(config.salary_cap(), 135);
        assert_eq!(config.slate_type(), SlateType::SingleGame);
        assert_eq!(config.num_slots(), 5);
        assert_eq!(config.roster_slots()[0].multiplier(), 1.5);
        assert_eq!(config.max_players_per_team(), Some(4));
        assert!(config.roster_slots()[1].is_interchangeable_with(&config.roster_slots()[4]));
        assert!(!config.roster_slots()[0].is_interchangeable_with(&config.roster_slots()[1]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_structural_errors() {
        let no_slots = ContestConfig::<IntegerType>::new("x", 100, SlateType::MultiGame, vec![]);
        assert!(matches!(
            no_slots.validate(),
            Err(ConfigurationError::NoSlots { .. })
        ));

        let zero_cap = ContestConfig::<IntegerType>::new(
            "x",
            0,
            SlateType::MultiGame,
            vec![SlotDefinition::single("QB")],
        );
        assert!(matches!(
            zero_cap.validate(),
            Err(ConfigurationError::NonPositiveCap { .. })
        ));

        let empty_slot = ContestConfig::<IntegerType>::new(
            "x",
            100,
            SlateType::MultiGame,
            vec![SlotDefinition::new("BAD", Vec::<&str>::new())],
        );
        assert!(matches!(
            empty_slot.validate(),
            Err(ConfigurationError::EmptySlotPositions { .. })
        ));

        let bad_multiplier = ContestConfig::<IntegerType>::new(
            "x",
            100,
            SlateType::SingleGame,
            vec![SlotDefinition::single("QB").with_multiplier(0.0)],
        );
        assert!(matches!(
            bad_multiplier.validate(),
            Err(ConfigurationError::InvalidMultiplier { .. })
        ));

        let zero_team_cap = ContestConfig::<IntegerType>::nfl_single_game("x")
            .with_max_players_per_team(0);
        assert!(matches!(
            zero_team_cap.validate(),
            Err(ConfigurationError::InvalidTeamCap { .. })
        ));
    }

    #[test]
    fn test_from_toml_str_defaults_and_errors() {
        let config = ContestConfig::<IntegerType>::from_toml_str(
            r#"
            contest_id = "abc"
            salary_cap = 50

            [[roster_slots]]
            label = "G"
            eligible_positions = ["pg", "sg"]
            "#,
        )
        .unwrap();

        assert_eq!(config.slate_type(), SlateType::MultiGame);
        assert_eq!(config.max_players_per_team(), None);
        assert_eq!(
            config.roster_slots()[0].eligible_positions(),
            &[Position::new("PG"), Position::new("SG")]
        );

        let err = ContestConfig::<IntegerType>::from_toml_str("contest_id = 3").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Toml(_)));
    }

    #[test]
    fn test_from_toml_file_missing_is_io_error() {
        let err = ContestConfig::<IntegerType>::from_toml_file("/nonexistent/contest.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }

    #[test]
    fn test_display_lists_slots() {
        let config = ContestConfig::<IntegerType>::nfl_single_game("sg");
        let shown = config.to_string();
        assert!(shown.starts_with("ContestConfig(id: sg, cap: 135, slate: SingleGame"));
        assert!(shown.contains("MVP[QB/RB/WR/TE/K/DEF]x1.5"));
    }
}
