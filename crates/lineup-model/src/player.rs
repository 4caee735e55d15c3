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

//! Player projection records.
//!
//! A `PlayerProjection` is the normalized record delivered by the upstream
//! collection layer: who the player is, which positions they can fill, what
//! they cost and how many points they are projected to score. Records are
//! immutable once they enter a `ProjectionPool`.

use crate::position::{Position, PositionSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Availability reported for a player by the upstream feed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InjuryStatus {
    Active,
    Questionable,
    Out,
    #[default]
    Unknown,
}

impl InjuryStatus {
    /// Maps a site injury indicator to a status.
    ///
    /// An empty indicator means the player is active. Game-time decisions and
    /// doubtful tags count as questionable; injured reserve, suspensions and
    /// not-active tags count as out. Anything else is `Unknown`.
    pub fn from_indicator(indicator: &str) -> Self {
        match indicator.trim().to_ascii_uppercase().as_str() {
            "" | "A" | "ACTIVE" => InjuryStatus::Active,
            "Q" | "QUESTIONABLE" | "GTD" | "D" | "DOUBTFUL" | "P" | "PROBABLE" => {
                InjuryStatus::Questionable
            }
            "O" | "OUT" | "IR" | "NA" | "SUSP" | "PUP" => InjuryStatus::Out,
            _ => InjuryStatus::Unknown,
        }
    }
}

impl std::fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjuryStatus::Active => write!(f, "Active"),
            InjuryStatus::Questionable => write!(f, "Questionable"),
            InjuryStatus::Out => write!(f, "Out"),
            InjuryStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A single player's projection for one slate.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlayerProjection<T> {
    name: String,
    team: String,
    #[serde(default)]
    opponent: String,
    eligible_positions: PositionSet,
    salary: T,
    projected_points: f64,
    #[serde(default)]
    game_date: Option<NaiveDate>,
    #[serde(default)]
    injury_status: Option<InjuryStatus>,
}

impl<T> PlayerProjection<T>
where
    T: Copy,
{
    /// Creates a projection with the mandatory fields. Opponent, game date and
    /// injury status start empty and can be set with the `with_*` methods.
    pub fn new<I, P>(
        name: impl Into<String>,
        team: impl Into<String>,
        eligible_positions: I,
        salary: T,
        projected_points: f64,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        let mut positions = PositionSet::new();
        for position in eligible_positions.into_iter().map(Into::into) {
            if !position.is_empty() && !positions.contains(&position) {
                positions.push(position);
            }
        }

        Self {
            name: name.into(),
            team: team.into(),
            opponent: String::new(),
            eligible_positions: positions,
            salary,
            projected_points,
            game_date: None,
            injury_status: None,
        }
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = opponent.into();
        self
    }

    pub fn with_game_date(mut self, game_date: NaiveDate) -> Self {
        self.game_date = Some(game_date);
        self
    }

    pub fn with_injury_status(mut self, status: InjuryStatus) -> Self {
        self.injury_status = Some(status);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn team(&self) -> &str {
        &self.team
    }

    #[inline]
    pub fn opponent(&self) -> &str {
        &self.opponent
    }

    #[inline]
    pub fn eligible_positions(&self) -> &[Position] {
        &self.eligible_positions
    }

    #[inline]
    pub fn salary(&self) -> T {
        self.salary
    }

    #[inline]
    pub fn projected_points(&self) -> f64 {
        self.projected_points
    }

    #[inline]
    pub fn game_date(&self) -> Option<NaiveDate> {
        self.game_date
    }

    #[inline]
    pub fn injury_status(&self) -> Option<InjuryStatus> {
        self.injury_status
    }

    /// Returns `true` if the player can fill a slot accepting `positions`.
    #[inline]
    pub fn is_eligible_for(&self, positions: &[Position]) -> bool {
        crate::position::intersects(&self.eligible_positions, positions)
    }
}

impl<T> std::fmt::Display for PlayerProjection<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let positions: Vec<&str> = self.eligible_positions.iter().map(Position::as_str).collect();
        write!(
            f,
            "{} ({}, {}) ${} {:.2} pts",
            self.name,
            self.team,
            positions.join("/"),
            self.salary,
            self.projected_points
        )
    }
}
