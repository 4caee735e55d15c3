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

//! Position codes.
//!
//! Codes are normalized on construction (trimmed, ASCII upper case), so
//! `"wr "` and `"WR"` name the same position. Feeds commonly encode
//! multi-position eligibility as a slash-separated list such as `"RB/WR"`;
//! `parse_positions` splits those into a `PositionSet`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A normalized position code such as `QB`, `FLEX` or `DEF`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Position(String);

/// The set of positions a player is eligible for, or a slot accepts.
/// Almost always one or two entries, so they are kept inline.
pub type PositionSet = SmallVec<[Position; 2]>;

impl Position {
    /// Creates a normalized position code.
    #[inline]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the normalized code.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the code is empty after normalization.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Position {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for Position {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.0)
    }
}

/// Parses a slash-separated position list (`"RB/WR"`) into a deduplicated
/// `PositionSet`, preserving first-seen order. Empty segments are skipped.
pub fn parse_positions(list: &str) -> PositionSet {
    let mut set = PositionSet::new();
    for position in list.split('/').map(Position::new) {
        if !position.is_empty() && !set.contains(&position) {
            set.push(position);
        }
    }
    set
}

/// Returns `true` if the two position sets share at least one code.
#[inline]
pub fn intersects(a: &[Position], b: &[Position]) -> bool {
    a.iter().any(|p| b.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_normalized() {
        assert_eq!(Position::new(" wr "), Position::new("WR"));
        assert_eq!(Position::from("def").as_str(), "DEF");
        assert!(Position::new("   ").is_empty());
    }

    #[test]
    fn test_parse_positions_splits_and_dedups() {
        let set = parse_positions("RB/wr/RB//");
        assert_eq!(set.as_slice(), &[Position::new("RB"), Position::new("WR")]);
        assert!(parse_positions("").is_empty());
    }

    #[test]
    fn test_intersects() {
        let flex = parse_positions("RB/WR/TE");
        assert!(intersects(&parse_positions("WR"), &flex));
        assert!(!intersects(&parse_positions("QB"), &flex));
        assert!(!intersects(&[], &flex));
    }

    #[test]
    fn test_position_serde_roundtrip_normalizes() {
        #[derive(Deserialize)]
        struct Wrapper {
            positions: Vec<Position>,
        }

        let parsed: Wrapper = toml::from_str(r#"positions = ["qb", " te"]"#).unwrap();
        assert_eq!(
            parsed.positions,
            vec![Position::new("QB"), Position::new("TE")]
        );
    }
}
