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

use lineup_model::index::PlayerIndex;

/// A branching decision: fill the slot at the current depth with `player`.
///
/// `rank` is the player's position in the candidate order of that depth.
/// Consecutive interchangeable slots only accept strictly increasing ranks,
/// so each player set is enumerated once.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Decision {
    player: PlayerIndex,
    rank: u32,
}

impl Decision {
    #[inline(always)]
    pub fn new(player: PlayerIndex, rank: u32) -> Self {
        Self { player, rank }
    }

    #[inline(always)]
    pub fn player(&self) -> PlayerIndex {
        self.player
    }

    #[inline(always)]
    pub fn rank(&self) -> u32 {
        self.rank
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decision(player: {}, rank: {})", self.player, self.rank)
    }
}
