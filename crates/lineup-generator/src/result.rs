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

use lineup_bnb::stats::BnbSolverStatistics;
use lineup_model::lineup::Lineup;
use std::time::Duration;

/// How a generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStatus {
    /// All requested lineups were produced.
    Complete,
    /// Relaxation reached the maximum overlap and no further distinct
    /// lineup exists.
    Partial { produced: usize, requested: usize },
    /// Not even the first lineup exists.
    Infeasible,
    /// A node or time limit stopped a solve. Lineups accepted before it are
    /// kept.
    Timeout { produced: usize },
    /// The interrupt flag stopped a solve. Lineups accepted before it are
    /// kept.
    Cancelled { produced: usize },
}

impl GenerationStatus {
    /// Returns the number of lineups produced, or `None` for `Complete`
    /// and `Infeasible` where the count follows from the request.
    #[inline]
    pub fn produced(&self) -> Option<usize> {
        match self {
            GenerationStatus::Partial { produced, .. }
            | GenerationStatus::Timeout { produced }
            | GenerationStatus::Cancelled { produced } => Some(*produced),
            GenerationStatus::Complete | GenerationStatus::Infeasible => None,
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, GenerationStatus::Complete)
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationStatus::Complete => write!(f, "Complete"),
            GenerationStatus::Partial {
                produced,
                requested,
            } => write!(f, "Partial({}/{})", produced, requested),
            GenerationStatus::Infeasible => write!(f, "Infeasible"),
            GenerationStatus::Timeout { produced } => write!(f, "Timeout({})", produced),
            GenerationStatus::Cancelled { produced } => write!(f, "Cancelled({})", produced),
        }
    }
}

/// Counters of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStatistics {
    /// Solver invocations, including infeasible and aborted ones.
    pub solves: u64,
    /// Times the working overlap limit was raised.
    pub relaxations: u64,
    /// Working overlap limit in effect when the run ended.
    pub final_overlap_limit: usize,
    /// Solver statistics summed over every solve.
    pub search: BnbSolverStatistics,
    /// Wall-clock time of the whole run.
    pub time_total: Duration,
}

impl std::fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lineup Generation Statistics:")?;
        writeln!(f, "  Solves:               {}", self.solves)?;
        writeln!(f, "  Relaxations:          {}", self.relaxations)?;
        writeln!(f, "  Final overlap limit:  {}", self.final_overlap_limit)?;
        writeln!(f, "  Nodes explored:       {}", self.search.nodes_explored)?;
        writeln!(f, "  Prunings (total):     {}", self.search.prunings_total())?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome<T> {
    contest_id: String,
    lineups: Vec<Lineup<T>>,
    status: GenerationStatus,
    statistics: GenerationStatistics,
}

impl<T> GenerationOutcome<T> {
    #[inline]
    pub fn new(
        contest_id: impl Into<String>,
        lineups: Vec<Lineup<T>>,
        status: GenerationStatus,
        statistics: GenerationStatistics,
    ) -> Self {
        Self {
            contest_id: contest_id.into(),
            lineups,
            status,
            statistics,
        }
    }

    #[inline]
    pub fn contest_id(&self) -> &str {
        &self.contest_id
    }

    /// Returns the lineups, best first.
    #[inline]
    pub fn lineups(&self) -> &[Lineup<T>] {
        &self.lineups
    }

    #[inline]
    pub fn into_lineups(self) -> Vec<Lineup<T>> {
        self.lineups
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    #[inline]
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    #[inline]
    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }

    /// Labels every lineup `"{contest_id}_{k}"` with `k` counting from 1 in
    /// output order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &Lineup<T>)> + '_ {
        self.lineups
            .iter()
            .enumerate()
            .map(move |(i, lineup)| (format!("{}_{}", self.contest_id, i + 1), lineup))
    }
}

impl<T> std::fmt::Display for GenerationOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GenerationOutcome(contest: {}, status: {}, lineups: {})",
            self.contest_id,
            self.status,
            self.lineups.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_produced() {
        assert_eq!(GenerationStatus::Complete.to_string(), "Complete");
        assert_eq!(
            GenerationStatus::Partial {
                produced: 2,
                requested: 5
            }
            .to_string(),
            "Partial(2/5)"
        );
        assert_eq!(GenerationStatus::Timeout { produced: 1 }.produced(), Some(1));
        assert_eq!(GenerationStatus::Infeasible.produced(), None);
        assert!(GenerationStatus::Complete.is_complete());
        assert!(!GenerationStatus::Cancelled { produced: 0 }.is_complete());
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = GenerationOutcome::<u32>::new(
            "c1",
            Vec::new(),
            GenerationStatus::Infeasible,
            GenerationStatistics::default(),
        );
        assert!(outcome.is_empty());
        assert_eq!(outcome.entries().count(), 0);
        assert_eq!(
            outcome.to_string(),
            "GenerationOutcome(contest: c1, status: Infeasible, lineups: 0)"
        );
    }
}
