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

//! Search plan
//!
//! Static per-solve data derived from the pool, the roster model and the
//! search context before the first node is explored:
//!
//! - the order in which slots are filled (most constrained first, with
//!   interchangeable slots kept adjacent),
//! - for every depth, the candidate players in branching order,
//! - for every depth, whether it continues a run of interchangeable slots
//!   (those only accept strictly increasing candidate ranks),
//! - suffix bounds: the best points and the cheapest salary any completion
//!   from a given depth can reach.
//!
//! Within a run of `k` interchangeable slots the suffix bounds use the sum
//! of the top (resp. bottom) `k - i` candidates instead of `k - i` copies of
//! the best one, since a player fills at most one slot.

use crate::context::SearchContext;
use lineup_core::num::salary::SalaryNumeric;
use lineup_model::{
    index::{PlayerIndex, SlotIndex},
    pool::ProjectionPool,
    roster::RosterModel,
};

#[derive(Clone, Debug, Default)]
pub struct SearchPlan<T> {
    slot_order: Vec<SlotIndex>,
    multipliers: Vec<f64>,
    candidates: Vec<Vec<PlayerIndex>>,
    chained: Vec<bool>,
    suffix_best_points: Vec<f64>,
    suffix_min_salary: Vec<Option<T>>,
}

impl<T> SearchPlan<T>
where
    T: SalaryNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            slot_order: Vec::new(),
            multipliers: Vec::new(),
            candidates: Vec::new(),
            chained: Vec::new(),
            suffix_best_points: Vec::new(),
            suffix_min_salary: Vec::new(),
        }
    }

    /// Rebuilds the plan for a solve, reusing the existing buffers.
    ///
    /// Returns `false` if some run of interchangeable slots has fewer
    /// candidates than slots, which makes the solve infeasible before any
    /// node is explored.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `context` was not built
    /// for a pool of the same size.
    pub fn rebuild(
        &mut self,
        pool: &ProjectionPool<T>,
        model: &RosterModel<T>,
        context: &SearchContext,
    ) -> bool {
        debug_assert_eq!(
            context.num_players(),
            pool.len(),
            "called `SearchPlan::rebuild` with a context for {} players but a pool of {}",
            context.num_players(),
            pool.len()
        );

        let num_slots = model.num_slots();
        self.clear(num_slots);

        let slots = model.slots();
        let classes: Vec<usize> = (0..num_slots)
            .map(|i| {
                (0..i)
                    .find(|&j| slots[j].is_interchangeable_with(&slots[i]))
                    .unwrap_or(i)
            })
            .collect();

        let mut per_slot: Vec<Vec<PlayerIndex>> = Vec::with_capacity(num_slots);
        for slot in SlotIndex::range(num_slots) {
            let mut list: Vec<PlayerIndex> = model
                .eligible_players(slot)
                .iter()
                .copied()
                .filter(|&p| !context.is_excluded(p))
                .collect();
            sort_by_density(pool, context, &mut list);
            per_slot.push(list);
        }

        self.slot_order.extend(SlotIndex::range(num_slots));
        self.slot_order.sort_by_key(|slot| {
            let i = slot.get();
            (per_slot[i].len(), classes[i], i)
        });

        for (depth, &slot) in self.slot_order.iter().enumerate() {
            self.multipliers.push(model.multiplier(slot));
            self.chained.push(
                depth > 0 && classes[slot.get()] == classes[self.slot_order[depth - 1].get()],
            );
            self.candidates.push(std::mem::take(&mut per_slot[slot.get()]));
        }

        self.compute_suffix_bounds(pool)
    }

    fn clear(&mut self, num_slots: usize) {
        self.slot_order.clear();
        self.multipliers.clear();
        self.candidates.clear();
        self.chained.clear();
        self.suffix_best_points.clear();
        self.suffix_best_points.resize(num_slots + 1, 0.0);
        self.suffix_min_salary.clear();
        self.suffix_min_salary.resize(num_slots + 1, Some(T::ZERO));
    }

    fn compute_suffix_bounds(&mut self, pool: &ProjectionPool<T>) -> bool {
        let num_slots = self.slot_order.len();
        let mut end = num_slots;

        while end > 0 {
            let mut start = end - 1;
            while start > 0 && self.chained[start] {
                start -= 1;
            }

            let run = end - start;
            let candidates = &self.candidates[start];
            if candidates.len() < run {
                return false;
            }

            let mut points: Vec<f64> = candidates
                .iter()
                .map(|&p| pool.projected_points(p))
                .collect();
            points.sort_unstable_by(|a, b| b.total_cmp(a));
            let mut salaries: Vec<T> = candidates.iter().map(|&p| pool.salary(p)).collect();
            salaries.sort_unstable();

            let multiplier = self.multipliers[start];
            let tail_points = self.suffix_best_points[end];
            let tail_salary = self.suffix_min_salary[end];

            for (offset, depth) in (start..end).enumerate() {
                let remaining = run - offset;
                let best: f64 = points[..remaining].iter().sum::<f64>() * multiplier;
                let cheapest = salaries[..remaining]
                    .iter()
                    .try_fold(T::ZERO, |acc, &s| acc.checked_add_val(s));

                self.suffix_best_points[depth] = best + tail_points;
                self.suffix_min_salary[depth] =
                    cheapest.zip(tail_salary).and_then(|(c, t)| c.checked_add_val(t));
            }

            end = start;
        }

        true
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slot_order.len()
    }

    /// Returns the slot filled at `depth`.
    #[inline]
    pub fn slot_at(&self, depth: usize) -> SlotIndex {
        self.slot_order[depth]
    }

    /// Returns the slots in fill order.
    #[inline]
    pub fn slot_order(&self) -> &[SlotIndex] {
        &self.slot_order
    }

    #[inline]
    pub fn multiplier_at(&self, depth: usize) -> f64 {
        self.multipliers[depth]
    }

    /// Returns the candidates of `depth` in branching order.
    #[inline]
    pub fn candidates(&self, depth: usize) -> &[PlayerIndex] {
        &self.candidates[depth]
    }

    /// Returns `true` if `depth` continues a run of interchangeable slots.
    #[inline]
    pub fn is_chained(&self, depth: usize) -> bool {
        self.chained[depth]
    }

    /// Upper bound on the points the slots from `depth` onwards can add.
    #[inline]
    pub fn suffix_best_points(&self, depth: usize) -> f64 {
        self.suffix_best_points[depth]
    }

    /// Lower bound on the salary the slots from `depth` onwards will add,
    /// or `None` if even the cheapest fill overflows `T`.
    #[inline]
    pub fn suffix_min_salary(&self, depth: usize) -> Option<T> {
        self.suffix_min_salary[depth]
    }
}

/// Orders players by penalized value density descending, then projected
/// points descending, then identity ascending.
fn sort_by_density<T>(pool: &ProjectionPool<T>, context: &SearchContext, list: &mut [PlayerIndex])
where
    T: SalaryNumeric,
{
    let density = |p: PlayerIndex| {
        let salary = pool.salary(p).as_f64().max(1.0);
        pool.projected_points(p) / salary * context.density_penalty(p)
    };

    list.sort_by(|&a, &b| {
        density(b)
            .total_cmp(&density(a))
            .then_with(|| pool.projected_points(b).total_cmp(&pool.projected_points(a)))
            .then_with(|| pool.identity_rank(a).cmp(&pool.identity_rank(b)))
    });
}

impl<T> std::fmt::Display for SearchPlan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes: Vec<String> = self.candidates.iter().map(|c| c.len().to_string()).collect();
        write!(
            f,
            "SearchPlan(slots: {}, candidates: [{}])",
            self.slot_order.len(),
            sizes.join(", ")
        )
    }
}
