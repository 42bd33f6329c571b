//! Backtracking extension of an anchored combination.
//!
//! Starting from a combination whose only filled head is the anchor, every
//! other head is filled in increasing index order with a cached unifier
//! compatible with what the heads filled so far force on its frontier.
//! Each branch owns its combination; siblings never see each other's slots.

use crate::cache::UnifierCache;
use crate::combination::{DisjunctivePieceUnifier, PartialCombination};
use crate::error::IncompleteCombination;
use crate::metrics::RewriteMetrics;
use crate::trace::trace;
use indexmap::IndexSet;

pub struct ExtensionSearch<'a> {
    cache: &'a UnifierCache,
    metrics: &'a RewriteMetrics,
    anchor: usize,
}

impl<'a> ExtensionSearch<'a> {
    pub fn new(cache: &'a UnifierCache, metrics: &'a RewriteMetrics, anchor: usize) -> Self {
        Self {
            cache,
            metrics,
            anchor,
        }
    }

    /// Fill every non-anchor head of `combination` and add each complete
    /// result to `out`. Structurally equal results collapse.
    pub fn run(
        &self,
        combination: PartialCombination,
        out: &mut IndexSet<DisjunctivePieceUnifier>,
    ) -> Result<(), IncompleteCombination> {
        debug_assert!(combination.is_filled(self.anchor));
        debug_assert_eq!(combination.filled(), 1);
        self.fill(combination, 0, out)
    }

    fn fill(
        &self,
        combination: PartialCombination,
        index: usize,
        out: &mut IndexSet<DisjunctivePieceUnifier>,
    ) -> Result<(), IncompleteCombination> {
        if index == combination.rule().head_count() {
            let finished = combination.finalize()?;
            if out.insert(finished) {
                self.metrics.record_combination();
            } else {
                self.metrics.record_duplicate();
            }
            return Ok(());
        }
        if index == self.anchor {
            return self.fill(combination, index + 1, out);
        }

        let required = combination.frontier_instantiation(index);
        let candidates = self
            .cache
            .candidates_for(combination.rule().id(), index, &required);
        if candidates.is_empty() {
            trace!(head = index, anchor = self.anchor, "extension_dead_end");
            self.metrics.record_dead_end();
            return Ok(());
        }

        for candidate in candidates {
            self.metrics.record_branch();
            self.fill(combination.clone().with_slot(index, candidate), index + 1, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/extension.rs"]
mod tests;
