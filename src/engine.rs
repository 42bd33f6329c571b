//! Engine - incremental disjunctive unification, one call per saturation
//! round.
//!
//! Each round the engine:
//! 1. Prunes cached unifiers whose query left the UCQ
//! 2. Unifies every new query with every head of the rule
//! 3. Once all heads are satisfiable, extends each new unifier into full
//!    disjunctive combinations using cached unifiers for the other heads
//! 4. Records the new unifiers so later heads and later rounds can use them
//!
//! Only combinations with at least one unifier computed this round are
//! produced. Unifiers for head `i` are recorded after head `i` is extended,
//! so a combination of several new unifiers is found exactly once, anchored
//! at the last of its new heads.

use crate::cache::UnifierCache;
use crate::combination::{DisjunctivePieceUnifier, PartialCombination};
use crate::error::{EngineError, MisplacedUnifier};
use crate::extension::ExtensionSearch;
use crate::metrics::RewriteMetrics;
use crate::piece::{PieceUnification, PieceUnifier};
use crate::query::{ConjunctiveQuery, UnionOfConjunctiveQueries};
use crate::rule::Rule;
use crate::term::FreshVariables;
use crate::trace::{debug, error, info_span};
use indexmap::IndexSet;
use std::sync::Arc;

/// Incremental disjunctive piece-unification engine.
///
/// Owns the unifier cache and satisfiability flags for one growing UCQ.
/// Separate reasoning sessions need separate engines.
pub struct DisjunctiveUnifier<P: PieceUnification> {
    unification: P,
    cache: UnifierCache,
    fresh: FreshVariables,
    metrics: RewriteMetrics,
}

impl<P: PieceUnification> DisjunctiveUnifier<P> {
    pub fn new(unification: P) -> Self {
        Self::with_fresh_variables(unification, FreshVariables::new())
    }

    /// Use an existing fresh-variable supply, for callers that rename
    /// queries themselves as well.
    pub fn with_fresh_variables(unification: P, fresh: FreshVariables) -> Self {
        Self {
            unification,
            cache: UnifierCache::new(),
            fresh,
            metrics: RewriteMetrics::new(),
        }
    }

    pub fn cache(&self) -> &UnifierCache {
        &self.cache
    }

    pub fn metrics(&self) -> &RewriteMetrics {
        &self.metrics
    }

    pub fn fresh_variables(&self) -> &FreshVariables {
        &self.fresh
    }

    pub fn unification(&self) -> &P {
        &self.unification
    }

    /// Run one round for `rule`.
    ///
    /// `all_cqs` is the whole current UCQ, `new_cqs` the queries added since
    /// the previous round. Returns the disjunctive piece unifiers found this
    /// round that use at least one unifier of a query in `new_cqs`.
    pub fn unify_round(
        &mut self,
        all_cqs: &UnionOfConjunctiveQueries,
        new_cqs: &UnionOfConjunctiveQueries,
        rule: &Arc<Rule>,
    ) -> Result<IndexSet<DisjunctivePieceUnifier>, EngineError<P::Error>> {
        let _span = info_span!(
            "unify_round",
            rule = rule.id().raw(),
            all = all_cqs.len(),
            new = new_cqs.len()
        )
        .entered();
        self.metrics.record_round();

        let pruned = self.cache.prune(all_cqs);
        self.metrics.record_pruned(pruned as u64);
        self.cache.ensure_rule(rule);

        let mut out = IndexSet::new();
        for head in 0..rule.head_count() {
            let computed = self.unify_head(new_cqs, rule, head)?;
            debug!(head, unifiers = computed.len(), "head_unified");

            if !computed.is_empty() {
                self.cache.mark_satisfiable(rule, head);
            }

            if self.cache.all_satisfiable(rule.id()) {
                let search = ExtensionSearch::new(&self.cache, &self.metrics, head);
                for (_, unifier) in computed.iter() {
                    let anchored = PartialCombination::anchored(
                        rule.clone(),
                        unifier.clone(),
                        all_cqs.answer_vars().iter().copied(),
                    );
                    if let Err(incomplete) = search.run(anchored, &mut out) {
                        error!(%incomplete, "invariant_violation");
                        return Err(incomplete.into());
                    }
                }
            }

            for (cq, unifier) in computed {
                self.cache.record(&cq, unifier);
                self.metrics.record_cache_record();
            }
        }

        debug!(emitted = out.len(), "round_complete");
        Ok(out)
    }

    /// Run one round for each rule in turn, merging the results.
    pub fn unify_round_all(
        &mut self,
        all_cqs: &UnionOfConjunctiveQueries,
        new_cqs: &UnionOfConjunctiveQueries,
        rules: &[Arc<Rule>],
    ) -> Result<IndexSet<DisjunctivePieceUnifier>, EngineError<P::Error>> {
        let mut out = IndexSet::new();
        for rule in rules {
            out.extend(self.unify_round(all_cqs, new_cqs, rule)?);
        }
        Ok(out)
    }

    /// Piece unifiers of every new query against one head, each query
    /// renamed apart on its own. Pairs each unifier with the query as it
    /// appears in the UCQ. A unifier for any other rule or head fails the
    /// round.
    fn unify_head(
        &mut self,
        new_cqs: &UnionOfConjunctiveQueries,
        rule: &Arc<Rule>,
        head: usize,
    ) -> Result<Vec<(Arc<ConjunctiveQuery>, Arc<PieceUnifier>)>, EngineError<P::Error>> {
        let mut computed = Vec::new();
        for cq in new_cqs.iter() {
            let renamed = Arc::new(cq.rename_existentials(&mut self.fresh));
            let unifiers = self
                .unification
                .piece_unifiers(&renamed, rule, head)
                .map_err(EngineError::Unifier)?;
            self.metrics.record_piece_unifiers(unifiers.len() as u64);
            if let Some(stray) = unifiers
                .iter()
                .find(|u| u.rule().id() != rule.id() || u.head() != head)
            {
                let misplaced = MisplacedUnifier {
                    rule: rule.id(),
                    head,
                    got_rule: stray.rule().id(),
                    got_head: stray.head(),
                };
                error!(%misplaced, "invariant_violation");
                return Err(misplaced.into());
            }
            computed.extend(unifiers.into_iter().map(|u| (cq.clone(), Arc::new(u))));
        }
        Ok(computed)
    }
}

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests;
