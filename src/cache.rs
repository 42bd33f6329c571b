//! Round-to-round memory of the rewriting engine.
//!
//! Every piece unifier ever computed is kept under the query it came from,
//! the rule and head it unifies with, and its frontier instantiation.
//! Entries only disappear when their query leaves the current UCQ.
//!
//! Alongside, each rule carries one satisfiability flag per head: a head
//! becomes satisfiable the first time any query unifies with it and stays
//! so for the life of the cache.

use crate::frontier::{is_compatible, FrontierInstantiation};
use crate::piece::PieceUnifier;
use crate::query::{ConjunctiveQuery, UnionOfConjunctiveQueries};
use crate::rule::{Rule, RuleId};
use crate::trace::debug;
use hashbrown::HashMap;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

type FxBuild = BuildHasherDefault<FxHasher>;

/// Unifiers recorded for one (query, rule, head), grouped by instantiation
/// in first-seen order.
type ByInstantiation = IndexMap<FrontierInstantiation, Vec<Arc<PieceUnifier>>, FxBuild>;

/// Queries for one (rule, head), in first-recorded order.
type ByQuery = IndexMap<Arc<ConjunctiveQuery>, ByInstantiation, FxBuild>;

/// Cache keyed by (query, rule, head index) and frontier instantiation.
///
/// Stored nested by (rule, head) first, so `candidates_for` walks only the
/// queries relevant to one head.
#[derive(Debug, Default)]
pub struct UnifierCache {
    entries: IndexMap<(RuleId, usize), ByQuery, FxBuild>,
    satisfiable: HashMap<RuleId, Vec<bool>>,
}

impl UnifierCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry whose query is not in `current`.
    /// Returns the number of (query, rule, head) keys dropped.
    pub fn prune(&mut self, current: &UnionOfConjunctiveQueries) -> usize {
        let mut dropped = 0;
        for by_query in self.entries.values_mut() {
            let before = by_query.len();
            by_query.retain(|cq, _| current.contains(cq));
            dropped += before - by_query.len();
        }
        self.entries.retain(|_, by_query| !by_query.is_empty());
        if dropped > 0 {
            debug!(dropped, "cache_pruned");
        }
        dropped
    }

    /// Start tracking `rule`, with every head unsatisfiable. No-op for a rule
    /// already tracked.
    pub fn ensure_rule(&mut self, rule: &Rule) {
        self.satisfiable
            .entry(rule.id())
            .or_insert_with(|| vec![false; rule.head_count()]);
    }

    pub fn mark_satisfiable(&mut self, rule: &Rule, head: usize) {
        let flags = self
            .satisfiable
            .entry(rule.id())
            .or_insert_with(|| vec![false; rule.head_count()]);
        if let Some(flag) = flags.get_mut(head) {
            if !*flag {
                debug!(rule = rule.id().raw(), head, "head_satisfiable");
            }
            *flag = true;
        }
    }

    /// Store `unifier` as computed from `cq`, and mark its head satisfiable.
    ///
    /// `cq` is the query as it appears in the UCQ, before renaming.
    pub fn record(&mut self, cq: &Arc<ConjunctiveQuery>, unifier: Arc<PieceUnifier>) {
        let rule = unifier.rule().clone();
        let head = unifier.head();
        let instantiation = unifier.frontier_instantiation();
        self.entries
            .entry((rule.id(), head))
            .or_default()
            .entry(cq.clone())
            .or_default()
            .entry(instantiation)
            .or_default()
            .push(unifier);
        self.mark_satisfiable(&rule, head);
    }

    /// Every head of `rule` has yielded a unifier at some point.
    /// False for a rule never seen.
    pub fn all_satisfiable(&self, rule: RuleId) -> bool {
        self.satisfiable
            .get(&rule)
            .is_some_and(|flags| flags.iter().all(|f| *f))
    }

    pub fn is_satisfiable(&self, rule: RuleId, head: usize) -> bool {
        self.satisfiable
            .get(&rule)
            .and_then(|flags| flags.get(head))
            .copied()
            .unwrap_or(false)
    }

    /// Per-head flags of `rule`, if tracked.
    pub fn satisfiability(&self, rule: RuleId) -> Option<&[bool]> {
        self.satisfiable.get(&rule).map(|f| f.as_slice())
    }

    /// Every cached unifier for (`rule`, `head`) whose instantiation is
    /// compatible with `required`, across all cached queries, in record
    /// order.
    pub fn candidates_for(
        &self,
        rule: RuleId,
        head: usize,
        required: &FrontierInstantiation,
    ) -> Vec<Arc<PieceUnifier>> {
        let Some(by_query) = self.entries.get(&(rule, head)) else {
            return Vec::new();
        };
        by_query
            .values()
            .flat_map(|by_inst| by_inst.iter())
            .filter(|(inst, _)| is_compatible(inst, required))
            .flat_map(|(_, unifiers)| unifiers.iter().cloned())
            .collect()
    }

    /// Unifiers stored under one exact key.
    pub fn get(
        &self,
        cq: &ConjunctiveQuery,
        rule: RuleId,
        head: usize,
        instantiation: &FrontierInstantiation,
    ) -> &[Arc<PieceUnifier>] {
        self.entries
            .get(&(rule, head))
            .and_then(|by_query| by_query.get(cq))
            .and_then(|by_inst| by_inst.get(instantiation))
            .map(|u| u.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct queries with at least one cached unifier.
    pub fn cached_queries(&self) -> Vec<&Arc<ConjunctiveQuery>> {
        let mut seen: IndexMap<&Arc<ConjunctiveQuery>, (), FxBuild> = IndexMap::default();
        for by_query in self.entries.values() {
            for cq in by_query.keys() {
                seen.insert(cq, ());
            }
        }
        seen.into_keys().collect()
    }

    /// Number of stored unifiers.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(|by_query| by_query.values())
            .flat_map(|by_inst| by_inst.values())
            .map(|u| u.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/cache.rs"]
mod tests;
