//! Partial and finished disjunctive combinations.
//!
//! A `PartialCombination` is one rewriting attempt in progress: a piece
//! unifier for some of the heads of a rule. It is a plain value; every
//! branch of the extension search works on its own copy. Once every head is
//! filled it is finalized into an immutable `DisjunctivePieceUnifier`.

use crate::error::IncompleteCombination;
use crate::frontier::FrontierInstantiation;
use crate::partition::TermPartition;
use crate::piece::PieceUnifier;
use crate::query::{ConjunctiveQuery, UnionOfConjunctiveQueries};
use crate::rule::Rule;
use crate::term::Variable;
use smallvec::SmallVec;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PartialCombination {
    rule: Arc<Rule>,
    unifiers: SmallVec<[Option<Arc<PieceUnifier>>; 4]>,
    queries: SmallVec<[Option<Arc<ConjunctiveQuery>>; 4]>,
    answer_vars: SmallVec<[Variable; 4]>,
}

impl PartialCombination {
    /// Every head empty.
    pub fn empty(rule: Arc<Rule>, answer_vars: impl IntoIterator<Item = Variable>) -> Self {
        let heads = rule.head_count();
        Self {
            rule,
            unifiers: smallvec::smallvec![None; heads],
            queries: smallvec::smallvec![None; heads],
            answer_vars: answer_vars.into_iter().collect(),
        }
    }

    /// Only `unifier`'s head filled, with the query it unified.
    pub fn anchored(
        rule: Arc<Rule>,
        unifier: Arc<PieceUnifier>,
        answer_vars: impl IntoIterator<Item = Variable>,
    ) -> Self {
        let head = unifier.head();
        Self::empty(rule, answer_vars).with_slot(head, unifier)
    }

    /// A copy with the slot at `head` holding `unifier` and its query.
    pub fn with_slot(mut self, head: usize, unifier: Arc<PieceUnifier>) -> Self {
        self.queries[head] = Some(unifier.query().clone());
        self.unifiers[head] = Some(unifier);
        self
    }

    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    pub fn unifier(&self, head: usize) -> Option<&Arc<PieceUnifier>> {
        self.unifiers.get(head).and_then(|u| u.as_ref())
    }

    pub fn is_filled(&self, head: usize) -> bool {
        self.unifier(head).is_some()
    }

    pub fn filled(&self) -> usize {
        self.unifiers.iter().filter(|u| u.is_some()).count()
    }

    /// Head indices still empty, ascending.
    pub fn missing(&self) -> Vec<usize> {
        self.unifiers
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Join of the partitions of every filled slot, starting from the first
    /// filled one. The unifiers' own partitions are left untouched.
    pub fn combined_partition(&self) -> TermPartition {
        let mut filled = self.unifiers.iter().flatten();
        let Some(first) = filled.next() else {
            return TermPartition::new();
        };
        let mut combined = first.partition().clone();
        for unifier in filled {
            combined.join(unifier.partition());
        }
        combined
    }

    /// The constants the filled slots jointly force on the frontier of
    /// `head`. Valid whether or not `head` itself is filled.
    pub fn frontier_instantiation(&self, head: usize) -> FrontierInstantiation {
        FrontierInstantiation::under(&self.combined_partition(), self.rule.frontier(head))
    }

    pub fn finalize(self) -> Result<DisjunctivePieceUnifier, IncompleteCombination> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(IncompleteCombination {
                rule: self.rule.id(),
                missing,
            });
        }
        let unifiers: Vec<Arc<PieceUnifier>> = self.unifiers.into_iter().flatten().collect();
        let queries: Vec<Arc<ConjunctiveQuery>> = self.queries.into_iter().flatten().collect();
        let ucq = UnionOfConjunctiveQueries::from_queries(
            queries.iter().cloned(),
            self.answer_vars.iter().copied(),
        );
        Ok(DisjunctivePieceUnifier {
            rule: self.rule,
            unifiers,
            queries,
            ucq,
        })
    }
}

/// One piece unifier per head of a rule, jointly justifying one rewriting
/// step.
///
/// Equality and hashing cover the rule id, the per-head unifiers in head
/// order (each compared structurally), and the UCQ of per-head queries.
#[derive(Debug, Clone)]
pub struct DisjunctivePieceUnifier {
    rule: Arc<Rule>,
    unifiers: Vec<Arc<PieceUnifier>>,
    queries: Vec<Arc<ConjunctiveQuery>>,
    ucq: UnionOfConjunctiveQueries,
}

impl DisjunctivePieceUnifier {
    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    /// Exactly one per head, in head order.
    pub fn unifiers(&self) -> &[Arc<PieceUnifier>] {
        &self.unifiers
    }

    pub fn unifier(&self, head: usize) -> Option<&Arc<PieceUnifier>> {
        self.unifiers.get(head)
    }

    /// The unified (renamed) query of each head, in head order.
    pub fn queries(&self) -> &[Arc<ConjunctiveQuery>] {
        &self.queries
    }

    pub fn ucq(&self) -> &UnionOfConjunctiveQueries {
        &self.ucq
    }

    /// Join of every per-head partition.
    pub fn combined_partition(&self) -> TermPartition {
        let mut combined = TermPartition::new();
        for unifier in self.unifiers.iter() {
            combined.join(unifier.partition());
        }
        combined
    }
}

impl PartialEq for DisjunctivePieceUnifier {
    fn eq(&self, other: &Self) -> bool {
        self.rule.id() == other.rule.id()
            && self.unifiers == other.unifiers
            && self.ucq == other.ucq
    }
}

impl Eq for DisjunctivePieceUnifier {}

impl std::hash::Hash for DisjunctivePieceUnifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.rule.id().hash(state);
        self.unifiers.hash(state);
        self.ucq.hash(state);
    }
}

#[cfg(test)]
#[path = "tests/combination.rs"]
mod tests;
