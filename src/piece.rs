//! Single-head piece unifiers.
//!
//! A piece unifier unifies a subset of a query's atoms (the piece) with
//! atoms of one head of a rule. The engine only consumes them through the
//! `PieceUnification` trait; `MostGeneralUnifiers` is the stock producer.

use crate::error::UnificationError;
use crate::frontier::FrontierInstantiation;
use crate::partition::TermPartition;
use crate::query::ConjunctiveQuery;
use crate::rule::Rule;
use crate::term::{Atom, Scope, Term, Variable};
use crate::trace::trace;
use indexmap::IndexSet;
use smallvec::SmallVec;
use std::sync::Arc;

/// A unifier of part of one query against one rule head.
///
/// Identity is structural: rule id, head index, unified query, piece and
/// partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceUnifier {
    rule: Arc<Rule>,
    head: usize,
    query: Arc<ConjunctiveQuery>,
    piece: SmallVec<[usize; 4]>,
    partition: TermPartition,
}

impl PieceUnifier {
    /// `piece` holds indices into `query.atoms()`; it is sorted and
    /// deduplicated here.
    pub fn new(
        rule: Arc<Rule>,
        head: usize,
        query: Arc<ConjunctiveQuery>,
        piece: impl IntoIterator<Item = usize>,
        partition: TermPartition,
    ) -> Self {
        let mut piece: SmallVec<[usize; 4]> = piece.into_iter().collect();
        piece.sort_unstable();
        piece.dedup();
        Self {
            rule,
            head,
            query,
            piece,
            partition,
        }
    }

    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    pub fn head(&self) -> usize {
        self.head
    }

    /// The query that was unified (already renamed apart).
    pub fn query(&self) -> &Arc<ConjunctiveQuery> {
        &self.query
    }

    pub fn piece(&self) -> &[usize] {
        &self.piece
    }

    pub fn partition(&self) -> &TermPartition {
        &self.partition
    }

    /// Atoms of the query outside the piece.
    pub fn remainder(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.query
            .atoms()
            .iter()
            .enumerate()
            .filter(|(i, _)| self.piece.binary_search(i).is_err())
            .map(|(_, a)| a)
    }

    /// The constants this unifier forces on the frontier of its head.
    pub fn frontier_instantiation(&self) -> FrontierInstantiation {
        FrontierInstantiation::under(&self.partition, self.rule.frontier(self.head))
    }
}

/// Computes the piece unifiers of one query against one rule head.
///
/// The query handed in has already had its existential variables renamed
/// apart.
pub trait PieceUnification {
    type Error: std::error::Error + 'static;

    fn piece_unifiers(
        &mut self,
        query: &Arc<ConjunctiveQuery>,
        rule: &Arc<Rule>,
        head: usize,
    ) -> Result<Vec<PieceUnifier>, Self::Error>;
}

/// Most general piece unifiers by exhaustive piece enumeration.
///
/// Every non-empty subset of query atoms is matched against same-signature
/// head atoms in every way; a candidate partition is kept when it respects
/// the head's existential variables and no other candidate for the same
/// piece strictly refines it.
#[derive(Debug, Clone, Default)]
pub struct MostGeneralUnifiers;

impl MostGeneralUnifiers {
    pub fn new() -> Self {
        MostGeneralUnifiers
    }
}

impl PieceUnification for MostGeneralUnifiers {
    type Error = UnificationError;

    fn piece_unifiers(
        &mut self,
        query: &Arc<ConjunctiveQuery>,
        rule: &Arc<Rule>,
        head: usize,
    ) -> Result<Vec<PieceUnifier>, UnificationError> {
        let head_cq = rule.head(head).ok_or(UnificationError::NoSuchHead {
            rule: rule.id(),
            head,
            heads: rule.head_count(),
        })?;

        let options: Vec<SmallVec<[usize; 4]>> = query
            .atoms()
            .iter()
            .map(|q| {
                head_cq
                    .atoms()
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| h.same_signature(q))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        let search = PieceSearch {
            query,
            rule,
            head_atoms: head_cq.atoms(),
            existentials: rule.existential_vars(head),
            options: &options,
        };
        let mut found: IndexSet<(SmallVec<[usize; 4]>, TermPartition)> = IndexSet::new();
        search.enumerate(0, &mut SmallVec::new(), TermPartition::new(), &mut found);

        let candidates: Vec<_> = found.into_iter().collect();
        let unifiers: Vec<PieceUnifier> = candidates
            .iter()
            .filter(|(piece, partition)| {
                !candidates
                    .iter()
                    .any(|(p, other)| p == piece && other != partition && other.refines(partition))
            })
            .map(|(piece, partition)| {
                PieceUnifier::new(
                    rule.clone(),
                    head,
                    query.clone(),
                    piece.iter().copied(),
                    partition.clone(),
                )
            })
            .collect();

        trace!(
            rule = rule.id().raw(),
            head,
            count = unifiers.len(),
            "piece_unifiers"
        );
        Ok(unifiers)
    }
}

struct PieceSearch<'a> {
    query: &'a ConjunctiveQuery,
    rule: &'a Rule,
    head_atoms: &'a [Atom],
    existentials: Vec<Variable>,
    options: &'a [SmallVec<[usize; 4]>],
}

impl PieceSearch<'_> {
    /// Decide for query atom `index` whether it stays out of the piece or
    /// which head atom it unifies with.
    fn enumerate(
        &self,
        index: usize,
        piece: &mut SmallVec<[usize; 4]>,
        partition: TermPartition,
        found: &mut IndexSet<(SmallVec<[usize; 4]>, TermPartition)>,
    ) {
        if index == self.options.len() {
            if !piece.is_empty() && self.respects_existentials(piece, &partition) {
                found.insert((piece.clone(), partition));
            }
            return;
        }

        self.enumerate(index + 1, piece, partition.clone(), found);

        let query_atom = &self.query.atoms()[index];
        for &h in self.options[index].iter() {
            let mut next = partition.clone();
            for (q, t) in query_atom.args().iter().zip(self.head_atoms[h].args()) {
                next.union(*q, *t);
            }
            if !next.is_consistent() {
                continue;
            }
            piece.push(index);
            self.enumerate(index + 1, piece, next, found);
            piece.pop();
        }
    }

    /// A class holding a head existential may hold nothing else from the
    /// head, no constant, no answer variable, and no query variable that
    /// also occurs outside the piece.
    fn respects_existentials(&self, piece: &[usize], partition: &TermPartition) -> bool {
        let rule_scope = Scope::Rule(self.rule.id());
        self.existentials.iter().all(|&ex| {
            partition
                .class_of(Term::Var(ex))
                .into_iter()
                .all(|member| match member {
                    Term::Const(_) => false,
                    Term::Var(v) if v == ex => true,
                    Term::Var(v) if v.scope() == rule_scope => false,
                    Term::Var(v) => {
                        !self.query.is_answer_var(v)
                            && !self
                                .query
                                .atoms()
                                .iter()
                                .enumerate()
                                .any(|(i, atom)| !piece.contains(&i) && atom.contains_var(v))
                    }
                })
        })
    }
}

#[cfg(test)]
#[path = "tests/piece.rs"]
mod tests;
