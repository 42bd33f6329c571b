//! Conjunctive queries and unions of conjunctive queries.
//!
//! A `ConjunctiveQuery` keeps its atoms sorted and deduplicated, so two
//! queries with the same atoms and answer tuple are equal and hash alike.
//! That structural identity is what the unifier cache keys on.

use crate::term::{Atom, FreshVariables, Variable};
use hashbrown::HashSet;
use smallvec::SmallVec;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConjunctiveQuery {
    atoms: Vec<Atom>,
    answer_vars: SmallVec<[Variable; 4]>,
}

impl ConjunctiveQuery {
    pub fn new(
        atoms: impl IntoIterator<Item = Atom>,
        answer_vars: impl IntoIterator<Item = Variable>,
    ) -> Self {
        let mut atoms: Vec<Atom> = atoms.into_iter().collect();
        atoms.sort();
        atoms.dedup();
        Self {
            atoms,
            answer_vars: answer_vars.into_iter().collect(),
        }
    }

    /// A query with no answer variables.
    pub fn boolean(atoms: impl IntoIterator<Item = Atom>) -> Self {
        Self::new(atoms, std::iter::empty())
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn answer_vars(&self) -> &[Variable] {
        &self.answer_vars
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn is_answer_var(&self, var: Variable) -> bool {
        self.answer_vars.contains(&var)
    }

    /// Every variable of the query, sorted, each once.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = self.atoms.iter().flat_map(|a| a.variables()).collect();
        vars.sort();
        vars.dedup();
        vars
    }

    /// Variables occurring in the atoms that are not answer variables.
    pub fn existential_vars(&self) -> Vec<Variable> {
        self.variables()
            .into_iter()
            .filter(|v| !self.is_answer_var(*v))
            .collect()
    }

    /// A copy whose existential variables are replaced by variables of a
    /// generation `fresh` has never handed out before. Answer variables are
    /// kept.
    pub fn rename_existentials(&self, fresh: &mut FreshVariables) -> ConjunctiveQuery {
        let scope = fresh.next_generation();
        let atoms = self.atoms.iter().map(|atom| {
            atom.map_vars(|v| {
                if self.is_answer_var(v) {
                    v
                } else {
                    v.in_scope(scope)
                }
            })
        });
        ConjunctiveQuery::new(atoms, self.answer_vars.iter().copied())
    }
}

/// An ordered union of conjunctive queries sharing one answer tuple.
///
/// Inserting a query that is already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct UnionOfConjunctiveQueries {
    queries: Vec<Arc<ConjunctiveQuery>>,
    index: HashSet<Arc<ConjunctiveQuery>>,
    answer_vars: SmallVec<[Variable; 4]>,
}

impl UnionOfConjunctiveQueries {
    pub fn new(answer_vars: impl IntoIterator<Item = Variable>) -> Self {
        Self {
            queries: Vec::new(),
            index: HashSet::new(),
            answer_vars: answer_vars.into_iter().collect(),
        }
    }

    pub fn from_queries(
        queries: impl IntoIterator<Item = Arc<ConjunctiveQuery>>,
        answer_vars: impl IntoIterator<Item = Variable>,
    ) -> Self {
        let mut ucq = Self::new(answer_vars);
        for cq in queries {
            ucq.insert(cq);
        }
        ucq
    }

    /// Add a query; returns false if it was already present.
    pub fn insert(&mut self, cq: Arc<ConjunctiveQuery>) -> bool {
        if !self.index.insert(cq.clone()) {
            return false;
        }
        self.queries.push(cq);
        true
    }

    /// Remove a query; returns false if it was absent.
    pub fn remove(&mut self, cq: &ConjunctiveQuery) -> bool {
        if !self.index.remove(cq) {
            return false;
        }
        self.queries.retain(|q| q.as_ref() != cq);
        true
    }

    pub fn contains(&self, cq: &ConjunctiveQuery) -> bool {
        self.index.contains(cq)
    }

    /// The queries of `self` that are not in `other`, in order.
    pub fn difference<'a>(
        &self,
        other: impl IntoIterator<Item = &'a ConjunctiveQuery>,
    ) -> UnionOfConjunctiveQueries {
        let removed: HashSet<&ConjunctiveQuery> = other.into_iter().collect();
        Self::from_queries(
            self.queries
                .iter()
                .filter(|q| !removed.contains(q.as_ref()))
                .cloned(),
            self.answer_vars.iter().copied(),
        )
    }

    pub fn answer_vars(&self) -> &[Variable] {
        &self.answer_vars
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ConjunctiveQuery>> + '_ {
        self.queries.iter()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Equality is on the answer tuple and the ordered query sequence.
impl PartialEq for UnionOfConjunctiveQueries {
    fn eq(&self, other: &Self) -> bool {
        self.answer_vars == other.answer_vars && self.queries == other.queries
    }
}

impl Eq for UnionOfConjunctiveQueries {}

impl std::hash::Hash for UnionOfConjunctiveQueries {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.answer_vars.hash(state);
        self.queries.hash(state);
    }
}

impl<'a> IntoIterator for &'a UnionOfConjunctiveQueries {
    type Item = &'a Arc<ConjunctiveQuery>;
    type IntoIter = std::slice::Iter<'a, Arc<ConjunctiveQuery>>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}

#[cfg(test)]
#[path = "tests/query.rs"]
mod tests;
