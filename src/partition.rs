use crate::term::Term;
use std::collections::BTreeMap;

/// A partition of terms into equivalence classes.
///
/// Representation: every non-representative member maps straight to its
/// class representative, which is the minimum member of the class. Terms
/// not in the map are singletons. Since constants order before variables,
/// a class containing a constant is represented by a constant, and a class
/// containing two distinct constants shows up as a constant key.
///
/// The representation is canonical: two partitions with the same classes
/// are equal and hash alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermPartition {
    parent: BTreeMap<Term, Term>,
}

impl TermPartition {
    pub fn new() -> Self {
        Self {
            parent: BTreeMap::new(),
        }
    }

    /// Build a partition by merging each pair.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Term, Term)>) -> Self {
        let mut partition = Self::new();
        for (a, b) in pairs {
            partition.union(a, b);
        }
        partition
    }

    pub fn representative(&self, term: Term) -> Term {
        self.parent.get(&term).copied().unwrap_or(term)
    }

    pub fn same_class(&self, a: Term, b: Term) -> bool {
        self.representative(a) == self.representative(b)
    }

    /// Merge the classes of `a` and `b`.
    pub fn union(&mut self, a: Term, b: Term) {
        let ra = self.representative(a);
        let rb = self.representative(b);
        if ra == rb {
            return;
        }
        let (keep, absorb) = if ra < rb { (ra, rb) } else { (rb, ra) };
        for rep in self.parent.values_mut() {
            if *rep == absorb {
                *rep = keep;
            }
        }
        self.parent.insert(absorb, keep);
    }

    /// Merge every class of `other` into `self`.
    pub fn join(&mut self, other: &TermPartition) {
        for (&member, &rep) in other.parent.iter() {
            self.union(member, rep);
        }
    }

    /// `self` joined with `other`, leaving both untouched.
    pub fn joined(&self, other: &TermPartition) -> TermPartition {
        let mut out = self.clone();
        out.join(other);
        out
    }

    /// False iff some class holds two distinct constants.
    pub fn is_consistent(&self) -> bool {
        !self.parent.keys().any(|t| t.is_const())
    }

    /// Every member of the class of `term`, representative first.
    pub fn class_of(&self, term: Term) -> Vec<Term> {
        let rep = self.representative(term);
        let mut class = vec![rep];
        class.extend(
            self.parent
                .iter()
                .filter(|(_, r)| **r == rep)
                .map(|(m, _)| *m),
        );
        class
    }

    /// The non-singleton classes, each representative first, ordered by
    /// representative.
    pub fn classes(&self) -> Vec<Vec<Term>> {
        let mut grouped: BTreeMap<Term, Vec<Term>> = BTreeMap::new();
        for (&member, &rep) in self.parent.iter() {
            grouped.entry(rep).or_insert_with(|| vec![rep]).push(member);
        }
        grouped.into_values().collect()
    }

    /// Terms that are not singletons.
    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        let mut reps: Vec<Term> = self.parent.values().copied().collect();
        reps.sort();
        reps.dedup();
        self.parent.keys().copied().chain(reps)
    }

    /// Every class of `self` lies inside one class of `coarser`.
    pub fn refines(&self, coarser: &TermPartition) -> bool {
        self.parent
            .iter()
            .all(|(&member, &rep)| coarser.same_class(member, rep))
    }

    /// True when every class is a singleton.
    pub fn is_trivial(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/partition.rs"]
mod tests;
