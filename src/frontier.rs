//! Frontier instantiations and the predicates comparing them.
//!
//! A frontier instantiation records, for each frontier variable of one rule
//! head (in frontier order), the constant a unifier forces on it, or `None`
//! when the unifier leaves it unspecified.

use crate::partition::TermPartition;
use crate::symbol::Symbol;
use crate::term::{Term, Variable};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FrontierInstantiation(SmallVec<[Option<Symbol>; 4]>);

impl FrontierInstantiation {
    pub fn new(entries: impl IntoIterator<Item = Option<Symbol>>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Read the instantiation of `frontier` off a partition: a position is
    /// specified when its variable's representative is a constant.
    pub fn under(partition: &TermPartition, frontier: &[Variable]) -> Self {
        Self(
            frontier
                .iter()
                .map(|v| partition.representative(Term::Var(*v)).as_const())
                .collect(),
        )
    }

    /// Every position unspecified.
    pub fn unspecified(len: usize) -> Self {
        Self(smallvec::smallvec![None; len])
    }

    pub fn entries(&self) -> &[Option<Symbol>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.0.get(position).copied().flatten()
    }

    /// Number of specified positions.
    pub fn specified(&self) -> usize {
        self.0.iter().filter(|e| e.is_some()).count()
    }

    /// Every position is a constant.
    pub fn is_ground(&self) -> bool {
        self.0.iter().all(|e| e.is_some())
    }
}

/// Two instantiations of the same frontier can hold at once: at every
/// position one side is unspecified or both name the same constant.
///
/// Instantiations of different lengths are never compatible.
pub fn is_compatible(a: &FrontierInstantiation, b: &FrontierInstantiation) -> bool {
    a.len() == b.len()
        && a.0.iter().zip(b.0.iter()).all(|pair| match pair {
            (Some(x), Some(y)) => x == y,
            _ => true,
        })
}

/// Every constant `general` specifies, `specific` specifies too, at the same
/// position. Unspecified positions of `general` impose nothing.
pub fn is_more_general_than(
    general: &FrontierInstantiation,
    specific: &FrontierInstantiation,
) -> bool {
    general.len() == specific.len()
        && general
            .0
            .iter()
            .zip(specific.0.iter())
            .all(|(g, s)| g.is_none() || g == s)
}

#[cfg(test)]
#[path = "tests/frontier.rs"]
mod tests;
