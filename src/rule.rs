//! Existential rules with possibly disjunctive heads.

use crate::error::RuleError;
use crate::query::ConjunctiveQuery;
use crate::term::{Scope, Variable};
use smallvec::SmallVec;
use std::fmt;

/// Identity of a rule. Two rules with the same id are the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

impl RuleId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// `body -> head_0 | head_1 | ...`
///
/// Every variable of the rule lives in `Scope::Rule(id)`. Rule heads are
/// stored as queries without answer variables; their variables are either
/// frontier variables (shared with the body) or existential.
#[derive(Debug, Clone)]
pub struct Rule {
    id: RuleId,
    body: ConjunctiveQuery,
    heads: Vec<ConjunctiveQuery>,
    frontiers: Vec<SmallVec<[Variable; 4]>>,
}

impl Rule {
    /// Build a rule, moving its variables into the rule's own scope.
    ///
    /// The frontier of each head is the set of variables it shares with the
    /// body, ordered by first occurrence in the head.
    pub fn new(
        id: RuleId,
        body: ConjunctiveQuery,
        heads: impl IntoIterator<Item = ConjunctiveQuery>,
    ) -> Result<Self, RuleError> {
        let scope = Scope::Rule(id);
        let rescope = |cq: &ConjunctiveQuery| {
            ConjunctiveQuery::boolean(cq.atoms().iter().map(|a| a.map_vars(|v| v.in_scope(scope))))
        };

        let body = rescope(&body);
        let heads: Vec<ConjunctiveQuery> = heads.into_iter().map(|h| rescope(&h)).collect();
        if heads.is_empty() {
            return Err(RuleError::NoHeads { rule: id });
        }

        let body_vars = body.variables();
        let frontiers = heads
            .iter()
            .map(|head| {
                let mut frontier: SmallVec<[Variable; 4]> = SmallVec::new();
                for var in head.atoms().iter().flat_map(|a| a.variables()) {
                    if body_vars.binary_search(&var).is_ok() && !frontier.contains(&var) {
                        frontier.push(var);
                    }
                }
                frontier
            })
            .collect();

        Ok(Self {
            id,
            body,
            heads,
            frontiers,
        })
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn body(&self) -> &ConjunctiveQuery {
        &self.body
    }

    pub fn heads(&self) -> &[ConjunctiveQuery] {
        &self.heads
    }

    pub fn head(&self, index: usize) -> Option<&ConjunctiveQuery> {
        self.heads.get(index)
    }

    pub fn head_count(&self) -> usize {
        self.heads.len()
    }

    pub fn is_disjunctive(&self) -> bool {
        self.heads.len() > 1
    }

    /// Frontier variables of the head at `index`, in head order.
    /// Empty for an out-of-range index.
    pub fn frontier(&self, index: usize) -> &[Variable] {
        self.frontiers.get(index).map(|f| f.as_slice()).unwrap_or(&[])
    }

    pub fn is_frontier(&self, index: usize, var: Variable) -> bool {
        self.frontier(index).contains(&var)
    }

    /// Head variables that are not frontier variables.
    pub fn existential_vars(&self, index: usize) -> Vec<Variable> {
        self.heads
            .get(index)
            .map(|head| {
                head.variables()
                    .into_iter()
                    .filter(|v| !self.is_frontier(index, *v))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Identity is the rule id.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rule {}

impl std::hash::Hash for Rule {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
#[path = "tests/rule.rs"]
mod tests;
