//! Error types for rule construction, piece unification and rewriting rounds.

use crate::rule::RuleId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {rule} has no head")]
    NoHeads { rule: RuleId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    #[error("rule {rule} has {heads} heads, no head {head}")]
    NoSuchHead {
        rule: RuleId,
        head: usize,
        heads: usize,
    },
}

/// `finalize` was called before every head of the rule had a unifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("incomplete disjunctive combination for rule {rule}: unfilled heads {missing:?}")]
pub struct IncompleteCombination {
    pub rule: RuleId,
    pub missing: Vec<usize>,
}

/// The single-query unifier answered for a rule or head it was not asked
/// about.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("asked rule {rule} head {head}, got a unifier for rule {got_rule} head {got_head}")]
pub struct MisplacedUnifier {
    pub rule: RuleId,
    pub head: usize,
    pub got_rule: RuleId,
    pub got_head: usize,
}

/// Failure of one rewriting round.
#[derive(Error, Debug)]
pub enum EngineError<E: std::error::Error + 'static> {
    /// The single-query unifier failed; passed through unchanged.
    #[error(transparent)]
    Unifier(E),

    /// A combination reached finalization with heads still empty.
    #[error(transparent)]
    Incomplete(#[from] IncompleteCombination),

    /// The single-query unifier returned a unifier for another rule or head.
    #[error(transparent)]
    Misplaced(#[from] MisplacedUnifier),
}
