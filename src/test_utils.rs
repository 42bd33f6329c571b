use crate::partition::TermPartition;
use crate::piece::PieceUnifier;
use crate::query::{ConjunctiveQuery, UnionOfConjunctiveQueries};
use crate::rule::{Rule, RuleId};
use crate::symbol::SymbolStore;
use crate::term::{Atom, Scope, Term, Variable};
use std::sync::Arc;

pub(crate) fn setup() -> SymbolStore {
    SymbolStore::new()
}

pub(crate) fn var(symbols: &SymbolStore, name: &str) -> Variable {
    Variable::new(symbols.intern(name))
}

/// `?X` is a variable, anything else a constant.
pub(crate) fn term(symbols: &SymbolStore, text: &str) -> Term {
    match text.strip_prefix('?') {
        Some(name) => Term::Var(var(symbols, name)),
        None => Term::Const(symbols.intern(text)),
    }
}

pub(crate) fn atom(symbols: &SymbolStore, predicate: &str, args: &[&str]) -> Atom {
    Atom::new(
        symbols.intern(predicate),
        args.iter().map(|a| term(symbols, a)),
    )
}

pub(crate) fn cq(
    symbols: &SymbolStore,
    atoms: &[(&str, &[&str])],
    answers: &[&str],
) -> Arc<ConjunctiveQuery> {
    Arc::new(ConjunctiveQuery::new(
        atoms.iter().map(|(p, args)| atom(symbols, p, args)),
        answers.iter().map(|a| var(symbols, a)),
    ))
}

pub(crate) fn rule(
    symbols: &SymbolStore,
    id: u32,
    body: &[(&str, &[&str])],
    heads: &[&[(&str, &[&str])]],
) -> Arc<Rule> {
    let body = ConjunctiveQuery::boolean(body.iter().map(|(p, args)| atom(symbols, p, args)));
    let heads = heads.iter().map(|head| {
        ConjunctiveQuery::boolean(head.iter().map(|(p, args)| atom(symbols, p, args)))
    });
    Arc::new(Rule::new(RuleId(id), body, heads).unwrap())
}

pub(crate) fn ucq(
    symbols: &SymbolStore,
    queries: &[&Arc<ConjunctiveQuery>],
    answers: &[&str],
) -> UnionOfConjunctiveQueries {
    UnionOfConjunctiveQueries::from_queries(
        queries.iter().map(|q| (*q).clone()),
        answers.iter().map(|a| var(symbols, a)),
    )
}

/// A variable inside rule `id`'s scope, as `Rule::new` stores it.
pub(crate) fn rule_var(symbols: &SymbolStore, id: u32, name: &str) -> Term {
    Term::Var(var(symbols, name).in_scope(Scope::Rule(RuleId(id))))
}

/// A unifier of the whole of `query` against `head`, with the given classes.
pub(crate) fn unifier(
    rule: &Arc<Rule>,
    head: usize,
    query: &Arc<ConjunctiveQuery>,
    pairs: &[(Term, Term)],
) -> Arc<PieceUnifier> {
    Arc::new(PieceUnifier::new(
        rule.clone(),
        head,
        query.clone(),
        0..query.len(),
        TermPartition::from_pairs(pairs.iter().copied()),
    ))
}
