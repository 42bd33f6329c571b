use crate::rule::RuleId;
use crate::symbol::{Symbol, SymbolStore};
use smallvec::SmallVec;

/// Where a variable lives.
///
/// Rule variables and renamed query variables get their own scopes, so a
/// variable written by the caller can never be captured by a rule or by an
/// earlier renaming of the same query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// As written in a query by the caller.
    Query,
    /// Produced by renaming apart; one generation per renamed query.
    Fresh(u32),
    /// Owned by a rule.
    Rule(RuleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: Symbol,
    scope: Scope,
}

impl Variable {
    /// A query variable.
    pub fn new(name: Symbol) -> Self {
        Self {
            name,
            scope: Scope::Query,
        }
    }

    pub fn name(self) -> Symbol {
        self.name
    }

    pub fn scope(self) -> Scope {
        self.scope
    }

    /// The same name, moved into another scope.
    pub fn in_scope(self, scope: Scope) -> Self {
        Self {
            name: self.name,
            scope,
        }
    }
}

/// A term is either a constant or a variable.
///
/// Constants order before variables, so the minimum of any class of terms is
/// its constant when it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Const(Symbol),
    Var(Variable),
}

impl Term {
    pub fn as_var(self) -> Option<Variable> {
        match self {
            Term::Var(v) => Some(v),
            Term::Const(_) => None,
        }
    }

    pub fn as_const(self) -> Option<Symbol> {
        match self {
            Term::Const(c) => Some(c),
            Term::Var(_) => None,
        }
    }

    pub fn is_const(self) -> bool {
        matches!(self, Term::Const(_))
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Var(v)
    }
}

/// A predicate applied to an ordered tuple of terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    predicate: Symbol,
    args: SmallVec<[Term; 4]>,
}

impl Atom {
    pub fn new(predicate: Symbol, args: impl IntoIterator<Item = Term>) -> Self {
        Self {
            predicate,
            args: args.into_iter().collect(),
        }
    }

    pub fn predicate(&self) -> Symbol {
        self.predicate
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Same predicate and arity.
    pub fn same_signature(&self, other: &Atom) -> bool {
        self.predicate == other.predicate && self.args.len() == other.args.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.args.iter().filter_map(|t| t.as_var())
    }

    pub fn contains_var(&self, var: Variable) -> bool {
        self.variables().any(|v| v == var)
    }

    /// Rebuild the atom with every variable passed through `f`.
    pub fn map_vars(&self, mut f: impl FnMut(Variable) -> Variable) -> Atom {
        Atom {
            predicate: self.predicate,
            args: self
                .args
                .iter()
                .map(|t| match *t {
                    Term::Var(v) => Term::Var(f(v)),
                    c @ Term::Const(_) => c,
                })
                .collect(),
        }
    }
}

/// Supply of fresh variable generations for renaming queries apart.
///
/// Every call to `next_generation` returns a scope no earlier call returned.
#[derive(Debug, Clone, Default)]
pub struct FreshVariables {
    next: u32,
}

impl FreshVariables {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Start the supply at `start` (for callers that already hold fresh
    /// variables from another supply).
    pub fn starting_at(start: u32) -> Self {
        Self { next: start }
    }

    pub fn next_generation(&mut self) -> Scope {
        let generation = self.next;
        self.next += 1;
        Scope::Fresh(generation)
    }

    /// Number of generations handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

pub fn format_term(term: Term, symbols: &SymbolStore) -> Result<String, String> {
    let resolve = |s: Symbol| {
        symbols
            .resolve(s)
            .ok_or_else(|| format!("Unknown symbol {:?}", s))
    };
    match term {
        Term::Const(c) => resolve(c).map(str::to_owned),
        Term::Var(v) => {
            let name = resolve(v.name())?;
            Ok(match v.scope() {
                Scope::Query => format!("?{}", name),
                Scope::Fresh(g) => format!("?{}#{}", name, g),
                Scope::Rule(r) => format!("?{}@r{}", name, r.raw()),
            })
        }
    }
}

pub fn format_atom(atom: &Atom, symbols: &SymbolStore) -> Result<String, String> {
    let predicate = symbols
        .resolve(atom.predicate())
        .ok_or_else(|| format!("Unknown predicate {:?}", atom.predicate()))?;
    let mut out = String::from(predicate);
    out.push('(');
    for (i, arg) in atom.args().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format_term(*arg, symbols)?);
    }
    out.push(')');
    Ok(out)
}
