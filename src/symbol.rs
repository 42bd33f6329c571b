use lasso::{Key, Spur, ThreadedRodeo};
use std::cmp::Ordering;

/// An interned name: a predicate, a constant or a variable.
///
/// Symbols compare by their interning order, which gives terms and atoms a
/// stable total order within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(Spur);

impl Symbol {
    /// Raw index of the symbol in its store (for debugging/display).
    pub fn index(self) -> usize {
        self.0.into_usize()
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

/// Symbol store for interning predicate, constant and variable names.
///
/// Guarantees:
/// - Same string always produces same Symbol
/// - Different strings always produce different Symbols
/// - A Symbol can be resolved back to the original string
pub struct SymbolStore {
    rodeo: ThreadedRodeo,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Intern a name, returning the existing Symbol if it was seen before.
    pub fn intern(&self, name: &str) -> Symbol {
        Symbol(self.rodeo.get_or_intern(name))
    }

    /// Resolve a Symbol back to its name.
    /// Returns None if the Symbol was not created by this store.
    pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
        self.rodeo.try_resolve(&symbol.0)
    }

    /// Get the Symbol for a name if it exists, without interning.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.rodeo.get(name).map(Symbol)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/symbol.rs"]
mod tests;
