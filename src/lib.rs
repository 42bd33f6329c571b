pub mod cache;
pub mod combination;
pub mod engine;
pub mod error;
pub mod extension;
pub mod frontier;
pub mod metrics;
pub mod partition;
pub mod piece;
pub mod query;
pub mod rule;
pub mod symbol;
pub mod term;
pub mod trace;

pub use combination::DisjunctivePieceUnifier;
pub use engine::DisjunctiveUnifier;
pub use piece::{MostGeneralUnifiers, PieceUnification, PieceUnifier};

#[cfg(test)]
pub(crate) mod test_utils;
