/// Parallel generation of independent puzzles
pub mod batch;
/// Per-length bitset of words already placed
pub mod bitset;
/// Content-addressed on-disk storage of constraint indices
pub mod cache;
/// Constraint keys and the per-length constraint index
pub mod constraints;
/// Backtracking placement engine with abort and retry
pub mod executor;
/// Parallel construction of indices for every word length
pub mod indexing;
