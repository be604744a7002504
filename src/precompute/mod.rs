//! Pairwise intervening-category count tables.
//!
//! For every ordered pair of token positions, the tables answer "how many
//! verbs / punctuation tokens / coordinators lie strictly between them" in
//! O(1), so arc-factored and second-order scorers never rescan the interior
//! of a candidate span. Counts are clamped to 14 and bit-packed with a
//! category tag into one byte per cell; 15 is reserved for the boundary
//! sentinel.

pub mod table;

pub use table::{CountCategory, PackedCount, PairwiseCounts};
