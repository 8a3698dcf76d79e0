//! Bit-level building blocks for succinct data structures.
//!
//! - [`packed_array`]: [`BitPackedArray`], a dense array of fixed-width unsigned
//!   fields packed edge-to-edge into `u64` words, over owned or borrowed storage.
//! - [`popcount`]: [`popcount_swar`], a branch-free population count.
//! - [`popcount_table`]: [`PopcountTable`], precomputed popcounts of every
//!   pattern of a given width, for O(1) sub-block rank.
//! - [`config`]: [`PopcountTableConfig`], validated table construction settings.
//! - [`dump`]: textual renderings of the above for inspection tools.
//!
//! None of these types synchronize internally. Shared references allow
//! concurrent reads; writes require exclusive access.

pub mod config;
pub mod dump;
pub mod packed_array;
pub mod popcount;
pub mod popcount_table;


pub use config::PopcountTableConfig;
pub use packed_array::{BitPackedArray, WORD_BITS, word_count};
pub use popcount::popcount_swar;
pub use popcount_table::{MAX_PATTERN_WIDTH, PopcountTable};
