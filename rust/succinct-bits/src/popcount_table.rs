//! Precomputed population counts of every fixed-width bit pattern.

use std::fmt;

use succinct_common::{Result, error::Error, verify_arg};

use crate::{
    config::PopcountTableConfig,
    packed_array::{BitPackedArray, word_count},
    popcount::popcount_swar,
};

/// Largest supported pattern width.
pub const MAX_PATTERN_WIDTH: usize = 32;

/// Lookup table mapping each `pattern_width`-bit pattern to its number of set
/// bits.
///
/// The counts are stored in a [`BitPackedArray`] of width `pattern_width` and
/// capacity `2^pattern_width` (a `w`-bit pattern has at most `w` set bits, which
/// always fits in `w` bits). All entries are computed at construction; the table
/// is read-only afterwards, so a built table can be shared across threads.
///
/// # Examples
///
/// ```
/// use succinct_bits::PopcountTable;
///
/// let table = PopcountTable::new(3).unwrap();
/// assert_eq!(table.rank(0b000), 0);
/// assert_eq!(table.rank(0b101), 2);
/// assert_eq!(table.rank(0b111), 3);
/// ```
pub struct PopcountTable<'a> {
    pattern_width: usize,
    table: BitPackedArray<'a>,
}

impl PopcountTable<'static> {
    /// Builds a table for `pattern_width`-bit patterns in newly allocated storage.
    ///
    /// The table takes `pattern_width * 2^pattern_width` bits: 256 bytes at width
    /// 8, 48 MiB at width 24 and 16 GiB at [`MAX_PATTERN_WIDTH`]. Use
    /// [`with_config`](Self::with_config) to cap the width at something smaller.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if `pattern_width` is not in
    /// `1..=MAX_PATTERN_WIDTH`, or if the table cannot be allocated.
    pub fn new(pattern_width: usize) -> Result<PopcountTable<'static>> {
        let capacity = Self::checked_capacity(pattern_width)?;
        let table = BitPackedArray::new(pattern_width, capacity)?;
        Ok(PopcountTable::build(pattern_width, table))
    }

    /// Builds a table as described by `config`, after validating it.
    pub fn with_config(config: &PopcountTableConfig) -> Result<PopcountTable<'static>> {
        config.validate()?;
        PopcountTable::new(config.pattern_width)
    }
}

impl<'a> PopcountTable<'a> {
    /// Builds a table for `pattern_width`-bit patterns inside the caller's `words`.
    ///
    /// Every entry is recomputed, whatever the buffer held before. The buffer must
    /// hold at least [`PopcountTable::required_words`]`(pattern_width)` words and
    /// keeps the computed counts after the table is dropped.
    pub fn over(pattern_width: usize, words: &'a mut [u64]) -> Result<PopcountTable<'a>> {
        let capacity = Self::checked_capacity(pattern_width)?;
        let table = BitPackedArray::over(pattern_width, capacity, words)?;
        Ok(PopcountTable::build(pattern_width, table))
    }

    /// Returns the number of words a table of `pattern_width` occupies, or `None`
    /// if the width is unsupported.
    pub fn required_words(pattern_width: usize) -> Option<usize> {
        if !(1..=MAX_PATTERN_WIDTH).contains(&pattern_width) {
            return None;
        }
        let capacity = 1usize.checked_shl(pattern_width as u32)?;
        word_count(pattern_width, capacity)
    }

    /// Returns the number of set bits in `pattern`.
    ///
    /// Patterns that do not fit in `pattern_width` bits yield `0`.
    #[inline]
    pub fn rank(&self, pattern: u64) -> u64 {
        usize::try_from(pattern).map_or(0, |index| self.table.get(index))
    }

    /// Returns the width of the indexed patterns.
    #[inline]
    pub fn pattern_width(&self) -> usize {
        self.pattern_width
    }

    /// Returns the number of entries, `2^pattern_width`.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the packed counts.
    #[inline]
    pub fn as_packed_array(&self) -> &BitPackedArray<'a> {
        &self.table
    }

    fn build(pattern_width: usize, mut table: BitPackedArray<'a>) -> PopcountTable<'a> {
        log::debug!(
            "building popcount table: pattern_width={pattern_width}, entries={}, words={}",
            table.capacity(),
            table.num_words()
        );
        for pattern in 0..table.capacity() {
            let count = popcount_swar(pattern as u64);
            let stored = table.write(pattern, u64::from(count));
            debug_assert!(stored);
        }
        PopcountTable {
            pattern_width,
            table,
        }
    }

    fn checked_capacity(pattern_width: usize) -> Result<usize> {
        verify_arg!(
            pattern_width,
            (1..=MAX_PATTERN_WIDTH).contains(&pattern_width)
        );
        1usize.checked_shl(pattern_width as u32).ok_or_else(|| {
            Error::invalid_arg(
                "pattern_width",
                format!("2^{pattern_width} entries exceed the address space"),
            )
        })
    }
}

impl fmt::Debug for PopcountTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopcountTable")
            .field("pattern_width", &self.pattern_width)
            .field("table", &self.table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_bit_patterns() {
        let table = PopcountTable::new(3).unwrap();
        assert_eq!(table.pattern_width(), 3);
        assert_eq!(table.len(), 8);
        assert_eq!(table.rank(0), 0);
        assert_eq!(table.rank(4), 1);
        assert_eq!(table.rank(5), 2);
        assert_eq!(table.rank(7), 3);
    }

    #[test]
    fn test_required_words() {
        assert_eq!(PopcountTable::required_words(0), None);
        assert_eq!(PopcountTable::required_words(1), Some(1));
        // 8 entries of 3 bits.
        assert_eq!(PopcountTable::required_words(3), Some(1));
        // 256 entries of 8 bits.
        assert_eq!(PopcountTable::required_words(8), Some(32));
        assert_eq!(PopcountTable::required_words(33), None);
    }

    #[test]
    fn test_required_words_at_large_widths() {
        // 48 MiB.
        assert_eq!(PopcountTable::required_words(24), Some(6 << 20));
        // 16 GiB.
        assert_eq!(PopcountTable::required_words(32), Some(1 << 31));
        assert_eq!(
            PopcountTable::required_words(MAX_PATTERN_WIDTH).map(|words| words * 8),
            Some(16 << 30)
        );
    }

    #[test]
    fn test_rejects_unsupported_widths() {
        assert!(PopcountTable::new(0).is_err());
        assert!(PopcountTable::new(MAX_PATTERN_WIDTH + 1).is_err());
        let mut words = [0u64; 4];
        assert!(PopcountTable::over(0, &mut words).is_err());
    }
}
