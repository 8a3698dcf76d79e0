//! A dense array of fixed-width unsigned fields packed into `u64` words.

use std::fmt;

use succinct_common::{Result, error::Error, verify_arg, verify_buffer};

/// Number of bits in a single storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Returns the number of `u64` words needed to hold `capacity` fields of
/// `field_width` bits each, or `None` if the total bit count overflows `usize`.
///
/// This is the minimum length of a buffer passed to [`BitPackedArray::over`].
#[inline]
pub fn word_count(field_width: usize, capacity: usize) -> Option<usize> {
    field_width
        .checked_mul(capacity)
        .map(|bits| bits.div_ceil(WORD_BITS))
}

/// Returns a mask with the lowest `bits` bits set.
#[inline]
const fn low_mask(bits: usize) -> u64 {
    if bits >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Allocates `num_words` zeroed words, reporting allocation failure as an
/// invalid capacity instead of aborting.
fn allocate_zeroed(num_words: usize) -> Result<Box<[u64]>> {
    let mut words = Vec::new();
    words.try_reserve_exact(num_words).map_err(|e| {
        Error::invalid_arg(
            "capacity",
            format!("cannot allocate {num_words} words: {e}"),
        )
    })?;
    words.resize(num_words, 0u64);
    Ok(words.into_boxed_slice())
}

/// Backing words of a [`BitPackedArray`].
enum WordStorage<'a> {
    /// Allocated by the array and released when it is dropped.
    Owned(Box<[u64]>),
    /// Supplied by the caller, who keeps ownership of the buffer.
    Borrowed(&'a mut [u64]),
}

impl WordStorage<'_> {
    #[inline]
    fn as_slice(&self) -> &[u64] {
        match self {
            WordStorage::Owned(words) => &words[..],
            WordStorage::Borrowed(words) => &words[..],
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u64] {
        match self {
            WordStorage::Owned(words) => &mut words[..],
            WordStorage::Borrowed(words) => &mut words[..],
        }
    }
}

/// Placement of a single field inside the word sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldSpan {
    /// The field lies entirely in `word`, with its least significant bit
    /// `shift` bits above the least significant bit of the word.
    Single { word: usize, shift: usize },
    /// The field starts in the low end of `word` and continues with its `low`
    /// least significant bits at the high end of `word + 1`.
    Split { word: usize, low: usize },
}

/// A fixed-capacity array of `field_width`-bit unsigned integers packed
/// edge-to-edge into `u64` words.
///
/// # Storage Format
///
/// Fields are laid out as a single bit-stream, most significant bit first:
/// - Element `i` occupies bits `[i * field_width, (i + 1) * field_width)` of the stream.
/// - Stream bit 0 is the MSB of word 0, stream bit 63 is the LSB of word 0,
///   stream bit 64 is the MSB of word 1, and so on.
/// - Within a field, the value's most significant bit comes first.
///
/// There is no padding between fields. A field may straddle two adjacent words.
/// The array addresses exactly `ceil(field_width * capacity / 64)` words; when the
/// total bit count is not a multiple of 64 the final word is only partially used.
///
/// # Ownership
///
/// The words are either allocated and owned by the array ([`BitPackedArray::new`])
/// or borrowed from the caller ([`BitPackedArray::over`]). Dropping the array
/// releases owned words only; a borrowed buffer is left intact and can be
/// inspected by the caller afterwards.
///
/// # Error Model
///
/// Accessors never panic on bad indices. Reads outside `[0, capacity)` return `0`
/// (use [`BitPackedArray::try_get`] to tell that apart from a stored zero), and
/// writes outside the range return `false` without touching storage.
pub struct BitPackedArray<'a> {
    field_width: usize,
    capacity: usize,
    num_words: usize,
    value_mask: u64,
    storage: WordStorage<'a>,
}

impl BitPackedArray<'static> {
    /// Creates an array of `capacity` fields of `field_width` bits, backed by
    /// newly allocated, zero-filled storage.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if `field_width` is not in `1..=64`, if
    /// `field_width * capacity` overflows the addressable bit range, or if the
    /// words cannot be allocated.
    pub fn new(field_width: usize, capacity: usize) -> Result<BitPackedArray<'static>> {
        let num_words = Self::checked_word_count(field_width, capacity)?;
        log::debug!(
            "allocating packed array: field_width={field_width}, capacity={capacity}, words={num_words}"
        );
        Ok(BitPackedArray {
            field_width,
            capacity,
            num_words,
            value_mask: low_mask(field_width),
            storage: WordStorage::Owned(allocate_zeroed(num_words)?),
        })
    }

    /// Creates an owned array of width `field_width` holding `values` at indices
    /// `0..values.len()`.
    ///
    /// Values wider than `field_width` are truncated the same way [`write`](Self::write)
    /// truncates them.
    pub fn from_values(field_width: usize, values: &[u64]) -> Result<BitPackedArray<'static>> {
        let mut array = BitPackedArray::new(field_width, values.len())?;
        for (index, &value) in values.iter().enumerate() {
            array.write(index, value);
        }
        Ok(array)
    }
}

impl<'a> BitPackedArray<'a> {
    /// Wraps a caller-supplied word buffer as an array of `capacity` fields of
    /// `field_width` bits.
    ///
    /// The buffer is used in place: it is neither copied nor cleared, so existing
    /// contents are visible through [`get`](Self::get). Only the first
    /// [`word_count`]`(field_width, capacity)` words are ever read or written;
    /// any trailing words are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `field_width` is not in `1..=64`, if the total bit count
    /// overflows, or if `words` is shorter than the required word count.
    pub fn over(
        field_width: usize,
        capacity: usize,
        words: &'a mut [u64],
    ) -> Result<BitPackedArray<'a>> {
        let num_words = Self::checked_word_count(field_width, capacity)?;
        verify_buffer!(words, num_words);
        log::debug!(
            "wrapping external words: field_width={field_width}, capacity={capacity}, \
             words={num_words}, provided={}",
            words.len()
        );
        Ok(BitPackedArray {
            field_width,
            capacity,
            num_words,
            value_mask: low_mask(field_width),
            storage: WordStorage::Borrowed(words),
        })
    }

    /// Returns the value stored at `index`, or `0` if `index >= capacity`.
    #[inline]
    pub fn get(&self, index: usize) -> u64 {
        self.try_get(index).unwrap_or(0)
    }

    /// Returns the value stored at `index`, or `None` if `index >= capacity`.
    #[inline]
    pub fn try_get(&self, index: usize) -> Option<u64> {
        if index >= self.capacity {
            return None;
        }
        let words = self.storage.as_slice();
        let value = match self.span(index) {
            FieldSpan::Single { word, shift } => (words[word] >> shift) & self.value_mask,
            FieldSpan::Split { word, low } => {
                let high = self.field_width - low;
                let head = (words[word] & low_mask(high)) << low;
                let tail = words[word + 1] >> (WORD_BITS - low);
                head | tail
            }
        };
        Some(value)
    }

    /// Stores `value` at `index`.
    ///
    /// Only the low `field_width` bits of `value` are kept. Neighboring fields are
    /// not affected.
    ///
    /// Returns `false`, leaving the storage unchanged, if `index >= capacity`.
    #[inline]
    pub fn write(&mut self, index: usize, value: u64) -> bool {
        if index >= self.capacity {
            return false;
        }
        let value = value & self.value_mask;
        let span = self.span(index);
        let field_width = self.field_width;
        let value_mask = self.value_mask;
        let words = self.storage.as_mut_slice();
        match span {
            FieldSpan::Single { word, shift } => {
                let mask = value_mask << shift;
                words[word] = (words[word] & !mask) | (value << shift);
            }
            FieldSpan::Split { word, low } => {
                let high = field_width - low;
                words[word] = (words[word] & !low_mask(high)) | (value >> low);
                let tail_shift = WORD_BITS - low;
                words[word + 1] = (words[word + 1] & (u64::MAX >> low)) | (value << tail_shift);
            }
        }
        true
    }

    /// Sets every field to zero.
    pub fn clear(&mut self) {
        let num_words = self.num_words;
        self.storage.as_mut_slice()[..num_words].fill(0);
    }

    /// Returns an iterator over all `capacity` values in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        (0..self.capacity).map(move |index| self.get(index))
    }

    /// Returns the number of bits per field.
    #[inline]
    pub fn field_width(&self) -> usize {
        self.field_width
    }

    /// Returns the number of fields.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Same as [`capacity`](Self::capacity).
    #[inline]
    pub fn len(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns the number of words addressed by the array.
    #[inline]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Returns the addressed words in their raw MSB-first layout.
    ///
    /// For borrowed storage this is a prefix of the caller's buffer.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.storage.as_slice()[..self.num_words]
    }

    /// Returns `true` if the words belong to the caller rather than the array.
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, WordStorage::Borrowed(_))
    }

    /// Returns the size of the heap allocation owned by this array, in bytes.
    ///
    /// Borrowed storage is not counted.
    pub fn heap_size_bytes(&self) -> usize {
        match &self.storage {
            WordStorage::Owned(words) => words.len() * std::mem::size_of::<u64>(),
            WordStorage::Borrowed(_) => 0,
        }
    }

    /// Copies the addressed words into a new owned array, releasing the borrow.
    pub fn into_owned(self) -> BitPackedArray<'static> {
        let storage = match self.storage {
            WordStorage::Owned(words) => WordStorage::Owned(words),
            WordStorage::Borrowed(words) => WordStorage::Owned(words[..self.num_words].into()),
        };
        BitPackedArray {
            field_width: self.field_width,
            capacity: self.capacity,
            num_words: self.num_words,
            value_mask: self.value_mask,
            storage,
        }
    }

    fn checked_word_count(field_width: usize, capacity: usize) -> Result<usize> {
        verify_arg!(field_width, (1..=WORD_BITS).contains(&field_width));
        word_count(field_width, capacity).ok_or_else(|| {
            Error::invalid_arg(
                "capacity",
                format!("{capacity} fields of {field_width} bits overflow the bit range"),
            )
        })
    }

    /// Locates the field at `index`, which must be below `capacity`.
    #[inline]
    fn span(&self, index: usize) -> FieldSpan {
        let start = index * self.field_width;
        let word = start / WORD_BITS;
        let end = start % WORD_BITS + self.field_width;
        if end <= WORD_BITS {
            FieldSpan::Single {
                word,
                shift: WORD_BITS - end,
            }
        } else {
            FieldSpan::Split {
                word,
                low: end - WORD_BITS,
            }
        }
    }
}

impl fmt::Debug for BitPackedArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitPackedArray")
            .field("field_width", &self.field_width)
            .field("capacity", &self.capacity)
            .field("num_words", &self.num_words)
            .field("borrowed", &self.is_borrowed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(7, 64), Some(7));
        assert_eq!(word_count(7, 10), Some(2));
        assert_eq!(word_count(64, 3), Some(3));
        assert_eq!(word_count(1, 0), Some(0));
        assert_eq!(word_count(1, 65), Some(2));
        assert_eq!(word_count(2, usize::MAX), None);
    }

    #[test]
    fn test_allocate_zeroed() {
        assert!(allocate_zeroed(0).unwrap().is_empty());
        assert_eq!(&*allocate_zeroed(3).unwrap(), &[0, 0, 0]);
        assert!(allocate_zeroed(usize::MAX).is_err());
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(1), 1);
        assert_eq!(low_mask(7), 0x7f);
        assert_eq!(low_mask(63), u64::MAX >> 1);
        assert_eq!(low_mask(64), u64::MAX);
    }

    #[test]
    fn test_span_placement() {
        let array = BitPackedArray::new(7, 64).unwrap();
        assert_eq!(array.span(0), FieldSpan::Single { word: 0, shift: 57 });
        assert_eq!(array.span(8), FieldSpan::Single { word: 0, shift: 1 });
        // Bits 63..70: one bit in word 0, six in word 1.
        assert_eq!(array.span(9), FieldSpan::Split { word: 0, low: 6 });
        assert_eq!(array.span(10), FieldSpan::Single { word: 1, shift: 51 });

        let array = BitPackedArray::new(16, 8).unwrap();
        // Ends exactly on the word boundary.
        assert_eq!(array.span(3), FieldSpan::Single { word: 0, shift: 0 });
        assert_eq!(array.span(4), FieldSpan::Single { word: 1, shift: 48 });

        let array = BitPackedArray::new(64, 2).unwrap();
        assert_eq!(array.span(1), FieldSpan::Single { word: 1, shift: 0 });
    }

    #[test]
    fn test_msb_first_layout() {
        let mut array = BitPackedArray::new(4, 17).unwrap();
        assert!(array.write(0, 0xa));
        assert!(array.write(15, 0x5));
        assert!(array.write(16, 0xf));
        assert_eq!(array.words(), &[0xa000_0000_0000_0005, 0xf000_0000_0000_0000]);
    }

    #[test]
    fn test_debug_omits_words() {
        let array = BitPackedArray::new(3, 5).unwrap();
        let text = format!("{array:?}");
        assert_eq!(
            text,
            "BitPackedArray { field_width: 3, capacity: 5, num_words: 1, borrowed: false }"
        );
    }
}
