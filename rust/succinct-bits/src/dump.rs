//! Textual renderings of packed arrays and popcount tables for inspection.
//!
//! Everything here formats into a `String` (or any [`fmt::Write`] sink via the
//! `Display` wrappers); nothing prints. Callers decide where the text goes.

use std::fmt;

use crate::{
    packed_array::{BitPackedArray, WORD_BITS},
    popcount_table::PopcountTable,
};

/// Line framing an array dump.
pub const RULER: &str = "=========================================";

/// Number of fields shown per line of an array dump.
pub const FIELDS_PER_LINE: usize = 8;

/// How a popcount table is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpMode {
    /// One `bits[<index>] = <count>` line per entry.
    #[default]
    Counts,
    /// The raw packed storage, as rendered by [`PackedArrayDump`].
    Bits,
    /// One `bits[<pattern in binary>] = <count>` line per entry.
    Patterns,
}

/// Renders `word` as `label:` followed by its 64 bits, MSB first, in groups
/// of eight.
pub fn render_word(label: &str, word: u64) -> String {
    let bits = format!("{word:064b}");
    let groups = bits
        .as_bytes()
        .chunks(8)
        .map(|group| std::str::from_utf8(group).unwrap_or_default())
        .collect::<Vec<_>>();
    format!("{label}:{}", groups.join(" "))
}

/// Renders the storage of `array`, see [`PackedArrayDump`].
pub fn render_packed_array(array: &BitPackedArray<'_>) -> String {
    PackedArrayDump(array).to_string()
}

/// Renders `table` in the given mode, see [`PopcountTableDump`].
pub fn render_popcount_table(table: &PopcountTable<'_>, mode: DumpMode) -> String {
    PopcountTableDump { table, mode }.to_string()
}

/// Displays every addressed word of a packed array bit by bit.
///
/// The output starts and ends with [`RULER`]. Bits are printed MSB first; a
/// space follows each field, replaced by a newline after every
/// [`FIELDS_PER_LINE`] fields, and an apostrophe marks the end of each word.
/// Fields straddling two words are therefore split by an apostrophe. Unused
/// bits at the end of the last word are printed as well.
pub struct PackedArrayDump<'s, 'a>(pub &'s BitPackedArray<'a>);

impl fmt::Display for PackedArrayDump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field_width = self.0.field_width();
        let mut bit_count = 0;
        let mut field_count = 0;
        writeln!(f, "{RULER}")?;
        for &word in self.0.words() {
            for shift in (0..WORD_BITS).rev() {
                write!(f, "{}", (word >> shift) & 1)?;
                bit_count += 1;
                if bit_count == field_width {
                    bit_count = 0;
                    field_count += 1;
                    if field_count == FIELDS_PER_LINE {
                        field_count = 0;
                        writeln!(f)?;
                    } else {
                        write!(f, " ")?;
                    }
                }
            }
            write!(f, "'")?;
        }
        writeln!(f)?;
        writeln!(f, "{RULER}")
    }
}

/// Displays a popcount table according to a [`DumpMode`].
pub struct PopcountTableDump<'s, 'a> {
    pub table: &'s PopcountTable<'a>,
    pub mode: DumpMode,
}

impl fmt::Display for PopcountTableDump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.table.pattern_width();
        match self.mode {
            DumpMode::Counts => {
                for pattern in 0..self.table.len() as u64 {
                    writeln!(f, "bits[{pattern}] = {}", self.table.rank(pattern))?;
                }
                Ok(())
            }
            DumpMode::Bits => fmt::Display::fmt(&PackedArrayDump(self.table.as_packed_array()), f),
            DumpMode::Patterns => {
                for pattern in 0..self.table.len() as u64 {
                    writeln!(f, "bits[{pattern:0width$b}] = {}", self.table.rank(pattern))?;
                }
                Ok(())
            }
        }
    }
}
