//! Common utilities for succinct-cmd

use succinct_bits::BitPackedArray;

/// Describes how many words back `array` and who owns them, e.g.
/// `"1 word, 8 bytes owned"` or `"3 words in caller storage"`.
pub fn describe_storage(array: &BitPackedArray<'_>) -> String {
    let words = array.num_words();
    let noun = if words == 1 { "word" } else { "words" };
    if array.is_borrowed() {
        format!("{words} {noun} in caller storage")
    } else {
        format!("{words} {noun}, {} bytes owned", array.heap_size_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_storage() {
        let array = BitPackedArray::new(7, 10).unwrap();
        assert_eq!(describe_storage(&array), "2 words, 16 bytes owned");

        let array = BitPackedArray::new(3, 8).unwrap();
        assert_eq!(describe_storage(&array), "1 word, 8 bytes owned");

        let mut words = [0u64; 4];
        let array = BitPackedArray::over(64, 3, &mut words).unwrap();
        assert_eq!(describe_storage(&array), "3 words in caller storage");
    }
}
