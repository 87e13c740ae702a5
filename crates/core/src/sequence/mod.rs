//! Reference number sequence generation.
//!
//! A `ReferenceSequence` is an explicit, owned counter. Each renumber run
//! creates its own sequence; sequences are never shared across runs, and
//! there is no global registry of generators.

use serde::{Deserialize, Serialize};

/// First number handed out when the caller passes 0.
pub const DEFAULT_FIRST_NUMBER: u64 = 1;

/// Zero-padding width used when the caller passes 0.
pub const DEFAULT_PADDING: usize = 8;

/// Largest value a sequence may reach, including the position recorded
/// after the final assignment. Matches the range of the persisted
/// `BIGINT` counter column.
pub const MAX_SEQUENCE_VALUE: u64 = i64::MAX.unsigned_abs();

/// Widest accepted zero-padding for a reference.
pub const MAX_PADDING: usize = 64;

/// A monotonic generator of zero-padded reference numbers.
///
/// Each call to [`ReferenceSequence::next_reference`] formats the current
/// value and advances the counter by exactly one. There is a single writer
/// per sequence, so no synchronization is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSequence {
    next_value: u64,
    padding: usize,
}

impl ReferenceSequence {
    /// Creates a sequence starting at `first_number` with the given padding.
    ///
    /// A zero `first_number` falls back to [`DEFAULT_FIRST_NUMBER`]; a zero
    /// `padding` falls back to [`DEFAULT_PADDING`].
    #[must_use]
    pub fn new(first_number: u64, padding: usize) -> Self {
        Self {
            next_value: if first_number == 0 {
                DEFAULT_FIRST_NUMBER
            } else {
                first_number
            },
            padding: if padding == 0 { DEFAULT_PADDING } else { padding },
        }
    }

    /// Returns the next formatted reference and advances the counter.
    ///
    /// The counter saturates at `u64::MAX` instead of wrapping; planning
    /// rejects start values that could reach [`MAX_SEQUENCE_VALUE`], so a
    /// run never observes the saturation point.
    pub fn next_reference(&mut self) -> String {
        let value = self.next_value;
        self.next_value = self.next_value.saturating_add(1);
        format_reference(value, self.padding)
    }

    /// The value the next call to [`Self::next_reference`] will format.
    #[must_use]
    pub const fn next_value(&self) -> u64 {
        self.next_value
    }

    /// The zero-padding width of this sequence.
    #[must_use]
    pub const fn padding(&self) -> usize {
        self.padding
    }
}

/// Formats a sequence value left-filled with zeros to at least `padding` digits.
///
/// Values wider than `padding` are never truncated.
#[must_use]
pub fn format_reference(value: u64, padding: usize) -> String {
    format!("{value:0padding$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_reference_advances_by_one() {
        let mut seq = ReferenceSequence::new(1, 8);
        assert_eq!(seq.next_reference(), "00000001");
        assert_eq!(seq.next_reference(), "00000002");
        assert_eq!(seq.next_value(), 3);
    }

    #[test]
    fn test_counter_saturates_instead_of_wrapping() {
        let mut seq = ReferenceSequence::new(u64::MAX, 8);
        assert_eq!(seq.next_reference(), u64::MAX.to_string());
        // Saturated, not wrapped back to zero.
        assert_eq!(seq.next_value(), u64::MAX);
    }

    #[test]
    fn test_zero_inputs_fall_back_to_defaults() {
        let mut seq = ReferenceSequence::new(0, 0);
        assert_eq!(seq.padding(), DEFAULT_PADDING);
        assert_eq!(seq.next_reference(), "00000001");
    }

    #[test]
    fn test_custom_start_and_padding() {
        let mut seq = ReferenceSequence::new(42, 4);
        assert_eq!(seq.next_reference(), "0042");
        assert_eq!(seq.next_reference(), "0043");
    }

    #[rstest::rstest]
    #[case(1, 8, "00000001")]
    #[case(1, 1, "1")]
    #[case(99, 4, "0099")]
    // Values wider than the padding are never truncated.
    #[case(123_456, 4, "123456")]
    fn test_format_reference(#[case] value: u64, #[case] padding: usize, #[case] expected: &str) {
        assert_eq!(format_reference(value, padding), expected);
    }

    #[test]
    fn test_references_are_unique_within_a_run() {
        let mut seq = ReferenceSequence::new(1, 3);
        let refs: Vec<String> = (0..2000).map(|_| seq.next_reference()).collect();
        let mut deduped = refs.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), refs.len());
    }
}
