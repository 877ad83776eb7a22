//! IMSI parsing and contiguous identifier ranges.
//!
//! Subscriber identifiers are fixed-width decimal strings. They are held as
//! integers so ranges can be derived by offset, and rendered back zero-padded
//! to [`IMSI_WIDTH`] digits.
//!
//! # Rules
//!
//! - Exactly [`IMSI_WIDTH`] ASCII digits
//! - Leading zeros are significant for display only
//! - A range may not run past `999999999999999`

use std::fmt;
use std::str::FromStr;

use crate::error::IdentifierError;

/// Number of digits in a rendered IMSI.
pub const IMSI_WIDTH: usize = 15;

/// Largest identifier representable in [`IMSI_WIDTH`] digits.
const IMSI_MAX: u64 = 999_999_999_999_999;

/// A 15-digit subscriber identifier.
///
/// # Examples
///
/// ```
/// use subscriber_data::Imsi;
///
/// let imsi = Imsi::parse("001010000000001").expect("valid IMSI");
/// assert_eq!(imsi.as_u64(), 1_010_000_000_001);
/// assert_eq!(imsi.to_string(), "001010000000001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Imsi(u64);

impl Imsi {
    /// Parses a fixed-width numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidLength`] when the value is not
    /// [`IMSI_WIDTH`] characters long, or [`IdentifierError::NonNumeric`]
    /// when it contains anything other than ASCII digits.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let actual = value.chars().count();
        if actual != IMSI_WIDTH {
            return Err(IdentifierError::InvalidLength {
                value: value.to_owned(),
                expected: IMSI_WIDTH,
                actual,
            });
        }
        if !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(IdentifierError::NonNumeric {
                value: value.to_owned(),
            });
        }
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdentifierError::NonNumeric {
                value: value.to_owned(),
            })
    }

    /// Returns the numeric value of the identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the identifier `offset` places after this one, if it still
    /// fits in [`IMSI_WIDTH`] digits.
    #[must_use]
    pub fn checked_offset(self, offset: u64) -> Option<Self> {
        self.0
            .checked_add(offset)
            .filter(|value| *value <= IMSI_MAX)
            .map(Self)
    }
}

impl fmt::Display for Imsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = IMSI_WIDTH)
    }
}

impl FromStr for Imsi {
    type Err = IdentifierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// A contiguous run of identifiers starting at a base IMSI.
///
/// The whole range is validated on construction, so iterating it never
/// overflows.
///
/// # Examples
///
/// ```
/// use subscriber_data::ImsiRange;
///
/// let range = ImsiRange::parse("100100000000001", 3).expect("valid range");
/// let imsis: Vec<String> = range.iter().map(|imsi| imsi.to_string()).collect();
///
/// assert_eq!(
///     imsis,
///     ["100100000000001", "100100000000002", "100100000000003"]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImsiRange {
    first: Imsi,
    count: u64,
}

impl ImsiRange {
    /// Builds a range of `count` identifiers starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::RangeOverflow`] when the last identifier
    /// would exceed the 15-digit space.
    pub fn new(first: Imsi, count: u64) -> Result<Self, IdentifierError> {
        if let Some(last_offset) = count.checked_sub(1) {
            if first.checked_offset(last_offset).is_none() {
                return Err(IdentifierError::RangeOverflow {
                    base: first.to_string(),
                    count,
                });
            }
        }
        Ok(Self { first, count })
    }

    /// Parses the base identifier and builds the range.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the base is malformed or the range
    /// overflows.
    pub fn parse(base: &str, count: u64) -> Result<Self, IdentifierError> {
        Self::new(Imsi::parse(base)?, count)
    }

    /// Returns the first identifier of the range.
    #[must_use]
    pub const fn first(&self) -> Imsi {
        self.first
    }

    /// Returns the last identifier, or `None` for an empty range.
    #[must_use]
    pub fn last(&self) -> Option<Imsi> {
        self.count
            .checked_sub(1)
            .and_then(|offset| self.first.checked_offset(offset))
    }

    /// Returns the number of identifiers in the range.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.count
    }

    /// Returns `true` when the range holds no identifiers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates the identifiers in ascending order.
    #[must_use]
    pub const fn iter(&self) -> ImsiIter {
        ImsiIter {
            next: self.first.0,
            remaining: self.count,
        }
    }
}

impl IntoIterator for ImsiRange {
    type Item = Imsi;
    type IntoIter = ImsiIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &ImsiRange {
    type Item = Imsi;
    type IntoIter = ImsiIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the identifiers of an [`ImsiRange`].
#[derive(Debug, Clone)]
pub struct ImsiIter {
    next: u64,
    remaining: u64,
}

impl Iterator for ImsiIter {
    type Item = Imsi;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.checked_sub(1)?;
        let current = Imsi(self.next);
        // The range was bounds-checked on construction.
        self.next = self.next.saturating_add(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("100100000000001", 100_100_000_000_001)]
    #[case("001010000000001", 1_010_000_000_001)]
    #[case("000000000000000", 0)]
    #[case("999999999999999", IMSI_MAX)]
    fn parses_fixed_width_identifiers(#[case] input: &str, #[case] expected: u64) {
        let imsi = Imsi::parse(input).expect("valid IMSI");
        assert_eq!(imsi.as_u64(), expected);
        assert_eq!(imsi.to_string(), input);
    }

    #[rstest]
    #[case::too_short("12345", 5)]
    #[case::too_long("1001000000000012", 16)]
    #[case::empty("", 0)]
    fn rejects_wrong_width(#[case] input: &str, #[case] actual: usize) {
        assert_eq!(
            Imsi::parse(input),
            Err(IdentifierError::InvalidLength {
                value: input.to_owned(),
                expected: IMSI_WIDTH,
                actual,
            })
        );
    }

    #[rstest]
    #[case("10010000000000a")]
    #[case("+10100000000001")]
    #[case("1001 0000000001")]
    fn rejects_non_numeric(#[case] input: &str) {
        assert_eq!(
            Imsi::parse(input),
            Err(IdentifierError::NonNumeric {
                value: input.to_owned(),
            })
        );
    }

    #[test]
    fn offsets_keep_zero_padding() {
        let imsi = Imsi::parse("001010000000009").expect("valid IMSI");
        let next = imsi.checked_offset(1).expect("in range");
        assert_eq!(next.to_string(), "001010000000010");
    }

    #[test]
    fn offsets_past_the_maximum_are_rejected() {
        let imsi = Imsi::parse("999999999999998").expect("valid IMSI");
        assert!(imsi.checked_offset(1).is_some());
        assert!(imsi.checked_offset(2).is_none());
        assert!(imsi.checked_offset(u64::MAX).is_none());
    }

    #[test]
    fn range_iterates_in_order() {
        let range = ImsiRange::parse("100100000000001", 3).expect("valid range");
        let values: Vec<u64> = range.iter().map(Imsi::as_u64).collect();
        assert_eq!(
            values,
            [100_100_000_000_001, 100_100_000_000_002, 100_100_000_000_003]
        );
        assert_eq!(range.iter().size_hint(), (3, Some(3)));
    }

    #[test]
    fn empty_range_yields_nothing() {
        let range = ImsiRange::parse("100100000000001", 0).expect("valid range");
        assert!(range.is_empty());
        assert_eq!(range.last(), None);
        assert_eq!(range.iter().count(), 0);
    }

    #[test]
    fn single_range_holds_only_the_base() {
        let range = ImsiRange::parse("100100000000001", 1).expect("valid range");
        assert_eq!(range.last(), Some(range.first()));
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![range.first()]);
    }

    #[test]
    fn range_reaching_the_maximum_is_accepted() {
        let range = ImsiRange::parse("999999999999990", 10).expect("valid range");
        assert_eq!(
            range.last().map(|imsi| imsi.to_string()),
            Some("999999999999999".to_owned())
        );
    }

    #[test]
    fn range_past_the_maximum_is_rejected() {
        assert_eq!(
            ImsiRange::parse("999999999999990", 11),
            Err(IdentifierError::RangeOverflow {
                base: "999999999999990".to_owned(),
                count: 11,
            })
        );
    }
}
