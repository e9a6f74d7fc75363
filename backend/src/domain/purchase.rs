//! Purchased item identifiers and the `items` list grammar.
//!
//! A purchase callback names the items it paid for as a comma-separated list
//! of decimal integers: `digits (',' digits)*`. Parsing is strict; the list
//! is either accepted whole or rejected with the first offending segment.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Catalogue item identifier.
///
/// Serialises as a bare integer so stored sessions hold `purchased: [3, 7]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons an `items` value fails the list grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemIdListError {
    /// The whole value was empty.
    #[error("items must not be empty")]
    Empty,
    /// Two commas in a row, or a leading or trailing comma.
    #[error("items segment {index} is empty")]
    EmptySegment { index: usize },
    /// A segment contains something other than ASCII digits.
    #[error("items segment {index} ('{segment}') must contain only digits")]
    NotDigits { index: usize, segment: String },
    /// A segment is all digits but does not fit in 64 bits.
    #[error("items segment {index} ('{segment}') exceeds the supported id range")]
    OutOfRange { index: usize, segment: String },
}

impl ItemIdListError {
    /// Stable code for structured error details.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty_items",
            Self::EmptySegment { .. } => "empty_item_segment",
            Self::NotDigits { .. } => "invalid_item_id",
            Self::OutOfRange { .. } => "item_id_out_of_range",
        }
    }

    /// Position of the offending segment, when there is one.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::EmptySegment { index }
            | Self::NotDigits { index, .. }
            | Self::OutOfRange { index, .. } => Some(*index),
        }
    }
}

/// Non-empty, ordered list of item identifiers taken from a callback.
///
/// Duplicates and order are preserved exactly as requested.
///
/// # Examples
/// ```
/// use purchase_recorder::domain::{ItemId, ItemIdList};
///
/// let items = ItemIdList::parse("3,7,3").expect("valid list");
/// assert_eq!(items.as_slice(), &[ItemId::new(3), ItemId::new(7), ItemId::new(3)]);
/// assert!(ItemIdList::parse("3,,7").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdList(Vec<ItemId>);

impl ItemIdList {
    /// Parse the wire form `digits (',' digits)*`.
    pub fn parse(raw: &str) -> Result<Self, ItemIdListError> {
        if raw.is_empty() {
            return Err(ItemIdListError::Empty);
        }
        raw.split(',')
            .enumerate()
            .map(|(index, segment)| parse_segment(index, segment))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Identifiers in request order.
    #[must_use]
    pub fn as_slice(&self) -> &[ItemId] {
        &self.0
    }

    /// Iterate identifiers in request order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0.iter().copied()
    }

    /// Number of identifiers, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; the grammar requires at least one identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_segment(index: usize, segment: &str) -> Result<ItemId, ItemIdListError> {
    if segment.is_empty() {
        return Err(ItemIdListError::EmptySegment { index });
    }
    // `u64::from_str` accepts a leading '+', so check the digits first.
    if !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ItemIdListError::NotDigits {
            index,
            segment: segment.to_owned(),
        });
    }
    segment
        .parse::<u64>()
        .map(ItemId)
        .map_err(|_| ItemIdListError::OutOfRange {
            index,
            segment: segment.to_owned(),
        })
}

impl FromStr for ItemIdList {
    type Err = ItemIdListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a ItemIdList {
    type Item = ItemId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ItemId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    //! Grammar coverage for the `items` parameter.

    use super::*;
    use rstest::rstest;

    fn ids(raw: &[u64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::new).collect()
    }

    #[rstest]
    #[case("0", &[0])]
    #[case("42", &[42])]
    #[case("3,7,99", &[3, 7, 99])]
    #[case("5,5", &[5, 5])]
    #[case("007,10", &[7, 10])]
    #[case("18446744073709551615", &[u64::MAX])]
    fn accepts_well_formed_lists(#[case] raw: &str, #[case] expected: &[u64]) {
        let list = ItemIdList::parse(raw).expect("list should parse");
        assert_eq!(list.as_slice(), ids(expected).as_slice());
        assert_eq!(list.len(), expected.len());
        assert!(!list.is_empty());
    }

    #[rstest]
    #[case("", ItemIdListError::Empty)]
    #[case(",", ItemIdListError::EmptySegment { index: 0 })]
    #[case("1,", ItemIdListError::EmptySegment { index: 1 })]
    #[case(",1", ItemIdListError::EmptySegment { index: 0 })]
    #[case("1,,2", ItemIdListError::EmptySegment { index: 1 })]
    fn rejects_empty_segments(#[case] raw: &str, #[case] expected: ItemIdListError) {
        assert_eq!(ItemIdList::parse(raw), Err(expected));
    }

    #[rstest]
    #[case("-1", 0)]
    #[case("+1", 0)]
    #[case("1, 2", 1)]
    #[case(" 1", 0)]
    #[case("1\n", 0)]
    #[case("1,a", 1)]
    #[case("1.5", 0)]
    #[case("\u{0663}", 0)]
    fn rejects_non_digit_segments(#[case] raw: &str, #[case] index: usize) {
        let error = ItemIdList::parse(raw).expect_err("list should be rejected");
        assert!(matches!(error, ItemIdListError::NotDigits { .. }));
        assert_eq!(error.index(), Some(index));
        assert_eq!(error.code(), "invalid_item_id");
    }

    #[rstest]
    fn rejects_ids_beyond_u64() {
        let error = ItemIdList::parse("1,18446744073709551616").expect_err("overflow");
        assert_eq!(
            error,
            ItemIdListError::OutOfRange {
                index: 1,
                segment: "18446744073709551616".to_owned(),
            }
        );
        assert_eq!(error.code(), "item_id_out_of_range");
    }

    #[rstest]
    fn item_ids_serialise_as_bare_integers() {
        let json = serde_json::to_string(&ids(&[3, 7])).expect("serialise ids");
        assert_eq!(json, "[3,7]");
    }

    #[rstest]
    fn from_str_matches_parse() {
        let list: ItemIdList = "1,2".parse().expect("valid list");
        assert_eq!(list.iter().collect::<Vec<_>>(), ids(&[1, 2]));
    }
}
