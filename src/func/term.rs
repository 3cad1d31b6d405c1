use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use bit_set::BitSet;

use crate::helper::error::QmError;

/// Largest supported number of variables, bounded by the size of minterm indices
pub const MAX_WIDTH: usize = 64;

/// Terms are subspaces of a fixed number of variables in which some positions are fixed
/// (true or false) and the others are free ("don't care").
///
/// A minterm is a term where all positions are fixed, an implicant may leave some of them free.
/// Position 0 denotes the first variable, which is also the most significant bit of the
/// minterm index. As for patterns, the fixed positions are stored as a pair of bitsets.
#[derive(Clone, Debug)]
pub struct Term {
    width: usize,
    positive: BitSet,
    negative: BitSet,
}

impl Term {
    /// Create a new term, without any fixed position.
    /// This term covers all minterms of the given width.
    pub fn unrestricted(width: usize) -> Term {
        Term {
            width,
            positive: BitSet::with_capacity(width),
            negative: BitSet::with_capacity(width),
        }
    }

    /// Create the fully fixed term corresponding to a minterm index.
    ///
    /// The index must fit in the given width, extra high bits are ignored.
    pub fn from_minterm(minterm: u64, width: usize) -> Term {
        let mut term = Term::unrestricted(width);
        for pos in 0..width {
            let shift = width - 1 - pos;
            term.set(pos, (minterm >> shift) & 1 == 1);
        }
        term
    }

    /// Fix a position to a specific value
    pub fn set(&mut self, pos: usize, value: bool) {
        if value {
            self.negative.remove(pos);
            self.positive.insert(pos);
        } else {
            self.positive.remove(pos);
            self.negative.insert(pos);
        }
    }

    /// Release a fixed position
    pub fn release(&mut self, pos: usize) {
        self.positive.remove(pos);
        self.negative.remove(pos);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of positions fixed at 1, used to group terms before merging them
    pub fn ones(&self) -> usize {
        self.positive.len()
    }

    /// Number of free positions
    pub fn dont_cares(&self) -> usize {
        self.width - self.positive.len() - self.negative.len()
    }

    pub fn is_minterm(&self) -> bool {
        self.dont_cares() == 0
    }

    /// Test if this term lacks any restriction.
    pub fn is_unrestricted(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    pub fn positive(&self) -> &BitSet {
        &self.positive
    }

    pub fn negative(&self) -> &BitSet {
        &self.negative
    }

    /// The value fixed at a given position, if any
    pub fn value(&self, pos: usize) -> Option<bool> {
        if self.positive.contains(pos) {
            Some(true)
        } else if self.negative.contains(pos) {
            Some(false)
        } else {
            None
        }
    }

    /// The character denoting a position: '1', '0' or '-' for free positions
    pub fn symbol(&self, pos: usize) -> char {
        match self.value(pos) {
            Some(true) => '1',
            Some(false) => '0',
            None => '-',
        }
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.width).map(move |pos| self.symbol(pos))
    }

    /// Positions where the two terms do not carry the same symbol.
    ///
    /// A free position facing a fixed one counts as a difference.
    pub fn differences(&self, other: &Term) -> BitSet {
        let mut diff = self.positive.clone();
        diff.symmetric_difference_with(&other.positive);
        let mut neg_diff = self.negative.clone();
        neg_diff.symmetric_difference_with(&other.negative);
        diff.union_with(&neg_diff);
        diff
    }

    /// Test if two terms of the same width differ at exactly one position
    pub fn is_adjacent(&self, other: &Term) -> bool {
        self.width == other.width && self.differences(other).len() == 1
    }

    /// Merge two adjacent terms: the result releases the only differing position.
    ///
    /// Returns None if the terms are not adjacent.
    pub fn merge(&self, other: &Term) -> Option<Term> {
        if self.width != other.width {
            return None;
        }
        let diff = self.differences(other);
        if diff.len() != 1 {
            return None;
        }
        let mut merged = self.clone();
        for pos in diff.iter() {
            merged.release(pos);
        }
        Some(merged)
    }

    /// Test if this term covers another one.
    ///
    /// All positions fixed in this term must be fixed at the same value in the other one.
    /// For a minterm, this is the usual coverage relation.
    pub fn covers(&self, other: &Term) -> bool {
        self.width == other.width
            && other.positive.is_superset(&self.positive)
            && other.negative.is_superset(&self.negative)
    }

    /// Test if this term covers a minterm index
    pub fn covers_minterm(&self, minterm: u64) -> bool {
        let shift = |pos: usize| self.width - 1 - pos;
        self.positive.iter().all(|pos| (minterm >> shift(pos)) & 1 == 1)
            && self.negative.iter().all(|pos| (minterm >> shift(pos)) & 1 == 0)
    }

    /// The minterm index of a fully fixed term
    pub fn minterm(&self) -> Option<u64> {
        if !self.is_minterm() {
            return None;
        }
        Some(
            self.positive
                .iter()
                .fold(0, |acc, pos| acc | 1 << (self.width - 1 - pos)),
        )
    }

    /// Enumerate the indices of all minterms covered by this term, in ascending order
    pub fn minterms(&self) -> Vec<u64> {
        let free: Vec<usize> = (0..self.width).filter(|p| self.value(*p).is_none()).collect();
        let base = self
            .positive
            .iter()
            .fold(0u64, |acc, pos| acc | 1 << (self.width - 1 - pos));
        let mut result: Vec<u64> = (0..1u64 << free.len())
            .map(|choice| {
                free.iter().rev().enumerate().fold(base, |acc, (k, pos)| {
                    if (choice >> k) & 1 == 1 {
                        acc | 1 << (self.width - 1 - pos)
                    } else {
                        acc
                    }
                })
            })
            .collect();
        result.sort_unstable();
        result
    }
}

impl FromStr for Term {
    type Err = QmError;

    /// Parse a string of '0', '1' and '-'
    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let width = descr.chars().count();
        if width > MAX_WIDTH {
            return Err(QmError::InvalidTerm(descr.to_owned()));
        }
        let mut term = Term::unrestricted(width);
        for (pos, c) in descr.chars().enumerate() {
            match c {
                '0' => term.set(pos, false),
                '1' => term.set(pos, true),
                '-' => (),
                _ => return Err(QmError::InvalidTerm(descr.to_owned())),
            }
        }
        Ok(term)
    }
}

// Terms are compared as their ternary strings ('-' < '0' < '1'), shorter terms first.
impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.width
            .cmp(&other.width)
            .then_with(|| self.symbols().cmp(other.symbols()))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        for c in self.symbols() {
            c.hash(state);
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self.symbols().collect();
        write!(f, "{}", &s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    #[test]
    fn test_minterm_encoding() {
        let t = Term::from_minterm(5, 4);
        assert_eq!(t.to_string(), "0101");
        assert_eq!(t.ones(), 2);
        assert_eq!(t.minterm(), Some(5));
        assert!(t.is_minterm());

        assert_eq!(Term::from_minterm(0, 1).to_string(), "0");
        assert_eq!(term("1-1").minterm(), None);
    }

    #[test]
    fn test_adjacency() {
        assert!(term("101").is_adjacent(&term("111")));
        assert!(!term("101").is_adjacent(&term("110")));
        assert!(!term("101").is_adjacent(&term("101")));

        // a free position facing a fixed one is a difference
        assert!(term("1-1").is_adjacent(&term("101")));
        assert!(!term("1-1").is_adjacent(&term("10-")));
        assert!(!term("10").is_adjacent(&term("100")));
    }

    #[test]
    fn test_merge() {
        let merged = term("101").merge(&term("111")).unwrap();
        assert_eq!(merged, term("1-1"));
        assert_eq!(merged.minterms(), vec![5, 7]);
        assert_eq!(merged.dont_cares(), 1);

        assert_eq!(term("1-0").merge(&term("1-1")), Some(term("1--")));
        assert_eq!(term("100").merge(&term("111")), None);
    }

    #[test]
    fn test_coverage() {
        let imp = term("1-1");
        for m in 0..8 {
            assert_eq!(imp.covers(&Term::from_minterm(m, 3)), m == 5 || m == 7);
            assert_eq!(imp.covers_minterm(m), m == 5 || m == 7);
        }
        assert!(term("---").covers(&term("1-0")));
        assert!(!term("1-0").covers(&term("---")));
        assert_eq!(term("---").minterms(), (0..8).collect::<Vec<u64>>());
        assert_eq!(term("-0-1").minterms(), vec![1, 3, 9, 11]);
    }

    #[test]
    fn test_order() {
        let mut terms = vec![term("11"), term("-1"), term("0-"), term("1-")];
        terms.sort();
        let sorted: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        assert_eq!(sorted, vec!["-1", "0-", "1-", "11"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!("10x".parse::<Term>().is_err());
        assert_eq!("".parse::<Term>().unwrap().width(), 0);
    }
}
