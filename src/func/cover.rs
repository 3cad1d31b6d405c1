//! Select a small set of prime implicants covering all minterms of a function.
//!
//! The prime implicants are first associated to the minterms they cover. Implicants which are the
//! only ones covering a minterm are essential and always selected. Remaining minterms are covered
//! greedily, and implicants which became redundant are finally removed.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Deref;

use log::{debug, trace};

use crate::func::primes::prime_implicants;
use crate::func::term::{Term, MAX_WIDTH};
use crate::helper::error::{EmptyQmResult, QmError, QmResult};

/// A list of implicants which together cover all minterms of a function, sorted by term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cover {
    width: usize,
    terms: Vec<Term>,
}

// Use the deref trick to delegate some functions to the inner vector
impl Deref for Cover {
    type Target = Vec<Term>;
    fn deref(&self) -> &Vec<Term> {
        &self.terms
    }
}

impl Cover {
    pub fn new<I: IntoIterator<Item = Term>>(width: usize, terms: I) -> Cover {
        let terms: BTreeSet<Term> = terms.into_iter().collect();
        Cover {
            width,
            terms: terms.into_iter().collect(),
        }
    }

    /// The empty cover, corresponding to the "false" function.
    pub fn empty(width: usize) -> Cover {
        Cover {
            width,
            terms: vec![],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Test if at least one of the implicants covers the given minterm.
    pub fn covers_minterm(&self, minterm: u64) -> bool {
        self.terms.iter().any(|t| t.covers_minterm(minterm))
    }

    /// Collect all minterms covered by at least one implicant
    pub fn minterms(&self) -> BTreeSet<u64> {
        self.terms.iter().flat_map(Term::minterms).collect()
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for t in &self.terms {
            writeln!(f, "{}", t)?;
        }
        write!(f, "")
    }
}

/// Associate each minterm to the list of prime implicants covering it.
///
/// The table is built once and never changes afterwards: selecting implicants
/// only changes which minterms are considered as covered.
pub struct CoverageTable {
    rows: BTreeMap<Term, Vec<Term>>,
}

impl CoverageTable {
    pub fn new(minterms: &BTreeSet<Term>, primes: &BTreeSet<Term>) -> CoverageTable {
        let rows = minterms
            .iter()
            .map(|m| {
                let covering: Vec<Term> = primes.iter().filter(|p| p.covers(m)).cloned().collect();
                (m.clone(), covering)
            })
            .collect();
        CoverageTable { rows }
    }

    pub fn minterms(&self) -> impl Iterator<Item = &Term> {
        self.rows.keys()
    }

    /// The prime implicants covering a minterm (empty for unknown minterms)
    pub fn covering(&self, minterm: &Term) -> &[Term] {
        self.rows.get(minterm).map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_covered_by(&self, minterm: &Term, selection: &BTreeSet<Term>) -> bool {
        self.covering(minterm).iter().any(|p| selection.contains(p))
    }

    /// Minterms which are not covered by any implicant of the selection
    pub fn uncovered(&self, selection: &BTreeSet<Term>) -> BTreeSet<Term> {
        self.rows
            .keys()
            .filter(|m| !self.is_covered_by(m, selection))
            .cloned()
            .collect()
    }

    /// Select the implicants which are the only ones covering at least one minterm.
    pub fn essentials(&self) -> BTreeSet<Term> {
        let mut essentials = BTreeSet::new();
        for (m, covering) in self.rows.iter() {
            if covering.len() == 1 {
                trace!("{} is only covered by {}", m, covering[0]);
                essentials.insert(covering[0].clone());
            }
        }
        debug!("{} essential implicants", essentials.len());
        essentials
    }

    /// Cover the remaining minterms greedily.
    ///
    /// At each step, the candidate covering the largest number of uncovered minterms is added
    /// to the selection. Ties are resolved by taking the smallest term.
    /// Running out of useful candidates before all minterms are covered is an error.
    pub fn greedy_cover(
        &self,
        selection: &mut BTreeSet<Term>,
        uncovered: &mut BTreeSet<Term>,
        mut candidates: BTreeSet<Term>,
    ) -> EmptyQmResult {
        while !uncovered.is_empty() {
            let best = candidates
                .iter()
                .map(|c| (c, uncovered.iter().filter(|m| c.covers(m)).count()))
                .min_by_key(|(c, count)| (Reverse(*count), *c))
                .filter(|(_, count)| *count > 0)
                .map(|(c, _)| c.clone());

            let best = match best {
                None => {
                    return Err(QmError::IncompleteCover {
                        uncovered: uncovered.iter().map(Term::to_string).collect(),
                    })
                }
                Some(b) => b,
            };

            debug!("greedy pick: {}", best);
            uncovered.retain(|m| !best.covers(m));
            candidates.remove(&best);
            selection.insert(best);
        }
        Ok(())
    }

    /// Remove implicants whose minterms are all covered by other selected implicants.
    ///
    /// Removal shrinks the selection in place, the scan is repeated until nothing changes.
    pub fn remove_redundant(&self, selection: &mut BTreeSet<Term>) {
        loop {
            let mut removed = false;
            let implicants: Vec<Term> = selection.iter().cloned().collect();
            for implicant in implicants {
                let redundant = self
                    .rows
                    .iter()
                    .filter(|(_, covering)| covering.contains(&implicant))
                    .all(|(_, covering)| {
                        covering
                            .iter()
                            .any(|p| *p != implicant && selection.contains(p))
                    });
                if redundant {
                    debug!("remove redundant implicant {}", implicant);
                    selection.remove(&implicant);
                    removed = true;
                }
            }
            if !removed {
                break;
            }
        }
    }
}

/// Number of variables needed to encode the largest minterm, at least 1.
pub fn required_width(minterms: &[u64]) -> usize {
    let max = minterms.iter().max().copied().unwrap_or(0);
    ((u64::BITS - max.leading_zeros()) as usize).max(1)
}

/// Ensure that the width is supported and that all minterms fit in it
pub fn check_width(minterms: &[u64], width: usize) -> EmptyQmResult {
    if width < 1 || width > MAX_WIDTH {
        return Err(QmError::InvalidWidth {
            width,
            max: MAX_WIDTH,
        });
    }
    for m in minterms {
        if m.checked_shr(width as u32).unwrap_or(0) != 0 {
            return Err(QmError::WidthMismatch { minterm: *m, width });
        }
    }
    Ok(())
}

/// Compute a minimal (but not necessarily optimal) sum of products for a list of minterms
/// over a given number of variables.
///
/// Duplicated minterms are ignored. An empty list of minterms yields an empty cover.
pub fn minimize(minterms: &[u64], width: usize) -> QmResult<Cover> {
    check_width(minterms, width)?;

    let minterms: BTreeSet<Term> = minterms
        .iter()
        .map(|m| Term::from_minterm(*m, width))
        .collect();
    if minterms.is_empty() {
        return Ok(Cover::empty(width));
    }
    debug!("minimize {} minterms over {} variables", minterms.len(), width);

    let primes = prime_implicants(&minterms);
    let table = CoverageTable::new(&minterms, &primes);

    let mut selection = table.essentials();
    let mut uncovered = table.uncovered(&selection);
    let candidates = primes.difference(&selection).cloned().collect();
    table.greedy_cover(&mut selection, &mut uncovered, candidates)?;
    table.remove_redundant(&mut selection);

    debug!("selected {} implicants", selection.len());
    Ok(Cover::new(width, selection))
}

/// Minimize a list of minterms, using the width of the largest one.
pub fn minimize_inferred(minterms: &[u64]) -> QmResult<Cover> {
    minimize(minterms, required_width(minterms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    fn terms(values: &[&str]) -> BTreeSet<Term> {
        values.iter().map(|s| term(s)).collect()
    }

    fn names(cover: &Cover) -> Vec<String> {
        cover.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_width() {
        assert_eq!(required_width(&[]), 1);
        assert_eq!(required_width(&[0]), 1);
        assert_eq!(required_width(&[1, 2, 3]), 2);
        assert_eq!(required_width(&[8]), 4);
        assert_eq!(required_width(&[u64::MAX]), 64);

        assert!(check_width(&[7], 3).is_ok());
        assert!(check_width(&[u64::MAX], 64).is_ok());
        assert!(matches!(
            check_width(&[8], 3),
            Err(QmError::WidthMismatch { minterm: 8, width: 3 })
        ));
        assert!(matches!(
            check_width(&[0], 0),
            Err(QmError::InvalidWidth { width: 0, .. })
        ));
        assert!(matches!(
            check_width(&[0], 65),
            Err(QmError::InvalidWidth { width: 65, .. })
        ));
    }

    #[test]
    fn test_coverage_table() {
        let minterms = terms(&["01", "10", "11"]);
        let primes = terms(&["-1", "1-"]);
        let table = CoverageTable::new(&minterms, &primes);

        assert_eq!(table.minterms().count(), 3);
        assert_eq!(table.covering(&term("01")), &[term("-1")]);
        assert_eq!(table.covering(&term("11")), &[term("-1"), term("1-")]);
        assert!(table.covering(&term("00")).is_empty());

        assert_eq!(table.essentials(), primes);
        assert!(table.uncovered(&primes).is_empty());
        assert_eq!(table.uncovered(&terms(&["-1"])), terms(&["10"]));
    }

    #[test]
    fn test_greedy_tie_break() {
        // cyclic function: no essential implicant, all candidates cover two minterms
        let minterms: BTreeSet<Term> = [0, 1, 2, 5, 6, 7]
            .iter()
            .map(|m| Term::from_minterm(*m, 3))
            .collect();
        let primes = prime_implicants(&minterms);
        assert_eq!(primes.len(), 6);

        let table = CoverageTable::new(&minterms, &primes);
        let mut selection = table.essentials();
        assert!(selection.is_empty());

        let mut uncovered = table.uncovered(&selection);
        table
            .greedy_cover(&mut selection, &mut uncovered, primes.clone())
            .unwrap();
        assert!(uncovered.is_empty());
        // first pick is the smallest term: "-01" covers 1 and 5
        assert!(selection.contains(&term("-01")));
        assert!(table.uncovered(&selection).is_empty());
    }

    #[test]
    fn test_incomplete_cover() {
        let minterms = terms(&["00", "11"]);
        let primes = terms(&["00"]);
        let table = CoverageTable::new(&minterms, &primes);
        let mut selection = BTreeSet::new();
        let mut uncovered = table.uncovered(&selection);
        let result = table.greedy_cover(&mut selection, &mut uncovered, primes.clone());
        match result {
            Err(QmError::IncompleteCover { uncovered }) => assert_eq!(uncovered, vec!["11"]),
            _ => panic!("an incomplete cover should be reported"),
        }
    }

    #[test]
    fn test_remove_redundant() {
        let minterms = terms(&["01", "10", "11"]);
        let primes = terms(&["-1", "1-", "11"]);
        let table = CoverageTable::new(&minterms, &primes);
        let mut selection = primes.clone();
        table.remove_redundant(&mut selection);
        assert_eq!(selection, terms(&["-1", "1-"]));
    }

    #[test]
    fn test_minimize_examples() {
        assert_eq!(names(&minimize(&[3], 2).unwrap()), vec!["11"]);
        assert_eq!(names(&minimize(&[1, 2, 3], 2).unwrap()), vec!["-1", "1-"]);
        assert_eq!(names(&minimize_inferred(&[0]).unwrap()), vec!["0"]);
        assert_eq!(names(&minimize_inferred(&[0, 1, 2, 3]).unwrap()), vec!["--"]);
        assert_eq!(names(&minimize(&[3, 3, 1, 1], 2).unwrap()), vec!["-1"]);
    }

    #[test]
    fn test_minimize_empty() {
        let cover = minimize(&[], 3).unwrap();
        assert!(cover.is_empty());
        assert_eq!(cover.width(), 3);
        assert!(minimize_inferred(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_minimize_width_mismatch() {
        assert!(matches!(
            minimize(&[1, 4], 2),
            Err(QmError::WidthMismatch { minterm: 4, width: 2 })
        ));
    }

    #[test]
    fn test_minimize_cyclic() {
        let cover = minimize(&[0, 1, 2, 5, 6, 7], 3).unwrap();
        assert_eq!(cover.len(), 3);
        let expected: BTreeSet<u64> = [0, 1, 2, 5, 6, 7].iter().copied().collect();
        assert_eq!(cover.minterms(), expected);
    }

    #[test]
    fn test_minimize_classic() {
        let cover = minimize(&[4, 8, 10, 11, 12, 15], 4).unwrap();
        assert_eq!(names(&cover), vec!["-100", "1-11", "10-0"]);
    }
}
