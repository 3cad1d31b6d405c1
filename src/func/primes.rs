//! Search prime implicants by iterated merging of adjacent terms.
//!
//! Terms of each level are grouped by their number of positions fixed at 1: adjacent terms
//! can only be found in successive groups. Each successful merge yields a term with one more
//! free position, which enters the next level. The search stops when a level produces no merge.
//! Terms which never took part in a merge are the prime implicants.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use log::{debug, trace};

use crate::func::term::Term;

/// Terms of the current level, grouped by their number of positions fixed at 1
type Groups = BTreeMap<usize, BTreeSet<Term>>;

fn group_by_ones<I: IntoIterator<Item = Term>>(terms: I) -> Groups {
    let mut groups = Groups::new();
    for t in terms {
        groups.entry(t.ones()).or_default().insert(t);
    }
    groups
}

/// Compute the prime implicants of a set of minterms.
///
/// The resulting implicants collectively cover exactly the given minterms.
pub fn prime_implicants(minterms: &BTreeSet<Term>) -> BTreeSet<Term> {
    let mut all_terms = minterms.clone();
    let mut used = BTreeSet::new();

    let mut groups = group_by_ones(minterms.iter().cloned());
    let mut level = 0;
    while !groups.is_empty() {
        let mut next = Groups::new();
        let mut merges = 0;
        for (ones, group) in groups.iter() {
            let upper = match groups.get(&(ones + 1)) {
                None => continue,
                Some(g) => g,
            };
            for (t1, t2) in group.iter().cartesian_product(upper.iter()) {
                if let Some(merged) = t1.merge(t2) {
                    trace!("merge {} + {} => {}", t1, t2, merged);
                    used.insert(t1.clone());
                    used.insert(t2.clone());
                    next.entry(merged.ones()).or_default().insert(merged);
                    merges += 1;
                }
            }
        }

        let created: usize = next.values().map(BTreeSet::len).sum();
        debug!("level {}: {} merges, {} new implicants", level, merges, created);
        all_terms.extend(next.values().flat_map(|g| g.iter().cloned()));
        groups = next;
        level += 1;
    }

    let primes: BTreeSet<Term> = all_terms.difference(&used).cloned().collect();
    debug!("{} prime implicants", primes.len());
    primes
}
