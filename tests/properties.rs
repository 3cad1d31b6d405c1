use std::collections::BTreeSet;

use qmkit::func::cover::{minimize, minimize_inferred, Cover};
use qmkit::func::display::NamedCover;
use qmkit::func::expr::parse_expr;
use qmkit::func::term::Term;
use qmkit::func::variables::Variables;
use qmkit::func::Function;
use qmkit::helper::error::QmError;

fn names(cover: &Cover) -> BTreeSet<String> {
    cover.iter().map(|t| t.to_string()).collect()
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// All subsets of minterms over a small number of variables
fn all_functions(width: usize) -> impl Iterator<Item = Vec<u64>> {
    let rows = 1u64 << width;
    (0..1u64 << rows).map(move |f| (0..rows).filter(|m| (f >> m) & 1 == 1).collect())
}

fn assert_valid_cover(minterms: &[u64], cover: &Cover) {
    let expected: BTreeSet<u64> = minterms.iter().copied().collect();
    assert_eq!(cover.minterms(), expected, "incomplete cover for {:?}", minterms);

    for (idx, _) in cover.iter().enumerate() {
        let others: Vec<Term> = cover
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, t)| t.clone())
            .collect();
        let reduced = Cover::new(cover.width(), others);
        assert!(
            reduced.minterms() != expected,
            "redundant implicant {} in the cover of {:?}",
            cover[idx],
            minterms
        );
    }
}

#[test]
fn coverage_and_non_redundancy() {
    for width in 1..=3 {
        for minterms in all_functions(width) {
            let cover = minimize(&minterms, width).unwrap();
            assert_valid_cover(&minterms, &cover);
        }
    }
}

#[test]
fn round_trip_equivalence() {
    let vars = Variables::indexed(3);
    for minterms in all_functions(3).filter(|m| !m.is_empty()) {
        let cover = minimize(&minterms, 3).unwrap();
        let text = NamedCover {
            terms: &cover,
            namer: &vars,
        }
        .to_string();
        let parsed = parse_expr(&text).unwrap();
        assert_eq!(parsed.minterms_over(&vars).unwrap(), minterms, "{}", text);
    }
}

#[test]
fn larger_functions() {
    let samples: Vec<Vec<u64>> = vec![
        vec![0, 1, 2, 5, 6, 7, 8, 9, 10, 14],
        vec![4, 8, 10, 11, 12, 15],
        vec![0, 2, 5, 7, 8, 10, 13, 15],
        (0..32).filter(|m| m % 3 == 0).collect(),
        (0..64).filter(|m: &u64| m.count_ones() % 2 == 1).collect(),
    ];
    for minterms in samples {
        let cover = minimize_inferred(&minterms).unwrap();
        assert_valid_cover(&minterms, &cover);
    }
}

#[test]
fn parity_does_not_merge() {
    let minterms: Vec<u64> = (0..16).filter(|m: &u64| m.count_ones() % 2 == 0).collect();
    let cover = minimize(&minterms, 4).unwrap();
    assert_eq!(cover.len(), 8);
    assert!(cover.iter().all(Term::is_minterm));
}

#[test]
fn adjacency_merge() {
    let a: Term = "101".parse().unwrap();
    let b: Term = "111".parse().unwrap();
    let merged = a.merge(&b).unwrap();
    assert_eq!(merged.to_string(), "1-1");
    assert_eq!(merged.minterms(), vec![5, 7]);
}

#[test]
fn single_minterm() {
    let cover = minimize_inferred(&[0]).unwrap();
    assert_eq!(names(&cover), set(&["0"]));
}

#[test]
fn full_coverage() {
    for width in 1..=5 {
        let all: Vec<u64> = (0..1u64 << width).collect();
        let cover = minimize(&all, width).unwrap();
        assert_eq!(cover.len(), 1);
        assert!(cover[0].is_unrestricted());
        assert_eq!(cover[0].to_string(), "-".repeat(width));
    }
}

#[test]
fn end_to_end_and() {
    let func = Function::parse("x0&x1").unwrap();
    assert_eq!(func.variables().names(), &["x0", "x1"]);
    assert_eq!(func.minterms(), &[3]);
    let cover = func.minimize().unwrap();
    assert_eq!(names(&cover), set(&["11"]));
    assert_eq!(func.render(&cover), "(x0 & x1)");
}

#[test]
fn end_to_end_or() {
    let func = Function::parse("x0|x1").unwrap();
    assert_eq!(func.minterms(), &[1, 2, 3]);
    let cover = func.minimize().unwrap();
    assert_eq!(names(&cover), set(&["1-", "-1"]));
    let text = func.render(&cover);
    assert!(text == "(x0) | (x1)" || text == "(x1) | (x0)", "{}", text);
}

#[test]
fn self_test_expression() {
    let func = Function::parse("x3|x1^(~(x0&(~x2))&(x3|(x1^x3|(~x5))^x4))").unwrap();
    assert_eq!(func.width(), 6);
    let report = func.check().unwrap();
    assert!(report.matched, "{}", report.expression);
    assert_valid_cover(func.minterms(), &report.cover);
}

#[test]
fn errors() {
    assert!(matches!(
        Function::parse("x0 && x1"),
        Err(QmError::Syntax(_))
    ));
    assert!(matches!(
        Function::parse("a & b"),
        Err(QmError::Syntax(_))
    ));
    assert!(matches!(
        minimize(&[0, 16], 4),
        Err(QmError::WidthMismatch { minterm: 16, width: 4 })
    ));
}
