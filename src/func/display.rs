//! Render implicants as expressions over named variables.

use std::fmt;
use std::io::{self, Write};

use crate::func::term::Term;
use crate::func::variables::VariableNamer;

/// Associate a term with variable names for display.
///
/// The term is rendered as a parenthesized conjunction of literals, free positions are omitted.
pub struct NamedTerm<'a> {
    pub term: &'a Term,
    pub namer: &'a dyn VariableNamer,
}

/// Associate a list of implicants with variable names for display.
///
/// The result is the disjunction of all terms. An empty list yields an empty string.
pub struct NamedCover<'a> {
    pub terms: &'a [Term],
    pub namer: &'a dyn VariableNamer,
}

impl fmt::Display for NamedTerm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        if self.term.is_unrestricted() {
            // A term without literal is always true, write it as a valid expression
            if self.term.width() > 0 {
                self.namer.format_name(f, 0)?;
                write!(f, " | ~")?;
                self.namer.format_name(f, 0)?;
            }
            return write!(f, ")");
        }

        let mut first = true;
        for pos in 0..self.term.width() {
            let value = match self.term.value(pos) {
                None => continue,
                Some(v) => v,
            };
            if first {
                first = false;
            } else {
                write!(f, " & ")?;
            }
            if !value {
                write!(f, "~")?;
            }
            self.namer.format_name(f, pos)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for NamedCover<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for term in self.terms {
            if first {
                first = false;
            } else {
                write!(f, " | ")?;
            }
            write!(
                f,
                "{}",
                NamedTerm {
                    term,
                    namer: self.namer
                }
            )?;
        }
        Ok(())
    }
}

/// Write a list of terms as a JSON array of objects mapping each fixed variable to its value
pub fn write_json(terms: &[Term], namer: &dyn VariableNamer, out: &mut dyn Write) -> io::Result<()> {
    write!(out, "[")?;
    for (idx, term) in terms.iter().enumerate() {
        if idx > 0 {
            write!(out, ",")?;
        }
        write!(out, "{{")?;
        let mut first = true;
        for pos in 0..term.width() {
            let value = match term.value(pos) {
                None => continue,
                Some(v) => v,
            };
            if first {
                first = false;
            } else {
                write!(out, ",")?;
            }
            match namer.name(pos) {
                Some(name) => write!(out, "\"{}\":{}", name, value as u8)?,
                None => write!(out, "\"_{}\":{}", pos, value as u8)?,
            }
        }
        write!(out, "}}")?;
    }
    writeln!(out, "]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::variables::Variables;

    fn terms(values: &[&str]) -> Vec<Term> {
        values.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn render(values: &[&str], vars: &Variables) -> String {
        let terms = terms(values);
        NamedCover {
            terms: &terms,
            namer: vars,
        }
        .to_string()
    }

    #[test]
    fn test_render() {
        let vars = Variables::from_names(vec!["x0", "x1", "x2"]);
        assert_eq!(render(&["11-"], &vars), "(x0 & x1)");
        assert_eq!(render(&["1--", "-01"], &vars), "(x0) | (~x1 & x2)");
        assert_eq!(render(&["000"], &vars), "(~x0 & ~x1 & ~x2)");
        assert_eq!(render(&[], &vars), "");
    }

    #[test]
    fn test_render_tautology() {
        let vars = Variables::from_names(vec!["x0", "x1"]);
        assert_eq!(render(&["--"], &vars), "(x0 | ~x0)");
    }

    #[test]
    fn test_missing_names() {
        let vars = Variables::from_names(vec!["x0"]);
        assert_eq!(render(&["10"], &vars), "(x0 & ~_1)");
    }

    #[test]
    fn test_json() {
        let vars = Variables::from_names(vec!["x0", "x1"]);
        let mut out = Vec::new();
        write_json(&terms(&["1-", "01"]), &vars, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[{\"x0\":1},{\"x0\":0,\"x1\":1}]\n");
    }
}
