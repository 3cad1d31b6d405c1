//! Represent Boolean functions and reduce them to minimal sums of products

pub mod cover;
pub mod display;
pub mod expr;
pub mod primes;
pub mod term;
pub mod variables;

use std::collections::BTreeSet;
use std::fmt;

use log::info;

use self::cover::{check_width, minimize, required_width, Cover};
use self::display::NamedCover;
use self::expr::{parse_expr, MAX_VARIABLES};
use self::primes::prime_implicants;
use self::term::Term;
use self::variables::Variables;
use crate::helper::error::{QmError, QmResult};

/// A Boolean function given by its list of minterms over an ordered list of variables
#[derive(Clone, Debug)]
pub struct Function {
    variables: Variables,
    minterms: Vec<u64>,
}

/// Result of the round-trip check of a function
#[derive(Clone, Debug)]
pub struct CheckReport {
    /// The minimized cover
    pub cover: Cover,
    /// The cover rendered as an expression
    pub expression: String,
    /// Minterms of the rendered expression, over the variables of the original function
    pub minterms: Vec<u64>,
    /// True if the rendered expression has the same minterms as the original function
    pub matched: bool,
}

impl Function {
    /// Parse an expression and enumerate its truth table
    pub fn parse(text: &str) -> QmResult<Function> {
        let parsed = parse_expr(text)?;
        let minterms = parsed.minterms();
        info!(
            "{} minterms for {} variables",
            minterms.len(),
            parsed.variables.len()
        );
        Ok(Function {
            variables: parsed.variables,
            minterms,
        })
    }

    /// Define a function from a list of minterm indices.
    ///
    /// If the width is not given, it is derived from the largest minterm.
    /// Variables get generic names (x0, x1, ...).
    pub fn from_minterms(minterms: &[u64], width: Option<usize>) -> QmResult<Function> {
        let width = width.unwrap_or_else(|| required_width(minterms));
        check_width(minterms, width)?;
        let minterms: BTreeSet<u64> = minterms.iter().copied().collect();
        Ok(Function {
            variables: Variables::indexed(width),
            minterms: minterms.into_iter().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn minterms(&self) -> &[u64] {
        &self.minterms
    }

    /// Compute all prime implicants of this function
    pub fn primes(&self) -> QmResult<Vec<Term>> {
        check_width(&self.minterms, self.width())?;
        let minterms: BTreeSet<Term> = self
            .minterms
            .iter()
            .map(|m| Term::from_minterm(*m, self.width()))
            .collect();
        Ok(prime_implicants(&minterms).into_iter().collect())
    }

    pub fn minimize(&self) -> QmResult<Cover> {
        minimize(&self.minterms, self.width())
    }

    /// Render a cover as an expression over the variables of this function
    pub fn render(&self, cover: &Cover) -> String {
        NamedCover {
            terms: cover,
            namer: &self.variables,
        }
        .to_string()
    }

    /// Minimize, render the result as an expression, parse it back and compare the minterms.
    pub fn check(&self) -> QmResult<CheckReport> {
        let cover = self.minimize()?;
        let expression = self.render(&cover);
        let minterms = if expression.is_empty() {
            vec![]
        } else {
            if self.width() > MAX_VARIABLES {
                return Err(QmError::TooManyVariables {
                    found: self.width(),
                    max: MAX_VARIABLES,
                });
            }
            parse_expr(&expression)?.minterms_over(&self.variables)?
        };
        let matched = minterms == self.minterms;
        info!("round-trip check: {}", if matched { "ok" } else { "mismatch" });
        Ok(CheckReport {
            cover,
            expression,
            minterms,
            matched,
        })
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {:?}", self.variables, self.minterms)
    }
}
