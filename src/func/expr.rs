//! Parse and evaluate Boolean expressions over variables named `x<digits>`.
//!
//! Expressions use the operators `~` (not), `&` (and), `^` (xor) and `|` (or), by decreasing
//! priority, and parentheses. The parsed expression is kept as a tree, which can be evaluated
//! on all assignments of its variables to enumerate its minterms.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::rc::Rc;

use log::debug;
use once_cell::sync::Lazy;
use pest::iterators::Pair;
use pest::Parser;
use regex::Regex;

use crate::func::variables::{VariableNamer, Variables};
use crate::helper::error::{generic_error, QmError, QmResult};

/// Largest number of variables accepted before enumerating the truth table
pub const MAX_VARIABLES: usize = 24;

/// Characters and variable tokens allowed in an expression
static RE_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[ ^&|~()]|x\d+)+$").unwrap());

#[derive(Parser)]
#[grammar_inline = r####"
formula = { SOI ~ disj ~ EOI }
disj    = { xor ~ ( "|" ~ xor )* }
xor     = { conj ~ ( "^" ~ conj )* }
conj    = { term ~ ( "&" ~ term )* }
term    = _{ neg | grp }
neg     = { "~" ~ term }
grp     = _{ var | "(" ~ disj ~ ")" }
var     = @{ "x" ~ ASCII_DIGIT+ }

WHITESPACE = _{ " " }
"####]
struct ExprParser;

/* ************************************************************************************* */
/* ************************ Data structures and basic operations *********************** */
/* ************************************************************************************* */

#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    ATOM(usize),
    NOT(Rc<Expr>),
    OPER(Operator, Children),
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Operator {
    AND,
    XOR,
    OR,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Children {
    pub data: Rc<Vec<Expr>>,
}

impl Expr {
    pub fn not(&self) -> Self {
        match self {
            Expr::NOT(e) => Expr::clone(e),
            _ => Expr::NOT(Rc::new(self.clone())),
        }
    }

    pub fn and(&self, e: &Expr) -> Self {
        Operator::AND.binary(self, e)
    }

    pub fn or(&self, e: &Expr) -> Self {
        Operator::OR.binary(self, e)
    }

    pub fn xor(&self, e: &Expr) -> Self {
        Operator::XOR.binary(self, e)
    }

    /// Evaluate the expression, the value of each variable being given by a callback
    pub fn eval(&self, value: &dyn Fn(usize) -> bool) -> bool {
        match self {
            Expr::ATOM(u) => value(*u),
            Expr::NOT(e) => !e.eval(value),
            Expr::OPER(o, c) => c.eval(*o, value),
        }
    }

    /// Evaluate the expression for the assignment encoded by a minterm index.
    ///
    /// The first variable is the most significant bit of the index.
    pub fn eval_minterm(&self, minterm: u64, width: usize) -> bool {
        self.eval(&|uid| (minterm >> (width - 1 - uid)) & 1 == 1)
    }
}

impl Operator {
    pub fn binary(self, a: &Expr, b: &Expr) -> Expr {
        self.join(vec![a.clone(), b.clone()])
    }

    /// Apply this operator to a list of operands.
    /// A single operand is returned as is.
    pub fn join(self, mut children: Vec<Expr>) -> Expr {
        match children.len() {
            1 => children.remove(0),
            _ => Expr::OPER(
                self,
                Children {
                    data: Rc::new(children),
                },
            ),
        }
    }

    fn priority(self) -> u8 {
        match self {
            Operator::OR => 1,
            Operator::XOR => 2,
            Operator::AND => 3,
        }
    }
}

impl Children {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn eval(&self, op: Operator, value: &dyn Fn(usize) -> bool) -> bool {
        match op {
            Operator::AND => self.data.iter().all(|c| c.eval(value)),
            Operator::OR => self.data.iter().any(|c| c.eval(value)),
            Operator::XOR => self.data.iter().fold(false, |acc, c| acc ^ c.eval(value)),
        }
    }
}

/* ************************************************************************************* */
/* ************************************** Parsing ************************************** */
/* ************************************************************************************* */

/// A parsed expression and the sorted list of variables it uses
#[derive(Clone, Debug)]
pub struct ParsedExpr {
    pub expr: Expr,
    pub variables: Variables,
}

/// Parse a textual expression.
///
/// The text is first checked against the allowed characters and variable tokens,
/// then parsed according to the operator priorities.
pub fn parse_expr(text: &str) -> QmResult<ParsedExpr> {
    if !RE_EXPR.is_match(text) {
        return Err(QmError::Syntax(format!("invalid expression \"{}\"", text)));
    }

    let formula = ExprParser::parse(Rule::formula, text)?
        .next()
        .ok_or_else(|| QmError::Syntax(format!("empty expression \"{}\"", text)))?;

    let variables = Variables::from_names(
        formula
            .clone()
            .into_inner()
            .flatten()
            .filter(|p| p.as_rule() == Rule::var)
            .map(|p| p.as_str()),
    );
    if variables.len() > MAX_VARIABLES {
        return Err(QmError::TooManyVariables {
            found: variables.len(),
            max: MAX_VARIABLES,
        });
    }

    let body = formula
        .into_inner()
        .next()
        .ok_or_else(|| QmError::Syntax(format!("empty expression \"{}\"", text)))?;
    let expr = load_expr(&variables, body)?;
    debug!("parsed \"{}\" over {} variables", text, variables.len());

    Ok(ParsedExpr { expr, variables })
}

fn load_expr(variables: &Variables, pair: Pair<Rule>) -> QmResult<Expr> {
    let rule = pair.as_rule();
    if rule == Rule::var {
        let name = pair.as_str();
        return variables
            .get_handle(name)
            .map(Expr::ATOM)
            .ok_or_else(|| generic_error(format!("Unknown variable {}", name)));
    }

    let mut children = pair
        .into_inner()
        .map(|p| load_expr(variables, p))
        .collect::<QmResult<Vec<Expr>>>()?;
    match rule {
        Rule::disj => Ok(Operator::OR.join(children)),
        Rule::xor => Ok(Operator::XOR.join(children)),
        Rule::conj => Ok(Operator::AND.join(children)),
        Rule::neg => children
            .pop()
            .map(|e| e.not())
            .ok_or_else(|| generic_error(String::from("Negation without operand"))),
        // Other rules are hidden or handled by the caller
        _ => Err(generic_error(format!("Unexpected token {:?}", rule))),
    }
}

impl ParsedExpr {
    pub fn width(&self) -> usize {
        self.variables.len()
    }

    /// Enumerate all assignments of the variables and return those satisfying the expression,
    /// in ascending order.
    pub fn minterms(&self) -> Vec<u64> {
        let width = self.width();
        (0..1u64 << width)
            .filter(|m| self.expr.eval_minterm(*m, width))
            .collect()
    }

    /// Enumerate the satisfying assignments in the space of a larger list of variables.
    ///
    /// All variables used by this expression must exist in the target list.
    pub fn minterms_over(&self, target: &Variables) -> QmResult<Vec<u64>> {
        let width = target.len();
        if width > MAX_VARIABLES {
            return Err(QmError::TooManyVariables {
                found: width,
                max: MAX_VARIABLES,
            });
        }
        let mut shifts = Vec::with_capacity(self.width());
        for name in self.variables.names() {
            match target.get_handle(name) {
                Some(pos) => shifts.push(width - 1 - pos),
                None => return Err(generic_error(format!("Unknown variable {}", name))),
            }
        }

        Ok((0..1u64 << width)
            .filter(|m| self.expr.eval(&|uid| (m >> shifts[uid]) & 1 == 1))
            .collect())
    }
}

/* ************************************************************************************* */
/* ************************************* Formatting ************************************ */
/* ************************************************************************************* */

/// Associate an expression with variable names for display
pub struct NamedExpr<'a> {
    pub expr: &'a Expr,
    pub namer: &'a dyn VariableNamer,
}

impl Expr {
    fn format(&self, f: &mut fmt::Formatter, namer: &dyn VariableNamer, parent: u8) -> fmt::Result {
        match self {
            Expr::ATOM(u) => namer.format_name(f, *u),
            Expr::NOT(e) => {
                write!(f, "~")?;
                // operands of a negation are always atoms or parenthesized
                e.format(f, namer, u8::MAX)
            }
            Expr::OPER(o, c) => {
                let need_paren = o.priority() <= parent;
                if need_paren {
                    write!(f, "(")?;
                }
                for (idx, child) in c.data.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " {} ", o)?;
                    }
                    child.format(f, namer, o.priority())?;
                }
                if need_paren {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for NamedExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.expr.format(f, self.namer, 0)
    }
}

impl fmt::Display for ParsedExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.expr.format(f, &self.variables, 0)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::AND => write!(f, "&"),
            Operator::XOR => write!(f, "^"),
            Operator::OR => write!(f, "|"),
        }
    }
}

/*
 * Overload operators to write readable expressions
 */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self {
        Expr::not(&self)
    }
}

impl BitAnd for Expr {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.and(&rhs)
    }
}

impl BitOr for Expr {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.or(&rhs)
    }
}

impl BitXor for Expr {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        self.xor(&rhs)
    }
}
