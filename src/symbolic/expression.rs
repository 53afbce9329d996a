//! # Expression tree
//!
//! The core symbolic expression type, generic over the numeric domain (`f64` or
//! `Complex64`). A tree is built by the parser, by the builder methods below or by one of
//! the transforms (`substitute`, `differentiate`); once built a node is never mutated.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr<T>` Enum
//! - **Constants**: `Const(Constant<T>)` - numerical leaf, validated for the complex domain
//! - **Variables**: `Var(String)` - free symbol until substituted
//! - **Binary operations**: `Binary(BinOp, lhs, rhs)` - `+ - * / ^`
//! - **Functions**: `Func(Func, argument)` - `sin cos ln exp`
//!
//! ### Key Methods
//! - `var`, `constant`, `value` - leaf constructors
//! - `pow`, `sin`, `cos`, `ln`, `exp` and the `std::ops` operators - node constructors
//! - `substitute(bindings)` - replace bound variables with constants
//! - `render()` / `Display` - text form with minimal local parenthesisation
//!
//! Children are held in `Arc`, so sub-trees are shared between an input tree and the
//! trees derived from it, and a finished tree can be read from several threads.
//!
//! ## Example
//! ```
//! use rusted_calculus::symbolic::expression::{Expr, RealExpr};
//! let x: RealExpr = Expr::var("x");
//! let f = x.clone().pow(Expr::real(2.0)) + x.sin();
//! assert_eq!(f.render(), "x ^ 2 + sin(x)");
//! ```
use crate::symbolic::error::{ExprError, Result};
use crate::symbolic::numeric_domain::Domain;
use num_complex::Complex64;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// binding strength of binary operators; each operator has its own level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpPrecedence {
    AddSub = 0,
    Mul = 1,
    Div = 2,
    Pow = 3,
}

impl OpPrecedence {
    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum BinOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "^")]
    Pow,
}

impl BinOp {
    pub fn from_name(name: &str) -> Result<BinOp> {
        BinOp::from_str(name).map_err(|_| ExprError::UnknownOperator(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn precedence(&self) -> OpPrecedence {
        match self {
            BinOp::Add | BinOp::Sub => OpPrecedence::AddSub,
            BinOp::Mul => OpPrecedence::Mul,
            BinOp::Div => OpPrecedence::Div,
            BinOp::Pow => OpPrecedence::Pow,
        }
    }

    pub fn apply<T: Domain>(&self, lhs: T, rhs: T) -> T {
        match self {
            BinOp::Add => lhs + rhs,
            BinOp::Sub => lhs - rhs,
            BinOp::Mul => lhs * rhs,
            BinOp::Div => lhs / rhs,
            BinOp::Pow => lhs.pow(rhs),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Func {
    #[strum(serialize = "sin")]
    Sin,
    #[strum(serialize = "cos")]
    Cos,
    #[strum(serialize = "ln")]
    Ln,
    #[strum(serialize = "exp")]
    Exp,
}

impl Func {
    pub fn from_name(name: &str) -> Result<Func> {
        Func::from_str(name).map_err(|_| ExprError::UnknownFunction(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn apply<T: Domain>(&self, arg: T) -> T {
        match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
            Func::Ln => arg.ln(),
            Func::Exp => arg.exp(),
        }
    }
}

/// Numerical leaf. Only constructible through `new` (validated) or `from_real`, so a
/// complex constant with both parts non-zero can not exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<T: Domain>(T);

impl<T: Domain> Constant<T> {
    pub fn new(value: T) -> Result<Self> {
        Ok(Constant(value.check_constant()?))
    }

    /// real numbers are valid leaves in every domain
    pub fn from_real(value: f64) -> Self {
        Constant(T::from_real(value))
    }

    pub fn value(&self) -> T {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T: Domain> {
    Const(Constant<T>),
    Var(String),
    Binary(BinOp, Arc<Expr<T>>, Arc<Expr<T>>),
    Func(Func, Arc<Expr<T>>),
}

pub type RealExpr = Expr<f64>;
pub type ComplexExpr = Expr<Complex64>;

impl<T: Domain> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", c.value().render()),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Func(func, arg) => write!(f, "{}({})", func.name(), arg),
            Expr::Binary(op, lhs, rhs) => {
                let precedence = op.precedence();
                fmt_operand(f, lhs, precedence)?;
                write!(f, " {} ", op.name())?;
                fmt_operand(f, rhs, precedence)
            }
        }
    }
}

// only the immediate child is inspected
fn fmt_operand<T: Domain>(
    f: &mut fmt::Formatter,
    operand: &Expr<T>,
    parent: OpPrecedence,
) -> fmt::Result {
    match operand.precedence() {
        Some(child) if child < parent => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

impl<T: Domain> std::ops::Add for Expr<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Add, self, rhs)
    }
}

impl<T: Domain> std::ops::Sub for Expr<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Sub, self, rhs)
    }
}

impl<T: Domain> std::ops::Mul for Expr<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Mul, self, rhs)
    }
}

impl<T: Domain> std::ops::Div for Expr<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::binary(BinOp::Div, self, rhs)
    }
}

impl<T: Domain> std::ops::AddAssign for Expr<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::binary(BinOp::Add, self.clone(), rhs);
    }
}

impl<T: Domain> std::ops::SubAssign for Expr<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Expr::binary(BinOp::Sub, self.clone(), rhs);
    }
}

impl<T: Domain> std::ops::MulAssign for Expr<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::binary(BinOp::Mul, self.clone(), rhs);
    }
}

impl<T: Domain> std::ops::DivAssign for Expr<T> {
    fn div_assign(&mut self, rhs: Self) {
        *self = Expr::binary(BinOp::Div, self.clone(), rhs);
    }
}

/// there is no unary minus node: `-f` is `-1 * f`
impl<T: Domain> std::ops::Neg for Expr<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::binary(BinOp::Mul, Expr::real(-1.0), self)
    }
}

impl<T: Domain> Expr<T> {
    // BASIC FEATURES

    pub fn var(name: &str) -> Self {
        Expr::Var(name.to_string())
    }

    /// single constant leaf; fails for a complex value with both parts non-zero
    pub fn constant(value: T) -> Result<Self> {
        Ok(Expr::Const(Constant::new(value)?))
    }

    pub fn real(value: f64) -> Self {
        Expr::Const(Constant::from_real(value))
    }

    /// Builds a constant of any value: a complex number with both parts non-zero becomes
    /// the sum of a real leaf and an imaginary leaf.
    pub fn value(value: T) -> Self {
        match value.split_leaves() {
            (leaf, None) => Expr::Const(Constant(leaf)),
            (re, Some(im)) => Expr::binary(
                BinOp::Add,
                Expr::Const(Constant(re)),
                Expr::Const(Constant(im)),
            ),
        }
    }

    pub fn binary(op: BinOp, lhs: Expr<T>, rhs: Expr<T>) -> Self {
        Expr::Binary(op, Arc::new(lhs), Arc::new(rhs))
    }

    pub fn func(func: Func, arg: Expr<T>) -> Self {
        Expr::Func(func, Arc::new(arg))
    }

    /// `+ - * / ^` by name
    pub fn binary_from_name(name: &str, lhs: Expr<T>, rhs: Expr<T>) -> Result<Self> {
        Ok(Expr::binary(BinOp::from_name(name)?, lhs, rhs))
    }

    /// `sin cos ln exp` by name
    pub fn func_from_name(name: &str, arg: Expr<T>) -> Result<Self> {
        Ok(Expr::func(Func::from_name(name)?, arg))
    }

    pub fn pow(self, rhs: Expr<T>) -> Self {
        Expr::binary(BinOp::Pow, self, rhs)
    }

    pub fn sin(self) -> Self {
        Expr::func(Func::Sin, self)
    }

    pub fn cos(self) -> Self {
        Expr::func(Func::Cos, self)
    }

    pub fn ln(self) -> Self {
        Expr::func(Func::Ln, self)
    }

    pub fn exp(self) -> Self {
        Expr::func(Func::Exp, self)
    }

    /// precedence of the top node, `None` for leaves and functions
    pub fn precedence(&self) -> Option<OpPrecedence> {
        match self {
            Expr::Binary(op, _, _) => Some(op.precedence()),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    // SUBSTITUTION

    /// Replaces every variable that has an entry in `bindings` with a constant holding the
    /// bound value. The receiver is left untouched, a new tree is returned.
    pub fn substitute(&self, bindings: &HashMap<String, T>) -> Expr<T> {
        match self {
            Expr::Var(name) => match bindings.get(name) {
                Some(value) => Expr::value(*value),
                None => self.clone(),
            },
            Expr::Const(_) => self.clone(),
            Expr::Binary(op, lhs, rhs) => Expr::Binary(
                *op,
                Arc::new(lhs.substitute(bindings)),
                Arc::new(rhs.substitute(bindings)),
            ),
            Expr::Func(func, arg) => Expr::Func(*func, Arc::new(arg.substitute(bindings))),
        }
    }

    /// shorthand for substituting a single variable
    pub fn set_variable(&self, var: &str, value: T) -> Expr<T> {
        let bindings = HashMap::from([(var.to_string(), value)]);
        self.substitute(&bindings)
    }

    /// sorted names of all free variables
    pub fn variables(&self) -> Vec<String> {
        fn collect<T: Domain>(expr: &Expr<T>, found: &mut BTreeSet<String>) {
            match expr {
                Expr::Var(name) => {
                    found.insert(name.clone());
                }
                Expr::Const(_) => {}
                Expr::Binary(_, lhs, rhs) => {
                    collect(lhs, found);
                    collect(rhs, found);
                }
                Expr::Func(_, arg) => collect(arg, found),
            }
        }
        let mut found = BTreeSet::new();
        collect(self, &mut found);
        found.into_iter().collect()
    }

    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Binary(_, lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Func(_, arg) => arg.contains_variable(var_name),
        }
    }
}
