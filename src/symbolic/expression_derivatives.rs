//! # Expression derivatives and evaluation
//!
//! Extends `Expr<T>` with the numeric and analytic operations:
//! - `evaluate()` / `evaluate_with(bindings)` - numeric value of a tree
//! - `differentiate(var)` - structural derivative, built without any simplification
//! - `nth_derivative(var, n)` - repeated differentiation
//! - `compare_num1D(...)` - checks an analytic derivative against a central finite
//!   difference (real domain only)
//! - `parse_expression(input)` - string to symbolic expression
//!
//! Differentiation rules:
//! - sum/difference: `(f ± g)' = f' ± g'`
//! - product: `(f*g)' = f'*g + f*g'`
//! - quotient: `(f/g)' = (f'*g + f*g') / g^2`
//! - general power: `(f^g)' = f^g * (f'*g/f + ln(f)*g')`
//! - chain rule for `sin`, `cos`, `ln`, `exp`
use crate::symbolic::error::{ExprError, Result};
use crate::symbolic::expression::{BinOp, Expr, Func};
use crate::symbolic::numeric_domain::Domain;
use crate::symbolic::parser::parse;
use crate::symbolic::utils::{linspace, norm, numerical_derivative};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

impl<T: Domain> Expr<T> {
    // DIRECT EXPRESSION EVALUATION

    /// Numeric value of a tree without free variables.
    ///
    /// # Errors
    /// `UnboundVariable` for the first variable met in a depth-first walk.
    pub fn evaluate(&self) -> Result<T> {
        match self {
            Expr::Const(c) => Ok(c.value()),
            Expr::Var(name) => Err(ExprError::UnboundVariable(name.clone())),
            Expr::Binary(op, lhs, rhs) => {
                let lhs_val = lhs.evaluate()?;
                let rhs_val = rhs.evaluate()?;
                Ok(op.apply(lhs_val, rhs_val))
            }
            Expr::Func(func, arg) => Ok(func.apply(arg.evaluate()?)),
        }
    }

    /// substitutes the bindings, then evaluates the resulting tree
    pub fn evaluate_with(&self, bindings: &HashMap<String, T>) -> Result<T> {
        self.substitute(bindings).evaluate()
    }

    // DIFFERENTIATION

    /// Structural derivative with respect to `by`.
    ///
    /// The result is not simplified: `d/dx(2*x)` is `0 * x + 2 * 1`.
    /// Untouched sub-trees of `self` are shared with the result, `self` is not modified.
    ///
    /// # Examples
    /// ```
    /// use rusted_calculus::symbolic::expression::RealExpr;
    /// let f = RealExpr::parse_expression("x^2").unwrap();
    /// let df_dx = f.differentiate("x");
    /// assert_eq!(df_dx.render(), "x ^ 2 * ((1 * 2) / x + ln(x) * 0)");
    /// ```
    pub fn differentiate(&self, by: &str) -> Expr<T> {
        match self {
            Expr::Const(_) => Expr::real(0.0),
            Expr::Var(name) => {
                if name == by {
                    Expr::real(1.0)
                } else {
                    Expr::real(0.0)
                }
            }
            Expr::Binary(op, lhs, rhs) => Self::differentiate_binary(*op, lhs, rhs, by),
            Expr::Func(func, arg) => {
                let darg = arg.differentiate(by);
                let outer = match func {
                    Func::Sin => Expr::Func(Func::Cos, arg.clone()),
                    Func::Cos => Expr::binary(
                        BinOp::Mul,
                        Expr::real(-1.0),
                        Expr::Func(Func::Sin, arg.clone()),
                    ),
                    Func::Ln => Expr::Binary(BinOp::Div, Arc::new(Expr::real(1.0)), arg.clone()),
                    Func::Exp => self.clone(),
                };
                Expr::binary(BinOp::Mul, outer, darg)
            }
        }
    }

    fn differentiate_binary(
        op: BinOp,
        lhs: &Arc<Expr<T>>,
        rhs: &Arc<Expr<T>>,
        by: &str,
    ) -> Expr<T> {
        let dlhs = lhs.differentiate(by);
        let drhs = rhs.differentiate(by);
        match op {
            BinOp::Add | BinOp::Sub => Expr::binary(op, dlhs, drhs),
            BinOp::Mul => Expr::binary(
                BinOp::Add,
                Expr::Binary(BinOp::Mul, Arc::new(dlhs), rhs.clone()),
                Expr::Binary(BinOp::Mul, lhs.clone(), Arc::new(drhs)),
            ),
            // numerator adds f'*g and f*g' (no minus sign)
            BinOp::Div => Expr::binary(
                BinOp::Div,
                Expr::binary(
                    BinOp::Add,
                    Expr::Binary(BinOp::Mul, Arc::new(dlhs), rhs.clone()),
                    Expr::Binary(BinOp::Mul, lhs.clone(), Arc::new(drhs)),
                ),
                Expr::Binary(BinOp::Pow, rhs.clone(), Arc::new(Expr::real(2.0))),
            ),
            BinOp::Pow => Expr::binary(
                BinOp::Mul,
                Expr::Binary(BinOp::Pow, lhs.clone(), rhs.clone()),
                Expr::binary(
                    BinOp::Add,
                    Expr::Binary(
                        BinOp::Div,
                        Arc::new(Expr::Binary(BinOp::Mul, Arc::new(dlhs), rhs.clone())),
                        lhs.clone(),
                    ),
                    Expr::binary(
                        BinOp::Mul,
                        Expr::Func(Func::Ln, lhs.clone()),
                        drhs,
                    ),
                ),
            ),
        }
    }

    /// n-th derivative by repeated differentiation, `n == 0` returns a copy of `self`
    pub fn nth_derivative(&self, by: &str, n: usize) -> Expr<T> {
        let mut derivative = self.clone();
        for _ in 0..n {
            derivative = derivative.differentiate(by);
        }
        debug!("d^{}/d{}^{} ({}) = {}", n, by, n, self, derivative);
        derivative
    }

    // EXPRESSION PARSING FROM STRINGS

    /// Parses a mathematical expression, case-insensitively.
    ///
    /// # Supported Syntax
    /// - Constants: 3, 0.25 (no exponent notation, no sign)
    /// - Variables: x, y, var_name
    /// - Operators: +, -, *, /, ^ (all left-associative)
    /// - Functions: sin, cos, ln, exp
    /// - Implicit multiplication: 2x, 3(x+1), (x)(y)
    /// - Imaginary unit `i` for the complex domain
    pub fn parse_expression(input: &str) -> Result<Expr<T>> {
        parse(input, false)
    }
}

impl Expr<f64> {
    /// Compares the analytic derivative with a central finite difference.
    ///
    /// Both are evaluated on `num_values` points of `[start, end]` (the expression must not
    /// contain any variable other than `var`); the norm of their difference is returned
    /// together with `norm < max_norm`.
    ///
    /// # Errors
    /// `InvalidArgument` for fewer than 2 points or an empty interval, `UnboundVariable`
    /// for any other free variable.
    #[allow(non_snake_case)]
    pub fn compare_num1D(
        &self,
        var: &str,
        start: f64,
        end: f64,
        num_values: usize,
        max_norm: f64,
    ) -> Result<(f64, bool)> {
        if num_values < 2 {
            return Err(ExprError::InvalidArgument(format!(
                "at least 2 points are needed, got {}",
                num_values
            )));
        }
        if start == end {
            return Err(ExprError::InvalidArgument(format!(
                "empty interval [{}, {}]",
                start, end
            )));
        }
        let diff = self.differentiate(var);
        let domain = linspace(start, end, num_values);
        let analytical_derivative = domain
            .iter()
            .map(|x| diff.evaluate_with(&HashMap::from([(var.to_string(), *x)])))
            .collect::<Result<Vec<f64>>>()?;
        // surface unbound variables before the closure below swallows them
        self.evaluate_with(&HashMap::from([(var.to_string(), start)]))?;
        let function = |x: f64| {
            self.evaluate_with(&HashMap::from([(var.to_string(), x)]))
                .unwrap_or(f64::NAN)
        };
        let step = (1.0 / 1e4) * (end - start) / (num_values as f64 - 1.0);
        let numerical = numerical_derivative(function, &domain, step);
        let norma_val = norm(&analytical_derivative, &numerical);
        debug!(
            "compare d/d{} ({}) on [{}, {}]: norm = {}",
            var, self, start, end, norma_val
        );
        Ok((norma_val, norma_val < max_norm))
    }
}
