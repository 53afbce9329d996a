//! # Numeric domain
//!
//! The scalar type the expression tree is generic over. Two domains exist:
//! - `f64` - plain real numbers, `i` is an ordinary variable name
//! - `Complex64` - complex numbers; a single constant leaf must be purely real or purely
//!   imaginary, a general complex value is stored as the sum of two leaves
//!
//! The trait only exposes what evaluation and differentiation need: field arithmetic
//! (through the `std::ops` bounds), power, exp, ln, sin, cos and the two identities.

use crate::symbolic::error::{ExprError, Result};
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

pub trait Domain:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// true when the lexer must treat `i` as the imaginary unit
    const IS_COMPLEX: bool;

    /// converts a real literal (number token, rule constants like -1 or 2)
    fn from_real(value: f64) -> Self;
    /// the value of the `i` token, `None` for domains without one
    fn imaginary_unit() -> Option<Self>;

    fn pow(self, exponent: Self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;

    /// checks that the value may be stored in a single constant leaf
    fn check_constant(self) -> Result<Self> {
        Ok(self)
    }
    /// splits a value into leaf-sized parts: `(value, None)` if it already fits one leaf
    fn split_leaves(self) -> (Self, Option<Self>) {
        (self, None)
    }
    /// text form of a constant leaf
    fn render(&self) -> String;
}

impl Domain for f64 {
    const IS_COMPLEX: bool = false;

    fn from_real(value: f64) -> Self {
        value
    }
    fn imaginary_unit() -> Option<Self> {
        None
    }

    fn pow(self, exponent: Self) -> Self {
        f64::powf(self, exponent)
    }
    fn exp(self) -> Self {
        f64::exp(self)
    }
    fn ln(self) -> Self {
        f64::ln(self)
    }
    fn sin(self) -> Self {
        f64::sin(self)
    }
    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn render(&self) -> String {
        format!("{}", self)
    }
}

impl Domain for Complex64 {
    const IS_COMPLEX: bool = true;

    fn from_real(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }
    fn imaginary_unit() -> Option<Self> {
        Some(Complex64::i())
    }

    fn pow(self, exponent: Self) -> Self {
        self.powc(exponent)
    }
    fn exp(self) -> Self {
        Complex64::exp(self)
    }
    fn ln(self) -> Self {
        Complex64::ln(self)
    }
    fn sin(self) -> Self {
        Complex64::sin(self)
    }
    fn cos(self) -> Self {
        Complex64::cos(self)
    }

    fn check_constant(self) -> Result<Self> {
        if self.re != 0.0 && self.im != 0.0 {
            return Err(ExprError::InvalidComplexConstant {
                re: self.re,
                im: self.im,
            });
        }
        Ok(self)
    }

    fn split_leaves(self) -> (Self, Option<Self>) {
        if self.re != 0.0 && self.im != 0.0 {
            (
                Complex64::new(self.re, 0.0),
                Some(Complex64::new(0.0, self.im)),
            )
        } else {
            (self, None)
        }
    }

    fn render(&self) -> String {
        if self.re != 0.0 {
            return format!("{}", self.re);
        }
        if self.im != 0.0 {
            if self.im == -1.0 {
                return "-i".to_string();
            }
            if self.im == 1.0 {
                return "i".to_string();
            }
            return format!("{}i", self.im);
        }
        // one of the parts is always zero for a leaf
        "0".to_string()
    }
}
