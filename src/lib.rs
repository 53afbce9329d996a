// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Examples;
pub mod symbolic;

pub use symbolic::error::{ExprError, Result};
pub use symbolic::expression::{ComplexExpr, Expr, RealExpr};
pub use symbolic::parser::parse;
pub use symbolic::settings::Settings;
