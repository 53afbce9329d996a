#![allow(non_snake_case)]

use crate::symbolic::error::Result;
use crate::symbolic::expression::{ComplexExpr, Expr, RealExpr};
use crate::symbolic::settings::Settings;
use log::{LevelFilter, info};
use num_complex::Complex64;
use std::collections::HashMap;

#[allow(dead_code)]
pub fn expression_examples(example: usize) -> Result<()> {
    match example {
        0 => {
            // FUNCTION OF MULTIPLE VARIABLES
            //parse expression from string to symbolic expression
            let input = "exp(x) + ln(y)";
            // here you've got symbolic expression
            let parsed_expression = RealExpr::parse_expression(input)?;
            println!(" parsed_expression {}", parsed_expression);
            // return vec of all variables
            let variables = parsed_expression.variables();
            println!("variables {:?}", variables);
            // differentiate with respect to x and y
            let df_dx = parsed_expression.differentiate("x");
            let df_dy = parsed_expression.differentiate("y");
            println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
            // substitute values and evaluate
            let bindings = HashMap::from([("x".to_string(), 1.0), ("y".to_string(), 2.0)]);
            let f_res = parsed_expression.evaluate_with(&bindings)?;
            println!("f(1, 2) = {}", f_res);
        }
        1 => {
            // IMPLICIT MULTIPLICATION AND PRECEDENCE
            for input in ["2x^2 + 3x", "3sin(x)cos(x)", "(x + 1)(x - 1)", "a * b / c"] {
                let parsed_expression = RealExpr::parse_expression(input)?;
                println!("{} -> {}", input, parsed_expression);
            }
        }
        2 => {
            // FUNCTION OF 1 VARIABLE
            let f = RealExpr::parse_expression("x + exp(x)")?;
            let f_res = f.set_variable("x", 1.0).evaluate()?;
            println!("f(1) = {}", f_res);
            let start = 0.0;
            let end = 10.0;
            let num_values = 100;
            let max_norm = 1e-6;
            // compare numerical and analtical derivatives for a given linspace defined by start, end values and number of values.
            // a norm of the difference between the two of them is returned, and the answer is true if the norm is below max_norm
            let (norm, res) = f.compare_num1D("x", start, end, num_values, max_norm)?;
            println!("norm = {}, res = {}", norm, res);
            let d3f = f.nth_derivative("x", 3);
            println!("d3f/dx3 = {}", d3f);
        }
        3 => {
            // BUILDING EXPRESSIONS IN CODE
            let x: RealExpr = Expr::var("x");
            let mut f = x.clone().pow(Expr::real(3.0));
            f -= Expr::real(2.0) * x.clone().sin();
            f /= x.exp();
            println!("f = {}", f);
            println!("df/dx = {}", f.differentiate("x"));
        }
        4 => {
            // COMPLEX DOMAIN
            let f = ComplexExpr::parse_expression("exp(i*x) + 2i")?;
            let value = f
                .set_variable("x", Complex64::new(std::f64::consts::PI, 0.0))
                .evaluate()?;
            println!("{} at x = pi: {}", f, value);
            // a general complex value is stored as the sum of a real and an imaginary leaf
            let g = f.set_variable("x", Complex64::new(1.0, 2.0));
            println!("substituted: {}", g);
            println!("d/dx: {}", f.differentiate("x"));
        }
        5 => {
            // SETTINGS AND LOGGING
            let mut settings = Settings::from_toml_str(
                r#"
                case_sensitive = true
                log_level = "debug"
                "#,
            )?;
            settings.set_log_level(LevelFilter::Debug);
            settings.init_logger();
            let f: RealExpr = settings.parse("X * x")?;
            info!("variables of {}: {:?}", f, f.variables());
            let df = f.nth_derivative("x", 1);
            info!("d/dx = {}", df);
        }
        _ => {
            println!("example {} not found", example);
        }
    }
    Ok(())
}
