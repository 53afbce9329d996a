/// errors raised while lexing, parsing, building or evaluating expressions
pub mod error;
/// the scalar types an expression tree is generic over: `f64` and `Complex64`
pub mod numeric_domain;
///____________________________________________________________________________________________________________________________
/// # Lexer
/// turns a String expression into tokens, inserting the implied multiplication signs
///# Example
/// ```
/// use rusted_calculus::symbolic::lexer::Lexer;
/// let mut lexer = Lexer::new("3sin(x)", false, false);
/// let text: Vec<String> = lexer.tokenize().unwrap().into_iter().map(|t| t.text).collect();
/// assert_eq!(text, vec!["3", "*", "sin(", "x", ")", "EOL"]);
/// ```
pub mod lexer;
/// precedence-climbing parser from tokens to an expression tree
///# Example
/// ```
/// use rusted_calculus::symbolic::parser::parse;
/// use rusted_calculus::symbolic::expression::RealExpr;
/// let f: RealExpr = parse("2x^2 + 1", false).unwrap();
/// println!(" parsed_expression {}", f);
/// assert_eq!(f.set_variable("x", 3.0).evaluate().unwrap(), 19.0);
/// ```
pub mod parser;
///____________________________________________________________________________________________________________________________
/// # Symbolic expressions
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) substitutes values for variables and evaluates the expression
/// 3) differentiates it symbolically
/// 4) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use rusted_calculus::symbolic::expression::RealExpr;
/// let input = "exp(x) + ln(y)";
/// // here you've got symbolic expression
/// let parsed_expression = RealExpr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let variables = parsed_expression.variables();
/// println!("variables {:?}", variables);
/// // differentiate with respect to x and y
/// let df_dx = parsed_expression.differentiate("x");
/// let df_dy = parsed_expression.differentiate("y");
/// println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
/// let f_res = parsed_expression
///     .set_variable("x", 0.0)
///     .set_variable("y", 1.0)
///     .evaluate()
///     .unwrap();
/// assert_eq!(f_res, 1.0);
/// ```
/// Example2#
/// ```
/// use rusted_calculus::symbolic::expression::ComplexExpr;
/// use num_complex::Complex64;
/// // in the complex domain `i` is the imaginary unit
/// let f = ComplexExpr::parse_expression("x^2 + 2i").unwrap();
/// let res = f.set_variable("x", Complex64::new(1.0, 1.0)).evaluate().unwrap();
/// println!("f(1 + i) = {}", res);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod expression;
pub mod expression_derivatives;
/// parser options and logger setup, in code or from TOML
pub mod settings;
pub mod utils;

#[cfg(test)]
mod expression_tests;
