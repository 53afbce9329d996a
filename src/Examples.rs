//! examples of usage of rusted_calculus
/// parsing, evaluation, substitution and differentiation examples
pub mod expression_examples;
