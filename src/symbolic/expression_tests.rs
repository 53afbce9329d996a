use crate::symbolic::error::ExprError;
use crate::symbolic::expression::{BinOp, ComplexExpr, Expr, Func, RealExpr};
use num_complex::Complex64;
use std::collections::HashMap;
use std::f64::consts::{E, PI};
//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn x() -> RealExpr {
        Expr::var("x")
    }

    fn at(expr: &RealExpr, x: f64) -> f64 {
        expr.set_variable("x", x).evaluate().unwrap()
    }

    //___________________________________CONSTRUCTION____________________________________
    #[test]
    fn test_add_assign() {
        let mut expr = x();
        expr += Expr::real(2.0);
        assert_eq!(expr, Expr::binary(BinOp::Add, x(), Expr::real(2.0)));
    }

    #[test]
    fn test_sub_mul_div_assign() {
        let mut expr = x();
        expr -= Expr::real(1.0);
        expr *= Expr::var("y");
        expr /= Expr::real(4.0);
        let expected = Expr::binary(
            BinOp::Div,
            Expr::binary(
                BinOp::Mul,
                Expr::binary(BinOp::Sub, x(), Expr::real(1.0)),
                Expr::var("y"),
            ),
            Expr::real(4.0),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_neg() {
        let neg_expr = -x();
        assert_eq!(
            neg_expr,
            Expr::Binary(BinOp::Mul, Arc::new(Expr::real(-1.0)), Arc::new(x()))
        );
        assert_eq!(at(&neg_expr, 3.0), -3.0);
    }

    #[test]
    fn test_builders_by_name() {
        let expr = RealExpr::binary_from_name("^", x(), Expr::real(2.0)).unwrap();
        assert_eq!(expr, x().pow(Expr::real(2.0)));
        let expr = RealExpr::func_from_name("SIN", x()).unwrap();
        assert_eq!(expr, Expr::func(Func::Sin, x()));
        assert_eq!(
            RealExpr::binary_from_name("%", x(), x()),
            Err(ExprError::UnknownOperator("%".to_string()))
        );
        assert_eq!(
            RealExpr::func_from_name("tan", x()),
            Err(ExprError::UnknownFunction("tan".to_string()))
        );
    }

    #[test]
    fn test_variables() {
        let expr = RealExpr::parse_expression("y*sin(x) + z + x").unwrap();
        assert_eq!(expr.variables(), vec!["x", "y", "z"]);
        assert!(expr.contains_variable("z"));
        assert!(!expr.contains_variable("w"));
        assert!(RealExpr::real(1.0).variables().is_empty());
    }

    //___________________________________EVALUATION____________________________________
    #[test]
    fn test_evaluate_functions() {
        assert_eq!(RealExpr::real(0.0).sin().evaluate().unwrap(), 0.0);
        assert_eq!(RealExpr::real(1.0).ln().evaluate().unwrap(), 0.0);
        assert_eq!(RealExpr::real(0.0).exp().evaluate().unwrap(), 1.0);
        assert_eq!(RealExpr::real(0.0).cos().evaluate().unwrap(), 1.0);
    }

    #[test]
    fn test_evaluate_follows_ieee() {
        let div_zero = RealExpr::real(1.0) / RealExpr::real(0.0);
        assert!(div_zero.evaluate().unwrap().is_infinite());
        let ln_negative = RealExpr::real(-1.0).ln();
        assert!(ln_negative.evaluate().unwrap().is_nan());
    }

    #[test]
    fn test_substitute() {
        let f = RealExpr::parse_expression("x^2 + x").unwrap();
        let bindings = HashMap::from([("x".to_string(), 3.0)]);
        let g = f.substitute(&bindings);
        assert_eq!(g.evaluate().unwrap(), 12.0);
        assert!(g.variables().is_empty());
        // input tree is not touched
        assert_eq!(f.variables(), vec!["x"]);
        assert_eq!(f.render(), "x ^ 2 + x");
    }

    #[test]
    fn test_substitute_keeps_unbound_variables() {
        let f = RealExpr::parse_expression("x + y").unwrap();
        let g = f.set_variable("x", 1.0);
        assert_eq!(g, Expr::real(1.0) + Expr::var("y"));
        assert_eq!(
            g.evaluate(),
            Err(ExprError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_unbound_variable_reports_first_in_walk() {
        let f = RealExpr::parse_expression("a * b").unwrap();
        assert_eq!(f.evaluate(), Err(ExprError::UnboundVariable("a".to_string())));
    }

    #[test]
    fn test_evaluate_with() {
        let f = RealExpr::parse_expression("x*y - 1").unwrap();
        let bindings = HashMap::from([("x".to_string(), 2.0), ("y".to_string(), 5.0)]);
        assert_eq!(f.evaluate_with(&bindings).unwrap(), 9.0);
    }

    //___________________________________DERIVATIVES____________________________________
    #[test]
    fn test_diff_leaves() {
        assert_eq!(RealExpr::real(5.0).differentiate("x"), Expr::real(0.0));
        assert_eq!(x().differentiate("x"), Expr::real(1.0));
        assert_eq!(Expr::<f64>::var("y").differentiate("x"), Expr::real(0.0));
    }

    #[test]
    fn test_diff_is_not_simplified() {
        let f = RealExpr::real(2.0) * x();
        assert_eq!(f.differentiate("x").render(), "0 * x + 2 * 1");
        let f = x() - RealExpr::real(3.0);
        assert_eq!(f.differentiate("x"), Expr::real(1.0) - Expr::real(0.0));
    }

    #[test]
    fn test_diff_functions_structure() {
        assert_eq!(x().sin().differentiate("x").render(), "cos(x) * 1");
        assert_eq!(x().cos().differentiate("x").render(), "-1 * sin(x) * 1");
        assert_eq!(x().ln().differentiate("x").render(), "1 / x * 1");
        assert_eq!(x().exp().differentiate("x").render(), "exp(x) * 1");
    }

    #[test]
    fn test_diff_functions_values() {
        assert_relative_eq!(at(&x().sin().differentiate("x"), 1.0), 1.0_f64.cos());
        assert_relative_eq!(at(&x().cos().differentiate("x"), 1.0), -1.0_f64.sin());
        assert_relative_eq!(at(&x().ln().differentiate("x"), 2.0), 0.5);
        assert_relative_eq!(at(&x().exp().differentiate("x"), 1.0), E);
    }

    #[test]
    fn test_diff_power() {
        let f = x().pow(RealExpr::real(2.0));
        assert_relative_eq!(at(&f.differentiate("x"), 3.0), 6.0);
        // variable exponent: d/dx 2^x = 2^x ln(2)
        let g = RealExpr::real(2.0).pow(x());
        assert_relative_eq!(at(&g.differentiate("x"), 1.5), 2.0_f64.powf(1.5) * 2.0_f64.ln());
    }

    #[test]
    fn test_diff_product_at_zero() {
        let f = x().sin() * x();
        assert_eq!(at(&f.differentiate("x"), 0.0), 0.0);
        assert_relative_eq!(
            at(&f.differentiate("x"), 1.0),
            1.0_f64.cos() + 1.0_f64.sin()
        );
    }

    #[test]
    fn test_diff_chain_rule() {
        let f = RealExpr::parse_expression("sin(x^2)").unwrap();
        let x0: f64 = 0.8;
        assert_relative_eq!(
            at(&f.differentiate("x"), x0),
            (x0 * x0).cos() * 2.0 * x0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_diff_quotient_adds_numerator_terms() {
        // numerator is f'g + fg', so d/dx x/(x+1) at 1 is (2 + 1) / 4
        let f = RealExpr::parse_expression("x / (x + 1)").unwrap();
        let df = f.differentiate("x");
        assert_eq!(df.render(), "(1 * (x + 1) + x * (1 + 0)) / (x + 1) ^ 2");
        assert_relative_eq!(at(&df, 1.0), 0.75);
    }

    #[test]
    fn test_diff_shares_input_subtrees() {
        let f = RealExpr::parse_expression("x * exp(x)").unwrap();
        let df = f.differentiate("x");
        let (Expr::Binary(_, f_lhs, f_rhs), Expr::Binary(BinOp::Add, first, second)) = (&f, &df)
        else {
            panic!("unexpected shape {}", df);
        };
        let (Expr::Binary(_, _, g), Expr::Binary(_, fx, _)) = (&**first, &**second)
        else {
            panic!("unexpected shape {}", df);
        };
        assert!(Arc::ptr_eq(f_rhs, g));
        assert!(Arc::ptr_eq(f_lhs, fx));
    }

    #[test]
    fn test_nth_derivative() {
        let f = RealExpr::parse_expression("x*x*x").unwrap();
        assert_eq!(f.nth_derivative("x", 0), f);
        assert_relative_eq!(at(&f.nth_derivative("x", 2), 2.0), 12.0);
        assert_relative_eq!(at(&f.nth_derivative("x", 3), 2.0), 6.0);
    }

    #[test]
    fn test_compare_num1D() {
        let f = RealExpr::parse_expression("sin(x)*x + exp(x)").unwrap();
        let (norm, res) = f.compare_num1D("x", 0.5, 2.0, 100, 1e-6).unwrap();
        assert!(res, "norm = {}", norm);
        let f = RealExpr::parse_expression("x^2 + ln(x)").unwrap();
        let (_, res) = f.compare_num1D("x", 1.0, 3.0, 50, 1e-6).unwrap();
        assert!(res);
    }

    #[test]
    fn test_compare_num1D_detects_quotient_rule() {
        let f = RealExpr::parse_expression("x / (x + 1)").unwrap();
        let (norm, res) = f.compare_num1D("x", 1.0, 2.0, 10, 1e-6).unwrap();
        assert!(!res);
        assert!(norm > 0.1);
    }

    #[test]
    fn test_compare_num1D_unbound() {
        let f = RealExpr::parse_expression("x * y").unwrap();
        assert_eq!(
            f.compare_num1D("x", 0.0, 1.0, 10, 1e-6),
            Err(ExprError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_compare_num1D_rejects_degenerate_grid() {
        let f = RealExpr::parse_expression("x^2").unwrap();
        for (start, end, num_values) in [(1.0, 2.0, 0), (1.0, 2.0, 1), (1.0, 1.0, 10)] {
            assert!(
                matches!(
                    f.compare_num1D("x", start, end, num_values, 1e-6),
                    Err(ExprError::InvalidArgument(_))
                ),
                "[{}, {}] with {} points",
                start,
                end,
                num_values
            );
        }
    }

    //___________________________________RENDERING____________________________________
    #[test]
    fn test_render_parenthesises_lower_precedence_child() {
        let a = || RealExpr::var("a");
        let b = || RealExpr::var("b");
        let c = || RealExpr::var("c");
        assert_eq!(((a() + b()) * c()).render(), "(a + b) * c");
        assert_eq!((a() * (b() + c())).render(), "a * (b + c)");
        assert_eq!(((a() * b()) / c()).render(), "(a * b) / c");
        assert_eq!((a() * (b() / c())).render(), "a * b / c");
        assert_eq!((a() + b()).pow(c()).render(), "(a + b) ^ c");
        assert_eq!((a() + b()).sin().render(), "sin(a + b)");
    }

    #[test]
    fn test_render_equal_precedence_is_not_parenthesised() {
        let a = || RealExpr::var("a");
        let b = || RealExpr::var("b");
        let c = || RealExpr::var("c");
        assert_eq!((a() - (b() - c())).render(), "a - b - c");
        assert_eq!(a().pow(b().pow(c())).render(), "a ^ b ^ c");
        assert_eq!((a() / (b() / c())).render(), "a / b / c");
    }

    #[test]
    fn test_render_constants() {
        assert_eq!(RealExpr::real(2.0).render(), "2");
        assert_eq!(RealExpr::real(0.25).render(), "0.25");
        assert_eq!(RealExpr::real(-1.0).render(), "-1");
        assert_eq!(
            ComplexExpr::constant(Complex64::new(0.0, 1.0)).unwrap().render(),
            "i"
        );
        assert_eq!(
            ComplexExpr::value(Complex64::new(3.0, 2.0)).render(),
            "3 + 2i"
        );
    }

    #[test]
    fn test_render_parse_round_trip() {
        for input in [
            "2 * x + sin(x) / (x + 1)",
            "exp(x ^ 2) - ln(x + 3) * cos(x)",
            "(x - 1) * (x + 1) ^ 3",
        ] {
            let f = RealExpr::parse_expression(input).unwrap();
            assert_eq!(f.render(), input);
            let g = RealExpr::parse_expression(&f.render()).unwrap();
            assert_eq!(f, g);
            assert_eq!(at(&f, 0.7), at(&g, 0.7));
        }
    }

    //___________________________________COMPLEX DOMAIN____________________________________
    #[test]
    fn test_complex_constant_invariant() {
        assert_eq!(
            ComplexExpr::constant(Complex64::new(1.0, 1.0)),
            Err(ExprError::InvalidComplexConstant { re: 1.0, im: 1.0 })
        );
        assert!(ComplexExpr::constant(Complex64::new(0.0, 2.0)).is_ok());
        assert!(ComplexExpr::constant(Complex64::new(2.0, 0.0)).is_ok());
    }

    #[test]
    fn test_complex_value_splits_into_two_leaves() {
        let expr = ComplexExpr::value(Complex64::new(3.0, 2.0));
        let expected = Expr::binary(
            BinOp::Add,
            Expr::real(3.0),
            Expr::constant(Complex64::new(0.0, 2.0)).unwrap(),
        );
        assert_eq!(expr, expected);
        assert_eq!(expr.evaluate().unwrap(), Complex64::new(3.0, 2.0));
    }

    #[test]
    fn test_complex_substitution() {
        let f = ComplexExpr::parse_expression("x * x").unwrap();
        let g = f.set_variable("x", Complex64::new(1.0, 2.0));
        assert_eq!(g.render(), "(1 + 2i) * (1 + 2i)");
        assert_eq!(g.evaluate().unwrap(), Complex64::new(-3.0, 4.0));
    }

    #[test]
    fn test_complex_euler() {
        let f = ComplexExpr::parse_expression("exp(i*x)").unwrap();
        let value = f
            .set_variable("x", Complex64::new(PI, 0.0))
            .evaluate()
            .unwrap();
        assert_relative_eq!(value.re, -1.0, epsilon = 1e-12);
        assert!(value.im.abs() < 1e-12);
    }

    #[test]
    fn test_complex_derivative() {
        // d/dx exp(i*x) = i*exp(i*x)
        let f = ComplexExpr::parse_expression("exp(i*x)").unwrap();
        let x0 = Complex64::new(0.3, 0.0);
        let df = f.differentiate("x").set_variable("x", x0).evaluate().unwrap();
        let expected = Complex64::i() * (Complex64::i() * x0).exp();
        assert_relative_eq!(df.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(df.im, expected.im, epsilon = 1e-12);
    }

    //___________________________________SHARING____________________________________
    #[test]
    fn test_tree_is_shared_between_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<RealExpr>();
        assert_send_sync::<ComplexExpr>();

        let f = Arc::new(RealExpr::parse_expression("x^2 + sin(x)").unwrap());
        let results: Vec<f64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|k| {
                    let f = Arc::clone(&f);
                    s.spawn(move || at(&f.differentiate("x"), k as f64 + 1.0))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for (k, value) in results.iter().enumerate() {
            let x0 = k as f64 + 1.0;
            assert_relative_eq!(*value, 2.0 * x0 + x0.cos(), epsilon = 1e-12);
        }
    }
}
