//! # Parser
//!
//! Precedence climbing recursive descent over the lexer's token stream.
//!
//! ```text
//! expression := primary bin_op_rhs(AddSub)
//! primary    := real_number | imaginary_unit | identifier
//!             | '(' expression ')'
//!             | func_name '(' expression ')'
//! ```
//! Precedence levels grow as AddSub < Mul < Div < Pow. The right hand side only recurses
//! when the next operator binds strictly tighter, so every operator, `^` included, is
//! left-associative: `2^3^2` is `(2^3)^2`.
//!
//!# Example
//! ```
//! use rusted_calculus::symbolic::parser::parse;
//! use rusted_calculus::symbolic::expression::RealExpr;
//! let expr: RealExpr = parse("2 + 3 * 4", false).unwrap();
//! assert_eq!(expr.evaluate().unwrap(), 14.0);
//! ```
use crate::symbolic::error::{ExprError, Result};
use crate::symbolic::expression::{BinOp, Expr, OpPrecedence};
use crate::symbolic::lexer::{Lexer, Token, TokenKind};
use crate::symbolic::numeric_domain::Domain;
use log::debug;
use std::marker::PhantomData;

/// parses `input` into an expression tree over the domain `T`
pub fn parse<T: Domain>(input: &str, case_sensitive: bool) -> Result<Expr<T>> {
    Parser::<T>::new(input, case_sensitive)?.parse()
}

pub struct Parser<T: Domain> {
    lexer: Lexer,
    cur_token: Token,
    _domain: PhantomData<T>,
}

impl<T: Domain> Parser<T> {
    pub fn new(input: &str, case_sensitive: bool) -> Result<Self> {
        let mut lexer = Lexer::new(input, case_sensitive, T::IS_COMPLEX);
        let cur_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            cur_token,
            _domain: PhantomData,
        })
    }

    pub fn parse(mut self) -> Result<Expr<T>> {
        let expr = self.parse_expression()?;
        if self.cur_token.kind != TokenKind::End {
            return Err(ExprError::syntax(&self.cur_token, "expected end of input"));
        }
        debug!("parsed expression: {}", expr);
        Ok(expr)
    }

    fn advance(&mut self) -> Result<()> {
        self.cur_token = self.lexer.next_token()?;
        Ok(())
    }

    fn consume(&mut self, expect: TokenKind) -> Result<()> {
        if self.cur_token.kind != expect {
            return Err(ExprError::syntax(
                &self.cur_token,
                format!("expected {}", expect),
            ));
        }
        self.advance()
    }

    fn parse_real_number(&mut self) -> Result<Expr<T>> {
        let value: f64 = self
            .cur_token
            .text
            .parse()
            .map_err(|_| ExprError::syntax(&self.cur_token, "invalid number"))?;
        self.advance()?;
        Ok(Expr::real(value))
    }

    fn parse_imaginary_unit(&mut self) -> Result<Expr<T>> {
        let Some(unit) = T::imaginary_unit() else {
            return Err(ExprError::syntax(
                &self.cur_token,
                "imaginary unit in a real expression",
            ));
        };
        self.advance()?;
        Expr::constant(unit)
    }

    fn parse_identifier(&mut self) -> Result<Expr<T>> {
        let expr = Expr::var(&self.cur_token.text);
        self.advance()?;
        Ok(expr)
    }

    /// parentheses_expr
    ///   ::= '(' expression ')'
    fn parse_parentheses_expr(&mut self) -> Result<Expr<T>> {
        self.consume(TokenKind::OpeningParen)?;
        let expr = self.parse_expression()?;
        self.consume(TokenKind::ClosingParen)?;
        Ok(expr)
    }

    /// function
    ///   ::= <func_name>'(' expression ')'
    fn parse_function(&mut self) -> Result<Expr<T>> {
        // the token carries the opening bracket
        let text = &self.cur_token.text;
        let func_name = text.strip_suffix('(').unwrap_or(text).to_string();
        self.consume(TokenKind::Function)?;
        let arg = self.parse_expression()?;
        self.consume(TokenKind::ClosingParen)?;
        Expr::func_from_name(&func_name, arg)
    }

    fn parse_primary(&mut self) -> Result<Expr<T>> {
        match self.cur_token.kind {
            TokenKind::OpeningParen => self.parse_parentheses_expr(),
            TokenKind::Function => self.parse_function(),
            TokenKind::Number => self.parse_real_number(),
            TokenKind::ImaginaryUnit => self.parse_imaginary_unit(),
            TokenKind::Identifier => self.parse_identifier(),
            _ => Err(ExprError::syntax(&self.cur_token, "expected operand")),
        }
    }

    /// operator at the cursor with its precedence, `None` at `)` or end of input
    fn peek_operator(&self) -> Result<Option<(BinOp, OpPrecedence)>> {
        match self.cur_token.kind {
            TokenKind::End | TokenKind::ClosingParen => Ok(None),
            TokenKind::BinOperator => {
                let op = BinOp::from_name(&self.cur_token.text)?;
                Ok(Some((op, op.precedence())))
            }
            _ => Err(ExprError::syntax(
                &self.cur_token,
                "expected binary operator",
            )),
        }
    }

    /// bin_op_rhs
    ///   ::= (<op> primary)*   while <op> binds at least as tight as `min_level`
    fn parse_bin_op_rhs(&mut self, min_level: u8, mut lhs: Expr<T>) -> Result<Expr<T>> {
        while let Some((op, precedence)) = self.peek_operator()? {
            if precedence.level() < min_level {
                break;
            }
            self.advance()?;
            let mut rhs = self.parse_primary()?;
            if let Some((_, next_precedence)) = self.peek_operator()? {
                if precedence < next_precedence {
                    rhs = self.parse_bin_op_rhs(precedence.level() + 1, rhs)?;
                }
            }
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// expression
    ///   ::= primary bin_op_rhs
    fn parse_expression(&mut self) -> Result<Expr<T>> {
        let lhs = self.parse_primary()?;
        self.parse_bin_op_rhs(OpPrecedence::AddSub.level(), lhs)
    }
}
