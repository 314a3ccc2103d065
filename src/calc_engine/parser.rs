//! Recursive-descent evaluation over the token stream.
//!
//! Precedence ladder, loosest binding first:
//! `expr` (+ -) -> `term` (* /) -> `power` (^, right-associative) ->
//! `unary` (sign runs) -> `primary` (number, constant, parens, function
//! call). Unary minus binds tighter than every binary operator, and nested
//! function calls resolve innermost-first by construction of the recursion.

use super::functions;
use super::lexer::Token;
use super::{AngleMode, Failure};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    mode: AngleMode,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, mode: AngleMode) -> Self {
        Parser {
            tokens,
            current: 0,
            mode,
        }
    }

    pub fn parse(&mut self) -> Result<f64, Failure> {
        if self.tokens.is_empty() {
            return Err(Failure::EmptyExpression);
        }
        let value = self.expr()?;
        if self.current < self.tokens.len() {
            return Err(match self.tokens[self.current] {
                Token::RParen => Failure::UnbalancedParentheses,
                _ => Failure::UnexpectedToken,
            });
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// The failure to report when the stream ends where an operand was
    /// required: after an operator it is a trailing operator, otherwise an
    /// opening parenthesis was left unclosed.
    fn unexpected_end(&self) -> Failure {
        match self.tokens.last() {
            Some(Token::Op(_)) => Failure::TrailingOperator,
            _ => Failure::UnbalancedParentheses,
        }
    }

    fn expr(&mut self) -> Result<f64, Failure> {
        let mut left = self.term()?;

        while let Some(&Token::Op(op @ ('+' | '-'))) = self.peek() {
            self.current += 1;
            let right = self.term()?;
            left = finite(if op == '+' { left + right } else { left - right })?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<f64, Failure> {
        let mut left = self.power()?;

        while let Some(&Token::Op(op @ ('*' | '/'))) = self.peek() {
            self.current += 1;
            let right = self.power()?;
            if op == '/' && right == 0.0 {
                return Err(Failure::NonFiniteResult);
            }
            left = finite(if op == '*' { left * right } else { left / right })?;
        }
        Ok(left)
    }

    fn power(&mut self) -> Result<f64, Failure> {
        let left = self.unary()?;

        if let Some(Token::Op('^')) = self.peek() {
            self.current += 1;
            let right = self.power()?;
            return finite(left.powf(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<f64, Failure> {
        let mut sign = 1.0;
        while let Some(&Token::Op(op @ ('+' | '-'))) = self.peek() {
            if op == '-' {
                sign = -sign;
            }
            self.current += 1;
        }
        Ok(sign * self.primary()?)
    }

    fn primary(&mut self) -> Result<f64, Failure> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(self.unexpected_end()),
        };

        match token {
            Token::Number(value) => {
                self.current += 1;
                Ok(value)
            }
            Token::Constant(name) => {
                self.current += 1;
                // The lexer only emits names the table knows.
                functions::constant(name).ok_or(Failure::UnexpectedToken)
            }
            Token::LParen => {
                self.current += 1;
                let value = self.expr()?;
                self.expect_rparen()?;
                Ok(value)
            }
            Token::Function(name) => {
                self.current += 1;
                match self.peek() {
                    Some(Token::LParen) => self.current += 1,
                    Some(_) => return Err(Failure::FunctionSyntax(name)),
                    None => return Err(Failure::FunctionSyntax(name)),
                }
                let argument = self.expr()?;
                self.expect_rparen()?;

                let def = functions::lookup(name).ok_or(Failure::UnexpectedToken)?;
                functions::call(def, argument, self.mode)
            }
            Token::RParen => Err(Failure::UnbalancedParentheses),
            Token::Op(_) => Err(Failure::UnexpectedToken),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), Failure> {
        match self.peek() {
            Some(Token::RParen) => {
                self.current += 1;
                Ok(())
            }
            Some(_) => Err(Failure::UnexpectedToken),
            None => Err(self.unexpected_end()),
        }
    }
}

fn finite(value: f64) -> Result<f64, Failure> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Failure::NonFiniteResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::lexer::tokenize;

    fn eval(expr: &str, mode: AngleMode) -> Result<f64, Failure> {
        Parser::new(tokenize(expr).unwrap(), mode).parse()
    }

    fn eval_deg(expr: &str) -> Result<f64, Failure> {
        eval(expr, AngleMode::Degrees)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn precedence_ladder() {
        assert!(close(eval_deg("2+3*4").unwrap(), 14.0));
        assert!(close(eval_deg("2*3^2").unwrap(), 18.0));
        assert!(close(eval_deg("(2+3)*4").unwrap(), 20.0));
        assert!(close(eval_deg("10-4-3").unwrap(), 3.0));
        assert!(close(eval_deg("24/4/2").unwrap(), 3.0));
    }

    #[test]
    fn power_is_right_associative() {
        assert!(close(eval_deg("2^3^2").unwrap(), 512.0));
    }

    #[test]
    fn unary_minus_binds_tighter_than_binary_operators() {
        assert!(close(eval_deg("-2^2").unwrap(), 4.0));
        assert!(close(eval_deg("3*-2").unwrap(), -6.0));
        assert!(close(eval_deg("--5").unwrap(), 5.0));
    }

    #[test]
    fn function_requires_parentheses() {
        assert_eq!(eval_deg("sin 30"), Err(Failure::FunctionSyntax("sin")));
        assert_eq!(eval_deg("sin"), Err(Failure::FunctionSyntax("sin")));
    }

    #[test]
    fn missing_close_paren() {
        assert_eq!(eval_deg("(1+2"), Err(Failure::UnbalancedParentheses));
        assert_eq!(eval_deg("sin(30"), Err(Failure::UnbalancedParentheses));
    }

    #[test]
    fn stray_close_paren() {
        assert_eq!(eval_deg("1+2)"), Err(Failure::UnbalancedParentheses));
        assert_eq!(eval_deg(")"), Err(Failure::UnbalancedParentheses));
    }

    #[test]
    fn trailing_operator() {
        assert_eq!(eval_deg("1+"), Err(Failure::TrailingOperator));
        assert_eq!(eval_deg("2*"), Err(Failure::TrailingOperator));
    }

    #[test]
    fn adjacent_values_are_rejected() {
        assert_eq!(eval_deg("2 3"), Err(Failure::UnexpectedToken));
        assert_eq!(eval_deg("2 pi"), Err(Failure::UnexpectedToken));
    }

    #[test]
    fn surviving_percent_is_a_parse_error() {
        // the normalizer rewrites <number>% before tokens are built; a
        // percent that reaches the parser has no production
        assert_eq!(eval_deg("%5"), Err(Failure::UnexpectedToken));
    }

    #[test]
    fn constants_participate_in_arithmetic() {
        assert!(close(
            eval("pi/2", AngleMode::Radians).unwrap(),
            std::f64::consts::FRAC_PI_2
        ));
        assert!(close(eval_deg("e^0").unwrap(), 1.0));
    }

    #[test]
    fn non_finite_intermediates_are_caught() {
        assert_eq!(eval_deg("1/0"), Err(Failure::NonFiniteResult));
        assert_eq!(eval_deg("0/0"), Err(Failure::NonFiniteResult));
        assert_eq!(eval_deg("10^400"), Err(Failure::NonFiniteResult));
        assert_eq!(eval_deg("10^400-10^400"), Err(Failure::NonFiniteResult));
    }

    #[test]
    fn nesting_resolves_innermost_first() {
        let expected = 1.0_f64.to_radians().sin();
        assert!(close(eval_deg("sin(cos(0))").unwrap(), expected));
    }
}
