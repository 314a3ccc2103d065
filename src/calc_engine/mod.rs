//! Calculator expression engine.
//!
//! The pipeline is normalize -> tokenize -> parse/evaluate -> format, and
//! every step is a pure function: the caller passes the expression and the
//! angle mode in, and gets a finite value or a [`Failure`] back. Nothing is
//! cached or shared between calls, so concurrent evaluations need no
//! coordination.

mod angle;
mod format;
mod functions;
mod lexer;
mod normalize;
mod parser;
mod validate;

pub use format::format_for_display;

use thiserror::Error;

/// How trigonometric arguments and results are interpreted.
///
/// Passed on every call; the engine keeps no memory of the last mode used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

/// Why an evaluation could not produce a number.
///
/// These are ordinary values, never panics: a malformed expression is the
/// common case while the user is mid-typing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error("nothing to evaluate")]
    EmptyExpression,
    #[error("unrecognized character: '{0}'")]
    UnrecognizedCharacter(char),
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("expression ends with an operator")]
    TrailingOperator,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("function '{0}' requires parentheses")]
    FunctionSyntax(&'static str),
    #[error("{function}({argument}) is outside the function's domain")]
    DomainError {
        function: &'static str,
        argument: f64,
    },
    #[error("result is not a finite number")]
    NonFiniteResult,
}

/// Evaluates `expression` under `mode`, collapsing every failure to `None`.
///
/// This is the entry point the UI calls on each keystroke: `None` means
/// "no live result", never a crash.
pub fn evaluate(expression: &str, mode: AngleMode) -> Option<f64> {
    evaluate_checked(expression, mode).ok()
}

/// Same pipeline as [`evaluate`], retaining the specific failure kind.
pub fn evaluate_checked(expression: &str, mode: AngleMode) -> Result<f64, Failure> {
    let normalized = normalize::normalize(expression);
    let tokens = lexer::tokenize(&normalized)?;
    let value = parser::Parser::new(tokens, mode).parse()?;
    if !value.is_finite() {
        return Err(Failure::NonFiniteResult);
    }
    Ok(value)
}

/// Cheap syntactic pre-check used to decide whether evaluating is worth
/// attempting at all. It under-rejects: anything the evaluator accepts
/// passes here, but passing here does not guarantee evaluation succeeds.
pub fn is_valid_expression(expression: &str) -> bool {
    validate::is_syntactically_plausible(&normalize::normalize(expression))
}

/// Direction for [`calculate_percentage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentOp {
    Add,
    Subtract,
}

/// `value` plus or minus `percentage` percent of itself. Standalone helper,
/// not part of the parsing pipeline.
pub fn calculate_percentage(value: f64, percentage: f64, op: PercentOp) -> f64 {
    let share = value * percentage / 100.0;
    match op {
        PercentOp::Add => value + share,
        PercentOp::Subtract => value - share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn known_values() {
        assert!(close(evaluate("sin(30)", AngleMode::Degrees).unwrap(), 0.5));
        assert!(close(evaluate("cos(60)", AngleMode::Degrees).unwrap(), 0.5));
        assert!(close(evaluate("sqrt(16)", AngleMode::Degrees).unwrap(), 4.0));
        assert!(close(evaluate("2^10", AngleMode::Degrees).unwrap(), 1024.0));
        assert!(close(evaluate("log(100)", AngleMode::Degrees).unwrap(), 2.0));
        assert!(close(evaluate("ln(1)", AngleMode::Degrees).unwrap(), 0.0));
        assert!(close(evaluate("5%", AngleMode::Degrees).unwrap(), 0.05));
        assert!(close(evaluate("asin(1)", AngleMode::Degrees).unwrap(), 90.0));
        assert!(close(evaluate("cbrt(-8)", AngleMode::Degrees).unwrap(), -2.0));
    }

    #[test]
    fn radians_mode_skips_conversion() {
        let pi = std::f64::consts::PI;
        assert!(close(
            evaluate("sin(pi/2)", AngleMode::Radians).unwrap(),
            1.0
        ));
        assert!(close(
            evaluate("asin(1)", AngleMode::Radians).unwrap(),
            pi / 2.0
        ));
    }

    #[test]
    fn nested_functions_evaluate_innermost_first() {
        // cos(0) = 1 in degrees, then sin(1 degree)
        let expected = 1.0_f64.to_radians().sin();
        assert!(close(
            evaluate("sin(cos(0))", AngleMode::Degrees).unwrap(),
            expected
        ));
    }

    #[test]
    fn domain_violations_are_rejected() {
        for expr in ["sqrt(-4)", "log(0)", "ln(0)", "asin(2)", "acos(-1.5)"] {
            match evaluate_checked(expr, AngleMode::Degrees) {
                Err(Failure::DomainError { .. }) => {}
                other => panic!("{expr}: expected DomainError, got {other:?}"),
            }
        }
    }

    #[test]
    fn division_by_zero_never_leaks_infinity() {
        assert_eq!(
            evaluate_checked("5/0", AngleMode::Degrees),
            Err(Failure::NonFiniteResult)
        );
        assert_eq!(evaluate("5/0", AngleMode::Degrees), None);
    }

    #[test]
    fn empty_input_is_a_distinct_failure() {
        assert_eq!(
            evaluate_checked("", AngleMode::Degrees),
            Err(Failure::EmptyExpression)
        );
        assert_eq!(
            evaluate_checked("   ", AngleMode::Degrees),
            Err(Failure::EmptyExpression)
        );
    }

    #[test]
    fn evaluation_is_pure() {
        for _ in 0..3 {
            assert_eq!(
                evaluate_checked("sin(30)+2^10", AngleMode::Degrees),
                evaluate_checked("sin(30)+2^10", AngleMode::Degrees)
            );
        }
    }

    #[test]
    fn typing_prefixes_never_panics() {
        let full = "sin(cos(30))*2^10+5%-(3.5/7)";
        let chars: Vec<char> = full.chars().collect();
        for n in 0..=chars.len() {
            let prefix: String = chars[..n].iter().collect();
            let _ = evaluate(&prefix, AngleMode::Degrees);
            let _ = is_valid_expression(&prefix);
        }
        assert!(evaluate(full, AngleMode::Degrees).is_some());
    }

    #[test]
    fn percentage_helper() {
        assert!(close(calculate_percentage(200.0, 10.0, PercentOp::Add), 220.0));
        assert!(close(
            calculate_percentage(200.0, 10.0, PercentOp::Subtract),
            180.0
        ));
    }

    #[test]
    fn validator_wrapper_accepts_percent_suffix() {
        assert!(is_valid_expression("5%"));
        assert!(is_valid_expression("12.5 %"));
        assert!(!is_valid_expression("5+"));
        assert!(!is_valid_expression("(1+2"));
    }
}
